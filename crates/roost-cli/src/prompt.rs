//! Interactive collector built on `dialoguer`.
//!
//! Walks the [`Wizard`] batch by batch. Text answers are validated as they
//! are typed; a batch the wizard still rejects is asked again from the top.

use std::io;

use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};
use tracing::{debug, instrument};

use roost_core::{
    domain::{Answer, Question, QuestionBatch, QuestionKind, RawAnswers, Step, Wizard},
    error::RoostError,
};

use crate::{
    error::{CliError, CliResult},
    output::OutputManager,
};

pub struct Prompter<'a> {
    theme: ColorfulTheme,
    output: &'a OutputManager,
}

impl<'a> Prompter<'a> {
    pub fn new(output: &'a OutputManager) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            output,
        }
    }

    /// Ask every batch until the wizard completes.
    #[instrument(skip_all)]
    pub fn run(&self, wizard: &mut Wizard) -> CliResult<RawAnswers> {
        loop {
            let batch = match wizard.next() {
                Step::Complete(answers) => return Ok(answers),
                Step::Ask(batch) => batch,
            };
            debug!(stage = ?batch.stage, questions = batch.len(), "asking");

            loop {
                let answers = self.ask_batch(&batch)?;
                match wizard.submit(answers) {
                    Ok(()) => break,
                    Err(e) if e.is_recoverable_by_reprompt() => {
                        self.output.warning(&e.to_string())?;
                    }
                    Err(e) => return Err(RoostError::from(e).into()),
                }
            }
        }
    }

    fn ask_batch(&self, batch: &QuestionBatch) -> CliResult<RawAnswers> {
        let mut partial = RawAnswers::new();
        for question in &batch.questions {
            if !batch.is_active(question, &partial) {
                continue;
            }
            partial.insert(question.id, self.ask(question)?);
        }
        Ok(partial)
    }

    fn ask(&self, question: &Question) -> CliResult<Answer> {
        let answer = match &question.kind {
            QuestionKind::Input => {
                let mut input = Input::<String>::with_theme(&self.theme)
                    .with_prompt(question.message.as_str())
                    .allow_empty(true);
                if let Some(default) = question.default_text().filter(|d| !d.is_empty()) {
                    input = input.default(default);
                }
                let checked = question.clone();
                input
                    .validate_with(move |text: &String| {
                        checked.validate(text).map_err(|e| e.to_string())
                    })
                    .interact_text()
                    .map(Answer::Text)
            }
            QuestionKind::Confirm => Confirm::with_theme(&self.theme)
                .with_prompt(question.message.as_str())
                .default(question.default_flag().unwrap_or(false))
                .interact()
                .map(Answer::Bool),
            QuestionKind::Select(choices) => {
                let default = question
                    .default_text()
                    .and_then(|d| choices.iter().position(|c| c.eq_ignore_ascii_case(&d)))
                    .unwrap_or(0);
                Select::with_theme(&self.theme)
                    .with_prompt(question.message.as_str())
                    .items(choices.as_slice())
                    .default(default)
                    .interact()
                    .map(|index| Answer::Text(choices[index].to_string()))
            }
            QuestionKind::Password => Password::with_theme(&self.theme)
                .with_prompt(question.message.as_str())
                .allow_empty_password(true)
                .interact()
                .map(Answer::Text),
        };
        answer.map_err(prompt_error)
    }
}

/// A single yes/no question outside the wizard.
pub fn confirm(message: &str) -> CliResult<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(true)
        .interact()
        .map_err(prompt_error)
}

fn prompt_error(err: dialoguer::Error) -> CliError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => CliError::Cancelled,
        other => CliError::Terminal {
            message: other.to_string(),
        },
    }
}

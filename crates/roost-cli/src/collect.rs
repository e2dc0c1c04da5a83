//! Turning CLI input into a complete set of answers.
//!
//! Three collectors feed the same [`Wizard`]:
//!
//! | Source               | Collector                          |
//! |----------------------|------------------------------------|
//! | `--standard-install` | [`Wizard::standard_install`]       |
//! | `--answers FILE`     | [`Wizard::replay`] over the file   |
//! | neither              | interactive prompts (`dialoguer`)  |

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use roost_core::{
    domain::{Defaults, RawAnswers, Step, Wizard},
    error::RoostError,
};

use crate::{
    cli::AnswerSourceArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Where the answers for one run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSource {
    /// Standard configuration, optionally in a named directory.
    Standard(Option<String>),
    /// Prepared answers in a JSON file.
    File(PathBuf),
    /// Ask on the terminal.
    Interactive,
}

impl From<&AnswerSourceArgs> for AnswerSource {
    fn from(args: &AnswerSourceArgs) -> Self {
        match (&args.standard_install, &args.answers) {
            (Some(name), _) => Self::Standard(name.clone()),
            (None, Some(path)) => Self::File(path.clone()),
            (None, None) => Self::Interactive,
        }
    }
}

impl AnswerSource {
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive)
    }
}

/// Run the collector for `source` to completion.
#[instrument(skip(defaults, output))]
pub fn collect(
    source: &AnswerSource,
    defaults: &Defaults,
    output: &OutputManager,
) -> CliResult<RawAnswers> {
    match source {
        AnswerSource::Standard(dirname) => {
            let mut wizard = Wizard::standard_install(defaults, dirname.as_deref());
            match wizard.next() {
                Step::Complete(answers) => Ok(answers),
                Step::Ask(batch) => Err(RoostError::Internal {
                    message: format!("standard install stopped at {:?}", batch.stage),
                }
                .into()),
            }
        }
        AnswerSource::File(path) => {
            let answers = read_answers_file(path)?;
            debug!(count = answers.len(), "replaying answers file");
            Ok(Wizard::replay(defaults, &answers)?)
        }
        AnswerSource::Interactive => prompt_all(defaults, output),
    }
}

/// Parse a JSON answers file.
pub fn read_answers_file(path: &Path) -> CliResult<RawAnswers> {
    let answers_error = |reason: String| CliError::AnswersFile {
        path: path.to_path_buf(),
        reason,
    };
    let text = fs::read_to_string(path).map_err(|e| answers_error(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| answers_error(e.to_string()))
}

/// Ask a yes/no question when prompting is possible; otherwise assume yes.
pub fn confirm(message: &str) -> CliResult<bool> {
    #[cfg(feature = "interactive")]
    {
        if std::io::stdin().is_terminal() {
            return crate::prompt::confirm(message);
        }
    }
    let _ = message;
    Ok(true)
}

fn prompt_all(defaults: &Defaults, output: &OutputManager) -> CliResult<RawAnswers> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "stdin is not a terminal, so roost cannot ask its questions; \
                      pass --answers FILE or --standard-install"
                .into(),
            source: None,
        });
    }

    #[cfg(feature = "interactive")]
    {
        crate::prompt::Prompter::new(output).run(&mut Wizard::new(defaults))
    }

    #[cfg(not(feature = "interactive"))]
    {
        let _ = (defaults, output);
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat};
    use crate::config::Settings;
    use roost_core::domain::QuestionId;

    fn output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        OutputManager::new(&args, &Settings::default())
    }

    #[test]
    fn source_follows_flags() {
        let standard = AnswerSourceArgs {
            standard_install: Some(Some("blog".into())),
            answers: None,
        };
        assert_eq!(
            AnswerSource::from(&standard),
            AnswerSource::Standard(Some("blog".into()))
        );
        assert_eq!(
            AnswerSource::from(&AnswerSourceArgs::default()),
            AnswerSource::Interactive
        );
    }

    #[test]
    fn standard_install_names_the_directory() {
        let answers = collect(
            &AnswerSource::Standard(Some("blog".into())),
            &Defaults::default(),
            &output(),
        )
        .unwrap();
        assert_eq!(answers.text(QuestionId::Dirname).unwrap().as_deref(), Some("blog"));
        assert_eq!(answers.flag(QuestionId::CreateDir).unwrap(), Some(true));
    }

    #[test]
    fn answers_file_is_replayed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        fs::write(&path, r#"{ "appName": "Blog", "createDir": false }"#).unwrap();

        let answers = collect(
            &AnswerSource::File(path),
            &Defaults::default(),
            &output(),
        )
        .unwrap();
        assert_eq!(answers.text(QuestionId::AppName).unwrap().as_deref(), Some("Blog"));
        assert_eq!(answers.flag(QuestionId::CreateDir).unwrap(), Some(false));
    }

    #[test]
    fn unknown_question_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        fs::write(&path, r#"{ "favouriteColour": "green" }"#).unwrap();
        assert!(matches!(
            read_answers_file(&path),
            Err(CliError::AnswersFile { .. })
        ));
    }

    #[test]
    fn missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_answers_file(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn invalid_answer_in_file_is_a_user_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        fs::write(&path, r#"{ "configMode": "Customize", "httpPort": "99999" }"#).unwrap();
        let err = collect(&AnswerSource::File(path), &Defaults::default(), &output())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

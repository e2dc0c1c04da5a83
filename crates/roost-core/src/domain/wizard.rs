//! The questionnaire as an explicit state machine.
//!
//! ```text
//! Start → Dir → Mode → Customize → Certificates → Https → Statics → Mvc → ViewEngine* → Done
//! ```
//!
//! [`Wizard::next`] hands out the next [`QuestionBatch`] (skipping stages that
//! do not apply to the answers so far) and [`Wizard::submit`] validates a
//! batch's answers and advances. The wizard never performs I/O; a collector
//! (interactive prompter or answers file) drives it.

use crate::domain::entities::{Answer, Defaults, MvcPaths, RawAnswers, RelativePath};
use crate::domain::error::{DomainError, ValidationError};
use crate::domain::planner::check_mvc_layout;
use crate::domain::resolver::{
    MAX_VIEW_ENGINES, parse_port, parse_view_engine, validate_country_code,
};
use crate::domain::slug::slugify;
use crate::domain::value_objects::{ConfigMode, CssCompiler, JsCompiler, KeyFormat, QuestionId};

// ── Questions ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Input,
    Confirm,
    Select(Vec<&'static str>),
    Password,
}

/// When a question is shown, evaluated against earlier answers (this batch
/// included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    IfTrue(QuestionId),
    IfFalse(QuestionId),
    IfEquals(QuestionId, &'static str),
    /// The answer, or failing that the question's default, is non-empty.
    IfGiven(QuestionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    None,
    /// Port in 1–65535; the payload names the field in messages.
    Port(&'static str),
    CountryCode,
    /// Must be answered unless the question has a default.
    Required,
    /// Relative path that stays inside the project.
    Path,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub kind: QuestionKind,
    pub message: String,
    pub default: Option<Answer>,
    pub conditions: Vec<Condition>,
    pub validator: Validator,
}

impl Question {
    fn new(id: QuestionId, kind: QuestionKind, message: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            message: message.into(),
            default: None,
            conditions: Vec::new(),
            validator: Validator::None,
        }
    }

    fn input(id: QuestionId, message: impl Into<String>) -> Self {
        Self::new(id, QuestionKind::Input, message)
    }

    fn confirm(id: QuestionId, message: impl Into<String>, default: bool) -> Self {
        Self::new(id, QuestionKind::Confirm, message).with_default(default)
    }

    fn select(id: QuestionId, message: impl Into<String>, choices: Vec<&'static str>) -> Self {
        Self::new(id, QuestionKind::Select(choices), message)
    }

    fn with_default(mut self, default: impl Into<Answer>) -> Self {
        self.default = Some(default.into());
        self
    }

    fn with_optional_default(self, default: Option<&String>) -> Self {
        match default {
            Some(value) => self.with_default(value.clone()),
            None => self,
        }
    }

    fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    fn validated(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Default as display text.
    pub fn default_text(&self) -> Option<String> {
        match &self.default {
            Some(Answer::Text(s)) => Some(s.clone()),
            Some(Answer::Number(n)) => Some(n.to_string()),
            Some(Answer::Bool(b)) => Some(b.to_string()),
            Some(Answer::List(items)) => Some(items.join(", ")),
            None => None,
        }
    }

    pub fn default_flag(&self) -> Option<bool> {
        match self.default {
            Some(Answer::Bool(b)) => Some(b),
            _ => None,
        }
    }

    /// Validate typed-in text. Empty input means "take the default" and only
    /// fails for required questions without one.
    pub fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let input = input.trim();
        match self.validator {
            Validator::Port(_) | Validator::None | Validator::Path if input.is_empty() => Ok(()),
            Validator::Port(field) => parse_port(field, input).map(|_| ()),
            Validator::CountryCode => validate_country_code(input),
            Validator::Path => RelativePath::try_new(self.id.as_str(), input).map(|_| ()),
            Validator::Required if input.is_empty() && !self.has_default() => {
                Err(ValidationError::Required {
                    question: self.id.as_str(),
                })
            }
            Validator::Required | Validator::None => self.validate_choice(input),
        }
    }

    fn has_default(&self) -> bool {
        self.default_text().is_some_and(|d| !d.trim().is_empty())
    }

    fn validate_choice(&self, input: &str) -> Result<(), ValidationError> {
        let QuestionKind::Select(choices) = &self.kind else {
            return Ok(());
        };
        if input.is_empty() || choices.iter().any(|c| c.eq_ignore_ascii_case(input)) {
            Ok(())
        } else {
            Err(ValidationError::InvalidChoice {
                question: self.id.as_str(),
                input: input.to_string(),
                choices: choices.join(", "),
            })
        }
    }

    /// Validate an answer of any shape against this question.
    pub fn check(&self, answer: &Answer) -> Result<(), ValidationError> {
        let wrong = |expected| ValidationError::WrongAnswerType {
            question: self.id.as_str(),
            expected,
        };
        match (answer, &self.kind) {
            (Answer::Bool(_), QuestionKind::Confirm) => Ok(()),
            (Answer::Bool(_), _) => Err(wrong("a string")),
            (Answer::List(_), _) => Err(wrong("a single value")),
            (Answer::Text(s), QuestionKind::Confirm) => {
                match s.trim().to_ascii_lowercase().as_str() {
                    "" | "true" | "false" | "yes" | "no" | "y" | "n" => Ok(()),
                    _ => Err(wrong("yes or no")),
                }
            }
            (Answer::Number(_), QuestionKind::Confirm) => Err(wrong("yes or no")),
            (Answer::Text(s), _) => self.validate(s),
            (Answer::Number(n), _) => self.validate(&n.to_string()),
        }
    }
}

/// Questions asked together, plus the answers they are conditioned on.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBatch {
    pub stage: Stage,
    pub questions: Vec<Question>,
    context: RawAnswers,
}

impl QuestionBatch {
    /// Whether `question` should be shown given the answers collected so far
    /// in this batch.
    pub fn is_active(&self, question: &Question, partial: &RawAnswers) -> bool {
        let flag = |id| {
            partial
                .flag(id)
                .ok()
                .flatten()
                .or_else(|| self.context.flag(id).ok().flatten())
        };
        let text = |id| {
            partial
                .text(id)
                .ok()
                .flatten()
                .or_else(|| self.context.text(id).ok().flatten())
        };
        let text_or_default = |id| {
            text(id).or_else(|| self.question(id).and_then(Question::default_text))
        };
        question.conditions.iter().all(|condition| match *condition {
            Condition::IfTrue(id) => flag(id) == Some(true),
            Condition::IfFalse(id) => flag(id) != Some(true),
            Condition::IfEquals(id, expected) => {
                text_or_default(id).is_some_and(|v| v.eq_ignore_ascii_case(expected))
            }
            Condition::IfGiven(id) => text_or_default(id).is_some_and(|v| !v.trim().is_empty()),
        })
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

// ── Stages ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Dir,
    Mode,
    Customize,
    Certificates,
    Https,
    Statics,
    Mvc,
    ViewEngine,
    Done,
}

impl Stage {
    fn following(self) -> Self {
        match self {
            Self::Start => Self::Dir,
            Self::Dir => Self::Mode,
            Self::Mode => Self::Customize,
            Self::Customize => Self::Certificates,
            Self::Certificates => Self::Https,
            Self::Https => Self::Statics,
            Self::Statics => Self::Mvc,
            Self::Mvc => Self::ViewEngine,
            Self::ViewEngine | Self::Done => Self::Done,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Ask(QuestionBatch),
    Complete(RawAnswers),
}

// ── Wizard ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Wizard {
    stage: Stage,
    answers: RawAnswers,
    view_engines: Vec<String>,
    defaults: Defaults,
}

impl Wizard {
    pub fn new(defaults: &Defaults) -> Self {
        Self {
            stage: Stage::Start,
            answers: RawAnswers::new(),
            view_engines: Vec::new(),
            defaults: defaults.clone(),
        }
    }

    /// A wizard that asks nothing: standard configuration in a new directory
    /// named `dirname`, or after the package name when `None` or empty.
    pub fn standard_install(defaults: &Defaults, dirname: Option<&str>) -> Self {
        let mut answers = RawAnswers::new()
            .with(QuestionId::ConfigMode, ConfigMode::Standard.as_str())
            .with(QuestionId::CreateDir, true);
        if let Some(name) = dirname.map(str::trim).filter(|n| !n.is_empty()) {
            answers.insert(QuestionId::Dirname, name);
        }
        Self {
            stage: Stage::Done,
            answers,
            view_engines: Vec::new(),
            defaults: defaults.clone(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Next batch to ask, or the collected answers once every stage ran.
    pub fn next(&mut self) -> Step {
        loop {
            if self.stage == Stage::Done {
                return Step::Complete(self.collected());
            }
            match self.batch(self.stage) {
                Some(batch) => return Step::Ask(batch),
                None => self.stage = self.stage.following(),
            }
        }
    }

    /// Validate and record answers for the current batch, then advance.
    ///
    /// Unanswered questions keep their defaults. Answers to questions whose
    /// condition is false are dropped.
    pub fn submit(&mut self, answers: RawAnswers) -> Result<(), DomainError> {
        if self.stage == Stage::Done {
            return Err(DomainError::WizardComplete);
        }
        let Some(batch) = self.batch(self.stage) else {
            self.stage = self.stage.following();
            return Ok(());
        };

        for (id, _) in answers.iter() {
            if batch.question(id).is_none() {
                return Err(DomainError::UnexpectedAnswer {
                    question: id.as_str().to_string(),
                });
            }
        }

        let mut accepted = RawAnswers::new();
        for question in &batch.questions {
            if !batch.is_active(question, &answers) {
                continue;
            }
            match answers.get(question.id) {
                Some(answer) => {
                    question.check(answer)?;
                    accepted.insert(question.id, answer.clone());
                }
                None if matches!(
                    question.validator,
                    Validator::Required | Validator::CountryCode
                ) && !question.has_default() =>
                {
                    return Err(ValidationError::Required {
                        question: question.id.as_str(),
                    }
                    .into());
                }
                None => {}
            }
        }

        match self.stage {
            Stage::ViewEngine => return self.record_view_engine(&accepted),
            Stage::Mvc => self.check_layout(&accepted)?,
            _ => {}
        }

        self.answers.extend(accepted);
        self.stage = self.stage.following();
        Ok(())
    }

    fn record_view_engine(&mut self, accepted: &RawAnswers) -> Result<(), DomainError> {
        let name = accepted
            .text(QuestionId::TemplatingEngineName)?
            .unwrap_or_else(|| self.defaults.templating_engine_name.clone());
        let extension = accepted
            .text(QuestionId::TemplatingExtension)?
            .unwrap_or_else(|| self.defaults.templating_extension.clone());
        let extension = extension.trim_start_matches('.').to_string();

        let taken = self.view_engines.iter().any(|spec| {
            spec.split_once(':')
                .is_some_and(|(ext, _)| ext.trim() == extension)
        });
        if taken {
            return Err(ValidationError::DuplicateViewEngineExtension { extension }.into());
        }
        self.view_engines.push(format!("{extension}: {name}"));

        let another = accepted
            .flag(QuestionId::AdditionalTemplatingEngines)?
            .unwrap_or(false);
        if !another || self.view_engines.len() >= MAX_VIEW_ENGINES {
            self.stage = Stage::Done;
        }
        Ok(())
    }

    /// The three MVC directories, answered or defaulted, must not collide
    /// with each other or with generated files.
    fn check_layout(&self, accepted: &RawAnswers) -> Result<(), DomainError> {
        let d = &self.defaults;
        let path = |id: QuestionId, default: &str| -> Result<RelativePath, ValidationError> {
            let raw = accepted.text(id)?.unwrap_or_else(|| default.to_string());
            RelativePath::try_new(id.as_str(), raw)
        };
        check_mvc_layout(&MvcPaths {
            models_path: path(QuestionId::ModelsPath, &d.models_path)?,
            views_path: path(QuestionId::ViewsPath, &d.views_path)?,
            controllers_path: path(QuestionId::ControllersPath, &d.controllers_path)?,
        })?;
        Ok(())
    }

    fn collected(&self) -> RawAnswers {
        let mut answers = self.answers.clone();
        if !self.view_engines.is_empty() {
            answers.insert(QuestionId::ViewEngines, self.view_engines.clone());
        }
        answers
    }

    fn flag(&self, id: QuestionId, default: bool) -> bool {
        self.answers.flag(id).ok().flatten().unwrap_or(default)
    }

    fn customizing(&self) -> bool {
        matches!(
            self.answers.text(QuestionId::ConfigMode),
            Ok(Some(mode)) if mode.parse::<ConfigMode>() == Ok(ConfigMode::Customize)
        )
    }

    fn https_enabled(&self) -> bool {
        self.customizing() && self.flag(QuestionId::EnableHttps, self.defaults.https.enable)
    }

    fn batch(&self, stage: Stage) -> Option<QuestionBatch> {
        let d = &self.defaults;
        let questions = match stage {
            Stage::Start => vec![
                Question::input(QuestionId::AppName, "What would you like to name your app?")
                    .with_default(d.app_name.clone()),
                Question::confirm(
                    QuestionId::CreateDir,
                    "Create a new directory for the app?",
                    d.create_dir,
                ),
            ],
            Stage::Dir if self.flag(QuestionId::CreateDir, d.create_dir) => {
                let app_name = self
                    .answers
                    .text(QuestionId::AppName)
                    .ok()
                    .flatten()
                    .unwrap_or_else(|| d.app_name.clone());
                vec![
                    Question::input(QuestionId::Dirname, "Directory name")
                        .with_default(slugify(&app_name))
                        .validated(Validator::Path),
                ]
            }
            Stage::Mode => vec![
                Question::select(
                    QuestionId::ConfigMode,
                    "Generate a standard config or customize it now?",
                    ConfigMode::ALL.map(|m| m.as_str()).to_vec(),
                )
                .with_default(ConfigMode::Standard.as_str()),
            ],
            Stage::Customize if self.customizing() => vec![
                Question::confirm(QuestionId::EnableHttps, "Use HTTPS?", d.https.enable),
                Question::confirm(
                    QuestionId::HttpsOnly,
                    "Use HTTPS only (disable plain HTTP)?",
                    d.https.https_only,
                )
                .when(Condition::IfTrue(QuestionId::EnableHttps)),
                Question::input(QuestionId::HttpPort, "HTTP port the app will listen on:")
                    .with_default(d.http_port.to_string())
                    .when(Condition::IfFalse(QuestionId::HttpsOnly))
                    .validated(Validator::Port("HTTP port")),
            ],
            Stage::Certificates if self.https_enabled() => {
                let generate = Condition::IfTrue(QuestionId::GenerateSsl);
                let subject = &d.subject;
                vec![
                    Question::confirm(QuestionId::GenerateSsl, "Generate SSL certs now?", false),
                    Question::input(
                        QuestionId::CommonName,
                        "Public domain name of the website (e.g. www.example.com)",
                    )
                    .when(generate)
                    .validated(Validator::Required),
                    Question::input(
                        QuestionId::CountryName,
                        "Two-letter country code (e.g. US, CA)",
                    )
                    .when(generate)
                    .validated(Validator::CountryCode),
                    Question::input(QuestionId::StateName, "State or province, if applicable")
                        .with_default(subject.state_name.clone())
                        .when(generate),
                    Question::input(QuestionId::LocalityName, "City")
                        .with_default(subject.locality_name.clone())
                        .when(generate),
                    Question::input(
                        QuestionId::OrganizationName,
                        "Legal name of the organization, if applicable",
                    )
                    .with_default(subject.organization_name.clone())
                    .when(generate),
                    Question::input(
                        QuestionId::OrganizationalUnit,
                        "Organizational unit, if applicable (e.g. Internet Sales)",
                    )
                    .with_default(subject.organizational_unit.clone())
                    .when(generate),
                ]
            }
            Stage::Https if self.https_enabled() => {
                let no_cert = Condition::IfFalse(QuestionId::GenerateSsl);
                vec![
                    Question::input(QuestionId::HttpsPort, "HTTPS port the app will listen on:")
                        .with_default(d.https.port.to_string())
                        .validated(Validator::Port("HTTPS port")),
                    Question::select(
                        QuestionId::KeyFormat,
                        "Use .pfx or .cert for SSL connections?",
                        KeyFormat::ALL.map(|k| k.as_str()).to_vec(),
                    )
                    .with_default(d.https.key_format.as_str())
                    .when(no_cert),
                    Question::input(
                        QuestionId::KeyPath,
                        "Path to the key file (the .pfx archive, or the private key)",
                    )
                    .with_optional_default(d.https.key_path.as_ref())
                    .when(no_cert),
                    Question::input(QuestionId::CertPath, "Path to the certificate file")
                        .with_optional_default(d.https.cert_path.as_ref())
                        .when(no_cert)
                        .when(Condition::IfEquals(QuestionId::KeyFormat, ".cert"))
                        .when(Condition::IfGiven(QuestionId::KeyPath))
                        .validated(Validator::Required),
                    Question::new(
                        QuestionId::Passphrase,
                        QuestionKind::Password,
                        "Passphrase for the SSL cert (optional):",
                    ),
                    Question::input(
                        QuestionId::Ca,
                        "Certificate authority file to match client certificates against (optional):",
                    )
                    .with_optional_default(d.https.ca.as_ref()),
                    Question::confirm(
                        QuestionId::RequestCert,
                        "Request and verify a client certificate?",
                        d.https.request_cert,
                    ),
                    Question::confirm(
                        QuestionId::RejectUnauthorized,
                        "Reject clients that fail CA authorization?",
                        d.https.reject_unauthorized,
                    ),
                ]
            }
            Stage::Statics if self.customizing() => vec![
                Question::select(
                    QuestionId::CssCompiler,
                    "Which CSS preprocessor would you like to use?",
                    CssCompiler::ALL.map(|c| c.label()).to_vec(),
                )
                .with_default(d.default_css_compiler.label()),
                Question::select(
                    QuestionId::JsCompiler,
                    "Which JS compiler would you like to use?",
                    JsCompiler::ALL.map(|c| c.label()).to_vec(),
                )
                .with_default(d.default_js_compiler.label()),
            ],
            Stage::Mvc if self.customizing() => vec![
                Question::input(QuestionId::ModelsPath, "Directory for data model files:")
                    .with_default(d.models_path.clone())
                    .validated(Validator::Path),
                Question::input(QuestionId::ViewsPath, "Directory for view (HTML template) files:")
                    .with_default(d.views_path.clone())
                    .validated(Validator::Path),
                Question::input(
                    QuestionId::ControllersPath,
                    "Directory for controller (route) files:",
                )
                .with_default(d.controllers_path.clone())
                .validated(Validator::Path),
                Question::confirm(
                    QuestionId::TemplatingEngine,
                    "Use an HTML templating engine?",
                    d.templating_engine,
                ),
            ],
            Stage::ViewEngine
                if self.customizing()
                    && self.flag(QuestionId::TemplatingEngine, d.templating_engine) =>
            {
                let mut questions = vec![
                    Question::input(
                        QuestionId::TemplatingEngineName,
                        "Templating engine to use (npm module name):",
                    )
                    .with_default(d.templating_engine_name.clone()),
                    Question::input(
                        QuestionId::TemplatingExtension,
                        "File extension for this engine:",
                    )
                    .with_default(d.templating_extension.clone()),
                ];
                if self.view_engines.len() + 1 < MAX_VIEW_ENGINES {
                    questions.push(Question::confirm(
                        QuestionId::AdditionalTemplatingEngines,
                        "Support an additional templating engine?",
                        false,
                    ));
                }
                questions
            }
            _ => return None,
        };
        Some(QuestionBatch {
            stage,
            questions,
            context: self.answers.clone(),
        })
    }

    /// Drive a fresh wizard with prepared answers, as an answers file does.
    ///
    /// Each batch takes the matching entries from `answers`; a `viewEngines`
    /// list is fed through the repeatable engine stage one entry at a time.
    pub fn replay(defaults: &Defaults, answers: &RawAnswers) -> Result<RawAnswers, DomainError> {
        let mut wizard = Self::new(defaults);
        let mut engines = answers.list(QuestionId::ViewEngines)?.unwrap_or_default();
        if engines.len() > MAX_VIEW_ENGINES {
            return Err(ValidationError::TooManyViewEngines {
                max: MAX_VIEW_ENGINES,
            }
            .into());
        }
        engines.reverse();

        loop {
            let batch = match wizard.next() {
                Step::Complete(collected) => return Ok(collected),
                Step::Ask(batch) => batch,
            };
            let mut reply = RawAnswers::new();
            if batch.stage == Stage::ViewEngine {
                if let Some(spec) = engines.pop() {
                    let engine = parse_view_engine(&spec)?;
                    reply.insert(QuestionId::TemplatingEngineName, engine.module_name);
                    reply.insert(QuestionId::TemplatingExtension, engine.extension);
                    if batch.question(QuestionId::AdditionalTemplatingEngines).is_some() {
                        reply.insert(QuestionId::AdditionalTemplatingEngines, !engines.is_empty());
                    }
                }
            } else {
                for question in &batch.questions {
                    if let Some(answer) = answers.get(question.id) {
                        reply.insert(question.id, answer.clone());
                    }
                }
            }
            wizard.submit(reply)?;
        }
    }
}

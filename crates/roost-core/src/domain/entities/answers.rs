use crate::domain::error::ValidationError;
use crate::domain::value_objects::QuestionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single answer as it came from a prompt or an answers file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Bool(bool),
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for Answer {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Partial user answers keyed by question id.
///
/// Absent keys and empty strings both mean "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAnswers(BTreeMap<QuestionId, Answer>);

impl RawAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: QuestionId, answer: impl Into<Answer>) -> Self {
        self.insert(id, answer);
        self
    }

    pub fn insert(&mut self, id: QuestionId, answer: impl Into<Answer>) {
        self.0.insert(id, answer.into());
    }

    pub fn get(&self, id: QuestionId) -> Option<&Answer> {
        self.0.get(&id)
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn remove(&mut self, id: QuestionId) -> Option<Answer> {
        self.0.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &Answer)> {
        self.0.iter().map(|(id, answer)| (*id, answer))
    }

    /// Merge `other` into `self`; answers in `other` win.
    pub fn extend(&mut self, other: RawAnswers) {
        self.0.extend(other.0);
    }

    /// Non-empty text answer, trimmed. Numbers are accepted as their decimal
    /// text so `"httpPort": 8080` works in answers files.
    pub fn text(&self, id: QuestionId) -> Result<Option<String>, ValidationError> {
        match self.0.get(&id) {
            None => Ok(None),
            Some(Answer::Text(s)) => {
                let s = s.trim();
                Ok((!s.is_empty()).then(|| s.to_string()))
            }
            Some(Answer::Number(n)) => Ok(Some(n.to_string())),
            Some(_) => Err(ValidationError::WrongAnswerType {
                question: id.as_str(),
                expected: "a string",
            }),
        }
    }

    /// Boolean answer. Text answers of `yes`/`no`/`true`/`false` are accepted
    /// so answers files can be written by hand.
    pub fn flag(&self, id: QuestionId) -> Result<Option<bool>, ValidationError> {
        let wrong = || ValidationError::WrongAnswerType {
            question: id.as_str(),
            expected: "a boolean",
        };
        match self.0.get(&id) {
            None => Ok(None),
            Some(Answer::Bool(b)) => Ok(Some(*b)),
            Some(Answer::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "" => Ok(None),
                "true" | "yes" | "y" => Ok(Some(true)),
                "false" | "no" | "n" => Ok(Some(false)),
                _ => Err(wrong()),
            },
            Some(Answer::List(_) | Answer::Number(_)) => Err(wrong()),
        }
    }

    /// List answer. A single text answer counts as a one-element list.
    pub fn list(&self, id: QuestionId) -> Result<Option<Vec<String>>, ValidationError> {
        match self.0.get(&id) {
            None => Ok(None),
            Some(Answer::List(items)) => Ok(Some(items.clone())),
            Some(Answer::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Answer::Text(s)) => Ok(Some(vec![s.clone()])),
            Some(Answer::Bool(_) | Answer::Number(_)) => Err(ValidationError::WrongAnswerType {
                question: id.as_str(),
                expected: "a list of strings",
            }),
        }
    }
}

impl FromIterator<(QuestionId, Answer)> for RawAnswers {
    fn from_iter<T: IntoIterator<Item = (QuestionId, Answer)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

//! Service record shapes exchanged with the persistence API.
//!
//! Inbound text fields arrive loosely typed: a string, an array of strings,
//! or nothing at all. [`TextField`] and [`FaqField`] capture those shapes and
//! normalize each one to a single text blob before conversion.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::collection::CollectionKind;

static QUESTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^P:\s*").expect("Invalid question prefix regex"));

static ANSWER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^R:\s*").expect("Invalid answer prefix regex"));

/// A list-like text field as stored on a service record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Text(String),
    List(Vec<String>),
    #[default]
    Absent,
}

impl TextField {
    pub fn is_absent(&self) -> bool {
        matches!(self, TextField::Absent)
    }

    /// Canonical text blob: list entries become one line each.
    pub fn to_text(&self) -> String {
        match self {
            TextField::Text(text) => text.clone(),
            TextField::List(items) => items.join("\n"),
            TextField::Absent => String::new(),
        }
    }
}

impl From<&str> for TextField {
    fn from(text: &str) -> Self {
        TextField::Text(text.to_string())
    }
}

impl From<Vec<String>> for TextField {
    fn from(items: Vec<String>) -> Self {
        TextField::List(items)
    }
}

/// One FAQ entry in the persistence API's vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(default, alias = "question")]
    pub pregunta: String,
    #[serde(default, alias = "answer")]
    pub respuesta: String,
}

impl FaqEntry {
    pub fn new(pregunta: impl Into<String>, respuesta: impl Into<String>) -> Self {
        Self {
            pregunta: pregunta.into(),
            respuesta: respuesta.into(),
        }
    }
}

/// The FAQ field as stored on a service record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaqField {
    Text(String),
    Pairs(Vec<FaqEntry>),
    #[default]
    Absent,
}

impl FaqField {
    pub fn is_absent(&self) -> bool {
        matches!(self, FaqField::Absent)
    }

    /// Canonical text blob; pairs are written in the `P:`/`R:` protocol.
    pub fn to_text(&self) -> String {
        match self {
            FaqField::Text(text) => text.clone(),
            FaqField::Pairs(entries) => entries
                .iter()
                .map(|entry| format!("P: {}\nR: {}", entry.pregunta, entry.respuesta))
                .collect::<Vec<_>>()
                .join("\n\n"),
            FaqField::Absent => String::new(),
        }
    }
}

/// Inbound service record. Only the block-backed fields are read; anything
/// else on the record is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceRecord {
    #[serde(skip_serializing_if = "TextField::is_absent")]
    pub caracteristicas: TextField,
    #[serde(skip_serializing_if = "TextField::is_absent")]
    pub beneficios: TextField,
    #[serde(skip_serializing_if = "TextField::is_absent")]
    pub incluye: TextField,
    #[serde(skip_serializing_if = "TextField::is_absent")]
    pub no_incluye: TextField,
    #[serde(skip_serializing_if = "FaqField::is_absent")]
    pub faq: FaqField,
}

impl ServiceRecord {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The list field backing `kind`; `None` for the FAQ collection.
    pub fn text_field(&self, kind: CollectionKind) -> Option<&TextField> {
        match kind {
            CollectionKind::Features => Some(&self.caracteristicas),
            CollectionKind::Benefits => Some(&self.beneficios),
            CollectionKind::Includes => Some(&self.incluye),
            CollectionKind::Excludes => Some(&self.no_incluye),
            CollectionKind::Faq => None,
        }
    }

    /// Normalized text for the field backing `kind`.
    pub fn text_for(&self, kind: CollectionKind) -> String {
        match self.text_field(kind) {
            Some(field) => field.to_text(),
            None => self.faq.to_text(),
        }
    }
}

/// Outbound shape expected by the persistence API. Never contains nulls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceArrays {
    pub caracteristicas: Vec<String>,
    pub beneficios: Vec<String>,
    pub incluye: Vec<String>,
    pub no_incluye: Vec<String>,
    pub faq: Vec<FaqEntry>,
}

impl ServiceArrays {
    /// Entries of a list collection; `None` for the FAQ collection.
    pub fn list(&self, kind: CollectionKind) -> Option<&[String]> {
        match kind {
            CollectionKind::Features => Some(&self.caracteristicas),
            CollectionKind::Benefits => Some(&self.beneficios),
            CollectionKind::Includes => Some(&self.incluye),
            CollectionKind::Excludes => Some(&self.no_incluye),
            CollectionKind::Faq => None,
        }
    }

    pub(crate) fn list_mut(&mut self, kind: CollectionKind) -> Option<&mut Vec<String>> {
        match kind {
            CollectionKind::Features => Some(&mut self.caracteristicas),
            CollectionKind::Benefits => Some(&mut self.beneficios),
            CollectionKind::Includes => Some(&mut self.incluye),
            CollectionKind::Excludes => Some(&mut self.no_incluye),
            CollectionKind::Faq => None,
        }
    }

    /// Number of entries across all five fields.
    pub fn len(&self) -> usize {
        self.caracteristicas.len()
            + self.beneficios.len()
            + self.incluye.len()
            + self.no_incluye.len()
            + self.faq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read `P:`/`R:` text back into FAQ entries.
///
/// The question runs from a `P:` line up to the next `R:` line; the answer
/// from there up to the next `P:` line. Continuation lines on either side
/// are joined with single spaces. Entries missing a question or an answer
/// are skipped.
///
/// # Example
///
/// ```
/// use svc_content::{FaqEntry, parse_faq_entries};
///
/// let entries = parse_faq_entries("P: ¿Precio?\nR: Depende\ndel plan");
/// assert_eq!(entries, vec![FaqEntry::new("¿Precio?", "Depende del plan")]);
/// ```
pub fn parse_faq_entries(text: &str) -> Vec<FaqEntry> {
    let mut entries = Vec::new();
    let mut question = String::new();
    let mut answer = String::new();
    let mut in_answer = false;

    let mut flush = |question: &mut String, answer: &mut String| {
        if !question.is_empty() && !answer.is_empty() {
            entries.push(FaqEntry::new(question.as_str(), answer.as_str()));
        }
        question.clear();
        answer.clear();
    };

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(prefix) = QUESTION_PREFIX.find(trimmed) {
            flush(&mut question, &mut answer);
            question.push_str(trimmed[prefix.end()..].trim());
            in_answer = false;
        } else if let Some(prefix) = ANSWER_PREFIX.find(trimmed) {
            answer.clear();
            answer.push_str(trimmed[prefix.end()..].trim());
            in_answer = true;
        } else if in_answer {
            push_spaced(&mut answer, trimmed);
        } else if !question.is_empty() {
            push_spaced(&mut question, trimmed);
        }
    }
    flush(&mut question, &mut answer);

    entries
}

fn push_spaced(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(line);
}

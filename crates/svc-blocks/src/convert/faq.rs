//! FAQ parsing
//!
//! FAQ text reaches us in several shapes: hand-written `P:`/`R:` lines,
//! assistant output with bold questions, and older free paragraphs. Each
//! shape has its own [`FaqStrategy`]. A [`FaqChain`] tries them in priority
//! order and keeps the output of the first one that finds any pair.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `P:` question line prefix.
static QUESTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^P:\s*").expect("Invalid question prefix regex"));

/// `R:` answer line prefix.
static ANSWER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^R:\s*").expect("Invalid answer prefix regex"));

/// A single-line `**bold**` span.
static BOLD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^\n]+?)\*\*").expect("Invalid bold span regex"));

/// Question label at the start of a bold span.
static QUESTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:pregunta|p)\s*:\s*").expect("Invalid question label regex")
});

/// A bold span holding nothing but an answer label, e.g. `**Respuesta:**`.
static ANSWER_LABEL_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:respuesta|r)\s*:?\s*$").expect("Invalid answer label regex")
});

/// An answer label anywhere in a segment, bold or not.
static ANSWER_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\*\*)?\s*\b(?:respuesta|r)\s*:\s*(?:\*\*)?")
        .expect("Invalid answer label regex")
});

/// An answer label at the start of a segment.
static LEADING_ANSWER_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:\*\*)?\s*(?:respuesta|r)\s*:\s*(?:\*\*)?")
        .expect("Invalid leading answer label regex")
});

/// One or more blank lines.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").expect("Invalid paragraph break regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// A question and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqPair {
    pub question: String,
    pub answer: String,
}

impl FaqPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// `Some` only when both sides are non-blank after trimming.
    fn complete(question: &str, answer: &str) -> Option<Self> {
        let question = question.trim();
        let answer = answer.trim();
        (!question.is_empty() && !answer.is_empty()).then(|| Self::new(question, answer))
    }
}

/// One way of reading FAQ pairs out of text.
///
/// Implementations are total: input they do not recognize yields an empty
/// vector.
pub trait FaqStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn parse(&self, text: &str) -> Vec<FaqPair>;
}

/// `P: question` / `R: answer` lines.
///
/// Lines after `R:` and before the next `P:` extend the answer, joined with
/// spaces. Lines between `P:` and `R:` extend the question. Pairs missing
/// either side are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrefixProtocol;

impl FaqStrategy for PrefixProtocol {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn parse(&self, text: &str) -> Vec<FaqPair> {
        let mut pairs = Vec::new();
        let mut question: Option<String> = None;
        let mut answer: Option<String> = None;

        for line in text.lines() {
            let trimmed = line.trim();

            if let Some(prefix) = QUESTION_PREFIX.find(trimmed) {
                if let (Some(q), Some(a)) = (&question, &answer)
                    && let Some(pair) = FaqPair::complete(q, a)
                {
                    pairs.push(pair);
                }
                question = Some(trimmed[prefix.end()..].trim().to_string());
                answer = None;
            } else if let Some(prefix) = ANSWER_PREFIX.find(trimmed) {
                if question.is_some() {
                    answer = Some(trimmed[prefix.end()..].trim().to_string());
                }
            } else if !trimmed.is_empty() {
                match (&mut question, &mut answer) {
                    (Some(_), Some(a)) => push_spaced(a, trimmed),
                    (Some(q), None) => push_spaced(q, trimmed),
                    _ => tracing::trace!(line = trimmed, "Ignoring text outside a FAQ pair"),
                }
            }
        }

        if let (Some(q), Some(a)) = (&question, &answer)
            && let Some(pair) = FaqPair::complete(q, a)
        {
            pairs.push(pair);
        }

        pairs
    }
}

/// Bold-marked questions followed by prose answers.
///
/// Recognized shapes:
///
/// ```text
/// **¿Cuánto cuesta?** Depende del plan.
/// **P: ¿Cuánto cuesta?**
/// Depende del plan.
/// **Pregunta:** ¿Cuánto cuesta? **Respuesta:** Depende del plan.
/// ```
///
/// The answer runs up to the next bold question or the end of the text.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineMarkers;

impl FaqStrategy for InlineMarkers {
    fn name(&self) -> &'static str {
        "inline-markers"
    }

    fn parse(&self, text: &str) -> Vec<FaqPair> {
        let markers: Vec<(usize, usize, &str)> = BOLD_SPAN
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let inner = caps.get(1)?.as_str();
                (!ANSWER_LABEL_ONLY.is_match(inner)).then_some((whole.start(), whole.end(), inner))
            })
            .collect();

        markers
            .iter()
            .enumerate()
            .filter_map(|(index, &(_, end, inner))| {
                let segment_end = markers
                    .get(index + 1)
                    .map_or(text.len(), |&(start, _, _)| start);
                let tail = &text[end..segment_end];
                let label_stripped = QUESTION_LABEL.replace(inner, "");

                let (question, answer) = if label_stripped.trim().is_empty() {
                    // `**Pregunta:**` with the question itself outside the bold span.
                    split_labelled_segment(tail)
                } else {
                    let answer = LEADING_ANSWER_LABEL.replace(tail, "");
                    (label_stripped.to_string(), answer.to_string())
                };

                FaqPair::complete(&collapse(&question), &collapse(&answer))
            })
            .collect()
    }
}

/// Blank-line separated paragraphs: first line is the question, the rest
/// the answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Paragraphs;

impl FaqStrategy for Paragraphs {
    fn name(&self) -> &'static str {
        "paragraphs"
    }

    fn parse(&self, text: &str) -> Vec<FaqPair> {
        PARAGRAPH_BREAK
            .split(text)
            .filter_map(|paragraph| {
                let mut lines = paragraph
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty());
                let first = lines.next()?;
                // Leftover `P:`/`R:` lines are an incomplete pair, not prose.
                if QUESTION_PREFIX.is_match(first) || ANSWER_PREFIX.is_match(first) {
                    return None;
                }
                let question = first.strip_prefix('¿').unwrap_or(first);
                let question = question.strip_suffix('?').unwrap_or(question);
                let answer = lines.collect::<Vec<_>>().join(" ");
                FaqPair::complete(question, &answer)
            })
            .collect()
    }
}

/// Result of running a [`FaqChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqParse {
    /// Name of the strategy that produced `pairs`, if any did.
    pub strategy: Option<&'static str>,
    pub pairs: Vec<FaqPair>,
}

/// Ordered list of strategies; the first non-empty result wins.
pub struct FaqChain {
    strategies: Vec<Box<dyn FaqStrategy + Send + Sync>>,
}

impl FaqChain {
    pub fn new(strategies: Vec<Box<dyn FaqStrategy + Send + Sync>>) -> Self {
        Self { strategies }
    }

    /// Strategy names in the order they are tried.
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn parse(&self, text: &str) -> FaqParse {
        for strategy in &self.strategies {
            let pairs = strategy.parse(text);
            if !pairs.is_empty() {
                tracing::debug!(
                    strategy = strategy.name(),
                    count = pairs.len(),
                    "FAQ strategy matched"
                );
                return FaqParse {
                    strategy: Some(strategy.name()),
                    pairs,
                };
            }
        }

        if !text.trim().is_empty() {
            tracing::debug!("No FAQ strategy matched non-empty text");
        }
        FaqParse {
            strategy: None,
            pairs: Vec::new(),
        }
    }
}

impl Default for FaqChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(PrefixProtocol),
            Box::new(InlineMarkers),
            Box::new(Paragraphs),
        ])
    }
}

static DEFAULT_CHAIN: LazyLock<FaqChain> = LazyLock::new(FaqChain::default);

/// Parse FAQ text with the default strategy chain.
pub fn parse_faq(text: &str) -> FaqParse {
    DEFAULT_CHAIN.parse(text)
}

fn push_spaced(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(line);
}

fn collapse(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&text.replace("**", ""), " ")
        .trim()
        .to_string()
}

/// Split `question R: answer` text; without a label the first line is the
/// question.
fn split_labelled_segment(segment: &str) -> (String, String) {
    if let Some(label) = ANSWER_LABEL.find(segment) {
        return (
            segment[..label.start()].to_string(),
            segment[label.end()..].to_string(),
        );
    }

    let segment = segment.trim_start();
    match segment.split_once('\n') {
        Some((question, answer)) => (question.to_string(), answer.to_string()),
        None => (segment.to_string(), String::new()),
    }
}

//! Conversion between freeform text and blocks.
//!
//! [`text_to_blocks`] parses a text blob into blocks of one [`ContentKind`];
//! [`blocks_to_text`] renders any blocks back to text. The two are inverse
//! on content, not on formatting: bullet styles, numbering and blank lines
//! are normalized away.

mod faq;
mod list;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockBody, sorted_by_order};
use crate::error::{Error, Result};

pub use faq::{
    FaqChain, FaqPair, FaqParse, FaqStrategy, InlineMarkers, Paragraphs, PrefixProtocol, parse_faq,
};
pub use list::{list_lines, strip_list_marker};

/// How a text blob should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// One list item per line.
    List,
    /// Question/answer pairs.
    Faq,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::List => write!(f, "list"),
            ContentKind::Faq => write!(f, "faq"),
        }
    }
}

impl FromStr for ContentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(ContentKind::List),
            "faq" => Ok(ContentKind::Faq),
            _ => Err(Error::UnknownContentKind(s.to_string())),
        }
    }
}

/// Parse a text blob into blocks.
///
/// Never fails: empty or unrecognizable input yields an empty vector.
///
/// # Example
///
/// ```
/// use svc_blocks::{ContentKind, text_to_blocks};
///
/// let blocks = text_to_blocks("- Fast\n\n- Secure", ContentKind::List);
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[1].content(), Some("Secure"));
/// assert_eq!(blocks[1].order, 2);
/// ```
pub fn text_to_blocks(text: &str, kind: ContentKind) -> Vec<Block> {
    let blocks = match kind {
        ContentKind::List => list::parse_list(text),
        ContentKind::Faq => {
            let parsed = parse_faq(text);
            parsed
                .pairs
                .into_iter()
                .enumerate()
                .map(|(index, pair)| Block::faq_item(pair.question, pair.answer, index as i64))
                .collect()
        }
    };

    tracing::debug!(%kind, count = blocks.len(), "Parsed text into blocks");
    blocks
}

/// Parse generated assistant output. Same rules as [`text_to_blocks`].
pub fn ai_response_to_blocks(text: &str, kind: ContentKind) -> Vec<Block> {
    text_to_blocks(text, kind)
}

/// Render blocks as text, in ascending `order`, separated by blank lines.
///
/// # Example
///
/// ```
/// use svc_blocks::{Block, blocks_to_text};
///
/// let blocks = vec![
///     Block::faq_item("¿Precio?", "Depende", 1),
///     Block::list_item("Rápido", 0),
/// ];
/// assert_eq!(blocks_to_text(&blocks), "- Rápido\n\nP: ¿Precio?\nR: Depende");
/// ```
pub fn blocks_to_text(blocks: &[Block]) -> String {
    sorted_by_order(blocks)
        .into_iter()
        .filter_map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &Block) -> Option<String> {
    let rendered = match &block.body {
        BlockBody::ListItem { content, .. } => format!("- {}", content),
        BlockBody::FaqItem { question, answer } => format!("P: {}\nR: {}", question, answer),
        BlockBody::Text { content } => content.clone(),
    };
    (!rendered.is_empty()).then_some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn content_kind_parses_case_insensitively() {
        assert_eq!("FAQ".parse::<ContentKind>().unwrap(), ContentKind::Faq);
        assert_eq!(" list ".parse::<ContentKind>().unwrap(), ContentKind::List);
        assert!("table".parse::<ContentKind>().is_err());
    }

    #[test]
    fn empty_text_blocks_are_dropped() {
        let blocks = vec![
            Block::text("", 0),
            Block::text("Intro", 1),
            Block::list_item("Item", 2),
        ];
        assert_eq!(blocks_to_text(&blocks), "Intro\n\n- Item");
    }

    #[test]
    fn render_respects_order_not_position() {
        let blocks = vec![
            Block::list_item("third", 9),
            Block::list_item("first", -1),
            Block::list_item("second", 3),
        ];
        assert_eq!(blocks_to_text(&blocks), "- first\n\n- second\n\n- third");
    }

    #[test]
    fn faq_blocks_get_sequential_orders() {
        let text = "P: Uno\nR: 1\n\nP: Dos\nR: 2\n\nP: Tres\nR: 3";
        let orders: Vec<i64> = text_to_blocks(text, ContentKind::Faq)
            .iter()
            .map(|b| b.order)
            .collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn ai_response_matches_text_parsing() {
        let text = "1. Soporte 24/7\n2. Garantía";
        let a: Vec<_> = ai_response_to_blocks(text, ContentKind::List)
            .into_iter()
            .map(|b| b.body)
            .collect();
        let b: Vec<_> = text_to_blocks(text, ContentKind::List)
            .into_iter()
            .map(|b| b.body)
            .collect();
        assert_eq!(a, b);
    }
}

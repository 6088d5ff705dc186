//! Block model
//!
//! A [`Block`] is one unit of structured content: a text paragraph, a list
//! item or a question/answer pair. Blocks carry an opaque [`BlockId`] and an
//! `order` value; sorting ascending by `order` (stable) gives the canonical
//! display and serialization sequence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Icon given to list items when none is set.
pub const DEFAULT_ICON: &str = "✓";

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

/// Unique identifier of a block.
///
/// Fresh ids are UUID v4 strings. Ids read back from JSON are kept verbatim,
/// so blocks created elsewhere keep their identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a new id. Never returns an id handed out before.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BlockId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for BlockId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidBlockId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Discriminant of a block, as used in configuration and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Text,
    ListItem,
    FaqItem,
}

impl BlockType {
    pub const ALL: [BlockType; 3] = [BlockType::Text, BlockType::ListItem, BlockType::FaqItem];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::ListItem => "list-item",
            BlockType::FaqItem => "faq-item",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(BlockType::Text),
            "list-item" | "list_item" | "list" => Ok(BlockType::ListItem),
            "faq-item" | "faq_item" | "faq" => Ok(BlockType::FaqItem),
            _ => Err(Error::UnknownBlockType(s.to_string())),
        }
    }
}

/// Variant-specific payload of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockBody {
    Text {
        content: String,
    },
    ListItem {
        content: String,
        #[serde(default = "default_icon")]
        icon: String,
    },
    FaqItem {
        question: String,
        answer: String,
    },
}

impl BlockBody {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockBody::Text { .. } => BlockType::Text,
            BlockBody::ListItem { .. } => BlockType::ListItem,
            BlockBody::FaqItem { .. } => BlockType::FaqItem,
        }
    }

    /// A blank body of the given type.
    pub fn empty(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Text => BlockBody::Text {
                content: String::new(),
            },
            BlockType::ListItem => BlockBody::ListItem {
                content: String::new(),
                icon: default_icon(),
            },
            BlockType::FaqItem => BlockBody::FaqItem {
                question: String::new(),
                answer: String::new(),
            },
        }
    }
}

/// A unit of structured content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub order: i64,
    #[serde(flatten)]
    pub body: BlockBody,
}

impl Block {
    pub fn new(body: BlockBody, order: i64) -> Self {
        Self {
            id: BlockId::new(),
            order,
            body,
        }
    }

    pub fn text(content: impl Into<String>, order: i64) -> Self {
        Self::new(
            BlockBody::Text {
                content: content.into(),
            },
            order,
        )
    }

    /// A list item with the default icon.
    pub fn list_item(content: impl Into<String>, order: i64) -> Self {
        Self::new(
            BlockBody::ListItem {
                content: content.into(),
                icon: default_icon(),
            },
            order,
        )
    }

    pub fn faq_item(question: impl Into<String>, answer: impl Into<String>, order: i64) -> Self {
        Self::new(
            BlockBody::FaqItem {
                question: question.into(),
                answer: answer.into(),
            },
            order,
        )
    }

    /// A freshly-identified blank block, as created by an "add" action.
    pub fn empty(block_type: BlockType, order: i64) -> Self {
        Self::new(BlockBody::empty(block_type), order)
    }

    pub fn block_type(&self) -> BlockType {
        self.body.block_type()
    }

    /// Text or list-item content; `None` for FAQ pairs.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            BlockBody::Text { content } | BlockBody::ListItem { content, .. } => Some(content),
            BlockBody::FaqItem { .. } => None,
        }
    }

    /// Whether every required field is non-blank.
    ///
    /// Blocks may be incomplete while being edited; incomplete blocks are
    /// never produced by the converters.
    pub fn is_complete(&self) -> bool {
        match &self.body {
            BlockBody::Text { content } | BlockBody::ListItem { content, .. } => {
                !content.trim().is_empty()
            }
            BlockBody::FaqItem { question, answer } => {
                !question.trim().is_empty() && !answer.trim().is_empty()
            }
        }
    }

    /// Merge a partial update into this block.
    ///
    /// Fields the block's variant does not carry are ignored. Returns whether
    /// anything changed.
    pub fn apply(&mut self, patch: &BlockPatch) -> bool {
        let mut changed = false;

        if let Some(order) = patch.order {
            changed |= replace(&mut self.order, order);
        }

        match &mut self.body {
            BlockBody::Text { content } => {
                if let Some(new) = &patch.content {
                    changed |= replace(content, new.clone());
                }
            }
            BlockBody::ListItem { content, icon } => {
                if let Some(new) = &patch.content {
                    changed |= replace(content, new.clone());
                }
                if let Some(new) = &patch.icon {
                    changed |= replace(icon, new.clone());
                }
            }
            BlockBody::FaqItem { question, answer } => {
                if let Some(new) = &patch.question {
                    changed |= replace(question, new.clone());
                }
                if let Some(new) = &patch.answer {
                    changed |= replace(answer, new.clone());
                }
            }
        }

        changed
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Partial update for a block. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl BlockPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn faq(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
            ..Self::default()
        }
    }

    pub fn order(order: i64) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }
}

/// Stable sort ascending by `order`; ties keep their array position.
pub fn sort_by_order(blocks: &mut [Block]) {
    blocks.sort_by_key(|block| block.order);
}

/// References to `blocks` in canonical order, leaving the input untouched.
pub fn sorted_by_order(blocks: &[Block]) -> Vec<&Block> {
    let mut refs: Vec<&Block> = blocks.iter().collect();
    refs.sort_by_key(|block| block.order);
    refs
}

/// Decode a JSON array of blocks.
pub fn from_json(json: &str) -> Result<Vec<Block>> {
    Ok(serde_json::from_str(json)?)
}

/// Encode blocks as pretty-printed JSON.
pub fn to_json(blocks: &[Block]) -> Result<String> {
    Ok(serde_json::to_string_pretty(blocks)?)
}

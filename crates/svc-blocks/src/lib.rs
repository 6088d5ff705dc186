//! Structured content blocks for service records.
//!
//! A service's long-form fields (features, benefits, FAQ, ...) are edited as
//! ordered sequences of typed [`Block`]s and stored as plain text. This crate
//! owns both halves of that exchange:
//!
//! - [`block`]: the block model: [`Block`], [`BlockBody`], [`BlockId`], [`BlockPatch`]
//! - [`convert`]: text to blocks and back again
//!
//! # Text formats
//!
//! List content is one item per line, with an optional bullet marker:
//!
//! ```text
//! - Fast delivery
//! * Secure checkout
//! 3. Free returns
//! ```
//!
//! FAQ content uses a `P:`/`R:` line prefix protocol:
//!
//! ```text
//! P: ¿Cuánto cuesta?
//! R: Depende del plan.
//! ```
//!
//! Parsing is total. Malformed input yields fewer blocks, never an error.

pub mod block;
pub mod convert;
pub mod error;

pub use block::{
    Block, BlockBody, BlockId, BlockPatch, BlockType, DEFAULT_ICON, sort_by_order, sorted_by_order,
};
pub use convert::{
    ContentKind, FaqPair, FaqParse, ai_response_to_blocks, blocks_to_text, list_lines, parse_faq,
    text_to_blocks,
};
pub use error::{Error, Result};

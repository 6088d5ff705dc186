//! Block collections for service records.
//!
//! This crate sits between the block converters in `svc-blocks` and whatever
//! stores service records:
//!
//! - [`record`]: inbound [`ServiceRecord`] and outbound [`ServiceArrays`] shapes
//! - [`collection`]: [`ServiceBlocks`], the five per-record block collections
//! - [`editor`]: [`BlockEditor`], add/edit/delete/reorder over one collection
//! - [`config`]: [`BlockEditorConfig`] and layered [`EditorSettings`]
//!
//! ```text
//! ServiceRecord --load_from_service--> ServiceBlocks --get_as_arrays--> ServiceArrays
//!                                          ^      |
//!                                          |      v
//!                                       BlockEditor (per collection)
//! ```

pub mod collection;
pub mod config;
pub mod editor;
pub mod error;
pub mod record;

pub use collection::{
    BlocksSnapshot, ChangeEvent, CollectionKind, ServiceBlocks, SnapshotObserver, TracingObserver,
};
pub use config::{BlockEditorConfig, EditorSettings, SettingsResolver};
pub use editor::{BlockEditor, EditorError};
pub use error::{Error, Result};
pub use record::{FaqEntry, FaqField, ServiceArrays, ServiceRecord, TextField, parse_faq_entries};

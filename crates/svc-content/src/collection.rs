//! The five block collections of a service record.
//!
//! [`ServiceBlocks`] owns one ordered block sequence per [`CollectionKind`].
//! Collections are independent: no operation on one touches another.
//! Collection operations never fail; unknown ids make mutators return `false`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use svc_blocks::{
    Block, BlockId, BlockPatch, ContentKind, blocks_to_text, list_lines, sort_by_order,
    text_to_blocks,
};

use crate::error::{Error, Result};
use crate::record::{ServiceArrays, ServiceRecord, parse_faq_entries};

/// Which collection of a service record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Features,
    Benefits,
    Includes,
    Excludes,
    Faq,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 5] = [
        CollectionKind::Features,
        CollectionKind::Benefits,
        CollectionKind::Includes,
        CollectionKind::Excludes,
        CollectionKind::Faq,
    ];

    /// How text for this collection is parsed.
    pub fn content_kind(&self) -> ContentKind {
        match self {
            CollectionKind::Faq => ContentKind::Faq,
            _ => ContentKind::List,
        }
    }

    /// Field name on the service record.
    pub fn field_name(&self) -> &'static str {
        match self {
            CollectionKind::Features => "caracteristicas",
            CollectionKind::Benefits => "beneficios",
            CollectionKind::Includes => "incluye",
            CollectionKind::Excludes => "noIncluye",
            CollectionKind::Faq => "faq",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Features => "features",
            CollectionKind::Benefits => "benefits",
            CollectionKind::Includes => "includes",
            CollectionKind::Excludes => "excludes",
            CollectionKind::Faq => "faq",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = Error;

    /// Accepts both collection names and record field names.
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        CollectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered || kind.field_name().to_lowercase() == lowered)
            .ok_or_else(|| Error::UnknownCollection(s.to_string()))
    }
}

/// What just happened to a [`ServiceBlocks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Loaded,
    Cleared,
    Added { kind: CollectionKind, id: BlockId },
    Updated { kind: CollectionKind, id: BlockId },
    Removed { kind: CollectionKind, id: BlockId },
    Replaced { kind: CollectionKind },
    Reordered { kind: CollectionKind },
}

/// Serializable copy of all five collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlocksSnapshot {
    pub features: Vec<Block>,
    pub benefits: Vec<Block>,
    pub includes: Vec<Block>,
    pub excludes: Vec<Block>,
    pub faq: Vec<Block>,
}

impl BlocksSnapshot {
    pub fn get(&self, kind: CollectionKind) -> &[Block] {
        match kind {
            CollectionKind::Features => &self.features,
            CollectionKind::Benefits => &self.benefits,
            CollectionKind::Includes => &self.includes,
            CollectionKind::Excludes => &self.excludes,
            CollectionKind::Faq => &self.faq,
        }
    }

    fn get_mut(&mut self, kind: CollectionKind) -> &mut Vec<Block> {
        match kind {
            CollectionKind::Features => &mut self.features,
            CollectionKind::Benefits => &mut self.benefits,
            CollectionKind::Includes => &mut self.includes,
            CollectionKind::Excludes => &mut self.excludes,
            CollectionKind::Faq => &mut self.faq,
        }
    }
}

/// Hook notified after every load or mutation, for inspection during
/// development.
pub trait SnapshotObserver {
    fn on_change(&self, event: &ChangeEvent, snapshot: &BlocksSnapshot);
}

/// Observer that logs collection sizes at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SnapshotObserver for TracingObserver {
    fn on_change(&self, event: &ChangeEvent, snapshot: &BlocksSnapshot) {
        tracing::debug!(
            ?event,
            features = snapshot.features.len(),
            benefits = snapshot.benefits.len(),
            includes = snapshot.includes.len(),
            excludes = snapshot.excludes.len(),
            faq = snapshot.faq.len(),
            "Service blocks changed"
        );
    }
}

/// Block collections for one service record being edited.
#[derive(Default)]
pub struct ServiceBlocks {
    collections: BlocksSnapshot,
    observer: Option<Box<dyn SnapshotObserver>>,
}

impl fmt::Debug for ServiceBlocks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceBlocks")
            .field("collections", &self.collections)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl ServiceBlocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an observer, replacing any previous one.
    pub fn with_observer(mut self, observer: impl SnapshotObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Rebuild from a snapshot. Block ids are kept.
    pub fn from_snapshot(snapshot: BlocksSnapshot) -> Self {
        Self {
            collections: snapshot,
            observer: None,
        }
    }

    /// Replace every collection with blocks parsed from `record`.
    ///
    /// Previous blocks and their ids are discarded.
    pub fn load_from_service(&mut self, record: &ServiceRecord) {
        for kind in CollectionKind::ALL {
            let text = record.text_for(kind);
            *self.collections.get_mut(kind) = text_to_blocks(&text, kind.content_kind());
        }
        tracing::debug!(blocks = self.len(), "Loaded service record");
        self.notify(ChangeEvent::Loaded);
    }

    /// Export every collection in the persistence API's shape.
    pub fn get_as_arrays(&self) -> ServiceArrays {
        let mut arrays = ServiceArrays::default();
        for kind in CollectionKind::ALL {
            let text = blocks_to_text(self.blocks(kind));
            match arrays.list_mut(kind) {
                Some(entries) => *entries = list_lines(&text),
                None => arrays.faq = parse_faq_entries(&text),
            }
        }
        arrays
    }

    pub fn blocks(&self, kind: CollectionKind) -> &[Block] {
        self.collections.get(kind)
    }

    /// Blocks of `kind` rendered as text.
    pub fn text(&self, kind: CollectionKind) -> String {
        blocks_to_text(self.blocks(kind))
    }

    pub fn find(&self, kind: CollectionKind, id: &BlockId) -> Option<&Block> {
        self.blocks(kind).iter().find(|block| &block.id == id)
    }

    /// Total number of blocks across all collections.
    pub fn len(&self) -> usize {
        CollectionKind::ALL
            .iter()
            .map(|kind| self.blocks(*kind).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> BlocksSnapshot {
        self.collections.clone()
    }

    pub fn set_blocks(&mut self, kind: CollectionKind, blocks: Vec<Block>) {
        *self.collections.get_mut(kind) = blocks;
        self.notify(ChangeEvent::Replaced { kind });
    }

    /// Append a block to the end of a collection.
    pub fn add_block(&mut self, kind: CollectionKind, block: Block) -> BlockId {
        let id = block.id.clone();
        self.collections.get_mut(kind).push(block);
        self.notify(ChangeEvent::Added {
            kind,
            id: id.clone(),
        });
        id
    }

    /// Merge `patch` into the block with `id`. Returns `false` when no such
    /// block exists.
    pub fn update_block(&mut self, kind: CollectionKind, id: &BlockId, patch: &BlockPatch) -> bool {
        let Some(block) = self
            .collections
            .get_mut(kind)
            .iter_mut()
            .find(|block| &block.id == id)
        else {
            tracing::debug!(%kind, %id, "Update for unknown block ignored");
            return false;
        };

        block.apply(patch);
        self.notify(ChangeEvent::Updated {
            kind,
            id: id.clone(),
        });
        true
    }

    /// Remove the block with `id`. Returns `false` when no such block exists.
    pub fn remove_block(&mut self, kind: CollectionKind, id: &BlockId) -> bool {
        let blocks = self.collections.get_mut(kind);
        let Some(position) = blocks.iter().position(|block| &block.id == id) else {
            tracing::debug!(%kind, %id, "Removal of unknown block ignored");
            return false;
        };

        blocks.remove(position);
        self.notify(ChangeEvent::Removed {
            kind,
            id: id.clone(),
        });
        true
    }

    /// Move the block with `id` to position `index` of the canonical order,
    /// then renumber the collection's orders to `0..n`.
    ///
    /// `index` is clamped to the collection. Returns `false` when no block has
    /// `id`.
    pub fn move_block(&mut self, kind: CollectionKind, id: &BlockId, index: usize) -> bool {
        let blocks = self.collections.get_mut(kind);
        if !blocks.iter().any(|block| &block.id == id) {
            return false;
        }

        sort_by_order(blocks);
        let Some(position) = blocks.iter().position(|block| &block.id == id) else {
            return false;
        };

        let block = blocks.remove(position);
        let index = index.min(blocks.len());
        blocks.insert(index, block);
        for (order, block) in blocks.iter_mut().enumerate() {
            block.order = order as i64;
        }

        self.notify(ChangeEvent::Reordered { kind });
        true
    }

    /// Empty every collection.
    pub fn clear(&mut self) {
        self.collections = BlocksSnapshot::default();
        self.notify(ChangeEvent::Cleared);
    }

    fn notify(&self, event: ChangeEvent) {
        if let Some(observer) = &self.observer {
            observer.on_change(&event, &self.collections);
        }
    }
}

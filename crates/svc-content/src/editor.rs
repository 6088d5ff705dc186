//! Editing surface over one collection.
//!
//! A [`BlockEditor`] borrows a [`ServiceBlocks`] and edits a single
//! collection under its [`BlockEditorConfig`]. The config's allowed types and
//! block cap only constrain [`BlockEditor::add`]; the manager underneath
//! enforces nothing.

use svc_blocks::{Block, BlockId, BlockPatch, BlockType, ai_response_to_blocks, sorted_by_order};

use crate::collection::{CollectionKind, ServiceBlocks};
use crate::config::BlockEditorConfig;

/// Why an add was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("Block type {block_type} is not allowed in {kind}")]
    TypeNotAllowed {
        kind: CollectionKind,
        block_type: BlockType,
    },

    #[error("{kind} already holds the maximum of {max} blocks")]
    LimitReached { kind: CollectionKind, max: usize },
}

#[derive(Debug)]
pub struct BlockEditor<'a> {
    blocks: &'a mut ServiceBlocks,
    kind: CollectionKind,
    config: &'a BlockEditorConfig,
}

impl<'a> BlockEditor<'a> {
    pub fn new(
        blocks: &'a mut ServiceBlocks,
        kind: CollectionKind,
        config: &'a BlockEditorConfig,
    ) -> Self {
        Self {
            blocks,
            kind,
            config,
        }
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn config(&self) -> &BlockEditorConfig {
        self.config
    }

    /// The collection in canonical order.
    pub fn blocks(&self) -> Vec<&Block> {
        sorted_by_order(self.blocks.blocks(self.kind))
    }

    pub fn len(&self) -> usize {
        self.blocks.blocks(self.kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slots left before the cap; `None` when uncapped.
    pub fn remaining(&self) -> Option<usize> {
        self.config
            .max_blocks
            .map(|max| max.saturating_sub(self.len()))
    }

    /// Whether an add should be offered at all.
    pub fn can_add(&self) -> bool {
        self.remaining() != Some(0)
    }

    /// Append a blank block of `block_type`, ordered after the current blocks.
    pub fn add(&mut self, block_type: BlockType) -> Result<BlockId, EditorError> {
        if !self.config.allows(block_type) {
            return Err(EditorError::TypeNotAllowed {
                kind: self.kind,
                block_type,
            });
        }
        if let Some(max) = self.config.max_blocks
            && self.len() >= max
        {
            return Err(EditorError::LimitReached {
                kind: self.kind,
                max,
            });
        }

        // Loaded list orders are line indices and may have gaps.
        let order = self
            .blocks
            .blocks(self.kind)
            .iter()
            .map(|block| block.order + 1)
            .max()
            .unwrap_or(0);
        let block = Block::empty(block_type, order);
        Ok(self.blocks.add_block(self.kind, block))
    }

    /// Merge `patch` into the block with `id`; no-op for unknown ids.
    pub fn update(&mut self, id: &BlockId, patch: &BlockPatch) -> bool {
        self.blocks.update_block(self.kind, id, patch)
    }

    /// Delete the block with `id`; no-op for unknown ids.
    pub fn delete(&mut self, id: &BlockId) -> bool {
        self.blocks.remove_block(self.kind, id)
    }

    pub fn move_to(&mut self, id: &BlockId, index: usize) -> bool {
        self.blocks.move_block(self.kind, id, index)
    }

    /// Swap the block with its predecessor. `false` when already first or
    /// unknown.
    pub fn move_up(&mut self, id: &BlockId) -> bool {
        match self.position(id) {
            Some(position) if position > 0 => self.move_to(id, position - 1),
            _ => false,
        }
    }

    /// Swap the block with its successor. `false` when already last or
    /// unknown.
    pub fn move_down(&mut self, id: &BlockId) -> bool {
        match self.position(id) {
            Some(position) if position + 1 < self.len() => self.move_to(id, position + 1),
            _ => false,
        }
    }

    /// Replace the collection with blocks parsed from generated text.
    ///
    /// Returns how many blocks were produced. Output that parses to nothing
    /// leaves the collection untouched.
    pub fn apply_generated(&mut self, text: &str) -> usize {
        let generated = ai_response_to_blocks(text, self.kind.content_kind());
        let count = generated.len();
        if count == 0 {
            tracing::debug!(kind = %self.kind, "Generated text produced no blocks");
            return 0;
        }
        self.blocks.set_blocks(self.kind, generated);
        count
    }

    fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks().iter().position(|block| &block.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorSettings;
    use pretty_assertions::assert_eq;
    use svc_blocks::{BlockBody, ContentKind, text_to_blocks};

    fn contents(editor: &BlockEditor<'_>) -> Vec<String> {
        editor
            .blocks()
            .iter()
            .filter_map(|b| b.content().map(str::to_string))
            .collect()
    }

    #[test]
    fn add_appends_blank_block_with_next_order() {
        let settings = EditorSettings::default();
        let mut blocks = ServiceBlocks::new();
        let mut editor = BlockEditor::new(
            &mut blocks,
            CollectionKind::Features,
            settings.get(CollectionKind::Features),
        );

        editor.add(BlockType::ListItem).unwrap();
        let id = editor.add(BlockType::Text).unwrap();

        let added = editor.blocks()[1].clone();
        assert_eq!(added.id, id);
        assert_eq!(added.order, 1);
        assert_eq!(
            added.body,
            BlockBody::Text {
                content: String::new()
            }
        );
    }

    #[test]
    fn add_orders_after_gapped_loaded_blocks() {
        let settings = EditorSettings::default();
        let mut blocks = ServiceBlocks::new();
        blocks.set_blocks(
            CollectionKind::Includes,
            text_to_blocks("- a\n\n- b\n\n- c", ContentKind::List),
        );
        let mut editor = BlockEditor::new(
            &mut blocks,
            CollectionKind::Includes,
            settings.get(CollectionKind::Includes),
        );

        let id = editor.add(BlockType::ListItem).unwrap();
        editor.update(&id, &BlockPatch::content("d"));

        assert_eq!(contents(&editor), vec!["a", "b", "c", "d"]);
        assert_eq!(editor.blocks()[3].order, 5);
    }

    #[test]
    fn add_rejects_disallowed_types() {
        let settings = EditorSettings::default();
        let mut blocks = ServiceBlocks::new();
        let mut editor =
            BlockEditor::new(&mut blocks, CollectionKind::Faq, settings.get(CollectionKind::Faq));

        assert_eq!(
            editor.add(BlockType::ListItem),
            Err(EditorError::TypeNotAllowed {
                kind: CollectionKind::Faq,
                block_type: BlockType::ListItem,
            })
        );
        assert!(editor.is_empty());
    }

    #[test]
    fn add_stops_at_max_blocks() {
        let mut config = BlockEditorConfig::default_for(CollectionKind::Benefits);
        config.max_blocks = Some(2);
        let mut blocks = ServiceBlocks::new();
        let mut editor = BlockEditor::new(&mut blocks, CollectionKind::Benefits, &config);

        assert_eq!(editor.remaining(), Some(2));
        editor.add(BlockType::ListItem).unwrap();
        editor.add(BlockType::ListItem).unwrap();

        assert!(!editor.can_add());
        assert_eq!(
            editor.add(BlockType::ListItem),
            Err(EditorError::LimitReached {
                kind: CollectionKind::Benefits,
                max: 2,
            })
        );
        assert_eq!(editor.len(), 2);
    }

    #[test]
    fn move_up_and_down_keep_a_total_order() {
        let config = BlockEditorConfig::default_for(CollectionKind::Includes);
        let mut blocks = ServiceBlocks::new();
        let mut editor = BlockEditor::new(&mut blocks, CollectionKind::Includes, &config);
        editor.apply_generated("- a\n- b\n- c");

        let c = editor.blocks()[2].id.clone();
        let a = editor.blocks()[0].id.clone();

        assert!(editor.move_up(&c));
        assert_eq!(contents(&editor), vec!["a", "c", "b"]);
        assert!(editor.move_down(&a));
        assert_eq!(contents(&editor), vec!["c", "a", "b"]);
        assert!(!editor.move_up(&c));
        let last = editor.blocks()[2].id.clone();
        assert!(!editor.move_down(&last));

        let orders: Vec<i64> = editor.blocks().iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn generated_text_that_parses_to_nothing_is_ignored() {
        let config = BlockEditorConfig::default_for(CollectionKind::Faq);
        let mut blocks = ServiceBlocks::new();
        let mut editor = BlockEditor::new(&mut blocks, CollectionKind::Faq, &config);

        assert_eq!(editor.apply_generated("P: ¿Uno?\nR: Sí"), 1);
        assert_eq!(editor.apply_generated("P: sin respuesta"), 0);
        assert_eq!(editor.len(), 1);
    }
}

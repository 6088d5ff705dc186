//! List content parsing

use std::sync::LazyLock;

use regex::Regex;

use crate::block::Block;

/// A leading bullet (`-`, `•`, `*`) or numeric-dot (`1. `) marker.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-•*]\s*|\d+\.(?:\s+|$))").expect("Invalid list marker regex")
});

/// A leading bullet marker only; numbering is kept on export.
static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•*]\s*").expect("Invalid bullet marker regex"));

/// Strip one leading list marker from an already-trimmed line.
pub fn strip_list_marker(line: &str) -> &str {
    match LIST_MARKER.find(line) {
        Some(marker) => line[marker.end()..].trim_start(),
        None => line,
    }
}

/// One list item per non-blank line. `order` is the zero-based line index,
/// so skipped lines leave gaps.
pub(super) fn parse_list(text: &str) -> Vec<Block> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            let content = strip_list_marker(trimmed);
            if content.is_empty() {
                tracing::trace!(line = index, "Skipping marker-only line");
                return None;
            }
            Some(Block::list_item(content, index as i64))
        })
        .collect()
}

/// Split rendered list text back into plain entries.
///
/// Lines are trimmed, a leading bullet is stripped and empty lines dropped.
///
/// # Example
///
/// ```
/// use svc_blocks::list_lines;
///
/// assert_eq!(list_lines("- Fast\n\n• Secure\n"), vec!["Fast", "Secure"]);
/// ```
pub fn list_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let trimmed = line.trim();
            BULLET_MARKER.replace(trimmed, "").trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- Item", "Item")]
    #[case("• Item", "Item")]
    #[case("* Item", "Item")]
    #[case("-Item", "Item")]
    #[case("12. Item", "Item")]
    #[case("3.5 GHz", "3.5 GHz")]
    #[case("Item", "Item")]
    #[case("- - Item", "- Item")]
    fn strips_one_leading_marker(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(strip_list_marker(line), expected);
    }

    #[test]
    fn marker_only_lines_produce_nothing() {
        let blocks = parse_list("-\n*\n1. ");
        assert!(blocks.is_empty());
    }

    #[test]
    fn orders_follow_source_line_index() {
        let blocks = parse_list("\n- a\n\n\n- b");
        let orders: Vec<i64> = blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![1, 4]);
    }

    #[test]
    fn list_lines_keeps_numbering() {
        assert_eq!(list_lines("1. Uno\n- Dos"), vec!["1. Uno", "Dos"]);
    }
}

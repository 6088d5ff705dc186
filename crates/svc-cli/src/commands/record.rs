//! Service record commands: load and inspect

use std::path::Path;

use colored::Colorize;
use svc_blocks::{BlockBody, sorted_by_order};
use svc_content::{CollectionKind, EditorSettings, ServiceBlocks, ServiceRecord, TracingObserver};

use super::read_input;
use crate::error::Result;

/// Run the load command
pub fn run_load(file: Option<&Path>, compact: bool) -> Result<()> {
    let json = read_input(file)?;
    println!("{}", load_output(&json, compact)?);
    Ok(())
}

/// Run the inspect command
pub fn run_inspect(
    file: Option<&Path>,
    only: Option<CollectionKind>,
    settings: &EditorSettings,
) -> Result<()> {
    let json = read_input(file)?;
    print!("{}", inspect_output(&json, only, settings)?);
    Ok(())
}

fn load_blocks(json: &str) -> Result<ServiceBlocks> {
    let record = ServiceRecord::from_json(json)?;
    let mut blocks = ServiceBlocks::new().with_observer(TracingObserver);
    blocks.load_from_service(&record);
    Ok(blocks)
}

fn load_output(json: &str, compact: bool) -> Result<String> {
    let arrays = load_blocks(json)?.get_as_arrays();
    let output = if compact {
        serde_json::to_string(&arrays)?
    } else {
        serde_json::to_string_pretty(&arrays)?
    };
    Ok(output)
}

fn inspect_output(
    json: &str,
    only: Option<CollectionKind>,
    settings: &EditorSettings,
) -> Result<String> {
    let blocks = load_blocks(json)?;
    let mut out = String::new();

    let kinds = CollectionKind::ALL
        .into_iter()
        .filter(|kind| only.is_none_or(|wanted| wanted == *kind));

    for kind in kinds {
        let config = settings.get(kind);
        let collection = blocks.blocks(kind);

        let noun = if collection.len() == 1 { "block" } else { "blocks" };
        let mut summary = format!("{} {}", collection.len(), noun);
        if let Some(max) = config.max_blocks {
            summary.push_str(&format!(", max {}", max));
        }
        out.push_str(&format!(
            "{} {} ({})\n",
            config.title.bold(),
            format!("[{}]", kind.field_name()).dimmed(),
            summary
        ));

        if collection.is_empty() {
            out.push_str(&format!("  {}\n", "(empty)".dimmed()));
        }
        for block in sorted_by_order(collection) {
            let lines = match &block.body {
                BlockBody::ListItem { content, icon } => format!("  {} {}\n", icon.green(), content),
                BlockBody::Text { content } => format!("  {}\n", content),
                BlockBody::FaqItem { question, answer } => format!(
                    "  {} {}\n  {} {}\n",
                    "P:".cyan().bold(),
                    question,
                    "R:".cyan(),
                    answer
                ),
            };
            out.push_str(&lines);
        }
        out.push('\n');
    }

    Ok(out)
}

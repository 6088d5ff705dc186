//! Parse and render commands

use std::path::Path;

use svc_blocks::{ContentKind, block, blocks_to_text, text_to_blocks};

use super::read_input;
use crate::error::Result;

/// Run the parse command
pub fn run_parse(kind: ContentKind, file: Option<&Path>) -> Result<()> {
    let text = read_input(file)?;
    println!("{}", parse_output(&text, kind)?);
    Ok(())
}

/// Run the render command
pub fn run_render(file: Option<&Path>) -> Result<()> {
    let json = read_input(file)?;
    println!("{}", render_output(&json)?);
    Ok(())
}

fn parse_output(text: &str, kind: ContentKind) -> Result<String> {
    let blocks = text_to_blocks(text, kind);
    Ok(block::to_json(&blocks)?)
}

fn render_output(json: &str) -> Result<String> {
    let blocks = block::from_json(json)?;
    Ok(blocks_to_text(&blocks))
}

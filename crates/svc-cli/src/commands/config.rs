//! Config command implementation

use svc_content::EditorSettings;

use crate::error::Result;

/// Run the config command
pub fn run_config(settings: &EditorSettings) -> Result<()> {
    print!("{}", settings.to_toml()?);
    Ok(())
}

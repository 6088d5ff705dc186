//! Command implementations for svc-cli

pub mod config;
pub mod convert;
pub mod record;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub use config::run_config;
pub use convert::{run_parse, run_render};
pub use record::{run_inspect, run_load};

use crate::error::{CliError, Result};

/// Read a whole input file, or stdin for `None` and `-`.
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            if path.is_dir() {
                return Err(CliError::user(format!(
                    "{} is a directory, expected a file",
                    path.display()
                )));
            }
            tracing::debug!(?path, "Reading input file");
            Ok(fs::read_to_string(path)?)
        }
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

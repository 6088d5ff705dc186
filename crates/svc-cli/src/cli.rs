//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use svc_blocks::ContentKind;
use svc_content::CollectionKind;

/// Service content blocks - convert service record text to blocks and back
#[derive(Parser, Debug)]
#[command(name = "svc-blocks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Editor settings file, replacing the global/project/local layers
    #[arg(short, long, global = true, env = "SVC_BLOCKS_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Parse text into blocks, printed as JSON
    ///
    /// Examples:
    ///   svc-blocks parse features.txt
    ///   svc-blocks parse --kind faq faq.md
    ///   cat notes.txt | svc-blocks parse
    Parse {
        /// How to read the text (list or faq)
        #[arg(short, long, default_value = "list")]
        kind: ContentKind,

        /// Input file; stdin when omitted or "-"
        file: Option<PathBuf>,
    },

    /// Render a JSON array of blocks back to text
    Render {
        /// Input file; stdin when omitted or "-"
        file: Option<PathBuf>,
    },

    /// Load a service record and print its fields as plain arrays
    Load {
        /// Service record JSON; stdin when omitted or "-"
        file: Option<PathBuf>,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Show the blocks parsed from a service record
    Inspect {
        /// Service record JSON; stdin when omitted or "-"
        file: Option<PathBuf>,

        /// Only show one collection (e.g. faq, benefits, noIncluye)
        #[arg(short = 'C', long)]
        collection: Option<CollectionKind>,
    },

    /// Print the resolved editor settings as TOML
    Config,

    /// Generate shell completions
    ///
    /// Examples:
    ///   svc-blocks completions bash > ~/.local/share/bash-completion/completions/svc-blocks
    ///   svc-blocks completions zsh > ~/.zfunc/_svc-blocks
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

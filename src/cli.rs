use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storage proposal settings engine
#[derive(Parser)]
#[command(name = "storage-proposal")]
#[command(about = "Convert installer storage settings into storage-proposal engine settings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert proposal settings into engine settings
    Convert {
        /// Proposal settings (JSON)
        #[arg(short, long)]
        settings: PathBuf,
        /// Product configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Device graph snapshot (JSON)
        #[arg(short, long)]
        devicegraph: PathBuf,
        /// Print a human-readable summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Read engine settings back into proposal settings
    Reverse {
        /// Engine settings (JSON)
        #[arg(short, long)]
        engine: PathBuf,
        /// Product configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the default proposal settings of a product
    Defaults {
        /// Product configuration (JSON)
        config: PathBuf,
    },
    /// Validate a proposal settings file
    Validate {
        /// Proposal settings (JSON)
        settings: PathBuf,
        /// Print a one-line summary of the settings
        #[arg(long)]
        summary: bool,
    },
    /// Export the devices of a device graph with their interfaces
    Export {
        /// Device graph snapshot (JSON)
        devicegraph: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

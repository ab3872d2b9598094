//! Storage proposal CLI - main entry point
//!
//! Thin wrapper around the library: loads JSON inputs, runs one conversion
//! and prints the result on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use storage_proposal::cli::{Cli, Commands};
use storage_proposal::{
    Configuration, Devicegraph, EngineSettings, InterfaceRegistry, ProposalSettings,
    from_engine_settings, to_engine_settings,
};

/// Initialize logging. `RUST_LOG` overrides the default `info` level.
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Configuration> {
    match path {
        Some(path) => Configuration::load_from_file(path),
        None => {
            debug!("No configuration given, using an empty one");
            Ok(Configuration::default())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Convert { settings, config, devicegraph, summary } => {
            let config = load_config(config.as_deref())?;
            let settings = ProposalSettings::load_from_file(&settings)
                .with_context(|| format!("Failed to load settings from {:?}", settings))?;
            settings.validate()?;
            let devicegraph = Devicegraph::load_from_file(&devicegraph)?;

            let engine = to_engine_settings(&settings, &config, &devicegraph)?;
            info!("Converted settings for {} candidate device(s)", engine.candidate_devices.len());
            if summary {
                println!("{}", engine);
            } else {
                print_json(&engine)?;
            }
        }
        Commands::Reverse { engine, config } => {
            let config = load_config(config.as_deref())?;
            let content = std::fs::read_to_string(&engine)
                .with_context(|| format!("Failed to read engine settings from {:?}", engine))?;
            let engine: EngineSettings =
                serde_json::from_str(&content).context("Failed to parse engine settings JSON")?;

            print_json(&from_engine_settings(&engine, &config))?;
        }
        Commands::Defaults { config } => {
            let config = Configuration::load_from_file(&config)?;
            print_json(&ProposalSettings::from_config(&config))?;
        }
        Commands::Validate { settings, summary } => {
            let loaded = ProposalSettings::load_from_file(&settings)
                .with_context(|| format!("Failed to load settings from {:?}", settings))?;
            loaded.validate()?;
            info!("Settings file is valid: {:?}", settings);
            if summary {
                println!(
                    "✓ {} volume(s), space policy {}, encrypted: {}",
                    loaded.volumes.len(),
                    loaded.space.policy,
                    loaded.encryption.encrypt()
                );
            }
        }
        Commands::Export { devicegraph } => {
            let devicegraph = Devicegraph::load_from_file(&devicegraph)?;
            print_json(&InterfaceRegistry::with_defaults().export_all(&devicegraph))?;
        }
    }

    Ok(())
}

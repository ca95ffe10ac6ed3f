//! Rock surface graph inspector
//!
//! Builds the rock surface graph from a preset (or the defaults) and prints
//! its topology as JSON.
//!
//! ```text
//! rock-surface [PRESET.toml|PRESET.json] [--bypass-tonemap]
//! ```

use anyhow::Context;
use clap::Parser;
use rock_surface::{
    graph::{OperationRegistry, ParamValue},
    RockSurface, RockSurfaceConfig,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rock surface graph inspector
#[derive(Parser, Debug)]
#[command(name = "rock-surface")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Preset file (TOML, or JSON by extension); defaults when omitted
    preset: Option<PathBuf>,

    /// Link the no-op in place of the Mantiuk06 tone map
    #[arg(long)]
    bypass_tonemap: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,rock_surface=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();

    let config = match &args.preset {
        Some(path) => RockSurfaceConfig::load(path)
            .with_context(|| format!("loading preset {}", path.display()))?,
        None => RockSurfaceConfig::default(),
    };

    let mut surface = RockSurface::new(OperationRegistry::standard(), &config)
        .context("building rock surface graph")?;

    if args.bypass_tonemap {
        surface.set_property("switchm6", ParamValue::Bool(false))?;
    }

    let topology = surface.topology()?;
    tracing::info!(
        "{} active nodes, {} disconnected",
        topology.stats.active_nodes,
        topology.stats.disconnected_nodes
    );

    println!("{}", surface.snapshot().to_json_pretty()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_preset_and_flag() {
        let cli = Cli::try_parse_from(["rock-surface", "granite.toml", "--bypass-tonemap"]).unwrap();
        assert_eq!(cli.preset, Some(PathBuf::from("granite.toml")));
        assert!(cli.bypass_tonemap);

        let cli = Cli::try_parse_from(["rock-surface"]).unwrap();
        assert!(cli.preset.is_none());
        assert!(!cli.bypass_tonemap);
    }

    #[test]
    fn test_cli_help_and_extra_args() {
        let err = Cli::try_parse_from(["rock-surface", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["rock-surface", "a.toml", "b.toml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}

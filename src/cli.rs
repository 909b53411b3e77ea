//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Air Canvas - draw in the air with your index finger
#[derive(Parser, Debug)]
#[command(name = "air-canvas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Open the camera and start drawing
    Run,

    /// Feed an observation script through the pipeline without camera or window
    Replay {
        /// TOML script with one [[frame]] entry per tick
        script: PathBuf,
    },

    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["air-canvas"]).unwrap();
        assert_eq!(cli.command, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn replay_takes_a_script_and_global_flags() {
        let cli = Cli::try_parse_from(["air-canvas", "replay", "demo.toml", "-v", "--config", "c.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Replay { script: PathBuf::from("demo.toml") }));
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }
}

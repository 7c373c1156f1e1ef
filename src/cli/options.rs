use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Validate and plan ansible provisioning from a provisioner document
#[derive(Parser)]
#[command(name = "rustle-provision")]
#[command(about = "Validate, resolve and render ansible play provisioning")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct RustleProvisionCli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report warnings and errors for a provisioner document
    Validate {
        /// Provisioner document (JSON or YAML, - for stdin)
        config: PathBuf,
    },

    /// Validate, then print the resolved plays
    Plan {
        /// Provisioner document (JSON or YAML, - for stdin)
        config: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Render the inventory document for one play
    Inventory {
        /// Provisioner document (JSON or YAML, - for stdin)
        config: PathBuf,
        /// Zero-based play index
        #[arg(short, long)]
        play: usize,
    },

    /// Print the ansible command line for one play
    Command {
        /// Provisioner document (JSON or YAML, - for stdin)
        config: PathBuf,
        /// Zero-based play index
        #[arg(short, long)]
        play: usize,
        /// Inventory path passed to ansible; overrides the configured inventory_file
        #[arg(long)]
        inventory_path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_command() {
        let cli = RustleProvisionCli::try_parse_from([
            "rustle-provision",
            "plan",
            "p.yml",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Plan { config, format } => {
                assert_eq!(config, PathBuf::from("p.yml"));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected plan command"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_command_with_global_verbose() {
        let cli = RustleProvisionCli::try_parse_from([
            "rustle-provision",
            "command",
            "p.yml",
            "--play",
            "1",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Command {
                play: 1,
                inventory_path: None,
                ..
            }
        ));
    }

    #[test]
    fn test_inventory_requires_play() {
        let parsed = RustleProvisionCli::try_parse_from(["rustle-provision", "inventory", "p.yml"]);
        assert!(parsed.is_err());
    }
}

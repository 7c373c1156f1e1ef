use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::cli::options::{Commands, OutputFormat, RustleProvisionCli};
use crate::cli::output::{print_plan, print_validation_report};
use crate::execution::PlayCommand;
use crate::inventory::InventoryRenderer;
use crate::provisioner::{decode, load_config, validate};
use crate::types::{Play, ProvisionerConfig};

/// Runs the selected subcommand. Returns false when the document is invalid.
pub fn run(cli: &RustleProvisionCli) -> Result<bool> {
    match &cli.command {
        Commands::Validate { config } => validate_command(config),
        Commands::Plan { config, format } => plan_command(config, *format),
        Commands::Inventory { config, play } => inventory_command(config, *play),
        Commands::Command {
            config,
            play,
            inventory_path,
        } => command_command(config, *play, inventory_path.as_deref()),
    }
}

fn validate_command(path: &Path) -> Result<bool> {
    let root = load_config(path)?;
    let result = validate(&root);
    print_validation_report(&result);
    Ok(result.is_valid())
}

fn plan_command(path: &Path, format: OutputFormat) -> Result<bool> {
    let Some(config) = load_valid_config(path)? else {
        return Ok(false);
    };

    match format {
        OutputFormat::Text => print_plan(&config),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(true)
}

fn inventory_command(path: &Path, index: usize) -> Result<bool> {
    let Some(config) = load_valid_config(path)? else {
        return Ok(false);
    };

    let play = select_play(&config, index)?;
    print!("{}", InventoryRenderer::for_config(&config).render(&play.inventory_meta));
    Ok(true)
}

fn command_command(path: &Path, index: usize, inventory_path: Option<&Path>) -> Result<bool> {
    let Some(config) = load_valid_config(path)? else {
        return Ok(false);
    };

    let play = select_play(&config, index)?;
    let inventory = resolve_inventory_path(&config, inventory_path)?;

    if !play.is_enabled() {
        warn!(play = index, "Play is disabled and would be skipped");
    }
    println!("{}", PlayCommand::for_play(play, &inventory).to_shell_string());
    Ok(true)
}

/// Loads, validates and decodes. Prints the report and returns None on errors.
fn load_valid_config(path: &Path) -> Result<Option<ProvisionerConfig>> {
    let root = load_config(path)?;
    let result = validate(&root);
    for warning in &result.warnings {
        warn!("{warning}");
    }
    if !result.is_valid() {
        print_validation_report(&result);
        return Ok(None);
    }

    let config = decode(&root).with_context(|| format!("Failed to decode {}", path.display()))?;
    info!(
        plays = config.plays.len(),
        enabled = config.enabled_plays().count(),
        "Resolved provisioner plan"
    );
    Ok(Some(config))
}

/// An explicit `--inventory-path` wins over the configured `inventory_file`.
fn resolve_inventory_path(config: &ProvisionerConfig, flag: Option<&Path>) -> Result<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.inventory_file.clone())
        .ok_or_else(|| anyhow!("No inventory path given and no inventory_file configured"))
}

fn select_play(config: &ProvisionerConfig, index: usize) -> Result<&Play> {
    config.plays.get(index).ok_or_else(|| {
        anyhow!(
            "Play {index} not found ({} plays configured)",
            config.plays.len()
        )
    })
}

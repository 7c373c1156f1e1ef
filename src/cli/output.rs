use crate::provisioner::ValidationResult;
use crate::types::{Play, PlayTarget, ProvisionerConfig};

/// Print validation findings in human-readable format
pub fn print_validation_report(result: &ValidationResult) {
    for warning in &result.warnings {
        println!("⚠️  {warning}");
    }
    for error in &result.errors {
        println!("❌ {error}");
    }

    if result.is_valid() {
        println!("✅ Configuration is valid ({} warnings)", result.warnings.len());
    } else {
        println!(
            "❌ Configuration is invalid: {} errors, {} warnings",
            result.errors.len(),
            result.warnings.len()
        );
    }
}

pub fn print_plan(config: &ProvisionerConfig) {
    println!("📋 Provisioner");
    println!("  Local: {}", config.local);
    if let Some(inventory) = &config.inventory_file {
        println!("  Inventory file: {}", inventory.display());
    }
    println!(
        "  Install: {}",
        if config.skip_install.is_yes() {
            "skipped".to_string()
        } else {
            config
                .install_version
                .clone()
                .unwrap_or_else(|| "latest".to_string())
        }
    );
    println!();

    println!("🎯 Plays ({}):", config.plays.len());
    for (index, play) in config.plays.iter().enumerate() {
        print_play(index, play);
    }
}

fn print_play(index: usize, play: &Play) {
    let marker = if play.is_enabled() { "▶" } else { "⏸" };
    match &play.target {
        PlayTarget::Playbook(playbook) => {
            println!("  {marker} [{index}] playbook {}", playbook.path.display())
        }
        PlayTarget::Module(module) => println!("  {marker} [{index}] module {}", module.name),
    }

    let meta = &play.inventory_meta;
    println!("      hosts: {}", meta.hosts.join(", "));
    println!("      groups: {}", meta.groups.join(", "));

    let args = &play.call_args;
    if args.r#become.is_yes() {
        println!("      become: {} as {}", args.become_method, args.become_user);
    }
    if args.forks > 0 {
        println!("      forks: {}", args.forks);
    }
    if !args.limit.is_empty() {
        println!("      limit: {}", args.limit);
    }
}

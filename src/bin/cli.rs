//! Pleroo CLI - Main entry point for CLI binary
//!
//! Plays the host's part: loads the update registry from disk, runs a check
//! cycle or a lifecycle hook against it, and writes it back.

use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use pleroo_lib::engine::{
    cli::{Cli, Commands, OutputFormat},
    config::{PluginConfig, CONFIG_FILE},
    lifecycle::PluginLifecycle,
    plugin::Plugin,
    updater::{CheckError, CheckOutcome, UpdateRegistry},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pleroo_lib=info,pleroo_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run_cli(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_cli(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let project_dir = cli.get_project_dir();
    let json_output = cli.format == OutputFormat::Json;

    match cli.command {
        Commands::Init { force } => {
            cmd_init(&project_dir, force, json_output)?;
        }
        Commands::Check => {
            let config = PluginConfig::load_or_default(&project_dir)?;
            let registry_path = resolve_registry_path(&config, cli.registry);
            cmd_check(config, &registry_path, json_output).await?;
        }
        Commands::Status => {
            let config = PluginConfig::load_or_default(&project_dir)?;
            let registry_path = resolve_registry_path(&config, cli.registry);
            cmd_status(&config, &registry_path, json_output)?;
        }
        Commands::Activate => {
            let config = PluginConfig::load_or_default(&project_dir)?;
            let registry_path = resolve_registry_path(&config, cli.registry);
            cmd_lifecycle(config, &registry_path, true, json_output)?;
        }
        Commands::Deactivate => {
            let config = PluginConfig::load_or_default(&project_dir)?;
            let registry_path = resolve_registry_path(&config, cli.registry);
            cmd_lifecycle(config, &registry_path, false, json_output)?;
        }
    }

    Ok(())
}

fn resolve_registry_path(config: &PluginConfig, flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| config.registry_path())
}

fn cmd_init(project_dir: &Path, force: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = project_dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        return Err(format!(
            "Config already exists: {} (use --force to overwrite)",
            config_path.display()
        )
        .into());
    }

    std::fs::create_dir_all(project_dir)?;
    let config = PluginConfig::default();
    config.save(project_dir)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "success": true,
                "config": config_path.to_string_lossy(),
                "plugin": config.plugin_identifier(),
            })
        );
    } else {
        println!("{} Wrote {}", "✓".green(), config_path.display());
        println!("  Plugin: {}", config.plugin_identifier());
        println!("  Manifest: {}", config.updater.manifest_url);
    }
    Ok(())
}

async fn cmd_check(
    config: PluginConfig,
    registry_path: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = UpdateRegistry::load(registry_path)?;
    let plugin = Plugin::new(config);

    let (mut registry, outcome) = plugin.checker().check_and_report(registry).await;
    registry.set_last_checked(Utc::now());
    registry.save(registry_path)?;

    if json {
        let body = match &outcome {
            Ok(CheckOutcome::UpdateAvailable(announcement)) => serde_json::json!({
                "status": "update_available",
                "update": announcement,
            }),
            Ok(CheckOutcome::UpToDate { installed, latest }) => serde_json::json!({
                "status": "up_to_date",
                "installed": installed,
                "latest": latest,
            }),
            Err(CheckError::NoBaseline) => serde_json::json!({ "status": "deferred" }),
            Err(e) => serde_json::json!({ "status": "failed", "error": e.to_string() }),
        };
        println!("{}", body);
        return Ok(());
    }

    match outcome {
        Ok(CheckOutcome::UpdateAvailable(announcement)) => {
            println!(
                "{} Update available: {} {}",
                "↑".green(),
                announcement.plugin,
                announcement.new_version.bold()
            );
            println!("  Package: {}", announcement.package);
            println!("  Details: {}", announcement.url);
        }
        Ok(CheckOutcome::UpToDate { installed, latest }) => {
            println!("{} Up to date ({}; server has {})", "✓".green(), installed, latest);
        }
        Err(CheckError::NoBaseline) => {
            println!(
                "{} No installed versions recorded yet; run `pleroo activate` first",
                "!".yellow()
            );
        }
        Err(e) => {
            // Same as the host: no update this cycle, next trigger retries
            println!("{} No update this cycle: {}", "!".yellow(), e);
        }
    }
    Ok(())
}

fn cmd_status(
    config: &PluginConfig,
    registry_path: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = UpdateRegistry::load(registry_path)?;
    let id = config.plugin_identifier();
    let installed = registry.installed_version(&id);
    let pending = registry.pending_update(&id);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "plugin": id,
                "build_version": config.plugin.version,
                "installed": installed,
                "pending": pending,
                "last_checked": registry.last_checked().map(|t| t.to_rfc3339()),
                "registry": registry_path.to_string_lossy(),
            })
        );
        return Ok(());
    }

    println!("{}", id.bold());
    println!("  Build version: {}", config.plugin.version);
    println!("  Installed: {}", installed.unwrap_or("(not recorded)"));
    match pending {
        Some(update) => println!("  Pending update: {}", update.new_version.green()),
        None => println!("  Pending update: none"),
    }
    match registry.last_checked() {
        Some(t) => println!("  Last checked: {}", t.to_rfc3339()),
        None => println!("  Last checked: never"),
    }
    println!("  Registry: {}", registry_path.display());
    Ok(())
}

fn cmd_lifecycle(
    config: PluginConfig,
    registry_path: &Path,
    activate: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = UpdateRegistry::load(registry_path)?;
    let plugin = Plugin::new(config);

    let registry = if activate {
        plugin.on_activate(registry)
    } else {
        plugin.on_deactivate(registry)
    };
    registry.save(registry_path)?;

    let action = if activate { "activated" } else { "deactivated" };
    if json {
        println!(
            "{}",
            serde_json::json!({
                "success": true,
                "action": action,
                "plugin": plugin.config().plugin_identifier(),
            })
        );
    } else {
        println!(
            "{} {} {}",
            "✓".green(),
            plugin.config().plugin_identifier(),
            action
        );
    }
    Ok(())
}

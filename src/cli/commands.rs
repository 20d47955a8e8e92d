use anyhow::{anyhow, Result};
use colored::*;
use serde_json::{Map, Value};
use tracing::info;

use rfdetr_plus::assets;
use rfdetr_plus::models::overrides::{model_overrides, parse_assignments};
use rfdetr_plus::models::{LoadPlan, ModelConfig, ModelOptions, ModelSize, TrainConfig};
use rfdetr_plus::settings::Settings;
use rfdetr_plus::{PlatformError, VERSION};

use super::display::{display_asset, display_assets_table, display_plan};
use super::Command;

/// Dispatches a parsed command.
pub fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Assets { json } => handle_list_assets(json),
        Command::Asset { filename } => handle_lookup_asset(&filename),
        Command::Config { size, set } => handle_model_config(size, &set),
        Command::TrainConfig { set } => handle_train_config(&set),
        Command::Plan { size, accept_platform_model_license, set, json } => {
            handle_plan(settings, size, accept_platform_model_license, &set, json)
        }
        Command::Version => {
            println!("rfdetr-plus {}", VERSION);
            Ok(())
        }
    }
}

fn handle_list_assets(json: bool) -> Result<()> {
    let all = assets::list_all();
    if json {
        println!("{}", serde_json::to_string_pretty(all)?);
    } else {
        display_assets_table(all);
    }
    Ok(())
}

fn handle_lookup_asset(filename: &str) -> Result<()> {
    match assets::lookup(filename) {
        Some(asset) => {
            display_asset(asset);
            Ok(())
        }
        None => {
            println!("Registered: {}", assets::list_models().join(", ").yellow());
            Err(anyhow!("No checkpoint registered as {}", filename))
        }
    }
}

fn handle_model_config(size: ModelSize, set: &[String]) -> Result<()> {
    let overrides = model_overrides(parse_assignments(set)?)?;
    let config = ModelConfig::for_size(size, overrides)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn handle_train_config(set: &[String]) -> Result<()> {
    let config = TrainConfig::with_overrides(parse_assignments(set)?)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn handle_plan(
    settings: &Settings,
    size: ModelSize,
    accept_platform_model_license: bool,
    set: &[String],
    json: bool,
) -> Result<()> {
    let mut assignments: Map<String, Value> = parse_assignments(set)?;
    // Configured device applies unless the command line names one
    assignments
        .entry("device")
        .or_insert_with(|| Value::String(settings.model.device.clone()));

    let options = ModelOptions {
        overrides: model_overrides(assignments)?,
        weights_dir: settings.weights.directory.clone(),
    };

    let plan = match LoadPlan::prepare(size, accept_platform_model_license, options) {
        Ok(plan) => plan,
        Err(PlatformError::LicenseNotAccepted) => {
            println!("Re-run with {}", "--accept-platform-model-license".bold());
            return Err(PlatformError::LicenseNotAccepted.into());
        }
        Err(e) => return Err(e.into()),
    };
    info!("Prepared load plan for {}", size);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_plan(&plan);
    }
    Ok(())
}

use comfy_table::{Table, Cell, ContentArrangement, Attribute, CellAlignment};
use colored::*;
use rfdetr_plus::assets::{ModelWeights, WeightAsset};
use rfdetr_plus::models::LoadPlan;

fn header(title: &str) -> Cell {
    Cell::new(title).fg(comfy_table::Color::Cyan).add_attribute(Attribute::Bold)
}

/// Displays the registered checkpoints as a table.
///
/// # Arguments
///
/// * `assets` - Registry entries in registry order
pub fn display_assets_table(assets: &[WeightAsset]) {
    if assets.is_empty() {
        println!("{}", "No checkpoints registered".yellow());
        return;
    }

    let mut table = Table::new();
    table
        .set_header(vec![header("#"), header("Filename"), header("Size"), header("URL"), header("MD5")])
        .load_preset(comfy_table::presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for (i, asset) in assets.iter().enumerate() {
        let size = ModelWeights::from_filename(asset.filename)
            .map(|member| match member {
                ModelWeights::RfDetrXLarge => "XLarge",
                ModelWeights::RfDetrXXLarge => "2XLarge",
            })
            .unwrap_or("-");

        table.add_row(vec![
            Cell::new((i + 1).to_string()).fg(comfy_table::Color::White).set_alignment(CellAlignment::Center),
            Cell::new(asset.filename).fg(comfy_table::Color::Yellow),
            Cell::new(size).fg(comfy_table::Color::Blue).set_alignment(CellAlignment::Center),
            Cell::new(asset.url).fg(comfy_table::Color::Green),
            Cell::new(asset.md5_hash.unwrap_or("not published")).fg(comfy_table::Color::DarkGrey),
        ]);
    }

    println!("\n{}", table);
    println!("{}", format!("Total checkpoints: {}", assets.len()).bright_green());
}

/// Displays a single checkpoint descriptor.
pub fn display_asset(asset: &WeightAsset) {
    println!("{} {}", "Filename:".cyan().bold(), asset.filename);
    println!("{} {}", "URL:".cyan().bold(), asset.url);
    println!("{} {}", "MD5:".cyan().bold(), asset.md5_hash.unwrap_or("not published"));
}

/// Displays what a model would be built from.
pub fn display_plan(plan: &LoadPlan) {
    let config = &plan.model_config;
    println!("\n{} {}", "Model:".cyan().bold(), plan.size.to_string().yellow());
    println!("{} {} ({})", "License:".cyan().bold(), config.license, "accepted".green());
    println!("{} {}px, patch {}, {} window(s), grid {}",
        "Input:".cyan().bold(),
        config.resolution,
        config.patch_size,
        config.num_windows,
        config.positional_encoding_size
    );
    println!("{} {}", "Device:".cyan().bold(), config.device);

    match &plan.weights {
        Some(weights) => {
            let state = if weights.is_cached() { "cached".green() } else { "not downloaded".yellow() };
            println!("{} {} [{}]", "Weights:".cyan().bold(), weights.path.display(), state);
            if let Some(url) = weights.url {
                println!("{} {}", "Source:".cyan().bold(), url);
            } else {
                println!("{} {}", "Source:".cyan().bold(), "local checkpoint".bright_black());
            }
        }
        None => println!("{} {}", "Weights:".cyan().bold(), "none (random init)".bright_black()),
    }
    println!();
}

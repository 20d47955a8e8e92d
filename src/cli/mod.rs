use clap::{Parser, Subcommand};
use rfdetr_plus::ModelSize;

mod commands;
mod display;

pub use commands::run;

/// Platform-licensed RF-DETR XLarge and 2XLarge models
#[derive(Parser, Debug)]
#[command(name = "rfdetr-plus", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered checkpoints
    Assets {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Look up a checkpoint by filename
    Asset {
        filename: String,
    },
    /// Print the model configuration for a size
    Config {
        /// xlarge or 2xlarge
        size: ModelSize,
        /// Override a field, e.g. --set resolution=640
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
    /// Print the training configuration
    TrainConfig {
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
    /// Check the license and show what a model would be built from
    Plan {
        size: ModelSize,
        /// Accept the Platform Model License (LICENSE.platform)
        #[arg(long)]
        accept_platform_model_license: bool,
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the package version
    Version,
}

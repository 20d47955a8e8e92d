use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PlatformError;

/// Training hyperparameters passed through to the base framework.
///
/// This crate does not interpret these values; defaults mirror the base
/// framework so a record built here can be handed over unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainConfig {
    pub lr: f64,
    pub lr_encoder: f64,
    pub batch_size: usize,
    pub grad_accum_steps: usize,
    pub epochs: usize,
    pub ema_decay: f64,
    pub ema_tau: usize,
    pub lr_drop: usize,
    pub checkpoint_interval: usize,
    pub warmup_epochs: f64,
    pub lr_vit_layer_decay: f64,
    pub lr_component_decay: f64,
    pub drop_path: f64,
    pub group_detr: usize,
    pub ia_bce_loss: bool,
    pub cls_loss_coef: f64,
    pub num_select: usize,
    pub dataset_file: String,
    pub square_resize_div_64: bool,
    /// Dataset root; required by the base framework before training starts
    pub dataset_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub multi_scale: bool,
    pub expanded_scales: bool,
    pub use_ema: bool,
    pub num_workers: usize,
    pub weight_decay: f64,
    pub early_stopping: bool,
    pub early_stopping_patience: usize,
    pub early_stopping_min_delta: f64,
    pub early_stopping_use_ema: bool,
    pub tensorboard: bool,
    pub wandb: bool,
    pub project: Option<String>,
    pub run: Option<String>,
    pub class_names: Option<Vec<String>>,
    pub resume: Option<PathBuf>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            lr: 1e-4,
            lr_encoder: 1.5e-4,
            batch_size: 4,
            grad_accum_steps: 4,
            epochs: 100,
            ema_decay: 0.993,
            ema_tau: 100,
            lr_drop: 100,
            checkpoint_interval: 10,
            warmup_epochs: 0.0,
            lr_vit_layer_decay: 0.8,
            lr_component_decay: 0.7,
            drop_path: 0.0,
            group_detr: 13,
            ia_bce_loss: true,
            cls_loss_coef: 1.0,
            num_select: 300,
            dataset_file: "roboflow".to_string(),
            square_resize_div_64: true,
            dataset_dir: None,
            output_dir: PathBuf::from("output"),
            multi_scale: true,
            expanded_scales: true,
            use_ema: true,
            num_workers: 2,
            weight_decay: 1e-4,
            early_stopping: false,
            early_stopping_patience: 10,
            early_stopping_min_delta: 0.001,
            early_stopping_use_ema: false,
            tensorboard: true,
            wandb: false,
            project: None,
            run: None,
            class_names: None,
            resume: None,
        }
    }
}

impl TrainConfig {
    /// Builds a config from the defaults with `overrides` merged on top.
    ///
    /// Keys must name existing fields and values must have the field's type.
    pub fn with_overrides(overrides: Map<String, Value>) -> Result<Self, PlatformError> {
        let mut merged = match serde_json::to_value(TrainConfig::default())? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.extend(overrides);
        Ok(serde_json::from_value(Value::Object(merged))?)
    }
}

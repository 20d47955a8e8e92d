//! # RF-DETR+
//!
//! Platform-licensed XLarge and 2XLarge models for the RF-DETR detection
//! family. This crate supplies the size presets, the registry of downloadable
//! checkpoints and the license gate; the network itself, inference, training
//! and weight downloads belong to the base framework plugged in through
//! [`models::DetectionBackend`].
//!
//! ```no_run
//! use rfdetr_plus::assets;
//! use rfdetr_plus::models::{ModelConfig, ModelSize};
//!
//! let asset = assets::lookup("rf-detr-xlarge.pth").unwrap();
//! assert_eq!(ModelConfig::preset(ModelSize::XLarge).pretrain_weights.as_deref(), Some(asset.filename));
//! ```

pub mod assets;
pub mod error;
pub mod models;
pub mod settings;

pub use error::PlatformError;
pub use models::{ModelConfig, ModelOptions, ModelSize, PlatformModel, TrainConfig};

/// Package version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Documentation home
pub const DOCS_URL: &str = "https://rfdetr.roboflow.com";

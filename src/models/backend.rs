use std::error::Error;
use std::path::{Path, PathBuf};
use serde::Serialize;

use crate::assets;
use super::config::{ModelConfig, ModelSize};
use super::train::TrainConfig;

/// Where the base framework should find a checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightLocation {
    /// Path inside the weights cache, keyed by filename
    pub path: PathBuf,
    /// Download URL when the file is a registered asset
    pub url: Option<&'static str>,
    /// Expected MD5 digest when one is published
    pub md5_hash: Option<&'static str>,
}

impl WeightLocation {
    /// Resolves `filename` against the registry and the cache directory.
    ///
    /// Files missing from the registry are treated as user checkpoints: the
    /// location has no URL and the base framework loads the path as given.
    pub fn resolve(weights_dir: &Path, filename: &str) -> Self {
        match assets::lookup(filename) {
            Some(asset) => WeightLocation {
                path: weights_dir.join(asset.filename),
                url: Some(asset.url),
                md5_hash: asset.md5_hash,
            },
            None => WeightLocation {
                path: PathBuf::from(filename),
                url: None,
                md5_hash: None,
            },
        }
    }

    pub fn is_registered(&self) -> bool {
        self.url.is_some()
    }

    /// True when the checkpoint already exists on disk
    pub fn is_cached(&self) -> bool {
        self.path.is_file()
    }
}

/// Everything the base framework needs to build a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadPlan {
    pub size: ModelSize,
    pub model_config: ModelConfig,
    /// `None` when the config asks for random initialisation
    pub weights: Option<WeightLocation>,
}

/// The seam to the external detection framework.
///
/// Implementors own the network, its device placement and any download of
/// the checkpoint named by the plan. Their errors reach callers untouched.
pub trait DetectionBackend: Sized {
    /// Image or batch accepted by `predict`
    type Input;
    /// Detections produced by `predict`
    type Output;
    type Error: Error + Send + Sync + 'static;

    /// Builds the model described by `plan`.
    fn load(plan: &LoadPlan) -> Result<Self, Self::Error>;

    /// Runs detection on `input`, keeping results at or above `threshold`.
    fn predict(&self, input: &Self::Input, threshold: f32) -> Result<Self::Output, Self::Error>;

    /// Fine-tunes the model.
    fn train(&mut self, config: &TrainConfig) -> Result<(), Self::Error>;
}

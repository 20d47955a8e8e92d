use std::error::Error;
use std::path::PathBuf;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::PlatformError;
use super::backend::{DetectionBackend, LoadPlan, WeightLocation};
use super::config::{ModelConfig, ModelConfigOverrides, ModelSize};
use super::train::TrainConfig;

/// Pass-through options for building a platform model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOptions {
    /// Field replacements applied on top of the size preset
    pub overrides: ModelConfigOverrides,
    /// Cache directory holding registered checkpoints
    pub weights_dir: PathBuf,
}

impl Default for ModelOptions {
    fn default() -> Self {
        ModelOptions {
            overrides: ModelConfigOverrides::default(),
            weights_dir: PathBuf::from("."),
        }
    }
}

/// Rejects anything but an explicit acceptance of the Platform Model License.
pub fn require_license(accept_platform_model_license: bool) -> Result<(), PlatformError> {
    if accept_platform_model_license {
        Ok(())
    } else {
        Err(PlatformError::LicenseNotAccepted)
    }
}

impl LoadPlan {
    /// Runs the license gate, resolves the configuration and locates weights.
    ///
    /// No backend is involved, so this can be used to inspect what a model
    /// would be built from.
    pub fn prepare(
        size: ModelSize,
        accept_platform_model_license: bool,
        options: ModelOptions,
    ) -> Result<LoadPlan, PlatformError> {
        if let Err(e) = require_license(accept_platform_model_license) {
            warn!("Refusing to build {}: platform model license not accepted", size);
            return Err(e);
        }

        let model_config = ModelConfig::for_size(size, options.overrides)?;
        let weights = model_config
            .pretrain_weights
            .as_deref()
            .map(|filename| WeightLocation::resolve(&options.weights_dir, filename));

        match &weights {
            Some(location) => debug!(
                "Resolved weights for {}: {} (registered: {}, cached: {})",
                size,
                location.path.display(),
                location.is_registered(),
                location.is_cached()
            ),
            None => debug!("No pretrained weights requested for {}", size),
        }

        Ok(LoadPlan { size, model_config, weights })
    }
}

/// A platform-licensed RF-DETR model.
///
/// Wraps a base-framework model `B` and the configuration it was built from.
/// Detection and training are forwarded to `B` as-is.
pub struct PlatformModel<B: DetectionBackend> {
    size: ModelSize,
    model_config: ModelConfig,
    backend: B,
}

impl<B: DetectionBackend> PlatformModel<B> {
    /// Builds a model of the given size.
    ///
    /// Fails with [`PlatformError::LicenseNotAccepted`] unless
    /// `accept_platform_model_license` is `true`, and with
    /// [`PlatformError::InvalidConfiguration`] if the overrides break the
    /// preset. Backend failures are returned as the backend reported them.
    pub fn new(
        size: ModelSize,
        accept_platform_model_license: bool,
        options: ModelOptions,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let plan = LoadPlan::prepare(size, accept_platform_model_license, options)?;
        info!("Loading {} at resolution {}", size, plan.model_config.resolution);

        let backend = B::load(&plan)?;
        info!("{} ready on {}", size, plan.model_config.device);

        Ok(PlatformModel {
            size,
            model_config: plan.model_config,
            backend,
        })
    }

    /// RF-DETR XLarge (700px, single window)
    pub fn xlarge(accept_platform_model_license: bool, options: ModelOptions) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Self::new(ModelSize::XLarge, accept_platform_model_license, options)
    }

    /// RF-DETR 2XLarge (880px, two windows)
    pub fn xxlarge(accept_platform_model_license: bool, options: ModelOptions) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Self::new(ModelSize::XXLarge, accept_platform_model_license, options)
    }

    pub fn size(&self) -> ModelSize {
        self.size
    }

    /// The configuration this model was built with
    pub fn model_config(&self) -> &ModelConfig {
        &self.model_config
    }

    /// Training configuration to hand to [`PlatformModel::train`].
    pub fn train_config(&self, overrides: Map<String, Value>) -> Result<TrainConfig, PlatformError> {
        TrainConfig::with_overrides(overrides)
    }

    pub fn predict(&self, input: &B::Input, threshold: f32) -> Result<B::Output, B::Error> {
        self.backend.predict(input, threshold)
    }

    pub fn train(&mut self, config: &TrainConfig) -> Result<(), B::Error> {
        info!("Training {} for {} epochs", self.size, config.epochs);
        self.backend.train(config)
    }

    /// The wrapped base-framework model
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

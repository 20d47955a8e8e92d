use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};

use crate::assets::ModelWeights;
use crate::error::PlatformError;

/// License identifier attached to every platform preset
pub const LICENSE_ID: &str = "PML-1.0";

/// The two platform-licensed model sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModelSize {
    #[serde(rename = "rfdetr-xlarge")]
    XLarge,
    #[serde(rename = "rfdetr-2xlarge")]
    XXLarge,
}

impl ModelSize {
    pub const ALL: [ModelSize; 2] = [ModelSize::XLarge, ModelSize::XXLarge];

    /// Size identifier understood by the base framework
    pub fn name(self) -> &'static str {
        match self {
            ModelSize::XLarge => "rfdetr-xlarge",
            ModelSize::XXLarge => "rfdetr-2xlarge",
        }
    }

    /// Checkpoint bound to this size
    pub fn weights(self) -> ModelWeights {
        match self {
            ModelSize::XLarge => ModelWeights::RfDetrXLarge,
            ModelSize::XXLarge => ModelWeights::RfDetrXXLarge,
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlarge" | "rfdetr-xlarge" => Ok(ModelSize::XLarge),
            "2xlarge" | "xxlarge" | "rfdetr-2xlarge" => Ok(ModelSize::XXLarge),
            other => Err(format!("Unknown model size: {}. Expected xlarge or 2xlarge", other)),
        }
    }
}

/// Backbone encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoder {
    Dinov2WindowedBase,
}

/// Feature pyramid level fed to the projector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectorScale {
    P3,
    P4,
    P5,
}

/// Architecture hyperparameters handed to the base framework.
///
/// Records produced by [`ModelConfig::preset`] and
/// [`ModelConfig::with_overrides`] always satisfy
/// `positional_encoding_size == resolution / patch_size`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    /// Backbone encoder
    pub encoder: Encoder,
    /// Backbone blocks whose outputs feed the projector
    pub out_feature_indexes: Vec<usize>,
    /// Number of decoder layers
    pub dec_layers: usize,
    pub two_stage: bool,
    pub projector_scale: Vec<ProjectorScale>,
    /// Transformer hidden dimension
    pub hidden_dim: usize,
    /// Backbone patch size in pixels
    pub patch_size: usize,
    /// Number of attention windows per side in the backbone
    pub num_windows: usize,
    /// Decoder self-attention heads
    pub sa_nheads: usize,
    /// Decoder cross-attention heads
    pub ca_nheads: usize,
    /// Deformable attention sampling points
    pub dec_n_points: usize,
    pub bbox_reparam: bool,
    pub lite_refpoint_refine: bool,
    pub layer_norm: bool,
    /// Mixed precision
    pub amp: bool,
    pub num_classes: usize,
    /// Checkpoint filename, or `None` to start from random weights
    pub pretrain_weights: Option<String>,
    pub device: String,
    /// Square input resolution in pixels
    pub resolution: usize,
    pub group_detr: usize,
    pub gradient_checkpointing: bool,
    /// Positional embedding cells per side
    pub positional_encoding_size: usize,
    pub ia_bce_loss: bool,
    pub cls_loss_coef: f32,
    pub license: String,
}

/// Optional per-field replacements for a preset.
///
/// Unknown keys are rejected when deserializing so typos surface as
/// configuration errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfigOverrides {
    pub encoder: Option<Encoder>,
    pub out_feature_indexes: Option<Vec<usize>>,
    pub dec_layers: Option<usize>,
    pub two_stage: Option<bool>,
    pub projector_scale: Option<Vec<ProjectorScale>>,
    pub hidden_dim: Option<usize>,
    pub patch_size: Option<usize>,
    pub num_windows: Option<usize>,
    pub sa_nheads: Option<usize>,
    pub ca_nheads: Option<usize>,
    pub dec_n_points: Option<usize>,
    pub bbox_reparam: Option<bool>,
    pub lite_refpoint_refine: Option<bool>,
    pub layer_norm: Option<bool>,
    pub amp: Option<bool>,
    pub num_classes: Option<usize>,
    /// `Some(None)` clears the checkpoint and requests random initialisation
    #[serde(deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    pub pretrain_weights: Option<Option<String>>,
    pub device: Option<String>,
    pub resolution: Option<usize>,
    pub group_detr: Option<usize>,
    pub gradient_checkpointing: Option<bool>,
    pub positional_encoding_size: Option<usize>,
    pub ia_bce_loss: Option<bool>,
    pub cls_loss_coef: Option<f32>,
}

// A present key maps to `Some`, even when its value is null; an absent key
// falls back to the struct default of `None`.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

macro_rules! apply_overrides {
    ($target:expr, $source:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $source.$field {
                $target.$field = value;
            }
        )+
    };
}

impl ModelConfig {
    /// Returns the canonical preset for `size`.
    pub fn preset(size: ModelSize) -> Self {
        let (num_windows, resolution) = match size {
            ModelSize::XLarge => (1, 700),
            ModelSize::XXLarge => (2, 880),
        };
        let patch_size = 20;

        ModelConfig {
            encoder: Encoder::Dinov2WindowedBase,
            out_feature_indexes: vec![3, 6, 9, 12],
            dec_layers: 5,
            two_stage: true,
            projector_scale: vec![ProjectorScale::P4],
            hidden_dim: 512,
            patch_size,
            num_windows,
            sa_nheads: 16,
            ca_nheads: 32,
            dec_n_points: 4,
            bbox_reparam: true,
            lite_refpoint_refine: true,
            layer_norm: true,
            amp: true,
            num_classes: 365,
            pretrain_weights: Some(size.weights().filename().to_string()),
            device: "cpu".to_string(),
            resolution,
            group_detr: 13,
            gradient_checkpointing: false,
            positional_encoding_size: resolution / patch_size,
            ia_bce_loss: true,
            cls_loss_coef: 1.0,
            license: LICENSE_ID.to_string(),
        }
    }

    /// Builds the preset for `size` and applies `overrides` to it.
    pub fn for_size(size: ModelSize, overrides: ModelConfigOverrides) -> Result<Self, PlatformError> {
        Self::preset(size).with_overrides(overrides)
    }

    /// Applies `overrides` and validates the result.
    ///
    /// Changing `resolution` or `patch_size` without giving
    /// `positional_encoding_size` re-derives it. An explicit value that does
    /// not match the derived one is rejected.
    pub fn with_overrides(mut self, overrides: ModelConfigOverrides) -> Result<Self, PlatformError> {
        let grid_changed = overrides.resolution.is_some() || overrides.patch_size.is_some();
        let explicit_grid = overrides.positional_encoding_size.is_some();

        apply_overrides!(
            self,
            overrides,
            encoder,
            out_feature_indexes,
            dec_layers,
            two_stage,
            projector_scale,
            hidden_dim,
            patch_size,
            num_windows,
            sa_nheads,
            ca_nheads,
            dec_n_points,
            bbox_reparam,
            lite_refpoint_refine,
            layer_norm,
            amp,
            num_classes,
            pretrain_weights,
            device,
            resolution,
            group_detr,
            gradient_checkpointing,
            positional_encoding_size,
            ia_bce_loss,
            cls_loss_coef,
        );

        if grid_changed && !explicit_grid && self.patch_size > 0 {
            self.positional_encoding_size = self.resolution / self.patch_size;
        }

        self.validate()?;
        Ok(self)
    }

    /// Checks the record's invariants.
    pub fn validate(&self) -> Result<(), PlatformError> {
        if self.patch_size == 0 {
            return Err(invalid("patch_size must be greater than 0".to_string()));
        }
        if self.resolution == 0 || self.resolution % self.patch_size != 0 {
            return Err(invalid(format!(
                "resolution {} must be a positive multiple of patch_size {}",
                self.resolution, self.patch_size
            )));
        }

        let expected = self.resolution / self.patch_size;
        if self.positional_encoding_size != expected {
            return Err(invalid(format!(
                "positional_encoding_size {} does not match resolution / patch_size = {}",
                self.positional_encoding_size, expected
            )));
        }

        if self.num_windows == 0 || self.positional_encoding_size % self.num_windows != 0 {
            return Err(invalid(format!(
                "positional grid of {} cells cannot be split into {} windows",
                self.positional_encoding_size, self.num_windows
            )));
        }

        for (name, heads) in [("sa_nheads", self.sa_nheads), ("ca_nheads", self.ca_nheads)] {
            if heads == 0 || self.hidden_dim % heads != 0 {
                return Err(invalid(format!(
                    "hidden_dim {} must be divisible by {} ({})",
                    self.hidden_dim, name, heads
                )));
            }
        }

        if self.out_feature_indexes.is_empty() {
            return Err(invalid("out_feature_indexes must not be empty".to_string()));
        }
        if self.projector_scale.is_empty() {
            return Err(invalid("projector_scale must not be empty".to_string()));
        }
        if self.num_classes == 0 {
            return Err(invalid("num_classes must be greater than 0".to_string()));
        }

        Ok(())
    }
}

fn invalid(msg: String) -> PlatformError {
    PlatformError::InvalidConfiguration(msg)
}

//! # Platform Models
//!
//! Size presets, the license-gated model facade and the trait through which
//! the base detection framework is plugged in.
//!
//! ## Construction
//!
//! Building a [`PlatformModel`] is a single step: the license flag is checked,
//! the size preset is combined with any overrides and validated, the
//! checkpoint is located through the asset registry, and the backend is
//! loaded from the resulting [`LoadPlan`].

pub mod backend;
pub mod config;
pub mod detection;
pub mod overrides;
pub mod train;

pub use backend::{DetectionBackend, LoadPlan, WeightLocation};
pub use config::{Encoder, ModelConfig, ModelConfigOverrides, ModelSize, ProjectorScale, LICENSE_ID};
pub use detection::{require_license, ModelOptions, PlatformModel};
pub use train::TrainConfig;

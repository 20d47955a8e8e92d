//! # Asset Registry
//!
//! Static descriptors for the platform-licensed checkpoints. The registry is
//! fixed at build time; adding a checkpoint means extending the canonical set
//! in `model_weights.rs`.

mod model_weights;

pub use model_weights::{list_all, list_models, lookup, md5_for, url_for, ModelWeights, WeightAsset};

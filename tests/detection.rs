use std::fmt;
use std::path::PathBuf;

use rfdetr_plus::models::{
    DetectionBackend, LoadPlan, ModelConfigOverrides, ModelOptions, ModelSize, PlatformModel, TrainConfig,
};
use rfdetr_plus::models::overrides::{model_overrides, parse_assignments};
use rfdetr_plus::PlatformError;
use serde_json::{json, Map};

#[derive(Debug)]
struct BackendError(String);

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "backend: {}", self.0)
    }
}

impl std::error::Error for BackendError {}

/// Records what it was loaded with and echoes inputs back as detections.
struct RecordingBackend {
    plan: LoadPlan,
    trained_epochs: Option<usize>,
}

impl DetectionBackend for RecordingBackend {
    type Input = Vec<f32>;
    type Output = Vec<f32>;
    type Error = BackendError;

    fn load(plan: &LoadPlan) -> Result<Self, Self::Error> {
        Ok(RecordingBackend { plan: plan.clone(), trained_epochs: None })
    }

    fn predict(&self, input: &Self::Input, threshold: f32) -> Result<Self::Output, Self::Error> {
        if input.is_empty() {
            return Err(BackendError("empty input".to_string()));
        }
        Ok(input.iter().copied().filter(|score| *score >= threshold).collect())
    }

    fn train(&mut self, config: &TrainConfig) -> Result<(), Self::Error> {
        self.trained_epochs = Some(config.epochs);
        Ok(())
    }
}

/// Fails on load, to check that backend errors pass through untouched.
struct BrokenBackend;

impl DetectionBackend for BrokenBackend {
    type Input = ();
    type Output = ();
    type Error = BackendError;

    fn load(_plan: &LoadPlan) -> Result<Self, Self::Error> {
        Err(BackendError("checksum mismatch".to_string()))
    }

    fn predict(&self, _input: &(), _threshold: f32) -> Result<(), Self::Error> {
        Ok(())
    }

    fn train(&mut self, _config: &TrainConfig) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn weights_dir() -> PathBuf {
    std::env::temp_dir().join("rfdetr-plus-detection-tests")
}

fn options() -> ModelOptions {
    ModelOptions { weights_dir: weights_dir(), ..Default::default() }
}

#[test]
fn test_license_rejected_for_both_sizes() {
    for size in ModelSize::ALL {
        let result = PlatformModel::<RecordingBackend>::new(size, false, options());
        let err = result.err().expect("construction must fail without the license");
        assert_eq!(err.downcast_ref::<PlatformError>(), Some(&PlatformError::LicenseNotAccepted));
        assert!(err.to_string().contains("LICENSE.platform"));
    }
}

#[test]
fn test_default_options_still_require_license() {
    assert!(PlatformModel::<RecordingBackend>::xlarge(false, ModelOptions::default()).is_err());
    assert!(PlatformModel::<RecordingBackend>::xxlarge(false, ModelOptions::default()).is_err());
}

#[test]
fn test_license_rejection_skips_backend() {
    // BrokenBackend would fail on load; the gate must fail first
    let err = PlatformModel::<BrokenBackend>::xlarge(false, options()).err().unwrap();
    assert_eq!(err.downcast_ref::<PlatformError>(), Some(&PlatformError::LicenseNotAccepted));
}

#[test]
fn test_accepted_license_builds_xlarge() {
    let model = PlatformModel::<RecordingBackend>::xlarge(true, options()).unwrap();
    assert_eq!(model.size(), ModelSize::XLarge);
    assert_eq!(model.model_config().resolution, 700);
    assert_eq!(model.model_config().positional_encoding_size, 35);
    assert_eq!(model.model_config().num_windows, 1);
}

#[test]
fn test_accepted_license_builds_xxlarge() {
    let model = PlatformModel::<RecordingBackend>::xxlarge(true, options()).unwrap();
    assert_eq!(model.size(), ModelSize::XXLarge);
    assert_eq!(model.model_config().resolution, 880);
    assert_eq!(model.model_config().positional_encoding_size, 44);
    assert_eq!(model.model_config().num_windows, 2);
}

#[test]
fn test_backend_receives_registered_weights() {
    let model = PlatformModel::<RecordingBackend>::xxlarge(true, options()).unwrap();
    let plan = &model.backend().plan;
    let weights = plan.weights.as_ref().unwrap();

    assert_eq!(plan.size, ModelSize::XXLarge);
    assert_eq!(weights.path, weights_dir().join("rf-detr-xxlarge.pth"));
    assert_eq!(
        weights.url,
        Some("https://storage.googleapis.com/rfdetr/platform-licensed/rf-detr-xxlarge.pth")
    );
    assert_eq!(&plan.model_config, model.model_config());
}

#[test]
fn test_overrides_reach_backend() {
    let overrides = ModelConfigOverrides {
        resolution: Some(640),
        device: Some("cuda".to_string()),
        pretrain_weights: Some(Some("runs/checkpoint_best.pth".to_string())),
        ..Default::default()
    };
    let model = PlatformModel::<RecordingBackend>::xlarge(
        true,
        ModelOptions { overrides, weights_dir: weights_dir() },
    )
    .unwrap();

    assert_eq!(model.model_config().resolution, 640);
    assert_eq!(model.model_config().positional_encoding_size, 32);
    assert_eq!(model.model_config().device, "cuda");

    let weights = model.backend().plan.weights.as_ref().unwrap();
    assert_eq!(weights.path, PathBuf::from("runs/checkpoint_best.pth"));
    assert!(!weights.is_registered());
}

#[test]
fn test_invalid_override_rejected_at_construction() {
    // 880 is not a multiple of 14
    let overrides = ModelConfigOverrides { patch_size: Some(14), ..Default::default() };
    let err = PlatformModel::<RecordingBackend>::xxlarge(true, ModelOptions { overrides, weights_dir: weights_dir() })
        .err()
        .unwrap();
    assert!(matches!(
        err.downcast_ref::<PlatformError>(),
        Some(PlatformError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_backend_errors_pass_through() {
    let err = PlatformModel::<BrokenBackend>::xlarge(true, options()).err().unwrap();
    assert!(err.downcast_ref::<PlatformError>().is_none());
    let backend_err = err.downcast_ref::<BackendError>().unwrap();
    assert_eq!(backend_err.0, "checksum mismatch");
}

#[test]
fn test_predict_delegates() {
    let model = PlatformModel::<RecordingBackend>::xlarge(true, options()).unwrap();
    assert_eq!(model.predict(&vec![0.9, 0.2, 0.6], 0.5).unwrap(), vec![0.9, 0.6]);

    let err = model.predict(&Vec::new(), 0.5).unwrap_err();
    assert_eq!(err.to_string(), "backend: empty input");
}

#[test]
fn test_train_config_and_train() {
    let mut model = PlatformModel::<RecordingBackend>::xxlarge(true, options()).unwrap();

    let mut overrides = Map::new();
    overrides.insert("epochs".to_string(), json!(3));
    overrides.insert("dataset_dir".to_string(), json!("datasets/coco"));
    let train_config = model.train_config(overrides).unwrap();
    assert_eq!(train_config.epochs, 3);

    model.train(&train_config).unwrap();
    assert_eq!(model.backend().trained_epochs, Some(3));
}

#[test]
fn test_default_train_config() {
    let model = PlatformModel::<RecordingBackend>::xlarge(true, options()).unwrap();
    assert_eq!(model.train_config(Map::new()).unwrap(), TrainConfig::default());
}

#[test]
fn test_prepare_with_json_overrides() {
    let overrides: ModelConfigOverrides = serde_json::from_value(json!({ "num_classes": 3 })).unwrap();
    let plan = LoadPlan::prepare(ModelSize::XLarge, true, ModelOptions { overrides, weights_dir: weights_dir() }).unwrap();
    assert_eq!(plan.model_config.num_classes, 3);
    assert_eq!(plan.model_config.pretrain_weights.as_deref(), Some("rf-detr-xlarge.pth"));
}

#[test]
fn test_prepare_rejects_without_license() {
    assert_eq!(
        LoadPlan::prepare(ModelSize::XXLarge, false, options()),
        Err(PlatformError::LicenseNotAccepted)
    );
}

#[test]
fn test_null_weights_request_random_init() {
    let overrides = model_overrides(parse_assignments(&["pretrain_weights=null"]).unwrap()).unwrap();
    let plan = LoadPlan::prepare(ModelSize::XLarge, true, ModelOptions { overrides, weights_dir: weights_dir() }).unwrap();
    assert_eq!(plan.model_config.pretrain_weights, None);
    assert!(plan.weights.is_none());

    let overrides = ModelConfigOverrides { pretrain_weights: Some(None), ..Default::default() };
    let model = PlatformModel::<RecordingBackend>::xxlarge(true, ModelOptions { overrides, weights_dir: weights_dir() }).unwrap();
    assert!(model.backend().plan.weights.is_none());
}

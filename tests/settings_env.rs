use std::fs;

use rfdetr_plus::settings::Settings;

// Kept alone in this file: environment variables are process-wide.
#[test]
fn test_environment_overrides_local_file() {
    let dir = std::env::temp_dir().join(format!("rfdetr-plus-settings-env-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("default.toml"), "[model]\ndevice = \"cpu\"\n").unwrap();
    fs::write(dir.join("local.toml"), "[model]\ndevice = \"cuda\"\n").unwrap();

    std::env::set_var("RFDETR_PLUS_MODEL__DEVICE", "mps");
    std::env::set_var("RFDETR_PLUS_WEIGHTS__DIRECTORY", "/srv/checkpoints");
    let settings = Settings::from_dir(&dir);
    std::env::remove_var("RFDETR_PLUS_MODEL__DEVICE");
    std::env::remove_var("RFDETR_PLUS_WEIGHTS__DIRECTORY");

    let settings = settings.unwrap();
    assert_eq!(settings.model.device, "mps");
    assert_eq!(settings.weights.directory, std::path::PathBuf::from("/srv/checkpoints"));
}

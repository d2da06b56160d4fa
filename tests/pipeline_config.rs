use std::sync::Mutex;

use tempfile::NamedTempFile;

use face_region::config::PipelineConfig;
use face_region::Colorspace;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "FACE_REGION_CONFIG",
        "FACE_REGION_SOURCE_WIDTH",
        "FACE_REGION_SOURCE_HEIGHT",
        "FACE_REGION_COLORSPACE",
        "FACE_REGION_OUT_DIR",
        "FACE_REGION_MIN_FACE",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_defaults_without_config() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = PipelineConfig::load().expect("load defaults");

    assert_eq!(cfg.source.width, 640);
    assert_eq!(cfg.source.height, 480);
    assert_eq!(cfg.source.colorspace, Colorspace::Planar420);
    assert_eq!(cfg.out_dir.to_str().unwrap(), "face_regions_out");
    assert_eq!(cfg.min_face_px, 32);
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "source": {
            "width": 1280,
            "height": 720,
            "colorspace": "nv12"
        },
        "out_dir": "regions_prod",
        "min_face_px": 48
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("FACE_REGION_CONFIG", file.path());
    std::env::set_var("FACE_REGION_COLORSPACE", "lumaonly");
    std::env::set_var("FACE_REGION_MIN_FACE", "64");

    let cfg = PipelineConfig::load().expect("load config");

    assert_eq!(cfg.source.width, 1280);
    assert_eq!(cfg.source.height, 720);
    assert_eq!(cfg.source.colorspace, Colorspace::LumaOnly);
    assert_eq!(cfg.out_dir.to_str().unwrap(), "regions_prod");
    assert_eq!(cfg.min_face_px, 64);

    clear_env();
}

#[test]
fn rejects_unknown_colorspace_names() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("FACE_REGION_COLORSPACE", "rgba8888");
    let err = PipelineConfig::load().expect_err("unknown colorspace must fail");
    assert!(err.to_string().contains("unsupported colorspace"));

    clear_env();
}

#[test]
fn rejects_oversized_min_face() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("FACE_REGION_SOURCE_WIDTH", "64");
    std::env::set_var("FACE_REGION_SOURCE_HEIGHT", "64");
    std::env::set_var("FACE_REGION_MIN_FACE", "128");
    let err = PipelineConfig::load().expect_err("min face beyond extent must fail");
    assert!(err.to_string().contains("min_face_px"));

    clear_env();
}

use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use qrstudio::rendering::{raster, vector, Surface};
use qrstudio::{EcLevel, QrConfig};

fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn render_png(config: &QrConfig) -> Vec<u8> {
    let mut surface = Surface::new();
    surface.apply(config).unwrap();
    let frame = surface.handle().snapshot().unwrap();
    raster::encode_png(&raster::rasterize(&frame)).unwrap()
}

fn reference_config() -> QrConfig {
    let mut config = QrConfig::default();
    config.set_content("golden reference");
    config
}

#[test]
fn identical_configs_capture_identically() {
    let config = reference_config();
    let a = render_png(&config);
    let b = render_png(&config);
    assert_eq!(digest(&a), digest(&b));
}

#[test]
fn identical_configs_vectorize_identically() {
    let config = reference_config();

    let mut first = Surface::new();
    first.apply(&config).unwrap();
    let mut second = Surface::new();
    second.apply(&config).unwrap();

    let a = vector::to_svg(&first.handle().snapshot().unwrap());
    let b = vector::to_svg(&second.handle().snapshot().unwrap());
    assert_eq!(a, b);
}

#[test]
fn level_changes_pattern_but_not_dimensions() {
    let mut low = reference_config();
    low.set_level(EcLevel::Low);
    let mut high = reference_config();
    high.set_level(EcLevel::High);

    let low_png = render_png(&low);
    let high_png = render_png(&high);
    assert_ne!(digest(&low_png), digest(&high_png));

    let low_img = image::load_from_memory(&low_png).unwrap();
    let high_img = image::load_from_memory(&high_png).unwrap();
    assert_eq!(
        (low_img.width(), low_img.height()),
        (high_img.width(), high_img.height())
    );
}

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

#[test]
fn golden_raster_matches_fixture() {
    let png = render_png(&reference_config());
    let actual = digest(&png);

    let expected_path = golden_path("reference.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, &actual).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    if !expected_path.exists() {
        println!(
            "No golden at {:?}; run with UPDATE_GOLDENS=1 to create it. Skipping.",
            expected_path
        );
        return;
    }

    let expected = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(actual, expected.trim());
}

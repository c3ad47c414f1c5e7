//! Live tests against the real Gemini endpoint
//!
//! These hit the network and need GEMINI_API_KEY set.

use plantid_app::{identify_file, Config};
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_test_image(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("leaf.png");
    let mut pixels = image::RgbImage::new(64, 64);
    for pixel in pixels.pixels_mut() {
        *pixel = image::Rgb([34, 139, 34]);
    }
    let image = image::DynamicImage::ImageRgb8(pixels);
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(&path, &bytes).unwrap();
    path
}

/// Test that a live identification completes and yields a non-empty name
#[tokio::test]
#[ignore] // Run with: cargo test --release -- --ignored
async fn test_live_identify_completes() {
    let key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY not set");

    let dir = tempdir().unwrap();
    let path = write_test_image(dir.path());

    let config = Config::default();
    let result = identify_file(&path, &config, Some(&key)).await;

    assert!(result.is_ok(), "Identification failed: {:?}", result.err());

    let plant = result.unwrap();
    println!("=== Identification Result ===");
    println!("Name: {}", plant.name);
    println!("Description: {}", plant.description);
    assert!(!plant.name.is_empty());
}

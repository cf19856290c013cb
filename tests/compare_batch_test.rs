// End-to-end tests for batch comparison through files on disk.
use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use image_diff::app::{self, RunOptions};
use image_diff::error::AppError;
use image_diff::image_compare::{CompareError, ImageSource};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("image-diff-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir failed");
    dir
}

fn write_png(dir: &Path, name: &str, width: u32, height: u32, pixels: &[[u8; 4]]) -> PathBuf {
    let mut img = RgbaImage::new(width, height);
    for (i, px) in pixels.iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        img.put_pixel(x, y, Rgba(*px));
    }
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Png)
        .expect("write test png failed");
    path
}

fn write_solid(dir: &Path, name: &str, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
    let pixels = vec![rgba; (width * height) as usize];
    write_png(dir, name, width, height, &pixels)
}

#[tokio::test]
async fn reports_documented_examples_in_order() {
    let dir = scratch_dir("examples");
    let original = write_png(
        &dir,
        "original.png",
        2,
        2,
        &[[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [255, 255, 255, 255]],
    );
    let half = write_png(
        &dir,
        "half.png",
        2,
        2,
        &[[255, 0, 0, 255], [0, 0, 0, 255], [0, 0, 255, 255], [0, 0, 0, 255]],
    );
    let same = original.clone();

    let output = app::run(
        ImageSource::FilePath(original),
        vec![ImageSource::FilePath(half), ImageSource::FilePath(same)],
        &RunOptions::default(),
    )
    .await
    .expect("batch should succeed");

    assert_eq!(
        output.report.text,
        "Comparison Report:\n\n\
         Result 1:\n   Image Dimensions: 2x2\n   Pixel Difference: 50.00%\n\n\
         Result 2:\n   Image Dimensions: 2x2\n   Pixel Difference: 0.00%\n\n"
    );
    assert!(output.composites.is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn larger_original_is_clipped_to_overlap() {
    let dir = scratch_dir("clip");
    let original = write_solid(&dir, "black.png", 3, 3, [0, 0, 0, 255]);
    let derived = write_solid(&dir, "white.png", 2, 2, [255, 255, 255, 255]);

    let output = app::run(
        ImageSource::FilePath(original),
        vec![ImageSource::FilePath(derived)],
        &RunOptions::default(),
    )
    .await
    .expect("batch should succeed");

    let entry = &output.report.entries()[0];
    assert_eq!((entry.overlap_width, entry.overlap_height), (2, 2));
    assert_eq!(entry.diff_percentage, Some(100.0));
    assert_eq!(entry.differing_pixels, Some(4));
    assert_eq!(output.report.visual[0].derived.label, "Derived Image - Difference: 100.00%");

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn alpha_only_changes_do_not_count() {
    let dir = scratch_dir("alpha");
    let original = write_solid(&dir, "opaque.png", 4, 4, [40, 80, 120, 255]);
    let derived = write_solid(&dir, "translucent.png", 4, 4, [40, 80, 120, 128]);

    let output = app::run(
        ImageSource::FilePath(original),
        vec![ImageSource::FilePath(derived)],
        &RunOptions::default(),
    )
    .await
    .expect("batch should succeed");

    assert_eq!(output.report.entries()[0].diff_percentage, Some(0.0));

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn zero_derived_images_is_empty_input() {
    let dir = scratch_dir("empty");
    let original = write_solid(&dir, "original.png", 2, 2, [0, 0, 0, 255]);

    let result = app::run(ImageSource::FilePath(original), Vec::new(), &RunOptions::default()).await;

    assert!(matches!(result, Err(AppError::Compare(CompareError::EmptyInput))));

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn corrupt_derived_file_aborts_batch() {
    let dir = scratch_dir("corrupt");
    let original = write_solid(&dir, "original.png", 2, 2, [0, 0, 0, 255]);
    let good = write_solid(&dir, "good.png", 2, 2, [0, 0, 0, 255]);
    let corrupt = dir.join("corrupt.png");
    fs::write(&corrupt, b"this is not a png at all").expect("write corrupt file failed");

    let result = app::run(
        ImageSource::FilePath(original),
        vec![ImageSource::FilePath(good), ImageSource::FilePath(corrupt)],
        &RunOptions::default(),
    )
    .await;

    match result {
        Err(AppError::Compare(err)) => assert_eq!(err.code(), "decode"),
        other => panic!("expected decode error, got {:?}", other.map(|o| o.report.text)),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn composites_are_written_per_pair() {
    let dir = scratch_dir("composites");
    let original = write_solid(&dir, "original.png", 3, 2, [255, 0, 0, 255]);
    let first = write_solid(&dir, "first.png", 3, 2, [255, 0, 0, 255]);
    let second = write_solid(&dir, "second.png", 2, 4, [0, 0, 255, 255]);
    let out_dir = dir.join("out");

    let options = RunOptions {
        out_dir: Some(out_dir.clone()),
        ..RunOptions::default()
    };
    let output = app::run(
        ImageSource::FilePath(original),
        vec![ImageSource::FilePath(first), ImageSource::FilePath(second)],
        &options,
    )
    .await
    .expect("batch should succeed");

    assert_eq!(
        output.composites,
        vec![out_dir.join("compare_001.png"), out_dir.join("compare_002.png")]
    );

    let second_composite = image::open(&output.composites[1])
        .expect("composite should decode")
        .to_rgba8();
    assert_eq!(second_composite.dimensions(), (3 + 16 + 2, 4));
    assert_eq!(second_composite.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    assert_eq!(second_composite.get_pixel(3 + 16, 3), &Rgba([0, 0, 255, 255]));

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn settings_file_feeds_the_config() {
    let dir = scratch_dir("settings");
    let settings = dir.join("settings.json");
    fs::write(&settings, r#"{ "max_file_size": 2048 }"#).expect("write settings failed");
    let original = write_solid(&dir, "original.png", 2, 2, [0, 0, 0, 255]);
    // 高熵像素，保证 PNG 体积超过 2KB。
    let noisy: Vec<[u8; 4]> = (0..256u32 * 256)
        .map(|i| {
            let v = i.wrapping_mul(2_654_435_761);
            [(v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8, 255]
        })
        .collect();
    let big = write_png(&dir, "big.png", 256, 256, &noisy);

    let options = RunOptions {
        settings_path: Some(settings),
        ..RunOptions::default()
    };
    let result = app::run(
        ImageSource::FilePath(original),
        vec![ImageSource::FilePath(big)],
        &options,
    )
    .await;

    match result {
        Err(AppError::Compare(err)) => assert_eq!(err.code(), "resource_limit"),
        other => panic!("expected resource limit, got {:?}", other.map(|o| o.report.text)),
    }

    let _ = fs::remove_dir_all(&dir);
}

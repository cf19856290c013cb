//! # 并排合成图输出
//!
//! ## 设计思路
//!
//! 报告中的 `RenderPair` 只是渲染指令；命令行场景下没有界面层，
//! 因此在这里把每一组合成为一张 PNG（左原图、右派生图）写到输出目录。
//!
//! ## 实现思路
//!
//! - 画布宽 = 原图宽 + 间距 + 派生图宽，高 = 两者较大值，背景为不透明白色。
//! - 输出目录不存在时自动 `create_dir_all`。
//! - 文件名按序号：`compare_001.png`、`compare_002.png`……

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage, imageops};

use super::{Bitmap, CompareError, RenderPair, Report};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// 合成单组并排图。
pub fn compose_side_by_side(pair: &RenderPair, gap: u32) -> Result<RgbaImage, CompareError> {
    let original = &pair.original.bitmap;
    let derived = &pair.derived.bitmap;

    let width = original
        .width()
        .checked_add(gap)
        .and_then(|w| w.checked_add(derived.width()))
        .ok_or_else(|| CompareError::ResourceLimit("合成图宽度溢出".to_string()))?
        .max(1);
    let height = original.height().max(derived.height()).max(1);

    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
    paste(&mut canvas, original, 0)?;
    paste(&mut canvas, derived, original.width() as i64 + gap as i64)?;

    Ok(canvas)
}

fn paste(canvas: &mut RgbaImage, bitmap: &Bitmap, x: i64) -> Result<(), CompareError> {
    if bitmap.is_empty() {
        return Ok(());
    }
    let layer = bitmap
        .to_rgba_image()
        .ok_or_else(|| CompareError::Decode("位图缓冲长度异常".to_string()))?;
    imageops::replace(canvas, &layer, x, 0);
    Ok(())
}

/// 将报告中的每一组写为 PNG，按顺序返回写出的路径。
pub fn write_composites(report: &Report, dir: &Path, gap: u32) -> Result<Vec<PathBuf>, CompareError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            CompareError::FileSystem(format!("创建输出目录 '{}' 失败: {}", dir.display(), e))
        })?;
    }

    let mut written = Vec::with_capacity(report.visual.len());
    for pair in &report.visual {
        let canvas = compose_side_by_side(pair, gap)?;
        let file_path = dir.join(format!("compare_{:03}.png", pair.index));

        canvas
            .save_with_format(&file_path, ImageFormat::Png)
            .map_err(|e| CompareError::FileSystem(format!("保存合成图失败: {}", e)))?;

        log::info!("💾 已写出合成图 - {}", file_path.display());
        written.push(file_path);
    }

    Ok(written)
}

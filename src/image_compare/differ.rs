//! # 像素对比模块
//!
//! ## 设计思路
//!
//! 对比只在两张位图左上角对齐后的重叠矩形内进行，矩形外的像素既不读取也不计入分母。
//! 任一方向重叠为 0 时返回 `DegenerateOverlap`，不产生 NaN。
//!
//! ## 实现思路
//!
//! 按行取出重叠部分的 RGBA 切片，逐像素比较 R/G/B 三个通道，忽略 Alpha。

use std::sync::Arc;

use super::{Bitmap, CompareError};

/// 单组（原图, 派生图）的对比结果。
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub original: Arc<Bitmap>,
    pub derived: Arc<Bitmap>,
    pub overlap_width: u32,
    pub overlap_height: u32,
    /// 重叠区域内 RGB 存在差异的像素数。
    pub differing_pixels: u64,
    /// `100 * differing_pixels / (overlap_width * overlap_height)`，范围 [0, 100]。
    pub diff_percentage: f64,
}

impl ComparisonResult {
    pub fn overlap_pixels(&self) -> u64 {
        self.overlap_width as u64 * self.overlap_height as u64
    }
}

/// 对比两张位图，返回重叠区域内的 RGB 差异比例。
///
/// # 示例
/// ```rust
/// use std::sync::Arc;
/// use image_diff::image_compare::{compare, Bitmap};
///
/// let black = Arc::new(Bitmap::filled(3, 3, [0, 0, 0, 255]));
/// let white = Arc::new(Bitmap::filled(2, 2, [255, 255, 255, 255]));
/// let result = compare(black, white)?;
/// assert_eq!((result.overlap_width, result.overlap_height), (2, 2));
/// assert_eq!(result.diff_percentage, 100.0);
/// # Ok::<(), image_diff::image_compare::CompareError>(())
/// ```
pub fn compare(original: Arc<Bitmap>, derived: Arc<Bitmap>) -> Result<ComparisonResult, CompareError> {
    let overlap_width = original.width().min(derived.width());
    let overlap_height = original.height().min(derived.height());

    if overlap_width == 0 || overlap_height == 0 {
        return Err(CompareError::DegenerateOverlap {
            original: original.dimensions(),
            derived: derived.dimensions(),
        });
    }

    let differing_pixels = count_differing_pixels(&original, &derived, overlap_width, overlap_height);
    let total = overlap_width as u64 * overlap_height as u64;
    let diff_percentage = differing_pixels as f64 / total as f64 * 100.0;

    log::debug!(
        "像素对比 - 重叠: {}x{} 差异像素: {}/{} ({:.2}%)",
        overlap_width,
        overlap_height,
        differing_pixels,
        total,
        diff_percentage
    );

    Ok(ComparisonResult {
        original,
        derived,
        overlap_width,
        overlap_height,
        differing_pixels,
        diff_percentage,
    })
}

fn count_differing_pixels(original: &Bitmap, derived: &Bitmap, width: u32, height: u32) -> u64 {
    let span = width as usize * 4;
    let mut count = 0u64;

    for y in 0..height {
        let left = &original.row(y)[..span];
        let right = &derived.row(y)[..span];
        count += left
            .chunks_exact(4)
            .zip(right.chunks_exact(4))
            .filter(|(a, b)| a[..3] != b[..3])
            .count() as u64;
    }

    count
}

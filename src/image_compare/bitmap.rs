//! # 位图模型
//!
//! 解码后的图片：宽、高与按行存储的 RGBA 像素缓冲。
//! 构造后不可变，多条对比结果通过 `Arc<Bitmap>` 共享同一张原图。

use image::RgbaImage;

use super::CompareError;

const CHANNELS: usize = 4;

/// 不可变位图。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// 由 RGBA 字节构建位图，长度必须等于 `width * height * 4`。
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CompareError> {
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|count| count.checked_mul(CHANNELS))
            .ok_or_else(|| CompareError::ResourceLimit("图片尺寸导致内存溢出风险".to_string()))?;

        if pixels.len() != expected_len {
            return Err(CompareError::Decode(format!(
                "像素数据长度异常：{}（期望：{}）",
                pixels.len(),
                expected_len
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 以单一颜色填充的位图。
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// 按行存储的 RGBA 原始字节。
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// 读取 `(x, y)` 处的像素；越界返回 `None`。
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = self.offset(x, y);
        let px = &self.pixels[offset..offset + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// 第 `y` 行的 RGBA 字节。
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// 转为 `image` 的缓冲类型，供编码输出。
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

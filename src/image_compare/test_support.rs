//! 测试辅助：在内存中生成 PNG 字节。

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
use std::io::Cursor;

use super::ImageSource;

pub(crate) fn png_from_fn<F>(width: u32, height: u32, f: F) -> Vec<u8>
where
    F: Fn(u32, u32) -> [u8; 4],
{
    let img = ImageBuffer::from_fn(width, height, |x, y| Rgba(f(x, y)));

    let dyn_img = DynamicImage::ImageRgba8(img);
    let mut cursor = Cursor::new(Vec::new());
    dyn_img
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("failed to encode test image");
    cursor.into_inner()
}

pub(crate) fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    png_from_fn(width, height, |_, _| rgba)
}

pub(crate) fn memory_source(name: &str, bytes: Vec<u8>) -> ImageSource {
    ImageSource::Memory {
        name: name.to_string(),
        bytes,
    }
}

//! # 解码流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → RGBA 位图”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低恶意输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸
//! 2. 按像素上限与内存上限快速拒绝
//! 3. 在阻塞线程池中完整解码，外层套解码超时
//! 4. 转换 RGBA，构建 `Bitmap`（内部校验字节长度一致性）

use image::{GenericImageView, ImageReader};
use std::io::Cursor;

use super::source::RawImageData;
use super::{Bitmap, CompareConfig, CompareError, CompareHandler};

impl CompareHandler {
    /// 在阻塞线程池中解码，并受 `decode_timeout_ms` 约束。
    ///
    /// 超时后解码线程仍会跑完，但结果被丢弃，原始字节随线程结束释放。
    pub(super) async fn decode_with_timeout(
        raw: RawImageData,
        config: &CompareConfig,
    ) -> Result<Bitmap, CompareError> {
        let timeout = config.decode_timeout();
        let task_config = config.clone();
        let task = tokio::task::spawn_blocking(move || Self::decode_to_bitmap(raw, &task_config));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(CompareError::Decode(format!("解码任务异常终止：{}", join_err))),
            Err(_) => Err(CompareError::Timeout(format!(
                "图片解码超过 {}ms 未完成",
                timeout.as_millis()
            ))),
        }
    }

    /// 将原始字节解码为 RGBA 位图。
    pub(crate) fn decode_to_bitmap(
        raw: RawImageData,
        config: &CompareConfig,
    ) -> Result<Bitmap, CompareError> {
        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;
        Self::validate_decoded_memory_limits(config, header_width, header_height)?;

        let decoded = image::load_from_memory(&raw.bytes)
            .map_err(|e| CompareError::Decode(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        Self::validate_pixel_limits(config, width, height)?;
        Self::validate_decoded_memory_limits(config, width, height)?;

        let bitmap = Bitmap::from_rgba(width, height, decoded.to_rgba8().into_raw())?;

        log::info!(
            "✅ 图片解码成功 - 来源: {} 尺寸: {}x{}",
            raw.source_hint,
            width,
            height
        );

        Ok(bitmap)
    }

    /// 仅通过内存中的图片头信息读取宽高。
    ///
    /// 用于在完整解码前做像素限制检查。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), CompareError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CompareError::Decode(format!("无法识别图片格式：{}", e)))?;

        if reader.format().is_none() {
            return Err(CompareError::Decode("不支持的图片格式".to_string()));
        }

        reader
            .into_dimensions()
            .map_err(|e| CompareError::Decode(format!("无法读取图片尺寸：{}", e)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(
        config: &CompareConfig,
        width: u32,
        height: u32,
    ) -> Result<(), CompareError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| CompareError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(CompareError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(
        config: &CompareConfig,
        width: u32,
        height: u32,
    ) -> Result<(), CompareError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| CompareError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(CompareError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }
}

//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理不同来源（本地文件 / 内存字节）的原始字节加载，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 文件：存在性 + metadata 体积限制 + 读取。
//! - 内存：体积限制。
//! - 两种来源最终都要通过文件签名（magic bytes）校验。

use std::path::Path;

use super::source::RawImageData;
use super::{CompareConfig, CompareError, CompareHandler, ImageSource};

impl CompareHandler {
    /// 按来源加载原始字节。
    pub(super) fn load_raw(
        &self,
        source: ImageSource,
        config: &CompareConfig,
    ) -> Result<RawImageData, CompareError> {
        match source {
            ImageSource::FilePath(path) => Self::load_from_file(&path, config),
            ImageSource::Memory { name, bytes } => Self::load_from_memory(&name, bytes, config),
        }
    }

    /// 从本地路径加载图片原始字节。
    fn load_from_file(path: &Path, config: &CompareConfig) -> Result<RawImageData, CompareError> {
        log::info!("📁 开始读取本地图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(CompareError::FileSystem(format!("文件不存在：{}", path.display())));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| CompareError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(CompareError::FileSystem(format!("不是普通文件：{}", path.display())));
        }

        Self::check_size(metadata.len(), config, "文件过大")?;

        let bytes = std::fs::read(path)
            .map_err(|e| CompareError::Decode(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "file",
        })
    }

    fn load_from_memory(
        name: &str,
        bytes: Vec<u8>,
        config: &CompareConfig,
    ) -> Result<RawImageData, CompareError> {
        log::info!("🧾 开始处理内存图片 - 名称: {} 大小: {}B", name, bytes.len());

        Self::check_size(bytes.len() as u64, config, "图片数据过大")?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "memory",
        })
    }

    fn check_size(len: u64, config: &CompareConfig, what: &str) -> Result<(), CompareError> {
        if len > config.max_file_size {
            return Err(CompareError::ResourceLimit(format!(
                "{}：{:.2} MB（限制：{:.2} MB）",
                what,
                len as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }
        Ok(())
    }

    /// 通过文件签名（magic bytes）校验输入是否为图片。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), CompareError> {
        if bytes.is_empty() {
            return Err(CompareError::Decode("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| CompareError::Decode("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(CompareError::Decode(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_compare::test_support::{memory_source, png_bytes};
    use std::path::PathBuf;

    fn handler() -> CompareHandler {
        CompareHandler::new(CompareConfig::default()).expect("handler init failed")
    }

    #[test]
    fn memory_source_rejects_non_image_payload() {
        let config = CompareConfig::default();

        let result = handler().load_raw(memory_source("hello.txt", b"Hello".to_vec()), &config);

        assert!(matches!(result, Err(CompareError::Decode(_))));
    }

    #[test]
    fn memory_source_keeps_png_bytes() {
        let config = CompareConfig::default();
        let png = png_bytes(3, 2, [10, 20, 30, 255]);

        let raw = handler()
            .load_raw(memory_source("small.png", png.clone()), &config)
            .expect("png bytes should load");

        assert_eq!(raw.bytes, png);
        assert_eq!(raw.source_hint, "memory");
    }

    #[test]
    fn missing_file_is_a_file_system_error() {
        let config = CompareConfig::default();
        let path = PathBuf::from("/definitely/not/here/original.png");

        let result = handler().load_raw(ImageSource::FilePath(path), &config);

        assert!(matches!(result, Err(CompareError::FileSystem(_))));
    }

    #[test]
    fn memory_source_over_size_limit_is_rejected() {
        let mut config = CompareConfig::default();
        config.max_file_size = 1024;
        let bytes = vec![0u8; 4096];

        let result = handler().load_raw(
            ImageSource::Memory {
                name: "big.bin".to_string(),
                bytes,
            },
            &config,
        );

        assert!(matches!(result, Err(CompareError::ResourceLimit(_))));
    }

    #[test]
    fn empty_memory_source_is_a_decode_error() {
        let config = CompareConfig::default();

        let result = handler().load_raw(
            ImageSource::Memory {
                name: "empty.png".to_string(),
                bytes: Vec::new(),
            },
            &config,
        );

        assert!(matches!(result, Err(CompareError::Decode(_))));
    }
}

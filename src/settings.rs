//! 设置文件模块
//!
//! # 设计思路
//!
//! 允许通过一个 JSON 文件覆盖 `CompareConfig` 的默认值，所有字段均可省略。
//! 命令行参数优先级高于设置文件。
//!
//! # 实现思路
//!
//! - `serde` 反序列化到全 `Option` 的 `CompareSettings`，未知字段直接报错，避免拼写错误被静默忽略。
//! - `apply_to` 只覆盖出现的字段，并在最后统一调用 `CompareConfig::validate`。

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;
use crate::image_compare::{CompareConfig, DegeneratePolicy};

/// 设置文件内容。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareSettings {
    pub max_file_size: Option<u64>,
    pub max_decoded_pixels: Option<u64>,
    pub max_decoded_bytes: Option<u64>,
    pub decode_timeout_ms: Option<u64>,
    pub degenerate_policy: Option<String>,
    pub composite_gap: Option<u32>,
}

impl CompareSettings {
    /// 从 JSON 字符串解析设置。
    pub fn from_json(content: &str) -> Result<Self, AppError> {
        serde_json::from_str(content)
            .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))
    }

    /// 将已设置的字段覆盖到配置上，并校验结果。
    pub fn apply_to(&self, config: &mut CompareConfig) -> Result<(), AppError> {
        if let Some(value) = self.max_file_size {
            config.max_file_size = value;
        }
        if let Some(value) = self.max_decoded_pixels {
            config.max_decoded_pixels = value;
        }
        if let Some(value) = self.max_decoded_bytes {
            config.max_decoded_bytes = value;
        }
        if let Some(value) = self.decode_timeout_ms {
            config.decode_timeout_ms = value;
        }
        if let Some(policy) = &self.degenerate_policy {
            config.degenerate_policy = DegeneratePolicy::from_str(policy)?;
        }
        if let Some(value) = self.composite_gap {
            config.composite_gap = value;
        }

        config.validate()?;
        Ok(())
    }
}

/// 读取设置文件。
pub fn load_settings(path: &Path) -> Result<CompareSettings, AppError> {
    if !path.exists() {
        return Err(AppError::Settings(format!("设置文件不存在: {}", path.display())));
    }

    let content = fs::read_to_string(path)?;
    CompareSettings::from_json(&content)
}

//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `CompareConfig`，保证运行时行为可观测、可调整、可测试。
//! 其中重叠区域为空时的处理策略（report / abort）作为高层语义单独建模。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的配置。
//! - `DegeneratePolicy` 负责策略字符串解析与反向输出。
//! - `validate` 在配置进入处理器之前统一做范围校验。

use std::time::Duration;

use super::CompareError;

/// 图片对比配置。
///
/// 字段覆盖了读取、解码与对比三个阶段。
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 单张图片解码超时时间（毫秒）。
    pub decode_timeout_ms: u64,
    /// 重叠区域为空时的处理策略。
    pub degenerate_policy: DegeneratePolicy,
    /// 并排合成图中两张图片之间的间距（像素）。
    pub composite_gap: u32,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            decode_timeout_ms: 30_000,
            degenerate_policy: DegeneratePolicy::Report,
            composite_gap: 16,
        }
    }
}

/// 重叠区域为空（任一方向为 0）时的处理策略。
///
/// - `Report`：记录为该组的失败结果，继续处理其余派生图
/// - `Abort`：立即终止整批对比
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegeneratePolicy {
    Report,
    Abort,
}

impl DegeneratePolicy {
    /// 从外部字符串解析策略。
    ///
    /// # 示例
    /// ```rust
    /// use image_diff::image_compare::DegeneratePolicy;
    ///
    /// let p = DegeneratePolicy::from_str(" Abort ")?;
    /// assert_eq!(p.as_str(), "abort");
    /// # Ok::<(), image_diff::image_compare::CompareError>(())
    /// ```
    pub fn from_str(policy: &str) -> Result<Self, CompareError> {
        match policy.trim().to_lowercase().as_str() {
            "report" => Ok(Self::Report),
            "abort" => Ok(Self::Abort),
            other => Err(CompareError::InvalidFormat(format!(
                "未知处理策略：{}（可选：report / abort）",
                other
            ))),
        }
    }

    /// 将策略输出为稳定字符串。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Abort => "abort",
        }
    }
}

impl CompareConfig {
    pub fn decode_timeout(&self) -> Duration {
        Duration::from_millis(self.decode_timeout_ms)
    }

    /// 校验各项阈值是否在允许范围内。
    pub fn validate(&self) -> Result<(), CompareError> {
        if self.max_file_size < 1024 {
            return Err(CompareError::InvalidFormat("max_file_size 不能小于 1KB".to_string()));
        }
        if self.max_decoded_bytes < 1024 * 1024 {
            return Err(CompareError::InvalidFormat("max_decoded_bytes 不能小于 1MB".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(CompareError::InvalidFormat("max_decoded_pixels 必须大于 0".to_string()));
        }
        if !(100..=600_000).contains(&self.decode_timeout_ms) {
            return Err(CompareError::InvalidFormat(
                "decode_timeout_ms 必须在 100~600000 毫秒之间".to_string(),
            ));
        }
        Ok(())
    }
}

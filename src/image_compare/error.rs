//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载对比链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! ## 实现思路
//!
//! - `code()` 提供稳定的机器可读错误码（供 JSON 输出与脚本判断）。
//! - `stage()` 标记错误发生在流水线的哪个阶段，便于日志定位。

/// 图片对比统一错误类型。
///
/// 该类型会在应用层被上转为 `AppError`。
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("输入错误：需要一张原图和至少一张派生图")]
    EmptyInput,

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("重叠区域为空：原图 {}x{}，派生图 {}x{}", .original.0, .original.1, .derived.0, .derived.1)]
    DegenerateOverlap {
        original: (u32, u32),
        derived: (u32, u32),
    },

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("超时错误：{0}")]
    Timeout(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl CompareError {
    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::Decode(_) => "decode",
            Self::DegenerateOverlap { .. } => "degenerate_overlap",
            Self::FileSystem(_) => "file_system",
            Self::InvalidFormat(_) => "invalid_format",
            Self::Timeout(_) => "timeout",
            Self::ResourceLimit(_) => "resource_limit",
        }
    }

    /// 错误所属阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::EmptyInput => "input",
            Self::FileSystem(_) => "load",
            Self::Decode(_) | Self::Timeout(_) | Self::ResourceLimit(_) => "decode",
            Self::DegenerateOverlap { .. } => "compare",
            Self::InvalidFormat(_) => "config",
        }
    }
}

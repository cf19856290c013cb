//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级统一的 `AppError` 枚举，命令行入口的所有失败都汇总到这里，
//! 库内部的 `CompareError` 通过 `From` 自动上转。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `CompareError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，供 `--json` 输出使用。

use serde::Serialize;

use crate::image_compare::CompareError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图片对比流水线错误（加载 / 解码 / 对比）
    #[error("{0}")]
    Compare(#[from] CompareError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件读取或校验失败
    #[error("设置错误: {0}")]
    Settings(String),

    /// 报告输出失败
    #[error("输出失败: {0}")]
    Output(String),
}

impl AppError {
    /// 稳定错误码，`Compare` 分支透传内部错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Compare(err) => err.code(),
            Self::Io(_) => "io",
            Self::Settings(_) => "settings",
            Self::Output(_) => "output",
        }
    }

    /// 错误所属阶段，`Compare` 分支透传流水线阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Compare(err) => err.stage(),
            Self::Io(_) => "io",
            Self::Settings(_) => "config",
            Self::Output(_) => "output",
        }
    }
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

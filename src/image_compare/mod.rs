//! # 图片对比模块（image_compare）
//!
//! ## 设计思路
//!
//! 该模块将“来源加载 → 解码为位图 → 逐像素对比 → 报告格式化 → 合成图输出”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整批对比流程
//! - `loader`：负责文件/内存字节加载与签名校验
//! - `pipeline`：负责解码、像素与内存限制、解码超时
//! - `differ`：重叠区域内的 RGB 逐像素对比
//! - `report`：批次结果 → 渲染指令 + 文本报告
//! - `composite`：渲染指令 → 并排 PNG
//! - `bitmap/outcome/source/config/error`：数据模型、配置、错误
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! main.rs / 调用方
//!    ↓
//! handler.rs（输入校验 + 配置快照 + 阶段耗时日志）
//!    ├─ loader.rs（来源加载 + 体积/签名校验）
//!    ├─ pipeline.rs（解码 + 像素限制 + 超时）
//!    └─ differ.rs（重叠区域 RGB 对比）
//!    ↓
//! ComparisonBatch
//!    ↓
//! report.rs（文本 + 渲染指令） → composite.rs（可选：写出 PNG）
//! ```

mod bitmap;
pub mod composite;
mod config;
mod differ;
mod error;
mod handler;
mod loader;
mod outcome;
mod pipeline;
pub mod report;
mod source;

#[cfg(test)]
pub(crate) mod test_support;

pub use bitmap::Bitmap;
pub use composite::{compose_side_by_side, write_composites};
pub use config::{CompareConfig, DegeneratePolicy};
pub use differ::{ComparisonResult, compare};
pub use error::CompareError;
pub use handler::CompareHandler;
pub use outcome::{ComparisonBatch, PairOutcome};
pub use report::{RenderInstructions, RenderPair, Report, ReportEntry, Surface, format_report};
pub use source::ImageSource;

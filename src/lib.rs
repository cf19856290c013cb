//! # 图片差异对比工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  命令行 (main.rs, clap)                   │
//! │        原图路径 + 派生图路径 → 文本 / JSON 报告            │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ app::run (Result<RunOutput, AppError>)
//! ┌───────┴──────────────────────────────────────────────────┐
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  ├─ settings ─── JSON 设置文件 → CompareConfig            │
//! │  ├─ app ──────── 配置合并 + 批量对比 + 报告输出            │
//! │  └─ image_compare                                         │
//! │      ├─ handler   编排：加载 → 对比（串行、保序）          │
//! │      ├─ loader    文件/内存加载 + 签名校验                  │
//! │      ├─ pipeline  解码 + 资源上限 + 解码超时               │
//! │      ├─ differ    重叠区域 RGB 逐像素对比                  │
//! │      ├─ report    文本报告 + 渲染指令                      │
//! │      └─ composite 并排 PNG 输出                            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`settings`] | 设置文件读取与校验 |
//! | [`app`] | 命令行之外可复用的运行入口 |
//! | [`image_compare`] | 图片加载、解码、对比、报告与合成图 |

pub mod app;
pub mod error;
pub mod image_compare;
pub mod settings;

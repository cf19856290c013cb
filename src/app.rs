//! 应用入口编排
//!
//! # 设计思路
//!
//! `main.rs` 只负责参数解析与输出，这里把“配置合并 → 批量对比 → 格式化 → 合成图输出”
//! 串起来，便于集成测试直接调用，而无需启动进程。

use std::path::PathBuf;

use crate::error::AppError;
use crate::image_compare::{
    CompareConfig, CompareHandler, DegeneratePolicy, ImageSource, Report, format_report,
    write_composites,
};
use crate::settings;

/// 单次运行的选项（来自命令行）。
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub settings_path: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub decode_timeout_ms: Option<u64>,
    pub abort_on_degenerate: bool,
}

/// 单次运行的产出。
#[derive(Debug)]
pub struct RunOutput {
    pub report: Report,
    /// 写出的合成图路径，未指定输出目录时为空。
    pub composites: Vec<PathBuf>,
}

/// 合并默认配置、设置文件与命令行覆盖项。
pub fn resolve_config(options: &RunOptions) -> Result<CompareConfig, AppError> {
    let mut config = CompareConfig::default();

    if let Some(path) = &options.settings_path {
        settings::load_settings(path)?.apply_to(&mut config)?;
        log::info!("⚙️ 已加载设置文件 - {}", path.display());
    }
    if let Some(timeout) = options.decode_timeout_ms {
        config.decode_timeout_ms = timeout;
    }
    if options.abort_on_degenerate {
        config.degenerate_policy = DegeneratePolicy::Abort;
    }

    config.validate()?;
    Ok(config)
}

/// 对比一张原图与多张派生图，并按需写出合成图。
pub async fn run(
    original: ImageSource,
    derived: Vec<ImageSource>,
    options: &RunOptions,
) -> Result<RunOutput, AppError> {
    let config = resolve_config(options)?;
    let gap = config.composite_gap;
    let handler = CompareHandler::new(config)?;

    let batch = handler.compare_batch(original, derived).await?;
    let report = format_report(&batch);

    let composites = match &options.out_dir {
        Some(dir) => write_composites(&report, dir, gap)?,
        None => Vec::new(),
    };

    Ok(RunOutput { report, composites })
}

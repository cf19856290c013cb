//! # 图片差异对比工具 — 命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与结果输出。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;

use clap::Parser;
use image_diff::app::{self, RunOptions};
use image_diff::error::AppError;
use image_diff::image_compare::ImageSource;

#[derive(Debug, Parser)]
#[command(name = "image-diff")]
#[command(about = "Compare an original image against derived images", long_about = None)]
struct Cli {
    /// Original image
    original: PathBuf,

    /// Derived images, compared against the original in the given order
    derived: Vec<PathBuf>,

    /// JSON settings file overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write one side-by-side PNG per pair into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Per-image decode timeout in milliseconds
    #[arg(long)]
    decode_timeout_ms: Option<u64>,

    /// Fail the whole batch when a pair has no overlapping pixels
    #[arg(long)]
    abort_on_degenerate: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        log::error!("对比失败 [{}/{}]: {}", err.stage(), err.code(), err);
        if json {
            let payload = serde_json::json!({ "error": err, "code": err.code() });
            println!("{}", payload);
        } else {
            eprintln!("Error: {}", err);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let options = RunOptions {
        settings_path: cli.config,
        out_dir: cli.out_dir,
        decode_timeout_ms: cli.decode_timeout_ms,
        abort_on_degenerate: cli.abort_on_degenerate,
    };

    let original = ImageSource::FilePath(cli.original);
    let derived = cli.derived.into_iter().map(ImageSource::FilePath).collect();

    let output = app::run(original, derived, &options).await?;

    if cli.json {
        let summary = serde_json::to_string_pretty(&output.report.summary())
            .map_err(|e| AppError::Output(format!("序列化报告失败: {}", e)))?;
        println!("{}", summary);
    } else {
        print!("{}", output.report.text);
        for path in &output.composites {
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

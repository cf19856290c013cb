//! # 报告格式化模块
//!
//! ## 设计思路
//!
//! 报告是 `ComparisonBatch` 的纯函数：不读写任何共享状态，也没有失败路径。
//! 输出分两部分：
//! - `visual`：按批次顺序的“原图 / 派生图”成对渲染指令，交给外部渲染方
//! - `text`：多行文本报告
//!
//! ## 文本格式
//!
//! ```text
//! Comparison Report:
//!
//! Result 1:
//!    Image Dimensions: 2x2
//!    Pixel Difference: 50.00%
//!
//! ```

use std::fmt::Write as _;
use std::sync::Arc;

use serde::Serialize;

use super::{Bitmap, ComparisonBatch, ComparisonResult, PairOutcome};

pub const ORIGINAL_LABEL: &str = "Original Image";
const REPORT_HEADER: &str = "Comparison Report:";
const DEGENERATE_TEXT: &str = "n/a (degenerate overlap)";

/// 一个可渲染的表面：标签 + 位图。
#[derive(Debug, Clone)]
pub struct Surface {
    pub label: String,
    pub bitmap: Arc<Bitmap>,
}

/// 一组并排展示的渲染单元。
#[derive(Debug, Clone)]
pub struct RenderPair {
    /// 从 1 开始的序号，与文本报告中的 `Result N` 对应。
    pub index: usize,
    pub original: Surface,
    pub derived: Surface,
}

pub type RenderInstructions = Vec<RenderPair>;

/// 格式化后的完整报告。
#[derive(Debug, Clone)]
pub struct Report {
    pub visual: RenderInstructions,
    pub text: String,
    entries: Vec<ReportEntry>,
}

/// 报告的可序列化摘要（不含像素数据）。
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary<'a> {
    pub results: &'a [ReportEntry],
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub index: usize,
    pub original_size: (u32, u32),
    pub derived_size: (u32, u32),
    pub overlap_width: u32,
    pub overlap_height: u32,
    pub differing_pixels: Option<u64>,
    pub diff_percentage: Option<f64>,
    pub degenerate: bool,
    pub label: String,
}

impl Report {
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn summary(&self) -> ReportSummary<'_> {
        ReportSummary {
            results: &self.entries,
            text: &self.text,
        }
    }
}

/// 将批次格式化为渲染指令与文本报告。
pub fn format_report(batch: &ComparisonBatch) -> Report {
    let mut visual = Vec::with_capacity(batch.len());
    let mut entries = Vec::with_capacity(batch.len());

    for (offset, outcome) in batch.iter().enumerate() {
        let index = offset + 1;
        let label = derived_label(outcome);

        visual.push(RenderPair {
            index,
            original: Surface {
                label: ORIGINAL_LABEL.to_string(),
                bitmap: Arc::clone(outcome.original()),
            },
            derived: Surface {
                label: label.clone(),
                bitmap: Arc::clone(outcome.derived()),
            },
        });

        let (overlap_width, overlap_height) = outcome.overlap();
        entries.push(ReportEntry {
            index,
            original_size: outcome.original().dimensions(),
            derived_size: outcome.derived().dimensions(),
            overlap_width,
            overlap_height,
            differing_pixels: outcome.as_result().map(|result| result.differing_pixels),
            diff_percentage: outcome.diff_percentage(),
            degenerate: outcome.as_result().is_none(),
            label,
        });
    }

    let text = render_text(batch);

    Report {
        visual,
        text,
        entries,
    }
}

/// 派生图标签，例如 `Derived Image - Difference: 3.27%`。
pub fn derived_label(outcome: &PairOutcome) -> String {
    match outcome.as_result() {
        Some(result) => format!("Derived Image - Difference: {}%", format_percentage(result)),
        None => "Derived Image - Difference: n/a".to_string(),
    }
}

/// 两位小数的百分比文本，逢五进一（`0.125` 输出 `0.13`）。
///
/// 直接由像素计数做整数运算，避免浮点格式化的“银行家舍入”。
fn format_percentage(result: &ComparisonResult) -> String {
    let total = u128::from(result.overlap_pixels());
    if total == 0 {
        return "0.00".to_string();
    }
    let differing = u128::from(result.differing_pixels);
    let hundredths = (differing * 20_000 + total) / (2 * total);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

fn render_text(batch: &ComparisonBatch) -> String {
    let mut report = format!("{}\n\n", REPORT_HEADER);

    for (offset, outcome) in batch.iter().enumerate() {
        let (width, height) = outcome.overlap();
        let _ = writeln!(report, "Result {}:", offset + 1);
        let _ = writeln!(report, "   Image Dimensions: {}x{}", width, height);
        match outcome.as_result() {
            Some(result) => {
                let _ = writeln!(report, "   Pixel Difference: {}%", format_percentage(result));
            }
            None => {
                let _ = writeln!(report, "   Pixel Difference: {}", DEGENERATE_TEXT);
            }
        }
        report.push('\n');
    }

    report
}

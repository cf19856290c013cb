//! # 批次结果模型
//!
//! `ComparisonBatch` 按派生图输入顺序保存每一组的结果。
//! 重叠区域为空的组以 `PairOutcome::Degenerate` 记录，不携带百分比。

use std::sync::Arc;

use super::{Bitmap, ComparisonResult};

/// 单组对比的结果。
#[derive(Debug, Clone)]
pub enum PairOutcome {
    Compared(ComparisonResult),
    Degenerate {
        original: Arc<Bitmap>,
        derived: Arc<Bitmap>,
    },
}

impl PairOutcome {
    pub fn original(&self) -> &Arc<Bitmap> {
        match self {
            Self::Compared(result) => &result.original,
            Self::Degenerate { original, .. } => original,
        }
    }

    pub fn derived(&self) -> &Arc<Bitmap> {
        match self {
            Self::Compared(result) => &result.derived,
            Self::Degenerate { derived, .. } => derived,
        }
    }

    /// 重叠区域尺寸；空重叠时至少一个方向为 0。
    pub fn overlap(&self) -> (u32, u32) {
        match self {
            Self::Compared(result) => (result.overlap_width, result.overlap_height),
            Self::Degenerate { original, derived } => (
                original.width().min(derived.width()),
                original.height().min(derived.height()),
            ),
        }
    }

    pub fn diff_percentage(&self) -> Option<f64> {
        match self {
            Self::Compared(result) => Some(result.diff_percentage),
            Self::Degenerate { .. } => None,
        }
    }

    pub fn as_result(&self) -> Option<&ComparisonResult> {
        match self {
            Self::Compared(result) => Some(result),
            Self::Degenerate { .. } => None,
        }
    }
}

/// 一次批量对比的有序结果。
///
/// 长度恒等于派生图数量，`outcomes[i]` 对应第 `i` 张派生图。
#[derive(Debug, Clone, Default)]
pub struct ComparisonBatch {
    outcomes: Vec<PairOutcome>,
}

impl ComparisonBatch {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, outcome: PairOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn outcomes(&self) -> &[PairOutcome] {
        &self.outcomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PairOutcome> {
        self.outcomes.iter()
    }

    pub fn degenerate_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, PairOutcome::Degenerate { .. }))
            .count()
    }
}

impl FromIterator<PairOutcome> for ComparisonBatch {
    fn from_iter<I: IntoIterator<Item = PairOutcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ComparisonBatch {
    type Item = &'a PairOutcome;
    type IntoIter = std::slice::Iter<'a, PairOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_overlap_reports_zero_side() {
        let outcome = PairOutcome::Degenerate {
            original: Arc::new(Bitmap::filled(5, 0, [0, 0, 0, 255])),
            derived: Arc::new(Bitmap::filled(3, 3, [0, 0, 0, 255])),
        };

        assert_eq!(outcome.overlap(), (3, 0));
        assert_eq!(outcome.diff_percentage(), None);
        assert!(outcome.as_result().is_none());
    }

    #[test]
    fn batch_counts_degenerate_outcomes() {
        let shared = Arc::new(Bitmap::filled(0, 0, [0, 0, 0, 0]));
        let batch: ComparisonBatch = (0..3)
            .map(|_| PairOutcome::Degenerate {
                original: Arc::clone(&shared),
                derived: Arc::clone(&shared),
            })
            .collect();

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.degenerate_count(), 3);
    }
}

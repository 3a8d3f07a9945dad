use super::matrix::{self, best_of, Boundary, Trace};
use super::{Alignment, Scoring};
use crate::error::Result;

/// Needleman-Wunsch 边界：第 0 行 / 列累加空位罚分，内部单元格不设下限，
/// 回溯从右下角走回原点。
#[derive(Clone, Copy, Debug, Default)]
pub struct NeedlemanWunsch;

impl Boundary for NeedlemanWunsch {
    #[inline]
    fn edge(&self, prev: i32, gap: i32, toward: Trace) -> (i32, Trace) {
        (prev + gap, toward)
    }

    #[inline]
    fn choose(&self, diag: i32, up: i32, left: i32) -> (i32, Trace) {
        best_of(diag, up, left)
    }

    fn start(&self, rows: usize, cols: usize) -> (usize, usize) {
        (rows - 1, cols - 1)
    }
}

/// 全局比对。结果覆盖两条完整序列，分值可以为负。
pub fn align_global(a: &[u8], b: &[u8], scoring: &Scoring) -> Result<Alignment> {
    matrix::align_with(a, b, scoring, NeedlemanWunsch)
}

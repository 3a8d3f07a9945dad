use super::matrix::{self, best_of, Boundary, Trace};
use super::{Alignment, Scoring};
use crate::error::Result;

/// Smith-Waterman 边界：第 0 行 / 列全为 0，内部单元格以 0 为下限，
/// 取到 0 的格子一律标记为 Stop。回溯从第一个出现的最高分单元格开始。
#[derive(Clone, Copy, Debug, Default)]
pub struct SmithWaterman {
    best: i32,
    at: (usize, usize),
}

impl SmithWaterman {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Boundary for SmithWaterman {
    #[inline]
    fn edge(&self, _prev: i32, _gap: i32, _toward: Trace) -> (i32, Trace) {
        (0, Trace::Stop)
    }

    #[inline]
    fn choose(&self, diag: i32, up: i32, left: i32) -> (i32, Trace) {
        let (score, trace) = best_of(diag, up, left);
        // 下限优先于任何同为 0 的候选
        if score <= 0 {
            (0, Trace::Stop)
        } else {
            (score, trace)
        }
    }

    #[inline]
    fn observe(&mut self, i: usize, j: usize, score: i32) {
        // 相同的最大值不覆盖先出现的位置
        if score > self.best {
            self.best = score;
            self.at = (i, j);
        }
    }

    fn start(&self, _rows: usize, _cols: usize) -> (usize, usize) {
        self.at
    }
}

/// 局部比对。分值不小于 0；没有正分单元格时结果为空。
pub fn align_local(a: &[u8], b: &[u8], scoring: &Scoring) -> Result<Alignment> {
    matrix::align_with(a, b, scoring, SmithWaterman::new())
}

//! 全局 / 局部比对共用的 DP 打分与回溯。
//!
//! 两种比对只在边界条件、单元格取值下限和回溯起点上不同，
//! 这些差异由 [`Boundary`] 策略给出，填表循环只有一份。

use log::debug;

use super::{Alignment, Scoring};
use crate::error::{InvalidInputError, Result};

/// 回溯标记，每个单元格一个字节。
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace {
    Stop = 0,
    Diagonal = 1,
    Up = 2,
    Left = 3,
}

/// 比对的边界策略。
pub trait Boundary {
    /// 第 0 行 / 第 0 列的单元格。`prev` 为相邻边界格的分值，
    /// `toward` 为该格指向前驱的方向（列为 Up，行为 Left）。
    fn edge(&self, prev: i32, gap: i32, toward: Trace) -> (i32, Trace);

    /// 内部单元格：在三个前驱候选中取值。
    fn choose(&self, diag: i32, up: i32, left: i32) -> (i32, Trace);

    /// 填表过程中按行优先顺序观察每个内部单元格。
    fn observe(&mut self, _i: usize, _j: usize, _score: i32) {}

    /// 回溯起点。
    fn start(&self, rows: usize, cols: usize) -> (usize, usize);
}

/// 三者取最大，平局时 Diagonal > Up > Left。
#[inline]
pub fn best_of(diag: i32, up: i32, left: i32) -> (i32, Trace) {
    if diag >= up && diag >= left {
        (diag, Trace::Diagonal)
    } else if up >= left {
        (up, Trace::Up)
    } else {
        (left, Trace::Left)
    }
}

/// (m+1) x (n+1) 的打分矩阵和回溯矩阵，行优先展平。
#[derive(Debug, Clone)]
pub struct DpMatrix {
    rows: usize,
    cols: usize,
    score: Vec<i32>,
    trace: Vec<Trace>,
}

impl DpMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            score: vec![0; rows * cols],
            trace: vec![Trace::Stop; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn score(&self, i: usize, j: usize) -> i32 {
        self.score[i * self.cols + j]
    }

    #[inline]
    pub fn trace(&self, i: usize, j: usize) -> Trace {
        self.trace[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: (i32, Trace)) {
        let idx = i * self.cols + j;
        self.score[idx] = value.0;
        self.trace[idx] = value.1;
    }
}

fn check_inputs(a: &[u8], b: &[u8]) -> Result<()> {
    if a.is_empty() {
        return Err(InvalidInputError::EmptySequence { which: 'A' });
    }
    if b.is_empty() {
        return Err(InvalidInputError::EmptySequence { which: 'B' });
    }
    for (which, seq) in [('A', a), ('B', b)] {
        if let Some(position) = seq.iter().position(|x| !x.is_ascii()) {
            return Err(InvalidInputError::NonAsciiSymbol { which, symbol: seq[position], position });
        }
    }
    Ok(())
}

/// 按策略填表。
pub fn fill<B: Boundary>(a: &[u8], b: &[u8], scoring: &Scoring, policy: &mut B) -> DpMatrix {
    let rows = a.len() + 1;
    let cols = b.len() + 1;
    let gap = scoring.gap;
    let mut grid = DpMatrix::new(rows, cols);

    for i in 1..rows {
        let cell = policy.edge(grid.score(i - 1, 0), gap, Trace::Up);
        grid.set(i, 0, cell);
    }
    for j in 1..cols {
        let cell = policy.edge(grid.score(0, j - 1), gap, Trace::Left);
        grid.set(0, j, cell);
    }

    for i in 1..rows {
        let ai = a[i - 1];
        for j in 1..cols {
            let diag = grid.score(i - 1, j - 1) + scoring.substitution(ai, b[j - 1]);
            let up = grid.score(i - 1, j) + gap;
            let left = grid.score(i, j - 1) + gap;
            let cell = policy.choose(diag, up, left);
            grid.set(i, j, cell);
            policy.observe(i, j, cell.0);
        }
    }
    grid
}

/// 从 (i, j) 沿回溯标记走到 Stop 单元格。
///
/// 返回 (带空位的 A, 标记行, 带空位的 B, 片段在 A 上的起点, 片段在 B 上的起点)。
fn traceback(
    a: &[u8],
    b: &[u8],
    grid: &DpMatrix,
    mut i: usize,
    mut j: usize,
) -> (Vec<u8>, Vec<u8>, Vec<u8>, usize, usize) {
    let mut top = Vec::with_capacity(i + j);
    let mut mid = Vec::with_capacity(i + j);
    let mut bottom = Vec::with_capacity(i + j);

    loop {
        match grid.trace(i, j) {
            Trace::Stop => break,
            Trace::Diagonal => {
                let (x, y) = (a[i - 1], b[j - 1]);
                top.push(x);
                mid.push(if x == y { b'*' } else { b'|' });
                bottom.push(y);
                i -= 1;
                j -= 1;
            }
            Trace::Up => {
                top.push(a[i - 1]);
                mid.push(b' ');
                bottom.push(b'-');
                i -= 1;
            }
            Trace::Left => {
                top.push(b'-');
                mid.push(b' ');
                bottom.push(b[j - 1]);
                j -= 1;
            }
        }
    }

    top.reverse();
    mid.reverse();
    bottom.reverse();
    (top, mid, bottom, i, j)
}

/// 输入已校验为 ASCII，逐字节即逐字符。
fn to_string(bytes: Vec<u8>) -> String {
    bytes.into_iter().map(char::from).collect()
}

/// 填表并回溯，得到完整比对结果。
pub fn align_with<B: Boundary>(a: &[u8], b: &[u8], scoring: &Scoring, mut policy: B) -> Result<Alignment> {
    check_inputs(a, b)?;
    debug!("aligning {}x{} with {:?}", a.len(), b.len(), scoring);

    let grid = fill(a, b, scoring, &mut policy);
    let (end_i, end_j) = policy.start(grid.rows(), grid.cols());
    let score = grid.score(end_i, end_j);
    let (top, mid, bottom, start_i, start_j) = traceback(a, b, &grid, end_i, end_j);

    Ok(Alignment {
        gapped_a: to_string(top),
        markers: to_string(mid),
        gapped_b: to_string(bottom),
        score,
        a_span: (start_i, end_i),
        b_span: (start_j, end_j),
    })
}

/// 只求最优分值，不做回溯。
pub fn score_with<B: Boundary>(a: &[u8], b: &[u8], scoring: &Scoring, mut policy: B) -> Result<i32> {
    check_inputs(a, b)?;
    let grid = fill(a, b, scoring, &mut policy);
    let (i, j) = policy.start(grid.rows(), grid.cols());
    Ok(grid.score(i, j))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_break_prefers_diagonal_then_up() {
        assert_eq!(best_of(1, 1, 1), (1, Trace::Diagonal));
        assert_eq!(best_of(0, 1, 1), (1, Trace::Up));
        assert_eq!(best_of(0, 0, 1), (1, Trace::Left));
        assert_eq!(best_of(-3, -5, -3), (-3, Trace::Diagonal));
    }

    #[test]
    fn trace_is_one_byte() {
        assert_eq!(std::mem::size_of::<Trace>(), 1);
    }

    struct Unconstrained;

    impl Boundary for Unconstrained {
        fn edge(&self, prev: i32, gap: i32, toward: Trace) -> (i32, Trace) {
            (prev + gap, toward)
        }
        fn choose(&self, diag: i32, up: i32, left: i32) -> (i32, Trace) {
            best_of(diag, up, left)
        }
        fn start(&self, rows: usize, cols: usize) -> (usize, usize) {
            (rows - 1, cols - 1)
        }
    }

    #[test]
    fn fill_initialises_edges_with_gap_sums() {
        let scoring = Scoring { match_score: 1, mismatch: -1, gap: -2 };
        let grid = fill(b"AC", b"ACG", &scoring, &mut Unconstrained);
        assert_eq!(grid.trace(0, 0), Trace::Stop);
        assert_eq!((grid.score(2, 0), grid.trace(2, 0)), (-4, Trace::Up));
        assert_eq!((grid.score(0, 3), grid.trace(0, 3)), (-6, Trace::Left));
        assert_eq!(grid.score(2, 2), 2);
        assert_eq!(grid.score(2, 3), 0);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let scoring = Scoring::default();
        assert_eq!(
            align_with(b"", b"A", &scoring, Unconstrained).unwrap_err(),
            InvalidInputError::EmptySequence { which: 'A' }
        );
        assert_eq!(
            score_with(b"A", b"", &scoring, Unconstrained).unwrap_err(),
            InvalidInputError::EmptySequence { which: 'B' }
        );
    }

    #[test]
    fn non_ascii_inputs_are_rejected() {
        let scoring = Scoring::default();
        assert_eq!(
            align_with("é".as_bytes(), b"A", &scoring, Unconstrained).unwrap_err(),
            InvalidInputError::NonAsciiSymbol { which: 'A', symbol: 0xc3, position: 0 }
        );
        assert_eq!(
            score_with(b"ACGT", "ACçT".as_bytes(), &scoring, Unconstrained).unwrap_err(),
            InvalidInputError::NonAsciiSymbol { which: 'B', symbol: 0xc3, position: 2 }
        );
    }

    #[test]
    fn rows_keep_equal_byte_length() {
        let scoring = Scoring::new(1, -1, -1);
        let aln = align_with(b"a~b{c}", b"a~{c}z", &scoring, Unconstrained).unwrap();
        assert_eq!(aln.gapped_a.len(), aln.markers.len());
        assert_eq!(aln.gapped_b.len(), aln.markers.len());
        assert_eq!(aln.gapped_a.replace('-', ""), "a~b{c}");
        assert_eq!(aln.gapped_b.replace('-', ""), "a~{c}z");
    }
}

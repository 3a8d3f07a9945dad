//! 面向调用方的薄封装：计数 / 定位 / 比对 / 仅求分值。

use crate::align::{self, AlignMode, Alignment, Scoring};
use crate::error::Result;
use crate::index::{FMIndex, Occurrences};

/// 在 `text` 中统计 `pattern` 的出现次数。每次调用都会重新建索引；
/// 同一文本上的多次查询请直接持有 [`FMIndex`]。
pub fn count_occurrences(pattern: &[u8], text: &[u8]) -> Result<usize> {
    Ok(FMIndex::from_text(text)?.count(pattern))
}

/// `pattern` 在 `text` 中的全部起点，升序。
pub fn locate_occurrences(pattern: &[u8], text: &[u8]) -> Result<Vec<usize>> {
    Ok(search(pattern, text)?.offsets)
}

pub fn search(pattern: &[u8], text: &[u8]) -> Result<Occurrences> {
    Ok(FMIndex::from_text(text)?.search(pattern))
}

pub fn align(a: &[u8], b: &[u8], scoring: &Scoring, mode: AlignMode) -> Result<Alignment> {
    align::align(a, b, scoring, mode)
}

pub fn score_only(a: &[u8], b: &[u8], scoring: &Scoring, mode: AlignMode) -> Result<i32> {
    align::score_only(a, b, scoring, mode)
}

/// 持有一个 motif，对不同目标序列查询。
#[derive(Debug, Clone)]
pub struct MotifFinder {
    motif: Vec<u8>,
}

impl MotifFinder {
    pub fn new(motif: impl Into<Vec<u8>>) -> Self {
        Self { motif: motif.into() }
    }

    pub fn motif(&self) -> &[u8] {
        &self.motif
    }

    pub fn count_occurrences(&self, target: &[u8]) -> Result<usize> {
        count_occurrences(&self.motif, target)
    }

    pub fn search_motif(&self, target: &[u8]) -> Result<Vec<usize>> {
        locate_occurrences(&self.motif, target)
    }

    /// 在已构建的索引上查询，不重新建索引。
    pub fn search_in(&self, index: &FMIndex) -> Occurrences {
        index.search(&self.motif)
    }
}

/// 持有一对序列，按不同的打分参数 / 模式比对。
#[derive(Debug, Clone, Copy)]
pub struct PairAligner<'a> {
    a: &'a [u8],
    b: &'a [u8],
}

impl<'a> PairAligner<'a> {
    pub fn new(a: &'a [u8], b: &'a [u8]) -> Self {
        Self { a, b }
    }

    pub fn align_sequences(&self, scoring: &Scoring, mode: AlignMode) -> Result<Alignment> {
        align(self.a, self.b, scoring, mode)
    }

    pub fn alignment_score(&self, scoring: &Scoring, mode: AlignMode) -> Result<i32> {
        score_only(self.a, self.b, scoring, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidInputError;

    #[test]
    fn motif_finder_counts_and_locates() {
        let finder = MotifFinder::new("A");
        assert_eq!(finder.count_occurrences(b"GATTACA").unwrap(), 3);
        assert_eq!(finder.search_motif(b"GATTACA").unwrap(), vec![1, 4, 6]);

        let index = FMIndex::from_text(b"GATTACA").unwrap();
        assert_eq!(finder.search_in(&index).offsets, vec![1, 4, 6]);
    }

    #[test]
    fn facade_passes_errors_through() {
        assert_eq!(count_occurrences(b"A", b""), Err(InvalidInputError::EmptyText));
        assert_eq!(
            score_only(b"", b"A", &Scoring::default(), AlignMode::Local),
            Err(InvalidInputError::EmptySequence { which: 'A' })
        );
    }

    #[test]
    fn pair_aligner_modes() {
        let pair = PairAligner::new(b"TGTTACGG", b"GGTTGACTA");
        let scoring = Scoring::new(1, -1, -1);
        let local = pair.align_sequences(&scoring, AlignMode::Local).unwrap();
        assert_eq!(local.gapped_b, "GTTGAC");
        assert_eq!(pair.alignment_score(&scoring, AlignMode::Local).unwrap(), 4);

        let global = pair.align_sequences(&scoring, AlignMode::Global).unwrap();
        assert_eq!(global.gapped_a.replace('-', ""), "TGTTACGG");
        assert_eq!(global.gapped_b.replace('-', ""), "GGTTGACTA");
    }
}

//! 批量查询 / 比对。各次调用互不共享可变状态，直接用 rayon 并行；
//! 输出顺序与输入顺序一致，与线程数无关。

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::align::{self, AlignMode, Scoring};
use crate::error::Result;
use crate::index::{FMIndex, Occurrences};
use crate::sequence::Sequence;

/// 默认保守阈值：局部比对分值达到该值即视为 motif 存在。
pub const DEFAULT_CONSERVATION_THRESHOLD: i32 = 4;

/// 在同一个索引上并行查询多个 pattern。
pub fn locate_many<P>(index: &FMIndex, patterns: &[P]) -> Vec<Occurrences>
where
    P: AsRef<[u8]> + Sync,
{
    patterns.par_iter().map(|p| index.search(p.as_ref())).collect()
}

/// 一条参考序列与一组目标序列的比对分值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceScore {
    pub id: String,
    pub score: i32,
}

pub fn score_against_reference(
    reference: &Sequence,
    targets: &[Sequence],
    scoring: &Scoring,
    mode: AlignMode,
) -> Result<Vec<ReferenceScore>> {
    info!("scoring {} targets against reference '{}' ({})", targets.len(), reference.id, mode);
    targets
        .par_iter()
        .map(|t| -> Result<ReferenceScore> {
            let score = align::score_only(&reference.seq, &t.seq, scoring, mode)?;
            Ok(ReferenceScore { id: t.id.clone(), score })
        })
        .collect()
}

/// motif x genome 的保守性矩阵：`matrix[m][g]` 表示 motif m 与 genome g 的
/// 局部比对分值是否不低于 `threshold`。
pub fn conservation_matrix<P>(
    motifs: &[P],
    genomes: &[Sequence],
    scoring: &Scoring,
    threshold: i32,
) -> Result<Vec<Vec<bool>>>
where
    P: AsRef<[u8]> + Sync,
{
    info!("conservation of {} motifs across {} genomes", motifs.len(), genomes.len());
    motifs
        .par_iter()
        .map(|motif| {
            genomes
                .par_iter()
                .map(|g| {
                    align::score_only(motif.as_ref(), &g.seq, scoring, AlignMode::Local)
                        .map(|score| score >= threshold)
                })
                .collect::<Result<Vec<bool>>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidInputError;

    fn genomes() -> Vec<Sequence> {
        vec![
            Sequence::new("g1", "GATCGATCTATA"),
            Sequence::new("g2", "CCCCGGGGCCCC"),
            Sequence::new("g3", "TTAATATACTAG"),
        ]
    }

    #[test]
    fn locate_many_keeps_input_order() {
        let index = FMIndex::from_text(b"GATTACA").unwrap();
        let hits = locate_many(&index, &["A", "TA", "GG", ""]);
        let counts: Vec<usize> = hits.iter().map(|h| h.count).collect();
        assert_eq!(counts, vec![3, 1, 0, 0]);
        assert_eq!(hits[0].offsets, vec![1, 4, 6]);
    }

    #[test]
    fn conservation_flags() {
        let motifs = ["GATC", "TATA", "CTAG"];
        let m = conservation_matrix(&motifs, &genomes(), &Scoring::default(), DEFAULT_CONSERVATION_THRESHOLD)
            .unwrap();
        assert_eq!(
            m,
            vec![
                vec![true, false, false],
                vec![true, false, true],
                vec![false, false, true],
            ]
        );
    }

    #[test]
    fn reference_scores_follow_targets() {
        let all = genomes();
        let scores = score_against_reference(&all[0], &all, &Scoring::default(), AlignMode::Global).unwrap();
        let ids: Vec<&str> = scores.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2", "g3"]);
        assert_eq!(scores[0].score, 12);
    }

    #[test]
    fn empty_target_fails_the_batch() {
        let reference = Sequence::new("ref", "ACGT");
        let targets = vec![Sequence::new("ok", "ACGT"), Sequence::new("empty", "")];
        assert_eq!(
            score_against_reference(&reference, &targets, &Scoring::default(), AlignMode::Local),
            Err(InvalidInputError::EmptySequence { which: 'B' })
        );
    }
}

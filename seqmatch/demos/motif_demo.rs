//! 演示如何在 library 模式下使用 seqmatch 做 motif 搜索与比对。
//!
//! 运行方式：
//! ```bash
//! cargo run --example motif_demo
//! ```

use seqmatch::align::{AlignMode, Scoring};
use seqmatch::batch;
use seqmatch::index::FMIndex;
use seqmatch::motif::{MotifFinder, PairAligner};
use seqmatch::sequence::Sequence;

fn main() -> seqmatch::Result<()> {
    // 1. 构建参考序列的 FM 索引
    let reference = Sequence::new("ref1", "ACGTACGTAGCTGATCGTAGCTAGCTAGCTGATCGTAGCTAGCTAGCTGAT");
    println!("参考序列: {} ({} bp)", reference.id, reference.len());
    let fm_idx = FMIndex::from_text(reference.as_bytes())?;
    println!("FM 索引构建完成：BWT 长度={}, 字母表={}", fm_idx.len(), String::from_utf8_lossy(&fm_idx.alphabet));

    // 2. 精确匹配搜索
    let finder = MotifFinder::new("GCTGATC");
    let hit = finder.search_in(&fm_idx);
    println!("\n精确匹配 '{}': 找到 {} 处 {:?}", String::from_utf8_lossy(finder.motif()), hit.count, hit.offsets);

    // 3. 全局 / 局部比对
    let pair = PairAligner::new(b"GATTACA", b"GCATGCU");
    let scoring = Scoring::new(1, -1, -1);
    for mode in [AlignMode::Global, AlignMode::Local] {
        let aln = pair.align_sequences(&scoring, mode)?;
        println!("\n{} 比对 (score={}):\n{}", mode, aln.score, aln);
    }

    // 4. motif 保守性
    let genomes = vec![
        reference.clone(),
        Sequence::new("ref2", "TTAGCTGATCAAACCC"),
        Sequence::new("ref3", "CCCCGGGGCCCC"),
    ];
    let motifs = ["GCTGATC", "TAGCTAG"];
    let matrix = batch::conservation_matrix(&motifs, &genomes, &Scoring::default(), 6)?;
    println!();
    for (motif, row) in motifs.iter().zip(&matrix) {
        let present: Vec<&str> = genomes
            .iter()
            .zip(row)
            .filter(|(_, hit)| **hit)
            .map(|(g, _)| g.id.as_str())
            .collect();
        println!("motif '{}' conserved in {:?}", motif, present);
    }

    println!("\n完成！");
    Ok(())
}

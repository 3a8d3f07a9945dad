//! # seqmatch
//!
//! 两个序列匹配引擎：
//!
//! - **精确子串搜索**：BWT + FM 索引反向搜索，返回匹配数与升序偏移
//! - **双序列比对**：Needleman-Wunsch 全局比对 / Smith-Waterman 局部比对，
//!   共用一套 DP 填表与回溯
//!
//! ## 快速示例
//!
//! ```rust
//! use seqmatch::align::{AlignMode, Scoring};
//! use seqmatch::index::FMIndex;
//! use seqmatch::motif;
//!
//! // 构建 FM 索引后可反复查询
//! let fm = FMIndex::from_text(b"GATTACA").unwrap();
//! let hit = fm.search(b"ACA");
//! assert_eq!((hit.count, hit.offsets), (1, vec![4]));
//!
//! // 比对
//! let aln = motif::align(b"TGTTACGG", b"GGTTGACTA", &Scoring::new(1, -1, -1), AlignMode::Local).unwrap();
//! assert_eq!(aln.gapped_a, "GTT-AC");
//! assert_eq!(aln.gapped_b, "GTTGAC");
//! ```
//!
//! ## 模块说明
//!
//! - [`index`] — 轮换排序、BWT、FM 索引
//! - [`align`] — 打分矩阵引擎、全局 / 局部比对
//! - [`motif`] — 计数 / 定位 / 比对的调用入口
//! - [`batch`] — 基于 rayon 的批量查询与比对
//! - [`sequence`] — 带标识的序列记录

pub mod error;
pub mod index;
pub mod align;
pub mod sequence;
pub mod motif;
pub mod batch;

pub use error::{InvalidInputError, Result};

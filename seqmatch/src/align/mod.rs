use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidInputError, Result};

pub mod matrix;
pub mod global;
pub mod local;

pub use global::{align_global, NeedlemanWunsch};
pub use local::{align_local, SmithWaterman};
pub use matrix::Trace;

/// 打分参数：三个值都直接累加到分值上，罚分通常取负数。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoring {
    pub match_score: i32,
    pub mismatch: i32,
    /// 每个空位
    pub gap: i32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self { match_score: 1, mismatch: -1, gap: -2 }
    }
}

impl Scoring {
    pub fn new(match_score: i32, mismatch: i32, gap: i32) -> Self {
        Self { match_score, mismatch, gap }
    }

    #[inline]
    pub fn substitution(&self, x: u8, y: u8) -> i32 {
        if x == y {
            self.match_score
        } else {
            self.mismatch
        }
    }
}

/// 比对模式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignMode {
    /// Needleman-Wunsch，覆盖两条完整序列
    #[default]
    Global,
    /// Smith-Waterman，子串比对
    Local,
}

impl FromStr for AlignMode {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self> {
        let mode = s.trim();
        if mode.eq_ignore_ascii_case("global") {
            Ok(Self::Global)
        } else if mode.eq_ignore_ascii_case("local") {
            Ok(Self::Local)
        } else {
            Err(InvalidInputError::UnknownMode(s.to_string()))
        }
    }
}

impl fmt::Display for AlignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// 比对结果。三行等长：`-` 为空位；标记行中 `*` 匹配、`|` 错配、空格为空位。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub gapped_a: String,
    pub markers: String,
    pub gapped_b: String,
    pub score: i32,
    /// 比对片段在 A 上的半开区间
    pub a_span: (usize, usize),
    /// 比对片段在 B 上的半开区间
    pub b_span: (usize, usize),
}

impl Alignment {
    /// 比对列数
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn matches(&self) -> usize {
        self.markers.bytes().filter(|&m| m == b'*').count()
    }

    pub fn mismatches(&self) -> usize {
        self.markers.bytes().filter(|&m| m == b'|').count()
    }

    pub fn gaps(&self) -> usize {
        self.markers.bytes().filter(|&m| m == b' ').count()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.gapped_a)?;
        writeln!(f, "{}", self.markers)?;
        write!(f, "{}", self.gapped_b)
    }
}

/// 按模式比对两条序列。
pub fn align(a: &[u8], b: &[u8], scoring: &Scoring, mode: AlignMode) -> Result<Alignment> {
    match mode {
        AlignMode::Global => align_global(a, b, scoring),
        AlignMode::Local => align_local(a, b, scoring),
    }
}

/// 只计算最优分值。
pub fn score_only(a: &[u8], b: &[u8], scoring: &Scoring, mode: AlignMode) -> Result<i32> {
    match mode {
        AlignMode::Global => matrix::score_with(a, b, scoring, NeedlemanWunsch),
        AlignMode::Local => matrix::score_with(a, b, scoring, SmithWaterman::new()),
    }
}

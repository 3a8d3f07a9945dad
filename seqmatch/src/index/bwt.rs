use log::debug;
use serde::{Deserialize, Serialize};

use super::sa::{self, RotationSort};
use crate::error::{InvalidInputError, Result};

/// 哨兵字符，字典序严格小于所有合法字母。
pub const SENTINEL: u8 = b'$';

/// 文本的 Burrows-Wheeler 变换及其轮换表。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bwt {
    /// 变换后的文本 L：L[k] = T[(rotations[k] - 1) mod n]
    pub transformed: Vec<u8>,
    /// 轮换表：第 k 个有序轮换在原文中的起点，同时充当偏移映射
    pub rotations: Vec<u32>,
}

/// 规范化待索引文本：缺哨兵则补上，并校验哨兵只出现在末尾一次。
pub fn normalize_text(text: &[u8]) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(InvalidInputError::EmptyText);
    }
    let mut out = Vec::with_capacity(text.len() + 1);
    out.extend_from_slice(text);
    if out.last() != Some(&SENTINEL) {
        out.push(SENTINEL);
    }
    let body = &out[..out.len() - 1];
    for (position, &symbol) in body.iter().enumerate() {
        if symbol == SENTINEL {
            return Err(InvalidInputError::MisplacedSentinel { position });
        }
        if symbol < SENTINEL {
            return Err(InvalidInputError::SymbolBelowSentinel { symbol, position });
        }
    }
    Ok(out)
}

/// 构建 BWT（朴素轮换排序）。
pub fn build(text: &[u8]) -> Result<Bwt> {
    build_with(text, RotationSort::Naive)
}

/// 以指定的轮换排序策略构建 BWT。
pub fn build_with(text: &[u8], strategy: RotationSort) -> Result<Bwt> {
    let text = normalize_text(text)?;
    let n = text.len();
    let rotations = sa::sort_rotations(&text, strategy);
    let transformed = rotations
        .iter()
        .map(|&p| text[(p as usize + n - 1) % n])
        .collect();
    debug!("built BWT of length {} ({:?} rotation sort)", n, strategy);
    Ok(Bwt { transformed, rotations })
}

impl Bwt {
    /// 长度，含哨兵。
    pub fn len(&self) -> usize {
        self.transformed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformed.is_empty()
    }

    /// 通过 LF 映射还原原文（不含哨兵）。
    pub fn invert(&self) -> Vec<u8> {
        let n = self.transformed.len();
        if n <= 1 {
            return Vec::new();
        }

        let mut counts = [0usize; 256];
        for &b in &self.transformed {
            counts[b as usize] += 1;
        }
        let mut first = [0usize; 256];
        let mut acc = 0usize;
        for (slot, &cnt) in first.iter_mut().zip(counts.iter()) {
            *slot = acc;
            acc += cnt;
        }

        // lf[i] = C[L[i]] + rank(L[i], L[0..i))
        let mut seen = [0usize; 256];
        let mut lf = vec![0usize; n];
        for (i, &b) in self.transformed.iter().enumerate() {
            lf[i] = first[b as usize] + seen[b as usize];
            seen[b as usize] += 1;
        }

        // row 0 是以哨兵开头的轮换，其 L 为原文最后一个字符
        let mut out = Vec::with_capacity(n - 1);
        let mut row = 0usize;
        for _ in 0..n - 1 {
            out.push(self.transformed[row]);
            row = lf[row];
        }
        out.reverse();
        out
    }
}

use std::path::Path;

use anyhow::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::bwt::{self, Bwt, SENTINEL};
use super::sa::RotationSort;
use crate::error::InvalidInputError;

/// Occ 采样的默认块大小
pub const DEFAULT_BLOCK: usize = 64;

/// 索引构建元信息，随索引一起持久化。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    /// 被索引文本的来源标签（序列 id 等）
    pub source: Option<String>,
    pub build_args: Option<String>,
    /// RFC3339
    pub build_timestamp: Option<String>,
}

/// 一次查询的结果：匹配数与升序排列的原文偏移。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrences {
    pub count: usize,
    pub offsets: Vec<usize>,
}

impl Occurrences {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// FM 索引：
/// - 字母表为文本中实际出现的字节（含哨兵），按字典序编号为 [0..sigma)。
/// - count / C 两张表在构建时一次扫描 L 得到。
/// - Occ 采样按定长分块存储，rank 查询时在块内顺扫补偿。
/// - 保存完整轮换表，区间直接映射回原文偏移。
///
/// 构建后不可变，可在多线程间只读共享。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FMIndex {
    /// 按字典序排列的字母表
    pub alphabet: Vec<u8>,
    pub block: u32,
    /// count[s] = L 中字母 alphabet[s] 的出现次数
    pub count: Vec<u32>,
    /// C[s] = L 中严格小于 alphabet[s] 的字母总数
    pub c: Vec<u32>,
    pub bwt: Bwt,
    /// occ_samples[block_id * sigma + s]：L[0..block_id * block) 中 alphabet[s] 的数量
    pub occ_samples: Vec<u32>,
    pub meta: IndexMeta,
}

impl FMIndex {
    /// 从原始文本构建索引（朴素轮换排序，默认块大小）。
    pub fn from_text(text: &[u8]) -> crate::Result<Self> {
        Self::from_text_with(text, RotationSort::Naive, DEFAULT_BLOCK)
    }

    pub fn from_text_with(text: &[u8], sort: RotationSort, block: usize) -> crate::Result<Self> {
        let bwt = bwt::build_with(text, sort)?;
        Ok(Self::from_bwt(bwt, block))
    }

    /// 由已构建的 BWT 计算 count / C / Occ 采样。
    pub fn from_bwt(bwt: Bwt, block: usize) -> Self {
        let block = block.max(1);
        let n = bwt.len();

        let mut freq = [0u32; 256];
        for &ch in &bwt.transformed {
            freq[ch as usize] += 1;
        }
        let alphabet: Vec<u8> = (0u8..=255).filter(|&b| freq[b as usize] > 0).collect();
        let sigma = alphabet.len();
        let count: Vec<u32> = alphabet.iter().map(|&b| freq[b as usize]).collect();

        let mut c = vec![0u32; sigma];
        let mut acc = 0u32;
        for s in 0..sigma {
            c[s] = acc;
            acc += count[s];
        }

        // 采样 Occ
        let num_blocks = (n + block - 1) / block;
        let mut occ_samples = vec![0u32; num_blocks * sigma];
        let mut running = vec![0u32; sigma];
        let mut slot_of = [0usize; 256];
        for (s, &b) in alphabet.iter().enumerate() {
            slot_of[b as usize] = s;
        }
        for bi in 0..num_blocks {
            occ_samples[bi * sigma..(bi + 1) * sigma].copy_from_slice(&running);
            let start = bi * block;
            let end = ((bi + 1) * block).min(n);
            for &ch in &bwt.transformed[start..end] {
                running[slot_of[ch as usize]] += 1;
            }
        }

        debug!("FM index: n={}, sigma={}, block={}", n, sigma, block);
        Self {
            alphabet,
            block: block as u32,
            count,
            c,
            bwt,
            occ_samples,
            meta: IndexMeta::default(),
        }
    }

    pub fn set_meta(&mut self, meta: IndexMeta) {
        self.meta = meta;
    }

    /// 被索引文本长度，含哨兵。
    pub fn len(&self) -> usize {
        self.bwt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bwt.is_empty()
    }

    #[inline]
    fn slot(&self, ch: u8) -> Option<usize> {
        self.alphabet.binary_search(&ch).ok()
    }

    /// 返回 L[0..pos) 中 alphabet[s] 的出现次数
    #[inline]
    fn occ(&self, s: usize, pos: usize) -> u32 {
        if pos == 0 {
            return 0;
        }
        let sigma = self.alphabet.len();
        let block = self.block as usize;
        let bi = (pos - 1) / block;
        let base = self.occ_samples[bi * sigma + s];
        let ch = self.alphabet[s];
        let add = self.bwt.transformed[bi * block..pos]
            .iter()
            .filter(|&&b| b == ch)
            .count() as u32;
        base + add
    }

    /// 反向搜索，返回匹配轮换在 F 列上的半开区间 [lo, hi)。
    ///
    /// 空 pattern、含哨兵的 pattern、末字符不在字母表中，均视为无匹配。
    pub fn backward_search(&self, pattern: &[u8]) -> Option<(usize, usize)> {
        if self.is_empty() || pattern.contains(&SENTINEL) {
            return None;
        }
        let (&last, rest) = pattern.split_last()?;
        let s = self.slot(last)?;
        let mut lo = self.c[s] as usize;
        let mut hi = lo + self.count[s] as usize;

        for &ch in rest.iter().rev() {
            let s = self.slot(ch)?;
            // 区间内 L[e] == ch 的行才能向前延伸
            let hits = self.bwt.transformed[lo..hi]
                .iter()
                .filter(|&&b| b == ch)
                .count();
            if hits == 0 {
                return None;
            }
            // LF 映射：下界必须用 rank 求得
            lo = self.c[s] as usize + self.occ(s, lo) as usize;
            hi = lo + hits;
        }
        Some((lo, hi))
    }

    /// 匹配数。
    pub fn count(&self, pattern: &[u8]) -> usize {
        self.backward_search(pattern).map_or(0, |(lo, hi)| hi - lo)
    }

    /// 匹配数与升序偏移。
    pub fn search(&self, pattern: &[u8]) -> Occurrences {
        let Some((lo, hi)) = self.backward_search(pattern) else {
            return Occurrences::none();
        };
        let mut offsets: Vec<usize> = self.bwt.rotations[lo..hi]
            .iter()
            .map(|&p| p as usize)
            .collect();
        offsets.sort_unstable();
        Occurrences { count: offsets.len(), offsets }
    }

    /// 还原被索引的原文（不含哨兵）。
    pub fn text(&self) -> Vec<u8> {
        self.bwt.invert()
    }

    /// 校验索引自洽：轮换表是以哨兵轮换开头的排列，count / C / Occ 采样
    /// 与 L 重新统计的结果一致。不一致视为索引未构建。
    pub fn validate(&self) -> crate::Result<()> {
        if self.rotations_consistent() && self.tables_consistent() {
            Ok(())
        } else {
            Err(InvalidInputError::IndexNotBuilt)
        }
    }

    fn rotations_consistent(&self) -> bool {
        let n = self.bwt.len();
        if n == 0 || self.bwt.rotations.len() != n || self.bwt.rotations[0] as usize != n - 1 {
            return false;
        }
        let mut seen = vec![false; n];
        for (k, &p) in self.bwt.rotations.iter().enumerate() {
            let p = p as usize;
            if p >= n || seen[p] {
                return false;
            }
            seen[p] = true;
            // L[k] 为哨兵当且仅当该轮换从原文起点开始
            if (self.bwt.transformed[k] == SENTINEL) != (p == 0) {
                return false;
            }
        }
        true
    }

    fn tables_consistent(&self) -> bool {
        if self.block == 0 {
            return false;
        }
        let rebuilt = Self::from_bwt(self.bwt.clone(), self.block as usize);
        self.alphabet.first() == Some(&SENTINEL)
            && rebuilt.alphabet == self.alphabet
            && rebuilt.count == self.count
            && rebuilt.c == self.c
            && rebuilt.occ_samples == self.occ_samples
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut f = std::io::BufWriter::new(std::fs::File::create(path.as_ref())?);
        bincode::serialize_into(&mut f, self)?;
        info!("FM index ({} symbols) saved to {}", self.len(), path.as_ref().display());
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = std::io::BufReader::new(std::fs::File::open(path.as_ref())?);
        let idx: Self = bincode::deserialize_from(f)?;
        idx.validate()?;
        info!("FM index ({} symbols) loaded from {}", idx.len(), path.as_ref().display());
        Ok(idx)
    }
}

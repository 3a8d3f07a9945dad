use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// 轮换排序策略。
///
/// 文本以唯一的哨兵结尾，所有轮换互不相同，因此两种策略产生完全相同的轮换表。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum RotationSort {
    /// 按模下标逐字符比较后排序，O(n² log n)，适合短文本
    #[default]
    Naive,
    /// 倍增法，O(n log² n)
    #[value(name = "doubling")]
    PrefixDoubling,
}

/// 对 `text` 的 n 个循环轮换按字典序排序，返回各轮换的起点。
/// `text` 必须已经以唯一的哨兵结尾（见 [`super::bwt::normalize_text`]）。
pub fn sort_rotations(text: &[u8], strategy: RotationSort) -> Vec<u32> {
    if text.is_empty() {
        return Vec::new();
    }
    match strategy {
        RotationSort::Naive => naive_rotations(text),
        RotationSort::PrefixDoubling => doubling_rotations(text),
    }
}

/// 比较以 `a`、`b` 为起点的两个轮换，不物化轮换字符串。
fn compare_rotations(text: &[u8], a: usize, b: usize) -> Ordering {
    let n = text.len();
    for k in 0..n {
        let x = text[(a + k) % n];
        let y = text[(b + k) % n];
        if x != y {
            return x.cmp(&y);
        }
    }
    Ordering::Equal
}

fn naive_rotations(text: &[u8]) -> Vec<u32> {
    let mut rotations: Vec<u32> = (0..text.len() as u32).collect();
    rotations.sort_by(|&a, &b| compare_rotations(text, a as usize, b as usize));
    rotations
}

/// 循环倍增：第 k 轮以 (rank[i], rank[(i + k) mod n]) 为键排序，
/// 直到所有 rank 互不相同。
fn doubling_rotations(text: &[u8]) -> Vec<u32> {
    let n = text.len();
    let mut order: Vec<usize> = (0..n).collect();
    let mut rank: Vec<u32> = text.iter().map(|&b| u32::from(b)).collect();
    let mut next = vec![0u32; n];

    let mut k = 1usize;
    loop {
        let key = |i: usize| (rank[i], rank[(i + k) % n]);
        order.sort_unstable_by_key(|&i| key(i));

        next[order[0]] = 0;
        for w in 1..n {
            let prev = order[w - 1];
            let cur = order[w];
            next[cur] = next[prev] + u32::from(key(cur) != key(prev));
        }

        std::mem::swap(&mut rank, &mut next);
        if rank[order[n - 1]] as usize == n - 1 || k >= n {
            break;
        }
        k <<= 1;
    }

    order.into_iter().map(|i| i as u32).collect()
}

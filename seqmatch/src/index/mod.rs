//! FM 索引构建：轮换排序 -> BWT -> count / C / Occ 表。

pub mod sa;
pub mod bwt;
pub mod fm;

pub use bwt::{Bwt, SENTINEL};
pub use fm::{FMIndex, IndexMeta, Occurrences};
pub use sa::RotationSort;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidInputError, Result};

/// 由上游（文件解析等）交付的一条序列。`id` 与 `description` 只用于标注。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    pub description: String,
    pub seq: Vec<u8>,
}

impl Sequence {
    pub fn new(id: impl Into<String>, seq: impl Into<Vec<u8>>) -> Self {
        Self { id: id.into(), description: String::new(), seq: seq.into() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.seq
    }

    /// 半开区间 [start, end) 的子序列。
    pub fn subsequence(&self, start: usize, end: usize) -> Result<&[u8]> {
        if start > end || end > self.seq.len() {
            return Err(InvalidInputError::SubsequenceOutOfRange { start, end, len: self.seq.len() });
        }
        Ok(&self.seq[start..end])
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.seq
    }
}

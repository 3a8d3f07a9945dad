use thiserror::Error;

/// 核心库唯一的错误类别：输入不合法。
///
/// 空 pattern、pattern 末字符不在字母表中等情况属于"零匹配"的正常结果，
/// 不会产生此错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// 待索引文本为空。单独的 `$` 是合法文本。
    #[error("text to index must be non-empty")]
    EmptyText,

    /// 哨兵 `$` 出现在末尾以外的位置。
    #[error("sentinel '$' found at position {position}; it may only terminate the text")]
    MisplacedSentinel { position: usize },

    /// 字节值小于哨兵，破坏"哨兵严格最小"的前提。
    #[error("symbol 0x{symbol:02x} at position {position} sorts below the sentinel '$'")]
    SymbolBelowSentinel { symbol: u8, position: usize },

    /// 参与比对的序列为空。
    #[error("sequence {which} must be non-empty")]
    EmptySequence { which: char },

    /// 比对输入含非 ASCII 字节，无法逐列对齐成等长的三行文本。
    #[error("sequence {which} has non-ASCII byte 0x{symbol:02x} at position {position}")]
    NonAsciiSymbol { which: char, symbol: u8, position: usize },

    /// 未识别的比对模式。
    #[error("unknown alignment mode '{0}' (expected 'global' or 'local')")]
    UnknownMode(String),

    /// 索引未构建，或反序列化得到的索引不一致。
    #[error("FM index has not been built")]
    IndexNotBuilt,

    #[error("subsequence [{start}, {end}) out of range for sequence of length {len}")]
    SubsequenceOutOfRange { start: usize, end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, InvalidInputError>;

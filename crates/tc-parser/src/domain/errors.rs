use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaddingError {
    #[error("padding must not be larger than 65535 (2 bytes), got {value}")]
    ValueTooLarge { value: i64 },

    #[error("padding must not be negative, got {value}")]
    ValueNegative { value: i64 },
}

#[derive(Debug, Error)]
pub enum ParseError {
    /// A tag that passed the candidate filter is missing from the registry.
    /// This indicates a parser/registry mismatch on this node, not attacker
    /// data; in dev verification mode it is fatal.
    #[error("Unsupported op-return type tag {tag:#04x} in tx {tx_id}")]
    UnsupportedOpReturnType { tag: u8, tx_id: String },
}

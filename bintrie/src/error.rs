//! Error types for trie operations and key construction.

/// Errors raised when a key cannot be placed in, or built for, a [`crate::BinaryTrie`].
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum TrieError {
    /// Key reports more significant bits than its codec allows
    #[error("prefix length {len} exceeds the maximum of {max} bits")]
    PrefixTooLong { len: usize, max: usize },

    /// Zero-length keys name the root, which never holds an entry
    #[error("zero-length keys cannot be stored")]
    EmptyKey,

    /// Bit string literal or byte/length pair is malformed
    #[error("invalid bit string: {0}")]
    InvalidBitString(String),

    /// CIDR notation could not be parsed
    #[error("invalid CIDR block: {0}")]
    InvalidCidr(String),
}

/// Result type for trie and key operations
pub type Result<T> = std::result::Result<T, TrieError>;

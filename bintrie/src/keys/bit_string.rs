use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TrieError};
use crate::keys::BitKey;
use crate::utils::bit_path::BitPath;

/// An arbitrary-length bit string key.
///
/// Bits past `len` are always zero, so two `BitString`s compare equal exactly when they
/// occupy the same trie position.
///
/// ```rust
/// use bintrie::keys::bit_string::BitString;
///
/// let a: BitString = "101".parse().unwrap();
/// let b = BitString::new(&[0b1011_1111], 3).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "101");
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct BitString {
    data: Box<[u8]>,
    len: usize,
}

impl BitString {
    /// The first `len` bits of `bytes`. Fails if `bytes` holds fewer than `len` bits.
    pub fn new(bytes: &[u8], len: usize) -> Result<Self> {
        if len > bytes.len() * 8 {
            return Err(TrieError::InvalidBitString(format!(
                "{len} bits requested from {} bytes",
                bytes.len()
            )));
        }
        let mut data = bytes[..len.div_ceil(8)].to_vec();
        if len % 8 != 0
            && let Some(last) = data.last_mut()
        {
            *last &= 0xFFu8 << (8 - len % 8);
        }
        Ok(Self {
            data: data.into_boxed_slice(),
            len,
        })
    }

    /// Every bit of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec().into_boxed_slice(),
            len: bytes.len() * 8,
        }
    }

    /// The bits of `path`, with its length.
    pub fn from_path(path: &BitPath) -> Self {
        Self {
            data: path.to_bytes().into_boxed_slice(),
            len: path.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Backing bytes, left-aligned, with trailing bits zeroed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Whether `self` is a (non-strict) bit prefix of `other`.
    pub fn is_prefix_of(&self, other: &BitString) -> bool {
        self.len <= other.len && (0..self.len).all(|i| self.bit_at(i) == other.bit_at(i))
    }
}

impl BitKey for BitString {
    const MAX_BIT_LEN: Option<usize> = None;

    #[inline(always)]
    fn bit_len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    fn bit_at(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        self.data[index / 8] & (0x80 >> (index % 8)) != 0
    }

    fn from_bits(path: &BitPath) -> Option<Self> {
        Some(Self::from_path(path))
    }
}

impl FromStr for BitString {
    type Err = TrieError;

    /// Parse a literal made of `0` and `1` characters. The empty string is the
    /// zero-length key.
    fn from_str(s: &str) -> Result<Self> {
        let mut path = BitPath::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => path.push(false),
                '1' => path.push(true),
                _ => {
                    return Err(TrieError::InvalidBitString(format!(
                        "unexpected character {c:?} in {s:?}"
                    )));
                }
            }
        }
        Ok(Self::from_path(&path))
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            f.write_str(if self.bit_at(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({self})")
    }
}

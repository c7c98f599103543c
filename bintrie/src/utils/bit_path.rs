use std::fmt;

use num_traits::PrimInt;

const WORD_BITS: usize = 64;

/// A growable, most-significant-bit-first sequence of bits.
///
/// The trie accumulates one of these while walking from a node up to the root, then
/// hands it to [`crate::keys::BitKey::from_bits`] to rebuild a domain key. The length of
/// the path is the significant length of the rebuilt key.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitPath {
    words: Vec<u64>,
    len: usize,
}

impl BitPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(bits.div_ceil(WORD_BITS)),
            len: 0,
        }
    }

    /// Build a path from the first `len` bits of any [`crate::keys::BitKey`].
    pub fn from_key<K: crate::keys::BitKey>(key: &K) -> Self {
        let len = key.bit_len();
        let mut path = Self::with_capacity(len);
        for i in 0..len {
            path.push(key.bit_at(i));
        }
        path
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, bit: bool) {
        let word = self.len / WORD_BITS;
        if word == self.words.len() {
            self.words.push(0);
        }
        let mask = 1u64 << (WORD_BITS - 1 - self.len % WORD_BITS);
        if bit {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
        self.len += 1;
    }

    pub fn pop(&mut self) -> Option<bool> {
        if self.len == 0 {
            return None;
        }
        let bit = self.get(self.len - 1);
        self.len -= 1;
        // Keep trailing storage zeroed so derived equality only sees live bits.
        let word = self.len / WORD_BITS;
        self.words[word] &= !(1u64 << (WORD_BITS - 1 - self.len % WORD_BITS));
        if self.len % WORD_BITS == 0 {
            self.words.truncate(word);
        }
        Some(bit)
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range {}", self.len);
        let mask = 1u64 << (WORD_BITS - 1 - index % WORD_BITS);
        self.words[index / WORD_BITS] & mask != 0
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Pack the path into an unsigned integer, left-aligned: bit 0 of the path lands on
    /// the integer's most significant bit. Bits past the integer's width are dropped.
    pub fn to_uint<T: PrimInt>(&self) -> T {
        let width = T::zero().count_zeros() as usize;
        let mut out = T::zero();
        for i in 0..self.len.min(width) {
            if self.get(i) {
                out = out | (T::one() << (width - 1 - i));
            }
        }
        out
    }

    /// Bytes holding the path, left-aligned, with unused trailing bits zeroed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len.div_ceil(8));
        for word in &self.words {
            out.extend_from_slice(&word.to_be_bytes());
        }
        out.truncate(self.len.div_ceil(8));
        out
    }
}

impl fmt::Debug for BitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitPath(")?;
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        write!(f, ")")
    }
}

impl FromIterator<bool> for BitPath {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut path = Self::new();
        for bit in iter {
            path.push(bit);
        }
        path
    }
}

#[cfg(test)]
mod test {
    use super::BitPath;

    #[test]
    fn push_get_pop() {
        let mut p = BitPath::new();
        for i in 0..130 {
            p.push(i % 3 == 0);
        }
        assert_eq!(p.len(), 130);
        for i in 0..130 {
            assert_eq!(p.get(i), i % 3 == 0);
        }
        for i in (0..130).rev() {
            assert_eq!(p.pop(), Some(i % 3 == 0));
        }
        assert!(p.is_empty());
        assert_eq!(p.pop(), None);
        assert_eq!(p, BitPath::new());
    }

    #[test]
    fn pop_then_push_equals_fresh() {
        let mut a: BitPath = [true, true, true].into_iter().collect();
        a.pop();
        a.push(false);
        let b: BitPath = [true, true, false].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn to_uint_left_aligned() {
        let p: BitPath = [true, true, true].into_iter().collect();
        assert_eq!(p.to_uint::<u32>(), 0xE000_0000);
        assert_eq!(p.to_uint::<u8>(), 0b1110_0000);
        assert_eq!(BitPath::new().to_uint::<u128>(), 0);
    }

    #[test]
    fn to_bytes_trims_to_len() {
        let p: BitPath = [true, false, true, false, true, false, true, false, true]
            .into_iter()
            .collect();
        assert_eq!(p.to_bytes(), vec![0b1010_1010, 0b1000_0000]);
        assert_eq!(BitPath::new().to_bytes(), Vec::<u8>::new());
    }

    #[test]
    fn from_key_matches_bits() {
        let p = BitPath::from_key(&0b1010_0000u8);
        assert_eq!(p.len(), 8);
        assert_eq!(p.to_uint::<u8>(), 0b1010_0000);
    }
}

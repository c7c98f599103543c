//! Key codecs: how domain keys map onto paths through the trie.

use crate::utils::bit_path::BitPath;
use crate::utils::{uint_bit_at, uint_width};

pub mod bit_string;
#[cfg(feature = "cidr")]
pub mod cidr;

/// A key that can be addressed bit by bit.
///
/// The trie never looks at a key other than through this trait. A key's position is the
/// sequence of its first [`bit_len`](BitKey::bit_len) bits, most significant first; two
/// keys with the same length and the same leading bits occupy the same position even if
/// they are not `==` under the type's own equality.
///
/// Implementations are stateless: every method is a pure function of its inputs.
pub trait BitKey: Clone {
    /// Largest significant length a valid key can report, or `None` when unbounded.
    const MAX_BIT_LEN: Option<usize>;

    /// Number of meaningful leading bits (the prefix length for CIDR blocks).
    fn bit_len(&self) -> usize;

    /// Value of bit `index`, for `index < self.bit_len()`.
    fn bit_at(&self, index: usize) -> bool;

    /// Synthesize the key sitting at `path`, or `None` if the codec has no key of that
    /// length.
    ///
    /// A returned key `k` satisfies `k.bit_len() == path.len()` and reproduces the bits of
    /// `path`. Equal paths yield equal keys. Variable-length codecs return a key for every
    /// path up to `MAX_BIT_LEN`; full-width integers only for paths of their full width,
    /// so branch nodes of an integer trie have no key.
    fn from_bits(path: &BitPath) -> Option<Self>;
}

macro_rules! impl_bit_key_unsigned {
    ( $($t:ty),* ) => {
    $(
    impl BitKey for $t {
        const MAX_BIT_LEN: Option<usize> = Some(<$t>::BITS as usize);

        #[inline(always)]
        fn bit_len(&self) -> usize {
            uint_width::<$t>()
        }

        #[inline(always)]
        fn bit_at(&self, index: usize) -> bool {
            uint_bit_at(*self, index)
        }

        fn from_bits(path: &BitPath) -> Option<Self> {
            (path.len() == uint_width::<$t>()).then(|| path.to_uint::<$t>())
        }
    }
    ) *
    }
}
impl_bit_key_unsigned!(u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod test {
    use crate::keys::BitKey;
    use crate::utils::bit_path::BitPath;

    #[test]
    fn unsigned_round_trip() {
        for v in [0u32, 1, 0xDEAD_BEEF, u32::MAX] {
            assert_eq!(v.bit_len(), 32);
            assert_eq!(u32::from_bits(&BitPath::from_key(&v)), Some(v));
        }
        let v = 0x0123_4567_89AB_CDEF_0011_2233_4455_6677u128;
        assert_eq!(u128::from_bits(&BitPath::from_key(&v)), Some(v));
    }

    #[test]
    fn unsigned_has_no_key_for_short_paths() {
        let p: BitPath = [true].into_iter().collect();
        assert_eq!(u8::from_bits(&p), None);
        assert_eq!(u8::from_bits(&BitPath::new()), None);
        let full: BitPath = [true, false, false, false, false, false, false, false]
            .into_iter()
            .collect();
        assert_eq!(u8::from_bits(&full), Some(0x80));
    }

    #[test]
    fn unsigned_bits_msb_first() {
        assert!(0x80u8.bit_at(0));
        assert!(!0x80u8.bit_at(7));
        assert!(1u64.bit_at(63));
    }
}

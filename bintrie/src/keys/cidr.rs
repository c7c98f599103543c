//! CIDR network blocks as trie keys.
//!
//! Host bits are masked off at construction, so `10.1.2.3/8` and `10.0.0.0/8` are the
//! same key. Both families share their bit handling through [`num_traits::PrimInt`].

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::{Result, TrieError};
use crate::keys::BitKey;
use crate::utils::bit_path::BitPath;
use crate::utils::{uint_bit_at, uint_prefix_mask};

fn parse_len(s: &str, text: &str, max: u8) -> Result<u8> {
    let len: u8 = s
        .parse()
        .map_err(|_| TrieError::InvalidCidr(format!("bad prefix length in {text:?}")))?;
    if len > max {
        return Err(TrieError::PrefixTooLong {
            len: len as usize,
            max: max as usize,
        });
    }
    Ok(len)
}

macro_rules! cidr_key {
    ($name:ident, $addr:ty, $uint:ty, $bits:expr, $family:literal) => {
        #[doc = concat!("An ", $family, " network block: address plus prefix length.")]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            bits: $uint,
            len: u8,
        }

        impl $name {
            pub const MAX_LEN: u8 = $bits;

            /// Network block of `addr` with `len` significant bits; host bits are cleared.
            pub fn new(addr: $addr, len: u8) -> Result<Self> {
                if len > Self::MAX_LEN {
                    return Err(TrieError::PrefixTooLong {
                        len: len as usize,
                        max: Self::MAX_LEN as usize,
                    });
                }
                Ok(Self::from_raw(<$uint>::from(addr), len))
            }

            fn from_raw(bits: $uint, len: u8) -> Self {
                Self {
                    bits: bits & uint_prefix_mask::<$uint>(len as usize),
                    len,
                }
            }

            /// The single-address block `addr/MAX_LEN`.
            pub fn host(addr: $addr) -> Self {
                Self::from_raw(<$uint>::from(addr), Self::MAX_LEN)
            }

            pub fn network(&self) -> $addr {
                <$addr>::from(self.bits)
            }

            pub fn prefix_len(&self) -> u8 {
                self.len
            }

            /// Whether `other` lies inside this block (a block contains itself).
            pub fn contains(&self, other: &Self) -> bool {
                other.len >= self.len
                    && other.bits & uint_prefix_mask::<$uint>(self.len as usize) == self.bits
            }
        }

        impl BitKey for $name {
            const MAX_BIT_LEN: Option<usize> = Some($bits);

            #[inline(always)]
            fn bit_len(&self) -> usize {
                self.len as usize
            }

            #[inline(always)]
            fn bit_at(&self, index: usize) -> bool {
                uint_bit_at(self.bits, index)
            }

            fn from_bits(path: &BitPath) -> Option<Self> {
                (path.len() <= $bits)
                    .then(|| Self::from_raw(path.to_uint::<$uint>(), path.len() as u8))
            }
        }

        impl From<$addr> for $name {
            fn from(addr: $addr) -> Self {
                Self::host(addr)
            }
        }

        impl FromStr for $name {
            type Err = TrieError;

            /// Parse `addr/len`; a bare address is a host block.
            fn from_str(s: &str) -> Result<Self> {
                let (addr, len) = match s.split_once('/') {
                    Some((addr, len)) => (addr, parse_len(len, s, Self::MAX_LEN)?),
                    None => (s, Self::MAX_LEN),
                };
                let addr: $addr = addr
                    .parse()
                    .map_err(|_| TrieError::InvalidCidr(format!("bad address in {s:?}")))?;
                Self::new(addr, len)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}/{}", self.network(), self.len)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }
    };
}

cidr_key!(Ipv4Cidr, Ipv4Addr, u32, 32, "IPv4");
cidr_key!(Ipv6Cidr, Ipv6Addr, u128, 128, "IPv6");

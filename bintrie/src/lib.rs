//! # bintrie
//!
//! An order-preserving binary prefix trie: a map whose keys are bit strings with a
//! significant length, such as CIDR network blocks.
//!
//! Beyond ordinary map operations it answers two questions ordinary maps cannot:
//!
//! - **Prefix order**: iteration visits a prefix before everything it contains, and
//!   otherwise orders by bits (0 before 1).
//! - **Ancestor queries**: [`BinaryTrie::values_along_prefix`] returns every stored
//!   entry whose key is a prefix of a given key, shortest first. The last one is the
//!   longest-prefix match used by routing tables and firewalls.
//!
//! The trie only sees keys through the [`BitKey`] trait. Full-width unsigned integers,
//! [`BitString`] and, with the default `cidr` feature, [`Ipv4Cidr`] and [`Ipv6Cidr`]
//! implement it.
//!
//! ```rust
//! use bintrie::{BinaryTrie, Ipv4Cidr};
//!
//! let mut trie = BinaryTrie::<Ipv4Cidr, &str>::new();
//! trie.insert("0.0.0.0/1".parse().unwrap(), "a");
//! trie.insert("0.0.0.0/3".parse().unwrap(), "b");
//! trie.insert("128.0.0.0/1".parse().unwrap(), "c");
//! trie.insert("224.0.0.0/3".parse().unwrap(), "d");
//!
//! assert_eq!(
//!     trie.key_view().to_string(),
//!     "[0.0.0.0/1, 0.0.0.0/3, 128.0.0.0/1, 224.0.0.0/3]"
//! );
//! let q: Ipv4Cidr = "224.0.0.0/3".parse().unwrap();
//! assert_eq!(trie.values_along_prefix(&q, true), vec![&"c", &"d"]);
//! ```

pub mod cursor;
pub mod error;
pub mod iter;
pub mod keys;
mod node;
pub mod stats;
pub mod trie;
pub mod utils;
pub mod views;

pub use cursor::NodeRef;
pub use error::{Result, TrieError};
pub use keys::BitKey;
pub use keys::bit_string::BitString;
#[cfg(feature = "cidr")]
pub use keys::cidr::{Ipv4Cidr, Ipv6Cidr};
pub use trie::BinaryTrie;
pub use utils::bit_path::BitPath;

/// A trie of IPv4 network blocks.
#[cfg(feature = "cidr")]
pub type Ipv4Trie<V> = BinaryTrie<Ipv4Cidr, V>;

/// A trie of IPv6 network blocks.
#[cfg(feature = "cidr")]
pub type Ipv6Trie<V> = BinaryTrie<Ipv6Cidr, V>;

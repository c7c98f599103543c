//! Borrowed collection views over a trie.
//!
//! Views fix no snapshot: each `iter()` call starts a fresh walk over the trie as it is
//! now. They exist mostly so a trie's keys, values or entries can be counted, re-walked
//! and printed as a list without collecting them first.

use std::fmt;

use crate::iter::{Iter, Keys, Values};
use crate::keys::BitKey;
use crate::trie::BinaryTrie;

fn write_list<I, F>(f: &mut fmt::Formatter<'_>, items: I, mut write_item: F) -> fmt::Result
where
    I: Iterator,
    F: FnMut(&mut fmt::Formatter<'_>, I::Item) -> fmt::Result,
{
    f.write_str("[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_str("]")
}

macro_rules! view {
    ($name:ident, $iter:ident, $doc:literal) => {
        #[doc = $doc]
        pub struct $name<'a, K: BitKey, V> {
            trie: &'a BinaryTrie<K, V>,
        }

        impl<K: BitKey, V> Clone for $name<'_, K, V> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<K: BitKey, V> Copy for $name<'_, K, V> {}

        impl<'a, K: BitKey, V> $name<'a, K, V> {
            pub(crate) fn new(trie: &'a BinaryTrie<K, V>) -> Self {
                Self { trie }
            }

            /// A fresh walk from the first entry.
            pub fn iter(&self) -> $iter<'a, K, V> {
                $iter::new(self.trie)
            }

            pub fn len(&self) -> usize {
                self.trie.len()
            }

            pub fn is_empty(&self) -> bool {
                self.trie.is_empty()
            }
        }

        impl<'a, K: BitKey, V> IntoIterator for $name<'a, K, V> {
            type Item = <$iter<'a, K, V> as Iterator>::Item;
            type IntoIter = $iter<'a, K, V>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }
    };
}

view!(KeysView, Keys, "Keys of a trie, in prefix order.");
view!(ValuesView, Values, "Values of a trie, in prefix order.");
view!(EntriesView, Iter, "Key-value pairs of a trie, in prefix order.");

impl<K, V> fmt::Display for KeysView<'_, K, V>
where
    K: BitKey + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.iter(), |f, k| write!(f, "{k}"))
    }
}

impl<K, V> fmt::Display for ValuesView<'_, K, V>
where
    K: BitKey,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.iter(), |f, v| write!(f, "{v}"))
    }
}

impl<K, V> fmt::Display for EntriesView<'_, K, V>
where
    K: BitKey + fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.iter(), |f, (k, v)| write!(f, "{k}={v}"))
    }
}

#[cfg(test)]
mod tests {
    use crate::keys::bit_string::BitString;
    use crate::trie::BinaryTrie;

    #[test]
    fn test_views_restart_and_render() {
        let mut trie = BinaryTrie::<BitString, u32>::new();
        for (k, v) in [("1", 1), ("0", 0), ("01", 2)] {
            trie.insert(k.parse().unwrap(), v);
        }

        let keys = trie.key_view();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys.to_string(), "[0, 01, 1]");
        assert_eq!(keys.iter().count(), 3);
        assert_eq!(keys.into_iter().count(), 3);

        assert_eq!(trie.value_view().to_string(), "[0, 2, 1]");
        assert_eq!(trie.entries().to_string(), "[0=0, 01=2, 1=1]");
        assert_eq!(
            trie.entries().into_iter().map(|(_, v)| *v).sum::<u32>(),
            3
        );

        let empty = BinaryTrie::<BitString, u32>::new();
        assert!(empty.entries().is_empty());
        assert_eq!(empty.key_view().to_string(), "[]");
    }
}

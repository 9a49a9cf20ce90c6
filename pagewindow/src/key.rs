#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

#[cfg(feature = "std")]
pub(crate) type KeySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySet<K> = BTreeSet<K>;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

/// Bounds required of a page identifier.
///
/// With `std` this is `Hash + Eq`; without it, `Ord` (ids are kept in B-tree collections).
#[cfg(feature = "std")]
pub trait PageKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> PageKey for K {}

#[cfg(not(feature = "std"))]
pub trait PageKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> PageKey for K {}

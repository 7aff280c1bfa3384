//! Turning values into chains
//!
//! [`IntoIterate`] picks the adapter for a value at compile time. The crate
//! implements it for chains themselves, vectors, the standard and `indexmap`
//! maps and sets, and `Option`. A custom structure opts in by implementing
//! the trait, usually by wrapping itself in a [`custom`] source or a
//! [`HasEntries`](crate::sources::HasEntries) adapter.

use crate::error::Result;
use crate::iterate::Iterate;
use crate::source::Driver;
use crate::sources::{array, empty, entries, single, vec};
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

/// Value that knows which adapter iterates it
pub trait IntoIterate<'a> {
    type Key: 'a;
    type Value: 'a;

    fn into_iterate(self) -> Iterate<'a, Self::Key, Self::Value>;
}

impl<'a, K: 'a, V: 'a> IntoIterate<'a> for Iterate<'a, K, V> {
    type Key = K;
    type Value = V;

    fn into_iterate(self) -> Iterate<'a, K, V> {
        self
    }
}

impl<'a, T: 'a> IntoIterate<'a> for &'a mut Vec<T> {
    type Key = usize;
    type Value = T;

    fn into_iterate(self) -> Iterate<'a, usize, T> {
        array(self)
    }
}

impl<'a, T: 'a> IntoIterate<'a> for Vec<T> {
    type Key = usize;
    type Value = T;

    fn into_iterate(self) -> Iterate<'a, usize, T> {
        vec(self)
    }
}

/// `None` iterates nothing, `Some` one element
impl<'a, T: 'a> IntoIterate<'a> for Option<T> {
    type Key = usize;
    type Value = T;

    fn into_iterate(self) -> Iterate<'a, usize, T> {
        match self {
            Some(value) => single(value),
            None => empty(),
        }
    }
}

macro_rules! keyed_into_iterate {
    ($container:ty, $key:ty, $value:ty, [$($bounds:tt)*]) => {
        impl<'a, $($bounds)*> IntoIterate<'a> for &'a mut $container {
            type Key = $key;
            type Value = $value;

            fn into_iterate(self) -> Iterate<'a, $key, $value> {
                entries(self)
            }
        }
    };
}

keyed_into_iterate!(HashMap<K, V, S>, K, V, [K: Clone + Eq + Hash + 'a, V: 'a, S: BuildHasher + 'a]);
keyed_into_iterate!(BTreeMap<K, V>, K, V, [K: Clone + Ord + 'a, V: 'a]);
keyed_into_iterate!(IndexMap<K, V, S>, K, V, [K: Clone + Eq + Hash + 'a, V: 'a, S: BuildHasher + 'a]);
keyed_into_iterate!(HashSet<T, S>, T, T, [T: Clone + Eq + Hash + 'a, S: BuildHasher + 'a]);
keyed_into_iterate!(BTreeSet<T>, T, T, [T: Clone + Ord + 'a]);
keyed_into_iterate!(IndexSet<T, S>, T, T, [T: Clone + Eq + Hash + 'a, S: BuildHasher + 'a]);

/// Chain over any value with an adapter
pub fn from<'a, S: IntoIterate<'a>>(source: S) -> Iterate<'a, S::Key, S::Value> {
    source.into_iterate()
}

/// Chain over a hand-written adapter closure
pub fn custom<'a, K, V, F>(drive: F) -> Iterate<'a, K, V>
where
    K: 'a,
    V: 'a,
    F: Fn(&mut Driver<'_, K, V>) -> Result<()> + 'a,
{
    Iterate::new(drive)
}

/// Package a chain-building function as a reusable `(source, args)` function
///
/// Every call dispatches a fresh chain over the given source.
pub fn pipeline<'a, S, A, R, F>(build: F) -> impl Fn(S, A) -> Result<R>
where
    S: IntoIterate<'a>,
    F: Fn(Iterate<'a, S::Key, S::Value>, A) -> Result<R>,
{
    move |source, args| build(source.into_iterate(), args)
}

use crate::action::Action;
use crate::backing::Backing;
use crate::error::{IterateError, Result};
use crate::iterate::Iterate;
use crate::source::{Driver, Source, unsupported};
use indexmap::{IndexMap, IndexSet};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

/// Container that can list its entries by key
///
/// This is the integration point for keyed structures. Maps and sets from the
/// standard library and `indexmap` implement it; a custom container only
/// needs `entry_keys` and `entry`, and opts into mutation by overriding
/// `remove_entry` / `replace_entry`. Those return `false` when the container
/// cannot perform the change.
pub trait HasEntries {
    type Key: Clone;
    type Value;

    /// Snapshot of the keys in iteration order
    fn entry_keys(&self) -> Vec<Self::Key>;

    fn entry(&self, key: &Self::Key) -> Option<&Self::Value>;

    fn remove_entry(&mut self, _key: &Self::Key) -> bool {
        false
    }

    fn replace_entry(&mut self, _key: &Self::Key, _value: Self::Value) -> bool {
        false
    }
}

impl<K, V, S> HasEntries for HashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn entry_keys(&self) -> Vec<K> {
        self.keys().cloned().collect()
    }

    fn entry(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn remove_entry(&mut self, key: &K) -> bool {
        self.remove(key);
        true
    }

    fn replace_entry(&mut self, key: &K, value: V) -> bool {
        self.insert(key.clone(), value);
        true
    }
}

impl<K, V> HasEntries for BTreeMap<K, V>
where
    K: Clone + Ord,
{
    type Key = K;
    type Value = V;

    fn entry_keys(&self) -> Vec<K> {
        self.keys().cloned().collect()
    }

    fn entry(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn remove_entry(&mut self, key: &K) -> bool {
        self.remove(key);
        true
    }

    fn replace_entry(&mut self, key: &K, value: V) -> bool {
        self.insert(key.clone(), value);
        true
    }
}

impl<K, V, S> HasEntries for IndexMap<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn entry_keys(&self) -> Vec<K> {
        self.keys().cloned().collect()
    }

    fn entry(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn remove_entry(&mut self, key: &K) -> bool {
        self.shift_remove(key);
        true
    }

    fn replace_entry(&mut self, key: &K, value: V) -> bool {
        self.insert(key.clone(), value);
        true
    }
}

// Sets are keyed by their own elements. Replacing deletes the old element and
// adds the new one.

impl<T, S> HasEntries for HashSet<T, S>
where
    T: Clone + Eq + Hash,
    S: BuildHasher,
{
    type Key = T;
    type Value = T;

    fn entry_keys(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    fn entry(&self, key: &T) -> Option<&T> {
        self.get(key)
    }

    fn remove_entry(&mut self, key: &T) -> bool {
        self.remove(key);
        true
    }

    fn replace_entry(&mut self, key: &T, value: T) -> bool {
        self.remove(key);
        self.insert(value);
        true
    }
}

impl<T> HasEntries for BTreeSet<T>
where
    T: Clone + Ord,
{
    type Key = T;
    type Value = T;

    fn entry_keys(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    fn entry(&self, key: &T) -> Option<&T> {
        self.get(key)
    }

    fn remove_entry(&mut self, key: &T) -> bool {
        self.remove(key);
        true
    }

    fn replace_entry(&mut self, key: &T, value: T) -> bool {
        self.remove(key);
        self.insert(value);
        true
    }
}

impl<T, S> HasEntries for IndexSet<T, S>
where
    T: Clone + Eq + Hash,
    S: BuildHasher,
{
    type Key = T;
    type Value = T;

    fn entry_keys(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    fn entry(&self, key: &T) -> Option<&T> {
        self.get(key)
    }

    fn remove_entry(&mut self, key: &T) -> bool {
        self.shift_remove(key);
        true
    }

    fn replace_entry(&mut self, key: &T, value: T) -> bool {
        self.shift_remove(key);
        self.insert(value);
        true
    }
}

/// Adapter over any [`HasEntries`] container
///
/// Keys are snapshotted at the start of each traversal, so entries removed or
/// replaced along the way never disturb the walk.
pub struct EntriesSource<'a, C> {
    container: RefCell<Backing<'a, C>>,
    strict: bool,
}

impl<'a, C: HasEntries> EntriesSource<'a, C> {
    pub fn new(container: Backing<'a, C>) -> Self {
        EntriesSource {
            container: RefCell::new(container),
            strict: true,
        }
    }

    /// In non-strict mode, removals and replacements the container refuses
    /// are dropped instead of failing the traversal
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn apply(&self, key: &C::Key, action: Action, value: Option<C::Value>) -> Result<()> {
        let mut container = self
            .container
            .try_borrow_mut()
            .map_err(|_| IterateError::reentrant("entries"))?;
        let applied = match (action, value) {
            (Action::Remove, _) => container.remove_entry(key),
            (Action::Replace, Some(value)) => container.replace_entry(key, value),
            _ => true,
        };
        if applied {
            return Ok(());
        }
        drop(container);
        unsupported("entries", action, self.strict)
    }
}

impl<'a, C: HasEntries> Source<C::Key, C::Value> for EntriesSource<'a, C> {
    fn drive(&self, driver: &mut Driver<'_, C::Key, C::Value>) -> Result<()> {
        let keys = self
            .container
            .try_borrow()
            .map_err(|_| IterateError::reentrant("entries"))?
            .entry_keys();

        for key in keys {
            let action = {
                let container = self
                    .container
                    .try_borrow()
                    .map_err(|_| IterateError::reentrant("entries"))?;
                match container.entry(&key) {
                    Some(value) => driver.act(value, &key)?,
                    None => continue,
                }
            };

            match action {
                Action::Continue => {}
                Action::Stop => return Ok(()),
                Action::Remove => self.apply(&key, action, None)?,
                Action::Replace => {
                    let replacement = driver.replacement();
                    self.apply(&key, action, replacement)?;
                }
            }
        }
        Ok(())
    }
}

/// Iterate over a borrowed keyed container
pub fn entries<'a, C>(container: &'a mut C) -> Iterate<'a, C::Key, C::Value>
where
    C: HasEntries + 'a,
{
    Iterate::new(EntriesSource::new(Backing::Borrowed(container)))
}

/// Iterate over a borrowed map; alias of [`entries`] for readability
pub fn map<'a, C>(container: &'a mut C) -> Iterate<'a, C::Key, C::Value>
where
    C: HasEntries + 'a,
{
    entries(container)
}

/// Iterate over a borrowed set; elements are their own keys
pub fn set<'a, T, C>(container: &'a mut C) -> Iterate<'a, T, T>
where
    C: HasEntries<Key = T, Value = T> + 'a,
    T: Clone + 'a,
{
    entries(container)
}

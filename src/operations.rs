use crate::config::Comparator;
use crate::error::Result;
use crate::iterate::Iterate;
use indexmap::{IndexMap, IndexSet};
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::Hash;

impl<'a, K: 'a, V: 'a> Iterate<'a, K, V> {
    /// Whether there is at least one element; visits at most one
    pub fn has(&self) -> Result<bool> {
        let mut found = false;
        self.each(|_, _, cursor| {
            found = true;
            cursor.stop();
        })?;
        Ok(found)
    }

    /// Whether there are no elements
    pub fn empty(&self) -> Result<bool> {
        Ok(!self.has()?)
    }

    /// Whether some element equals `value` under the configured equality
    pub fn contains(&self, value: &V) -> Result<bool>
    where
        V: PartialEq,
    {
        let equality = self.equality();
        let mut found = false;
        self.each(|element, key, cursor| {
            if equality.equals(value, element, key, key) {
                found = true;
                cursor.stop();
            }
        })?;
        Ok(found)
    }

    /// Number of elements; visits all of them
    pub fn count(&self) -> Result<usize> {
        let mut count = 0;
        self.each(|_, _, _| count += 1)?;
        Ok(count)
    }

    /// Clone of the first element; stops the source right after it
    pub fn first(&self) -> Result<Option<V>>
    where
        V: Clone,
    {
        let mut first = None;
        self.each(|value, _, cursor| {
            first = Some(value.clone());
            cursor.stop();
        })?;
        Ok(first)
    }

    /// Clone of the last element
    pub fn last(&self) -> Result<Option<V>>
    where
        V: Clone,
    {
        let mut last = None;
        self.each(|value, _, _| last = Some(value.clone()))?;
        Ok(last)
    }

    /// Left fold over every element, accumulating in place
    pub fn reduce<R, F>(&self, initial: R, mut fold: F) -> Result<R>
    where
        F: FnMut(&mut R, &V, &K),
    {
        let mut accumulator = initial;
        self.each(|value, key, _| fold(&mut accumulator, value, key))?;
        Ok(accumulator)
    }

    fn extreme(&self, comparator: &Comparator<'a, K, V>, wanted: Ordering) -> Result<Option<V>>
    where
        K: Clone,
        V: Clone,
    {
        let best = self.reduce(None, |best: &mut Option<(K, V)>, value, key| {
            let better = match best {
                Some((best_key, best_value)) => comparator.compare(value, best_value, key, best_key) == wanted,
                None => true,
            };
            if better {
                *best = Some((key.clone(), value.clone()));
            }
        })?;
        Ok(best.map(|(_, value)| value))
    }

    /// Smallest element under the configured comparator; the first one wins ties
    pub fn min(&self) -> Result<Option<V>>
    where
        K: Clone,
        V: Clone,
    {
        self.min_by(&self.comparator("min")?)
    }

    /// [`min`](Iterate::min) with an inline comparator
    pub fn min_by(&self, comparator: &Comparator<'a, K, V>) -> Result<Option<V>>
    where
        K: Clone,
        V: Clone,
    {
        self.extreme(comparator, Ordering::Less)
    }

    /// Largest element under the configured comparator; the first one wins ties
    pub fn max(&self) -> Result<Option<V>>
    where
        K: Clone,
        V: Clone,
    {
        self.max_by(&self.comparator("max")?)
    }

    /// [`max`](Iterate::max) with an inline comparator
    pub fn max_by(&self, comparator: &Comparator<'a, K, V>) -> Result<Option<V>>
    where
        K: Clone,
        V: Clone,
    {
        self.extreme(comparator, Ordering::Greater)
    }

    /// Values in traversal order
    pub fn array(&self) -> Result<Vec<V>>
    where
        V: Clone,
    {
        let mut out = Vec::new();
        self.array_into(&mut out)?;
        Ok(out)
    }

    /// Append every value to `out`
    pub fn array_into(&self, out: &mut Vec<V>) -> Result<&Self>
    where
        V: Clone,
    {
        self.each(|value, _, _| out.push(value.clone()))
    }

    /// Distinct values in order of first appearance
    pub fn set(&self) -> Result<IndexSet<V>>
    where
        V: Clone + Hash + Eq,
    {
        let mut out = IndexSet::new();
        self.set_into(&mut out)?;
        Ok(out)
    }

    /// Insert every value into `out`
    pub fn set_into(&self, out: &mut IndexSet<V>) -> Result<&Self>
    where
        V: Clone + Hash + Eq,
    {
        self.each(|value, _, _| {
            out.insert(value.clone());
        })
    }

    /// Key to value map in traversal order; a repeated key keeps the last value
    pub fn map(&self) -> Result<IndexMap<K, V>>
    where
        K: Clone + Hash + Eq,
        V: Clone,
    {
        let mut out = IndexMap::new();
        self.map_into(&mut out)?;
        Ok(out)
    }

    /// Insert every key and value into `out`
    pub fn map_into(&self, out: &mut IndexMap<K, V>) -> Result<&Self>
    where
        K: Clone + Hash + Eq,
        V: Clone,
    {
        self.each(|value, key, _| {
            out.insert(key.clone(), value.clone());
        })
    }

    /// Like [`map`](Iterate::map) with keys rendered as strings
    pub fn object(&self) -> Result<IndexMap<String, V>>
    where
        K: Display,
        V: Clone,
    {
        let mut out = IndexMap::new();
        self.object_into(&mut out)?;
        Ok(out)
    }

    /// Insert every stringified key and value into `out`
    pub fn object_into(&self, out: &mut IndexMap<String, V>) -> Result<&Self>
    where
        K: Display,
        V: Clone,
    {
        self.each(|value, key, _| {
            out.insert(key.to_string(), value.clone());
        })
    }

    /// `(key, value)` pairs in traversal order
    pub fn entries(&self) -> Result<Vec<(K, V)>>
    where
        K: Clone,
        V: Clone,
    {
        let mut out = Vec::new();
        self.entries_into(&mut out)?;
        Ok(out)
    }

    /// Append every `(key, value)` pair to `out`
    pub fn entries_into(&self, out: &mut Vec<(K, V)>) -> Result<&Self>
    where
        K: Clone,
        V: Clone,
    {
        self.each(|value, key, _| out.push((key.clone(), value.clone())))
    }

    /// Bucket values by `by(value)`, buckets in order of first appearance
    pub fn group<G, F>(&self, by: F) -> Result<IndexMap<G, Vec<V>>>
    where
        G: Hash + Eq,
        F: FnMut(&V) -> G,
        V: Clone,
    {
        let mut out = IndexMap::new();
        self.group_into(&mut out, by)?;
        Ok(out)
    }

    /// Append each value to its bucket in `out`
    pub fn group_into<G, F>(&self, out: &mut IndexMap<G, Vec<V>>, mut by: F) -> Result<&Self>
    where
        G: Hash + Eq,
        F: FnMut(&V) -> G,
        V: Clone,
    {
        self.each(|value, _, _| {
            out.entry(by(value)).or_default().push(value.clone());
        })
    }
}

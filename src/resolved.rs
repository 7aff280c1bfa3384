use crate::action::Action;
use crate::config::Comparator;
use crate::error::Result;
use crate::iterate::Iterate;
use crate::source::{Driver, Source};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// How a materializing view reorders its snapshot
pub enum Reorder<'a, K, V> {
    Reverse,
    Sort(Comparator<'a, K, V>),
    Shuffle { passes: usize, seed: Option<u64> },
}

impl<'a, K: 'a, V: 'a> Reorder<'a, K, V> {
    fn apply(&self, snapshot: &mut [(usize, K, V)]) {
        match self {
            Reorder::Reverse => snapshot.reverse(),
            Reorder::Sort(comparator) => {
                snapshot.sort_by(|(_, a_key, a), (_, b_key, b)| comparator.compare(a, b, a_key, b_key))
            }
            Reorder::Shuffle { passes, seed: Some(seed) } => {
                shuffle(snapshot, *passes, &mut StdRng::seed_from_u64(*seed))
            }
            Reorder::Shuffle { passes, seed: None } => shuffle(snapshot, *passes, &mut rand::thread_rng()),
        }
    }
}

fn shuffle<T>(items: &mut [T], passes: usize, rng: &mut impl Rng) {
    for _ in 0..passes {
        items.shuffle(rng);
    }
}

enum Pending<V> {
    Remove,
    Replace(V),
}

/// View that fully snapshots its parent before producing anything
///
/// A traversal runs in up to three steps:
///
/// 1. Drive the parent once, cloning every `(key, value)` together with its
///    position in the parent's order.
/// 2. Reorder the snapshot and replay it downstream, recording each remove or
///    replace request against the original position.
/// 3. If anything was requested, drive the parent again and apply the
///    recorded actions by position.
///
/// Step 3 relies on the parent replaying in the same order as step 1. That
/// holds for every adapter in this crate as long as the backing structure is
/// not changed through another path in between.
pub struct Resolved<'a, K, V> {
    parent: Iterate<'a, K, V>,
    reorder: Reorder<'a, K, V>,
}

impl<'a, K: Clone + 'a, V: Clone + 'a> Resolved<'a, K, V> {
    fn snapshot(&self) -> Result<Vec<(usize, K, V)>> {
        let mut snapshot = Vec::new();
        self.parent.each(|value, key, _| {
            snapshot.push((snapshot.len(), key.clone(), value.clone()));
        })?;
        Ok(snapshot)
    }

    fn write_back(&self, mut pending: BTreeMap<usize, Pending<V>>) -> Result<()> {
        let Some(last) = pending.keys().next_back().copied() else {
            return Ok(());
        };
        tracing::trace!(pending = pending.len(), "writing back resolved actions");

        let mut index = 0;
        self.parent.each(|_, _, upstream| {
            if index > last {
                upstream.stop();
                return;
            }
            match pending.remove(&index) {
                Some(Pending::Remove) => {
                    upstream.remove();
                }
                Some(Pending::Replace(value)) => {
                    upstream.replace(value);
                }
                None => {}
            }
            index += 1;
        })?;
        Ok(())
    }
}

impl<'a, K: Clone + 'a, V: Clone + 'a> Source<K, V> for Resolved<'a, K, V> {
    #[tracing::instrument(level = "trace", name = "resolved", skip_all)]
    fn drive(&self, driver: &mut Driver<'_, K, V>) -> Result<()> {
        let mut snapshot = self.snapshot()?;
        tracing::trace!(elements = snapshot.len(), "resolved snapshot");
        self.reorder.apply(&mut snapshot);

        let mut pending = BTreeMap::new();
        for (index, key, value) in &snapshot {
            match driver.act(value, key)? {
                Action::Continue => {}
                Action::Stop => break,
                Action::Remove => {
                    pending.insert(*index, Pending::Remove);
                }
                Action::Replace => {
                    if let Some(replacement) = driver.replacement() {
                        pending.insert(*index, Pending::Replace(replacement));
                    }
                }
            }
        }

        self.write_back(pending)
    }
}

impl<'a, K: Clone + 'a, V: Clone + 'a> Iterate<'a, K, V> {
    fn resolve(&self, reorder: Reorder<'a, K, V>) -> Self {
        self.derive(Resolved {
            parent: self.clone(),
            reorder,
        })
    }

    /// Elements in reverse order
    pub fn reverse(&self) -> Self {
        self.resolve(Reorder::Reverse)
    }

    /// Elements stably sorted by the configured comparator
    pub fn sorted(&self) -> Result<Self> {
        let comparator = self.comparator("sorted")?;
        Ok(self.sorted_by(comparator))
    }

    pub fn sorted_by(&self, comparator: Comparator<'a, K, V>) -> Self {
        self.resolve(Reorder::Sort(comparator))
    }

    /// Elements in random order; each pass is a full Fisher-Yates shuffle
    pub fn shuffle(&self, passes: usize) -> Self {
        self.resolve(Reorder::Shuffle { passes, seed: None })
    }

    /// Like [`shuffle`](Iterate::shuffle) with a reproducible order
    pub fn shuffle_seeded(&self, passes: usize, seed: u64) -> Self {
        self.resolve(Reorder::Shuffle {
            passes,
            seed: Some(seed),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::compare;
    use crate::error::IterateError;
    use crate::sources::{array, vec};
    use crate::testing::values;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reverse() {
        assert_eq!(values(&vec(vec![1, 2, 3]).reverse()), vec![3, 2, 1]);
    }

    #[test]
    fn test_sorted_keeps_keys() {
        let mut seen = Vec::new();
        vec(vec![30, 10, 20])
            .sorted_by(compare::natural())
            .each(|value, key, _| seen.push((*key, *value)))
            .unwrap();
        assert_eq!(seen, vec![(1, 10), (2, 20), (0, 30)]);
    }

    #[test]
    fn test_sorted_requires_comparator() {
        assert!(matches!(
            vec(vec![1]).sorted(),
            Err(IterateError::ComparatorRequired { operation: "sorted" })
        ));
    }

    #[test]
    fn test_sorted_take_delete() {
        let mut data = vec![1, 6, 2, 3, 8, 7, 0, 3];
        let smallest = array(&mut data)
            .with_comparator(compare::number())
            .sorted()
            .unwrap()
            .take(3);
        smallest.delete().unwrap();
        drop(smallest);
        assert_eq!(data, vec![6, 3, 8, 7, 3]);
    }

    #[test]
    fn test_sorted_delete_duplicate_values() {
        let mut data = vec![3, 1, 3, 2, 3];
        array(&mut data).sorted_by(compare::natural()).take(2).delete().unwrap();
        assert_eq!(data, vec![3, 3, 3]);

        let mut data = vec![3, 1, 3, 2, 3];
        array(&mut data).sorted_by(compare::natural()).take(3).delete().unwrap();
        assert_eq!(data, vec![3, 3]);
    }

    #[test]
    fn test_reverse_replace_by_position() {
        let mut data = vec![5, 5, 5, 5];
        let mut position = 0;
        array(&mut data)
            .reverse()
            .each(|_, _, cursor| {
                cursor.replace(position);
                position += 1;
            })
            .unwrap();
        assert_eq!(data, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_desc_sort() {
        let iter = vec(vec![2, 9, 4])
            .with_comparator(compare::natural())
            .desc()
            .unwrap();
        assert_eq!(values(&iter.sorted().unwrap()), vec![9, 4, 2]);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let iter = vec((0..50).collect::<Vec<i32>>());
        let mut shuffled = values(&iter.shuffle(3));
        shuffled.sort();
        assert_eq!(shuffled, (0..50).collect::<Vec<i32>>());
    }

    #[test]
    fn test_shuffle_seeded_is_reproducible() {
        let iter = vec((0..20).collect::<Vec<i32>>());
        let first = values(&iter.shuffle_seeded(2, 7));
        let second = values(&iter.shuffle_seeded(2, 7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_delete_hits_visited() {
        let mut data: Vec<i32> = (0..10).collect();
        let mut removed = Vec::new();
        array(&mut data)
            .shuffle_seeded(1, 42)
            .take(4)
            .each(|value, _, cursor| {
                removed.push(*value);
                cursor.remove();
            })
            .unwrap();
        assert_eq!(data.len(), 6);
        assert!(removed.iter().all(|value| !data.contains(value)));
    }
}

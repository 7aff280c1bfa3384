use crate::action::Action;
use crate::error::Result;
use crate::iterate::Iterate;
use crate::source::{Driver, Source};
use crate::sources::pairs;
use std::rc::Rc;

/// The parent's keys as values, keyed by position
///
/// Keys cannot be rewritten in place, so a replace request is dropped.
pub struct Keys<'a, K, V> {
    parent: Iterate<'a, K, V>,
}

impl<'a, K: 'a, V: 'a> Source<usize, K> for Keys<'a, K, V> {
    fn drive(&self, driver: &mut Driver<'_, usize, K>) -> Result<()> {
        let mut index = 0;
        self.parent.try_each(|_, key, upstream| {
            match driver.act(key, &index)? {
                Action::Stop => {
                    upstream.stop();
                }
                Action::Remove => {
                    upstream.remove();
                }
                Action::Continue | Action::Replace => {}
            }
            index += 1;
            Ok(())
        })?;
        Ok(())
    }
}

/// The parent's values, keyed by position
pub struct Values<'a, K, V> {
    parent: Iterate<'a, K, V>,
}

impl<'a, K: 'a, V: 'a> Source<usize, V> for Values<'a, K, V> {
    fn drive(&self, driver: &mut Driver<'_, usize, V>) -> Result<()> {
        let mut index = 0;
        self.parent.try_each(|value, _, upstream| {
            driver.forward(value, &index, upstream)?;
            index += 1;
            Ok(())
        })?;
        Ok(())
    }
}

/// Pass-through view that lets only a stop reach the parent
pub struct Readonly<'a, K, V> {
    parent: Iterate<'a, K, V>,
}

impl<'a, K: 'a, V: 'a> Source<K, V> for Readonly<'a, K, V> {
    fn drive(&self, driver: &mut Driver<'_, K, V>) -> Result<()> {
        self.parent.try_each(|value, key, upstream| {
            if driver.act(value, key)? == Action::Stop {
                upstream.stop();
            }
            Ok(())
        })?;
        Ok(())
    }
}

/// Result of [`Iterate::split`]
pub struct Split<'a, K, V> {
    pub pass: Iterate<'a, K, V>,
    pub fail: Iterate<'a, K, V>,
}

/// Result of [`Iterate::unzip`]
pub struct Unzip<'a, K, V> {
    pub keys: Iterate<'a, usize, K>,
    pub values: Iterate<'a, usize, V>,
}

impl<'a, K: 'a, V: 'a> Iterate<'a, K, V> {
    /// Keys of this chain as a new chain. The new chain starts unconfigured
    /// since comparators over `V` do not apply to keys.
    pub fn keys(&self) -> Iterate<'a, usize, K> {
        Iterate::new(Keys {
            parent: self.clone(),
        })
    }

    /// Values of this chain re-keyed by position, starting unconfigured
    pub fn values(&self) -> Iterate<'a, usize, V> {
        Iterate::new(Values {
            parent: self.clone(),
        })
    }

    /// Same elements; removals and replacements are discarded
    pub fn readonly(&self) -> Self {
        self.derive(Readonly {
            parent: self.clone(),
        })
    }

    /// Elements that pass and elements that fail `predicate`
    pub fn split<P>(&self, predicate: P) -> Split<'a, K, V>
    where
        P: Fn(&V, &K) -> bool + 'a,
    {
        let predicate = Rc::new(predicate);
        let negated = Rc::clone(&predicate);
        Split {
            pass: self.filter(move |value, key| predicate(value, key)),
            fail: self.not(move |value, key| negated(value, key)),
        }
    }

    /// Hand both halves of [`split`](Iterate::split) to `handler`, then keep
    /// chaining on this chain
    pub fn split_with<P, H>(&self, predicate: P, handler: H) -> Result<Self>
    where
        P: Fn(&V, &K) -> bool + 'a,
        H: FnOnce(Iterate<'a, K, V>, Iterate<'a, K, V>) -> Result<()>,
    {
        let Split { pass, fail } = self.split(predicate);
        handler(pass, fail)?;
        Ok(self.clone())
    }

    pub fn unzip(&self) -> Unzip<'a, K, V> {
        Unzip {
            keys: self.keys(),
            values: self.values(),
        }
    }

    pub fn unzip_with<H>(&self, handler: H) -> Result<Self>
    where
        H: FnOnce(Iterate<'a, usize, K>, Iterate<'a, usize, V>) -> Result<()>,
    {
        let Unzip { keys, values } = self.unzip();
        handler(keys, values)?;
        Ok(self.clone())
    }
}

impl<'a, K: Clone + 'a, V: Clone + 'a> Iterate<'a, K, V> {
    /// Snapshot the current elements into an independent chain
    ///
    /// The copy keeps keys and configuration. Mutating it never touches this
    /// chain's source.
    pub fn copy(&self) -> Result<Self> {
        let mut entries = Vec::new();
        self.each(|value, key, _| entries.push((key.clone(), value.clone())))?;
        Ok(pairs(entries).with_config(self.config().clone()))
    }
}

#[cfg(test)]
mod tests {
    use crate::sources::{array, vec};
    use crate::testing::values;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn test_keys_and_values() {
        let mut scores = BTreeMap::from([("ann", 3), ("bob", 5)]);
        let iter = crate::sources::map(&mut scores);

        let mut keys = Vec::new();
        iter.keys().each(|key, index, _| keys.push((*index, *key))).unwrap();
        assert_eq!(keys, vec![(0, "ann"), (1, "bob")]);

        let mut seen = Vec::new();
        iter.values().each(|value, index, _| seen.push((*index, *value))).unwrap();
        assert_eq!(seen, vec![(0, 3), (1, 5)]);
    }

    #[test]
    fn test_values_replace_forwards() {
        let mut scores = BTreeMap::from([("ann", 3), ("bob", 5)]);
        crate::sources::map(&mut scores)
            .values()
            .each(|value, _, cursor| {
                cursor.replace(value + 1);
            })
            .unwrap();
        assert_eq!(scores, BTreeMap::from([("ann", 4), ("bob", 6)]));
    }

    #[test]
    fn test_keys_remove_forwards_replace_ignored() {
        let mut scores = BTreeMap::from([("ann", 3), ("bob", 5)]);
        crate::sources::map(&mut scores)
            .keys()
            .each(|key, _, cursor| {
                if *key == "ann" {
                    cursor.remove();
                } else {
                    cursor.replace("robert");
                }
            })
            .unwrap();
        assert_eq!(scores, BTreeMap::from([("bob", 5)]));
    }

    #[test]
    fn test_readonly() {
        let mut data = vec![1, 2, 3];
        let mut seen = Vec::new();
        array(&mut data)
            .readonly()
            .each(|value, _, cursor| {
                seen.push(*value);
                if *value == 1 {
                    cursor.remove();
                } else if *value == 2 {
                    cursor.stop();
                }
            })
            .unwrap();
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn test_split() {
        let split = vec(vec![1, 2, 3, 4, 5]).split(|value, _| value % 2 == 0);
        assert_eq!(values(&split.pass), vec![2, 4]);
        assert_eq!(values(&split.fail), vec![1, 3, 5]);
    }

    #[test]
    fn test_split_with_keeps_chaining() {
        let mut data = vec![1, 2, 3, 4];
        let mut evens = 0;
        let rest = array(&mut data)
            .split_with(
                |value, _| value % 2 == 0,
                |pass, fail| {
                    evens = pass.count()?;
                    fail.delete()?;
                    Ok(())
                },
            )
            .unwrap();
        assert_eq!(rest.count().unwrap(), 2);
        drop(rest);
        assert_eq!(evens, 2);
        assert_eq!(data, vec![2, 4]);
    }

    #[test]
    fn test_unzip() {
        let unzip = vec(vec!['x', 'y']).unzip();
        assert_eq!(unzip.keys.array().unwrap(), vec![0, 1]);
        assert_eq!(unzip.values.array().unwrap(), vec!['x', 'y']);
    }

    #[test]
    fn test_unzip_with_keeps_chaining() {
        let mut scores = BTreeMap::from([("ann", 3), ("bob", 5)]);
        let mut names = Vec::new();
        let rest = crate::sources::map(&mut scores)
            .unzip_with(|keys, values| {
                names = keys.array()?;
                values.update(|value, _| value * 10)?;
                Ok(())
            })
            .unwrap();
        assert_eq!(rest.count().unwrap(), 2);
        drop(rest);
        assert_eq!(names, vec!["ann", "bob"]);
        assert_eq!(scores, BTreeMap::from([("ann", 30), ("bob", 50)]));
    }

    #[test]
    fn test_copy_is_independent() {
        let mut data = vec![1, 2, 3];
        let copy = array(&mut data).copy().unwrap();
        copy.delete().unwrap();
        assert_eq!(copy.count().unwrap(), 0);
        drop(copy);
        assert_eq!(data, vec![1, 2, 3]);
    }
}

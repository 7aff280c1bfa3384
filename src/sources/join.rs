use crate::error::Result;
use crate::iterate::Iterate;
use crate::source::{Driver, Source};

/// Concatenation of several chains, driven in argument order
///
/// Every element's action is applied by the chain it came from. A stop from
/// any of them ends the whole join.
pub struct Join<'a, K, V> {
    sources: Vec<Iterate<'a, K, V>>,
}

impl<'a, K, V> Join<'a, K, V> {
    pub fn new(sources: Vec<Iterate<'a, K, V>>) -> Self {
        Join { sources }
    }
}

impl<'a, K: 'a, V: 'a> Source<K, V> for Join<'a, K, V> {
    fn drive(&self, driver: &mut Driver<'_, K, V>) -> Result<()> {
        for source in &self.sources {
            source.try_each(|value, key, upstream| {
                driver.forward(value, key, upstream)?;
                Ok(())
            })?;
            if driver.is_stopped() {
                break;
            }
        }
        Ok(())
    }
}

/// Chain several sources one after another
pub fn join<'a, K: 'a, V: 'a>(sources: impl IntoIterator<Item = Iterate<'a, K, V>>) -> Iterate<'a, K, V> {
    Iterate::new(Join::new(sources.into_iter().collect()))
}

impl<'a, K: 'a, V: 'a> Iterate<'a, K, V> {
    /// This chain followed by `others`
    pub fn append(&self, others: impl IntoIterator<Item = Iterate<'a, K, V>>) -> Self {
        let mut sources = vec![self.clone()];
        sources.extend(others);
        self.derive(Join::new(sources))
    }

    /// `others` followed by this chain
    pub fn prepend(&self, others: impl IntoIterator<Item = Iterate<'a, K, V>>) -> Self {
        let mut sources: Vec<_> = others.into_iter().collect();
        sources.push(self.clone());
        self.derive(Join::new(sources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::array::{array, vec};
    use crate::testing::values;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_order() {
        let joined = join([vec(vec![1, 2]), vec(vec![]), vec(vec![3])]);
        assert_eq!(values(&joined), vec![1, 2, 3]);
    }

    #[test]
    fn test_append_and_prepend() {
        let base = vec(vec![1, 2]);
        let extra = vec(vec![8, 9]);
        assert_eq!(values(&base.append([extra.clone()])), vec![1, 2, 8, 9]);
        assert_eq!(values(&base.prepend([extra])), vec![8, 9, 1, 2]);
    }

    #[test]
    fn test_stop_aborts_remaining_sources() {
        let joined = join([vec(vec![1, 2]), vec(vec![3, 4])]);
        let mut seen = Vec::new();
        joined
            .each(|value, _, cursor| {
                seen.push(*value);
                if *value == 2 {
                    cursor.stop();
                }
            })
            .unwrap();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_remove_reaches_each_origin() {
        let mut left = vec![1, 2, 3];
        let mut right = vec![4, 5, 6];
        join([array(&mut left), array(&mut right)])
            .each(|value, _, cursor| {
                if value % 2 == 0 {
                    cursor.remove();
                }
            })
            .unwrap();
        assert_eq!(left, vec![1, 3]);
        assert_eq!(right, vec![5]);
    }
}

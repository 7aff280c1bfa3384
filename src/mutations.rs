use crate::error::Result;
use crate::iterate::Iterate;
use crate::sources::pairs;

impl<'a, K: 'a, V: 'a> Iterate<'a, K, V> {
    /// Remove every visited element from the source
    pub fn delete(&self) -> Result<&Self> {
        self.each(|_, _, cursor| {
            cursor.remove();
        })
    }

    /// Replace every visited element with a clone of `value`
    pub fn overwrite(&self, value: V) -> Result<&Self>
    where
        V: Clone,
    {
        self.each(|_, _, cursor| {
            cursor.replace(value.clone());
        })
    }

    /// Replace every visited element with `update(value, key)`
    pub fn update<F>(&self, mut update: F) -> Result<&Self>
    where
        F: FnMut(&V, &K) -> V,
    {
        self.each(|value, key, cursor| {
            cursor.replace(update(value, key));
        })
    }

    /// Remove every visited element and return them as an independent chain
    ///
    /// The extracted chain keeps the original keys and this chain's
    /// configuration.
    pub fn extract(&self) -> Result<Self>
    where
        K: Clone,
        V: Clone,
    {
        let mut removed = Vec::new();
        self.each(|value, key, cursor| {
            removed.push((key.clone(), value.clone()));
            cursor.remove();
        })?;
        Ok(pairs(removed).with_config(self.config().clone()))
    }
}

#[cfg(test)]
mod tests {
    use crate::sources::{array, set, vec};
    use crate::testing::values;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    #[test]
    fn test_delete_filtered() {
        let mut data = vec![1, 2, 0, 3];
        array(&mut data).filter(|value, _| value % 2 == 0).delete().unwrap();
        assert_eq!(data, vec![1, 3]);
    }

    #[test]
    fn test_overwrite() {
        let mut data = vec!["a", "b", "c"];
        array(&mut data).skip(1).overwrite("z").unwrap();
        assert_eq!(data, vec!["a", "z", "z"]);
    }

    #[test]
    fn test_update() {
        let mut data = vec![1, 2, 3];
        array(&mut data).update(|value, key| value * 10 + *key as i32).unwrap();
        assert_eq!(data, vec![10, 21, 32]);
    }

    #[test]
    fn test_update_set_changes_identity() {
        let mut numbers = BTreeSet::from([1, 2, 3]);
        set(&mut numbers).filter(|value, _| *value == 2).update(|value, _| value * 100).unwrap();
        assert_eq!(numbers, BTreeSet::from([1, 3, 200]));
    }

    #[test]
    fn test_extract() {
        let mut data = vec![5, 6, 7, 8];
        let extracted = array(&mut data).filter(|value, _| *value > 6).extract().unwrap();
        // Array keys are positions at visit time; 8 moved up after 7 was removed.
        assert_eq!(extracted.entries().unwrap(), vec![(2, 7), (2, 8)]);

        extracted.delete().unwrap();
        assert_eq!(values(&extracted), Vec::<i32>::new());
        drop(extracted);
        assert_eq!(data, vec![5, 6]);
    }

    #[test]
    fn test_mutations_chain() {
        let data = vec(vec![1, 2, 3]);
        let total = data
            .update(|value, _| value + 1)
            .unwrap()
            .reduce(0, |sum, value, _| *sum += value)
            .unwrap();
        assert_eq!(total, 9);
    }
}

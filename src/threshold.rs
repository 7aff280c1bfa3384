use crate::config::Comparator;
use crate::error::Result;
use crate::filter::Filter;
use crate::iterate::Iterate;
use std::cmp::Ordering;

/// Which side of the threshold passes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bound {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl Bound {
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Bound::Greater => ordering == Ordering::Greater,
            Bound::GreaterOrEqual => ordering != Ordering::Less,
            Bound::Less => ordering == Ordering::Less,
            Bound::LessOrEqual => ordering != Ordering::Greater,
        }
    }

    fn operation(self) -> &'static str {
        match self {
            Bound::Greater => "gt",
            Bound::GreaterOrEqual => "gte",
            Bound::Less => "lt",
            Bound::LessOrEqual => "lte",
        }
    }
}

impl<'a, K: 'a, V: 'a> Iterate<'a, K, V> {
    /// Elements on the `bound` side of `threshold` under `comparator`
    ///
    /// The threshold is compared as if it sat at the element's own key.
    pub fn threshold_by(&self, threshold: V, bound: Bound, comparator: Comparator<'a, K, V>) -> Self {
        let predicate = move |value: &V, key: &K| {
            bound.accepts(comparator.compare(value, &threshold, key, key))
        };
        self.derive(Filter::new(self.clone(), predicate, false))
    }

    /// Like [`threshold_by`](Iterate::threshold_by) with the configured comparator
    pub fn threshold(&self, threshold: V, bound: Bound) -> Result<Self> {
        let comparator = self.comparator(bound.operation())?;
        Ok(self.threshold_by(threshold, bound, comparator))
    }

    /// Elements greater than `threshold`
    pub fn gt(&self, threshold: V) -> Result<Self> {
        self.threshold(threshold, Bound::Greater)
    }

    /// Elements greater than or equal to `threshold`
    pub fn gte(&self, threshold: V) -> Result<Self> {
        self.threshold(threshold, Bound::GreaterOrEqual)
    }

    /// Elements less than `threshold`
    pub fn lt(&self, threshold: V) -> Result<Self> {
        self.threshold(threshold, Bound::Less)
    }

    /// Elements less than or equal to `threshold`
    pub fn lte(&self, threshold: V) -> Result<Self> {
        self.threshold(threshold, Bound::LessOrEqual)
    }

    /// [`gt`](Iterate::gt) with an inline comparator
    pub fn gt_by(&self, threshold: V, comparator: Comparator<'a, K, V>) -> Self {
        self.threshold_by(threshold, Bound::Greater, comparator)
    }

    /// [`gte`](Iterate::gte) with an inline comparator
    pub fn gte_by(&self, threshold: V, comparator: Comparator<'a, K, V>) -> Self {
        self.threshold_by(threshold, Bound::GreaterOrEqual, comparator)
    }

    /// [`lt`](Iterate::lt) with an inline comparator
    pub fn lt_by(&self, threshold: V, comparator: Comparator<'a, K, V>) -> Self {
        self.threshold_by(threshold, Bound::Less, comparator)
    }

    /// [`lte`](Iterate::lte) with an inline comparator
    pub fn lte_by(&self, threshold: V, comparator: Comparator<'a, K, V>) -> Self {
        self.threshold_by(threshold, Bound::LessOrEqual, comparator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare;
    use crate::error::IterateError;
    use crate::sources::vec;
    use crate::testing::values;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bounds() {
        let iter = vec(vec![1, 2, 3, 4, 5]).with_comparator(compare::natural());
        assert_eq!(values(&iter.gt(3).unwrap()), vec![4, 5]);
        assert_eq!(values(&iter.gte(3).unwrap()), vec![3, 4, 5]);
        assert_eq!(values(&iter.lt(3).unwrap()), vec![1, 2]);
        assert_eq!(values(&iter.lte(3).unwrap()), vec![1, 2, 3]);
    }

    #[test]
    fn test_inline_comparator_overrides() {
        let iter = vec(vec![1, 2, 3, 4, 5]).with_comparator(compare::natural());
        let reversed = iter.gt_by(3, compare::natural().reversed());
        assert_eq!(values(&reversed), vec![1, 2]);
    }

    #[test]
    fn test_missing_comparator() {
        let result = vec(vec![1, 2, 3]).gt(1);
        assert!(matches!(
            result,
            Err(IterateError::ComparatorRequired { operation: "gt" })
        ));
    }
}

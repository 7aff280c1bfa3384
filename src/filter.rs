use crate::error::Result;
use crate::iterate::Iterate;
use crate::source::{Driver, Source};

/// View that forwards only the elements a predicate accepts (or rejects)
///
/// Any action requested downstream is applied to the parent unchanged.
pub struct Filter<'a, K, V, P> {
    parent: Iterate<'a, K, V>,
    predicate: P,
    negate: bool,
}

impl<'a, K, V, P> Filter<'a, K, V, P> {
    pub fn new(parent: Iterate<'a, K, V>, predicate: P, negate: bool) -> Self {
        Filter {
            parent,
            predicate,
            negate,
        }
    }
}

impl<'a, K: 'a, V: 'a, P> Source<K, V> for Filter<'a, K, V, P>
where
    P: Fn(&V, &K) -> bool,
{
    fn drive(&self, driver: &mut Driver<'_, K, V>) -> Result<()> {
        self.parent.try_each(|value, key, upstream| {
            if (self.predicate)(value, key) != self.negate {
                driver.forward(value, key, upstream)?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

impl<'a, K: 'a, V: 'a> Iterate<'a, K, V> {
    /// Only the elements for which `predicate` holds
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&V, &K) -> bool + 'a,
    {
        self.derive(Filter::new(self.clone(), predicate, false))
    }

    /// Only the elements for which `predicate` does not hold
    pub fn not<P>(&self, predicate: P) -> Self
    where
        P: Fn(&V, &K) -> bool + 'a,
    {
        self.derive(Filter::new(self.clone(), predicate, true))
    }
}

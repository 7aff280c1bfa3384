use crate::action::Cursor;
use crate::config::{Comparator, Config, Equality};
use crate::error::{IterateError, Result};
use crate::source::{Driver, Source};
use std::rc::Rc;

/// Lazy, chainable iteration over a single source
///
/// Building views on an `Iterate` never touches the backing structure. Only
/// terminal operations and mutations drive the source, and each of them
/// restarts the traversal from the beginning.
///
/// Cloning is cheap and yields an independent traversal handle over the same
/// source, which is how nested iteration over one source is done.
pub struct Iterate<'a, K, V> {
    source: Rc<dyn Source<K, V> + 'a>,
    config: Config<'a, K, V>,
}

impl<'a, K, V> Clone for Iterate<'a, K, V> {
    fn clone(&self) -> Self {
        Iterate {
            source: Rc::clone(&self.source),
            config: self.config.clone(),
        }
    }
}

impl<'a, K: 'a, V: 'a> Iterate<'a, K, V> {
    pub fn new<S>(source: S) -> Self
    where
        S: Source<K, V> + 'a,
    {
        Self::from_shared(Rc::new(source))
    }

    /// Wrap a source the caller keeps a handle to (e.g. to `reset` it later)
    pub fn from_shared(source: Rc<dyn Source<K, V> + 'a>) -> Self {
        Iterate {
            source,
            config: Config::default(),
        }
    }

    /// New chain over `source` inheriting a snapshot of this configuration
    pub(crate) fn derive<S>(&self, source: S) -> Self
    where
        S: Source<K, V> + 'a,
    {
        Iterate {
            source: Rc::new(source),
            config: self.config.clone(),
        }
    }

    pub fn config(&self) -> &Config<'a, K, V> {
        &self.config
    }

    pub fn with_config(mut self, config: Config<'a, K, V>) -> Self {
        self.config = config;
        self
    }

    /// Set the comparator; an unset equality is derived from it
    pub fn with_comparator(mut self, comparator: Comparator<'a, K, V>) -> Self {
        self.config = self.config.with_comparator(comparator);
        self
    }

    pub fn with_equality(mut self, equality: Equality<'a, K, V>) -> Self {
        self.config = self.config.with_equality(equality);
        self
    }

    /// Reverse the configured comparator
    pub fn desc(self) -> Result<Self> {
        let comparator = self.comparator("desc")?.reversed();
        Ok(self.with_comparator(comparator))
    }

    /// Configure `comparator` reversed
    pub fn desc_by(self, comparator: Comparator<'a, K, V>) -> Self {
        self.with_comparator(comparator.reversed())
    }

    pub(crate) fn comparator(&self, operation: &'static str) -> Result<Comparator<'a, K, V>> {
        self.config
            .comparator()
            .cloned()
            .ok_or_else(|| IterateError::comparator_required(operation))
    }

    pub(crate) fn equality(&self) -> Equality<'a, K, V>
    where
        V: PartialEq,
    {
        self.config.resolve_equality()
    }

    /// Drive the source, handing every element to a fallible callback
    ///
    /// The callback may request an action through the [`Cursor`]. An error
    /// returned by the callback or raised by the adapter aborts the traversal.
    pub fn try_each<F>(&self, mut callback: F) -> Result<&Self>
    where
        F: FnMut(&V, &K, &mut Cursor<V>) -> Result<()>,
    {
        let mut driver = Driver::new(&mut callback);
        self.source.drive(&mut driver)?;
        Ok(self)
    }

    /// Drive the source, handing every element to `callback`
    pub fn each<F>(&self, mut callback: F) -> Result<&Self>
    where
        F: FnMut(&V, &K, &mut Cursor<V>),
    {
        self.try_each(|value, key, cursor| {
            callback(value, key, cursor);
            Ok(())
        })
    }

    /// Run side-effecting operations on this chain, then keep chaining
    pub fn fork<F>(&self, f: F) -> Result<Self>
    where
        F: FnOnce(&Self) -> Result<()>,
    {
        f(self)?;
        Ok(self.clone())
    }

    /// Alias of [`fork`](Iterate::fork)
    pub fn sub<F>(&self, f: F) -> Result<Self>
    where
        F: FnOnce(&Self) -> Result<()>,
    {
        self.fork(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::compare;
    use crate::sources::{array, vec};
    use crate::testing::values;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn counting<'a>(data: &'a [i32], visits: &'a Cell<usize>) -> Iterate<'a, usize, i32> {
        Iterate::new(move |driver: &mut Driver<'_, usize, i32>| -> Result<()> {
            for (key, value) in data.iter().enumerate() {
                visits.set(visits.get() + 1);
                if driver.act(value, &key)? == Action::Stop {
                    break;
                }
            }
            Ok(())
        })
    }

    #[test]
    fn test_each_visits_all() {
        let visits = Cell::new(0);
        let data = [1, 2, 3];
        let iter = counting(&data, &visits);
        let mut sum = 0;
        iter.each(|value, _, _| sum += value).unwrap();
        assert_eq!(sum, 6);
        assert_eq!(visits.get(), 3);
    }

    #[test]
    fn test_each_stops() {
        let visits = Cell::new(0);
        let data = [1, 2, 3];
        let iter = counting(&data, &visits);
        iter.each(|_, _, cursor| {
            cursor.stop();
        })
        .unwrap();
        assert_eq!(visits.get(), 1);
    }

    #[test]
    fn test_each_is_restartable() {
        let visits = Cell::new(0);
        let data = [4, 5];
        let iter = counting(&data, &visits);
        iter.each(|_, _, _| {}).unwrap().each(|_, _, _| {}).unwrap();
        assert_eq!(visits.get(), 4);
    }

    #[test]
    fn test_callback_error_aborts() {
        let visits = Cell::new(0);
        let data = [1, 2, 3];
        let iter = counting(&data, &visits);
        let result = iter.try_each(|value, _, _| {
            if *value == 2 {
                return Err(IterateError::comparator_required("test"));
            }
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(visits.get(), 2);
    }

    #[test]
    fn test_desc_without_comparator() {
        let visits = Cell::new(0);
        let data = [1];
        let result = counting(&data, &visits).desc();
        assert!(matches!(
            result,
            Err(IterateError::ComparatorRequired { operation: "desc" })
        ));
    }

    #[test]
    fn test_fork_returns_same_chain() {
        let visits = Cell::new(0);
        let data = [1, 2];
        let iter = counting(&data, &visits);
        let mut seen = 0;
        let forked = iter
            .fork(|iter| {
                iter.each(|_, _, _| seen += 1)?;
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, 2);
        forked.each(|_, _, _| {}).unwrap();
        assert_eq!(visits.get(), 4);
    }

    #[test]
    fn test_desc_by() {
        let iter = vec(vec![2, 9, 4]).desc_by(compare::natural());
        assert_eq!(values(&iter.sorted().unwrap()), vec![9, 4, 2]);
    }

    #[test]
    fn test_sub_runs_then_chains() {
        let mut data = vec![1, 2, 3, 4];
        let rest = array(&mut data)
            .sub(|iter| {
                iter.filter(|value, _| *value > 2).delete()?;
                Ok(())
            })
            .unwrap();
        assert_eq!(values(&rest), vec![1, 2]);
        drop(rest);
        assert_eq!(data, vec![1, 2]);
    }
}

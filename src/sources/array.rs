use crate::action::Action;
use crate::backing::Backing;
use crate::error::{IterateError, Result};
use crate::iterate::Iterate;
use crate::source::{Driver, Source};
use std::cell::{RefCell, RefMut};

/// Sequential adapter over a `Vec`, keyed by index
///
/// Removal splices the element out and revisits the same index, which now
/// holds the next element. Replacement overwrites in place.
pub struct ArraySource<'a, T> {
    items: RefCell<Backing<'a, Vec<T>>>,
}

impl<'a, T> ArraySource<'a, T> {
    pub fn new(items: impl Into<Backing<'a, Vec<T>>>) -> Self {
        ArraySource {
            items: RefCell::new(items.into()),
        }
    }

    /// Swap the backing vector for another one, returning the previous backing
    pub fn reset(&self, items: impl Into<Backing<'a, Vec<T>>>) -> Backing<'a, Vec<T>> {
        self.items.replace(items.into())
    }

    fn items_mut(&self) -> Result<RefMut<'_, Backing<'a, Vec<T>>>> {
        self.items
            .try_borrow_mut()
            .map_err(|_| IterateError::reentrant("array"))
    }
}

impl<'a, T> Source<usize, T> for ArraySource<'a, T> {
    fn drive(&self, driver: &mut Driver<'_, usize, T>) -> Result<()> {
        let mut index = 0;
        loop {
            let action = {
                let items = self
                    .items
                    .try_borrow()
                    .map_err(|_| IterateError::reentrant("array"))?;
                match items.get(index) {
                    Some(item) => driver.act(item, &index)?,
                    None => return Ok(()),
                }
            };

            match action {
                Action::Continue => index += 1,
                Action::Stop => return Ok(()),
                Action::Remove => {
                    self.items_mut()?.remove(index);
                }
                Action::Replace => {
                    if let Some(value) = driver.replacement() {
                        self.items_mut()?[index] = value;
                    }
                    index += 1;
                }
            }
        }
    }
}

/// Sequential adapter over owned `(key, value)` pairs
///
/// Backs the independent copies produced by `copy` and `extract`: keys are
/// preserved, removal and replacement only touch the copy.
pub struct EntryList<K, V> {
    entries: RefCell<Vec<(K, V)>>,
}

impl<K, V> EntryList<K, V> {
    pub fn new(entries: Vec<(K, V)>) -> Self {
        EntryList {
            entries: RefCell::new(entries),
        }
    }
}

impl<K, V> Source<K, V> for EntryList<K, V> {
    fn drive(&self, driver: &mut Driver<'_, K, V>) -> Result<()> {
        let mut index = 0;
        loop {
            let action = {
                let entries = self
                    .entries
                    .try_borrow()
                    .map_err(|_| IterateError::reentrant("entry list"))?;
                match entries.get(index) {
                    Some((key, value)) => driver.act(value, key)?,
                    None => return Ok(()),
                }
            };

            match action {
                Action::Continue => index += 1,
                Action::Stop => return Ok(()),
                Action::Remove => {
                    self.entries
                        .try_borrow_mut()
                        .map_err(|_| IterateError::reentrant("entry list"))?
                        .remove(index);
                }
                Action::Replace => {
                    if let Some(value) = driver.replacement() {
                        self.entries
                            .try_borrow_mut()
                            .map_err(|_| IterateError::reentrant("entry list"))?[index]
                            .1 = value;
                    }
                    index += 1;
                }
            }
        }
    }
}

/// Iterate over a borrowed vector; mutations write through to it
pub fn array<'a, T: 'a>(items: &'a mut Vec<T>) -> Iterate<'a, usize, T> {
    Iterate::new(ArraySource::new(Backing::Borrowed(items)))
}

/// Iterate over a vector the chain owns
pub fn vec<'a, T: 'a>(items: Vec<T>) -> Iterate<'a, usize, T> {
    Iterate::new(ArraySource::new(Backing::Owned(items)))
}

/// Iterate over pairs the chain owns, keeping their keys
pub fn pairs<'a, K: 'a, V: 'a>(entries: Vec<(K, V)>) -> Iterate<'a, K, V> {
    Iterate::new(EntryList::new(entries))
}

/// Iterator with no elements
pub fn empty<'a, K: 'a, V: 'a>() -> Iterate<'a, K, V> {
    pairs(Vec::new())
}

/// Iterator over exactly one element, keyed `0`
pub fn single<'a, T: 'a>(value: T) -> Iterate<'a, usize, T> {
    vec(vec![value])
}

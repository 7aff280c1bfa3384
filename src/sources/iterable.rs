use crate::action::Action;
use crate::error::Result;
use crate::iterate::Iterate;
use crate::source::{Driver, Source, unsupported};

/// Read-only adapter over anything that can be iterated repeatedly
///
/// Each traversal iterates a fresh clone of `items`, keyed by position.
/// Removal and replacement are not possible through a plain iterator.
pub struct IterableSource<I> {
    items: I,
    strict: bool,
}

impl<I> IterableSource<I> {
    pub fn new(items: I) -> Self {
        IterableSource {
            items,
            strict: true,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl<I> Source<usize, I::Item> for IterableSource<I>
where
    I: IntoIterator + Clone,
{
    fn drive(&self, driver: &mut Driver<'_, usize, I::Item>) -> Result<()> {
        for (index, item) in self.items.clone().into_iter().enumerate() {
            match driver.act(&item, &index)? {
                Action::Continue => {}
                Action::Stop => return Ok(()),
                action @ (Action::Remove | Action::Replace) => {
                    unsupported("iterable", action, self.strict)?;
                }
            }
        }
        Ok(())
    }
}

/// Iterate over a cloneable iterable such as a range or a slice iterator
pub fn iterable<'a, I>(items: I) -> Iterate<'a, usize, I::Item>
where
    I: IntoIterator + Clone + 'a,
    I::Item: 'a,
{
    Iterate::new(IterableSource::new(items))
}

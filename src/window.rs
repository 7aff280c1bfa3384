use crate::action::Action;
use crate::error::Result;
use crate::iterate::Iterate;
use crate::source::{Driver, Source};

/// First `count` elements of the parent
pub struct Take<'a, K, V> {
    parent: Iterate<'a, K, V>,
    count: usize,
}

impl<'a, K: 'a, V: 'a> Source<K, V> for Take<'a, K, V> {
    fn drive(&self, driver: &mut Driver<'_, K, V>) -> Result<()> {
        if self.count == 0 {
            return Ok(());
        }

        let mut remaining = self.count;
        self.parent.try_each(|value, key, upstream| {
            if remaining == 0 {
                upstream.stop();
                return Ok(());
            }
            let action = driver.forward(value, key, upstream)?;
            remaining -= 1;
            // A pending remove or replace must reach the parent; stop one
            // element later instead.
            if remaining == 0 && action == Action::Continue {
                upstream.stop();
            }
            Ok(())
        })?;
        Ok(())
    }
}

/// Parent elements after the first `count`
pub struct Skip<'a, K, V> {
    parent: Iterate<'a, K, V>,
    count: usize,
}

impl<'a, K: 'a, V: 'a> Source<K, V> for Skip<'a, K, V> {
    fn drive(&self, driver: &mut Driver<'_, K, V>) -> Result<()> {
        let mut skipped = 0;
        self.parent.try_each(|value, key, upstream| {
            if skipped < self.count {
                skipped += 1;
            } else {
                driver.forward(value, key, upstream)?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

impl<'a, K: 'a, V: 'a> Iterate<'a, K, V> {
    /// At most the first `count` elements; `take(0)` is empty
    pub fn take(&self, count: usize) -> Self {
        self.derive(Take {
            parent: self.clone(),
            count,
        })
    }

    /// Everything after the first `count` elements
    pub fn skip(&self, count: usize) -> Self {
        self.derive(Skip {
            parent: self.clone(),
            count,
        })
    }
}

impl<'a, K: Clone + 'a, V: Clone + 'a> Iterate<'a, K, V> {
    /// Everything except the last `count` elements
    pub fn drop(&self, count: usize) -> Self {
        self.reverse().skip(count).reverse()
    }
}

use crate::action::Action;
use crate::error::Result;
use crate::iterate::Iterate;
use crate::source::{Driver, Source};

type Mapper<'a, K, V, W> = Box<dyn Fn(&V, &K) -> Option<W> + 'a>;
type Unmapper<'a, K, V, W> = Box<dyn Fn(W, &W, &V, &K) -> V + 'a>;

/// Filter-map view into a new value type
///
/// Elements the mapper turns into `None` are skipped. A replacement in the
/// new type only reaches the parent through the unmapper, which receives the
/// new value, the mapped value, the original value and the key.
pub struct Transform<'a, K, V, W> {
    parent: Iterate<'a, K, V>,
    mapper: Mapper<'a, K, V, W>,
    unmapper: Option<Unmapper<'a, K, V, W>>,
}

impl<'a, K: 'a, V: 'a, W> Source<K, W> for Transform<'a, K, V, W> {
    fn drive(&self, driver: &mut Driver<'_, K, W>) -> Result<()> {
        self.parent.try_each(|value, key, upstream| {
            let Some(mapped) = (self.mapper)(value, key) else {
                return Ok(());
            };
            match driver.act(&mapped, key)? {
                Action::Continue => {}
                Action::Stop => {
                    upstream.stop();
                }
                Action::Remove => {
                    upstream.remove();
                }
                Action::Replace => match (&self.unmapper, driver.replacement()) {
                    (Some(unmapper), Some(replacement)) => {
                        upstream.replace(unmapper(replacement, &mapped, value, key));
                    }
                    (None, _) => tracing::debug!("transform without unmapper drops a replacement"),
                    _ => {}
                },
            }
            Ok(())
        })?;
        Ok(())
    }
}

impl<'a, K: 'a, V: 'a> Iterate<'a, K, V> {
    /// Map every element to a new type, skipping those mapped to `None`
    ///
    /// The result starts unconfigured. Replacements requested on it are
    /// dropped; use [`transform_reversible`](Iterate::transform_reversible)
    /// to write them back.
    pub fn transform<W, M>(&self, mapper: M) -> Iterate<'a, K, W>
    where
        W: 'a,
        M: Fn(&V, &K) -> Option<W> + 'a,
    {
        Iterate::new(Transform {
            parent: self.clone(),
            mapper: Box::new(mapper),
            unmapper: None,
        })
    }

    pub fn transform_reversible<W, M, U>(&self, mapper: M, unmapper: U) -> Iterate<'a, K, W>
    where
        W: 'a,
        M: Fn(&V, &K) -> Option<W> + 'a,
        U: Fn(W, &W, &V, &K) -> V + 'a,
    {
        Iterate::new(Transform {
            parent: self.clone(),
            mapper: Box::new(mapper),
            unmapper: Some(Box::new(unmapper)),
        })
    }
}

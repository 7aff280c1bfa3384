use crate::action::{Action, Cursor};
use crate::error::{IterateError, Result};

/// Consumer callback driven once per element
pub type Callback<'c, K, V> = dyn FnMut(&V, &K, &mut Cursor<V>) -> Result<()> + 'c;

/// Adapter contract between a backing structure and the iteration core
///
/// An adapter walks its structure in its natural (or configured) order and
/// offers every element to [`Driver::act`]. It then applies the returned
/// action to the structure: splice the element out on `Remove`, overwrite it
/// on `Replace`, return early on `Stop`. After a removal the walk continues at
/// the next remaining element without skipping or repeating any other one.
///
/// Any `Fn(&mut Driver<K, V>) -> Result<()>` closure is a source, which is
/// how custom structures plug in.
pub trait Source<K, V> {
    fn drive(&self, driver: &mut Driver<'_, K, V>) -> Result<()>;
}

impl<K, V, F> Source<K, V> for F
where
    F: Fn(&mut Driver<'_, K, V>) -> Result<()>,
{
    fn drive(&self, driver: &mut Driver<'_, K, V>) -> Result<()> {
        self(driver)
    }
}

/// Adapter-facing side of one traversal
///
/// A driver only lives for the duration of a single `each` call, so the
/// consumer callback it holds is never reachable outside a traversal.
pub struct Driver<'c, K, V> {
    cursor: Cursor<V>,
    callback: &'c mut Callback<'c, K, V>,
    stopped: bool,
}

impl<'c, K, V> Driver<'c, K, V> {
    pub fn new(callback: &'c mut Callback<'c, K, V>) -> Self {
        Driver {
            cursor: Cursor::new(),
            callback,
            stopped: false,
        }
    }

    /// Offer one element to the consumer and return what it asked for
    pub fn act(&mut self, value: &V, key: &K) -> Result<Action> {
        self.cursor.reset();
        (self.callback)(value, key, &mut self.cursor)?;
        let action = self.cursor.action();
        if action == Action::Stop {
            self.stopped = true;
        }
        Ok(action)
    }

    /// Offer an element and mirror the consumer's request onto an upstream
    /// cursor. This is the forwarding step of every same-typed view.
    pub fn forward(&mut self, value: &V, key: &K, upstream: &mut Cursor<V>) -> Result<Action> {
        let action = self.act(value, key)?;
        let replacement = self.replacement();
        upstream.apply(action, replacement);
        Ok(action)
    }

    /// Value requested by the last `Replace`, if any
    pub fn replacement(&mut self) -> Option<V> {
        self.cursor.take_replacement()
    }

    /// Stop the traversal from the adapter side
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Either fail or quietly drop an action the adapter cannot honour
pub(crate) fn unsupported(adapter: &'static str, action: Action, strict: bool) -> Result<()> {
    if strict {
        return Err(IterateError::unsupported(adapter, action));
    }
    tracing::debug!(adapter, ?action, "dropping unsupported action");
    Ok(())
}

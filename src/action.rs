/// Signal a consumer hands back to the adapter after seeing one element
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Action {
    /// Nothing to do, move on to the next element
    #[default]
    Continue,
    /// Cease all iteration up the chain
    Stop,
    /// Delete the current element from its owning structure, then move on
    Remove,
    /// Substitute the current element's value, then move on
    Replace,
}

/// Per-element control handle passed to every consumer callback
///
/// Exactly one action is active after each exchange. Calling more than one of
/// [`stop`](Cursor::stop), [`remove`](Cursor::remove) or
/// [`replace`](Cursor::replace) keeps only the last request.
#[derive(Debug)]
pub struct Cursor<V> {
    action: Action,
    replacement: Option<V>,
}

impl<V> Default for Cursor<V> {
    fn default() -> Self {
        Cursor {
            action: Action::Continue,
            replacement: None,
        }
    }
}

impl<V> Cursor<V> {
    /// A cursor with no request yet
    pub fn new() -> Self {
        Self::default()
    }

    /// The action requested so far for the current element
    pub fn action(&self) -> Action {
        self.action
    }

    /// Request the end of the whole traversal
    pub fn stop(&mut self) -> &mut Self {
        self.action = Action::Stop;
        self.replacement = None;
        self
    }

    /// Request removal of the current element
    pub fn remove(&mut self) -> &mut Self {
        self.action = Action::Remove;
        self.replacement = None;
        self
    }

    /// Request `value` in place of the current element
    pub fn replace(&mut self, value: V) -> &mut Self {
        self.action = Action::Replace;
        self.replacement = Some(value);
        self
    }

    /// Whether a stop is pending
    pub fn is_stopped(&self) -> bool {
        self.action == Action::Stop
    }

    /// Copy a downstream request onto this cursor
    ///
    /// `Replace` without a value is treated as `Continue`.
    pub fn apply(&mut self, action: Action, replacement: Option<V>) -> &mut Self {
        match (action, replacement) {
            (Action::Stop, _) => self.stop(),
            (Action::Remove, _) => self.remove(),
            (Action::Replace, Some(value)) => self.replace(value),
            _ => self,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.action = Action::Continue;
        self.replacement = None;
    }

    pub(crate) fn take_replacement(&mut self) -> Option<V> {
        self.replacement.take()
    }
}

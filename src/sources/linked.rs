use crate::action::Action;
use crate::error::Result;
use crate::iterate::Iterate;
use crate::source::{Driver, Source, unsupported};

type ValueFn<'a, N, V> = Box<dyn Fn(&N) -> V + 'a>;
type NextFn<'a, N> = Box<dyn Fn(&N) -> Option<N> + 'a>;
type RemoveFn<'a, N> = Box<dyn Fn(&N, Option<&N>) + 'a>;
type ReplaceFn<'a, N, V> = Box<dyn Fn(&N, V) + 'a>;

/// Adapter over a singly-linked list of node handles
///
/// Nodes are cheap handles (typically `Rc<RefCell<_>>`). The list is walked
/// from `start` through `next`, keyed by position. Removal calls the relink
/// hook with the node and the previous surviving node (`None` at the head);
/// replacement calls the setter. Without those hooks a strict list fails the
/// traversal and a lenient one ignores the request.
pub struct Linked<'a, N, V> {
    start: Option<N>,
    previous: Option<N>,
    value: ValueFn<'a, N, V>,
    next: NextFn<'a, N>,
    remove: Option<RemoveFn<'a, N>>,
    replace: Option<ReplaceFn<'a, N, V>>,
    strict: bool,
}

impl<'a, N, V> Linked<'a, N, V> {
    pub fn new<FV, FN>(start: Option<N>, value: FV, next: FN) -> Self
    where
        FV: Fn(&N) -> V + 'a,
        FN: Fn(&N) -> Option<N> + 'a,
    {
        Linked {
            start,
            previous: None,
            value: Box::new(value),
            next: Box::new(next),
            remove: None,
            replace: None,
            strict: true,
        }
    }

    /// Node preceding `start`, handed to the relink hook when `start` is removed
    pub fn previous(mut self, previous: N) -> Self {
        self.previous = Some(previous);
        self
    }

    pub fn remove_with<F>(mut self, remove: F) -> Self
    where
        F: Fn(&N, Option<&N>) + 'a,
    {
        self.remove = Some(Box::new(remove));
        self
    }

    pub fn replace_with<F>(mut self, replace: F) -> Self
    where
        F: Fn(&N, V) + 'a,
    {
        self.replace = Some(Box::new(replace));
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl<'a, N: Clone, V> Source<usize, V> for Linked<'a, N, V> {
    fn drive(&self, driver: &mut Driver<'_, usize, V>) -> Result<()> {
        let mut previous = self.previous.clone();
        let mut current = self.start.clone();
        let mut index = 0;

        while let Some(node) = current {
            let value = (self.value)(&node);
            // Read the link first: the relink hook may detach `node`.
            let next = (self.next)(&node);

            match driver.act(&value, &index)? {
                Action::Continue => previous = Some(node),
                Action::Stop => return Ok(()),
                Action::Remove => match &self.remove {
                    Some(remove) => remove(&node, previous.as_ref()),
                    None => {
                        unsupported("linked list", Action::Remove, self.strict)?;
                        previous = Some(node);
                    }
                },
                Action::Replace => {
                    match (&self.replace, driver.replacement()) {
                        (Some(replace), Some(replacement)) => replace(&node, replacement),
                        (None, _) => unsupported("linked list", Action::Replace, self.strict)?,
                        _ => {}
                    }
                    previous = Some(node);
                }
            }

            index += 1;
            current = next;
        }
        Ok(())
    }
}

/// Iterate over a linked list built with [`Linked`]
pub fn linked<'a, N, V>(list: Linked<'a, N, V>) -> Iterate<'a, usize, V>
where
    N: Clone + 'a,
    V: 'a,
{
    Iterate::new(list)
}

use std::ops::{Deref, DerefMut};

/// Storage behind a root adapter: either a mutable borrow of the caller's
/// structure or a structure the adapter owns outright
#[derive(Debug)]
pub enum Backing<'a, T> {
    Borrowed(&'a mut T),
    Owned(T),
}

impl<'a, T> Backing<'a, T> {
    pub fn is_owned(&self) -> bool {
        matches!(self, Backing::Owned(_))
    }
}

impl<'a, T> Deref for Backing<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Backing::Borrowed(inner) => inner,
            Backing::Owned(inner) => inner,
        }
    }
}

impl<'a, T> DerefMut for Backing<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        match self {
            Backing::Borrowed(inner) => inner,
            Backing::Owned(inner) => inner,
        }
    }
}

impl<'a, T> From<&'a mut T> for Backing<'a, T> {
    fn from(inner: &'a mut T) -> Self {
        Backing::Borrowed(inner)
    }
}

impl<'a, T> From<T> for Backing<'a, T> {
    fn from(inner: T) -> Self {
        Backing::Owned(inner)
    }
}

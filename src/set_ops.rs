use crate::config::Equality;
use crate::error::Result;
use crate::iterate::Iterate;
use crate::source::{Driver, Source};

/// View keeping the elements that are (or are not) members of another chain
///
/// The other chain is materialized once at the start of every traversal.
pub struct Membership<'a, K, V> {
    parent: Iterate<'a, K, V>,
    other: Iterate<'a, K, V>,
    equality: Equality<'a, K, V>,
    members: bool,
}

impl<'a, K: Clone + 'a, V: Clone + 'a> Source<K, V> for Membership<'a, K, V> {
    fn drive(&self, driver: &mut Driver<'_, K, V>) -> Result<()> {
        let mut other = Vec::new();
        self.other.each(|value, key, _| other.push((key.clone(), value.clone())))?;

        self.parent.try_each(|value, key, upstream| {
            let contained = other
                .iter()
                .any(|(other_key, other_value)| self.equality.equals(value, other_value, key, other_key));
            if contained == self.members {
                driver.forward(value, key, upstream)?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

struct Seen<K, V> {
    key: K,
    value: V,
    forwarded: bool,
}

/// View that forwards first occurrences (`unique`) or repeats (`duplicates`)
pub struct Occurrences<'a, K, V> {
    parent: Iterate<'a, K, V>,
    equality: Equality<'a, K, V>,
    mode: Occurrence,
}

#[derive(Copy, Clone)]
enum Occurrence {
    First,
    Repeats,
    SecondOnly,
}

impl<'a, K: Clone + 'a, V: Clone + 'a> Source<K, V> for Occurrences<'a, K, V> {
    fn drive(&self, driver: &mut Driver<'_, K, V>) -> Result<()> {
        let mut seen: Vec<Seen<K, V>> = Vec::new();

        self.parent.try_each(|value, key, upstream| {
            let previous = seen
                .iter_mut()
                .find(|entry| self.equality.equals(value, &entry.value, key, &entry.key));

            let forward = match (self.mode, previous) {
                (Occurrence::First, Some(_)) => false,
                (_, None) => {
                    seen.push(Seen {
                        key: key.clone(),
                        value: value.clone(),
                        forwarded: false,
                    });
                    matches!(self.mode, Occurrence::First)
                }
                (Occurrence::Repeats, Some(_)) => true,
                (Occurrence::SecondOnly, Some(entry)) => !std::mem::replace(&mut entry.forwarded, true),
            };

            if forward {
                driver.forward(value, key, upstream)?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

impl<'a, K: Clone + 'a, V: Clone + 'a> Iterate<'a, K, V> {
    /// Elements not equal to any element of `other`
    pub fn exclude(&self, other: &Iterate<'a, K, V>) -> Self
    where
        V: PartialEq,
    {
        self.exclude_by(other, self.equality())
    }

    pub fn exclude_by(&self, other: &Iterate<'a, K, V>, equality: Equality<'a, K, V>) -> Self {
        self.derive(Membership {
            parent: self.clone(),
            other: other.clone(),
            equality,
            members: false,
        })
    }

    /// Elements equal to some element of `other`
    pub fn intersect(&self, other: &Iterate<'a, K, V>) -> Self
    where
        V: PartialEq,
    {
        self.intersect_by(other, self.equality())
    }

    pub fn intersect_by(&self, other: &Iterate<'a, K, V>, equality: Equality<'a, K, V>) -> Self {
        self.derive(Membership {
            parent: self.clone(),
            other: other.clone(),
            equality,
            members: true,
        })
    }

    /// First occurrence of every distinct element
    pub fn unique(&self) -> Self
    where
        V: PartialEq,
    {
        self.unique_by(self.equality())
    }

    pub fn unique_by(&self, equality: Equality<'a, K, V>) -> Self {
        self.occurrences(equality, Occurrence::First)
    }

    /// Every repeated occurrence, or with `only_once` each repeated element
    /// exactly once (at its second occurrence)
    pub fn duplicates(&self, only_once: bool) -> Self
    where
        V: PartialEq,
    {
        self.duplicates_by(only_once, self.equality())
    }

    pub fn duplicates_by(&self, only_once: bool, equality: Equality<'a, K, V>) -> Self {
        let mode = if only_once {
            Occurrence::SecondOnly
        } else {
            Occurrence::Repeats
        };
        self.occurrences(equality, mode)
    }

    fn occurrences(&self, equality: Equality<'a, K, V>, mode: Occurrence) -> Self {
        self.derive(Occurrences {
            parent: self.clone(),
            equality,
            mode,
        })
    }
}

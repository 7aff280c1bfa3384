use std::cmp::Ordering;
use std::rc::Rc;

/// Ordering over two elements and their keys
pub struct Comparator<'a, K, V> {
    compare: Rc<dyn Fn(&V, &V, &K, &K) -> Ordering + 'a>,
}

impl<'a, K, V> Clone for Comparator<'a, K, V> {
    fn clone(&self) -> Self {
        Comparator {
            compare: Rc::clone(&self.compare),
        }
    }
}

impl<'a, K: 'a, V: 'a> Comparator<'a, K, V> {
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&V, &V, &K, &K) -> Ordering + 'a,
    {
        Comparator {
            compare: Rc::new(compare),
        }
    }

    /// Build a comparator that ignores keys
    pub fn by_value<F>(compare: F) -> Self
    where
        F: Fn(&V, &V) -> Ordering + 'a,
    {
        Self::new(move |a, b, _, _| compare(a, b))
    }

    pub fn compare(&self, a: &V, b: &V, a_key: &K, b_key: &K) -> Ordering {
        (self.compare)(a, b, a_key, b_key)
    }

    /// Same ordering with the arguments swapped
    pub fn reversed(&self) -> Self {
        let inner = Rc::clone(&self.compare);
        Self::new(move |a, b, a_key, b_key| inner(b, a, b_key, a_key))
    }

    /// Equality derived from this ordering: equal when it compares as `Equal`
    pub fn to_equality(&self) -> Equality<'a, K, V> {
        let inner = Rc::clone(&self.compare);
        Equality::new(move |a, b, a_key, b_key| inner(a, b, a_key, b_key) == Ordering::Equal)
    }
}

/// Equivalence over two elements and their keys
pub struct Equality<'a, K, V> {
    equals: Rc<dyn Fn(&V, &V, &K, &K) -> bool + 'a>,
}

impl<'a, K, V> Clone for Equality<'a, K, V> {
    fn clone(&self) -> Self {
        Equality {
            equals: Rc::clone(&self.equals),
        }
    }
}

impl<'a, K: 'a, V: 'a> Equality<'a, K, V> {
    pub fn new<F>(equals: F) -> Self
    where
        F: Fn(&V, &V, &K, &K) -> bool + 'a,
    {
        Equality {
            equals: Rc::new(equals),
        }
    }

    pub fn by_value<F>(equals: F) -> Self
    where
        F: Fn(&V, &V) -> bool + 'a,
    {
        Self::new(move |a, b, _, _| equals(a, b))
    }

    /// Plain `==` on values
    pub fn strict() -> Self
    where
        V: PartialEq,
    {
        Self::by_value(|a: &V, b: &V| a == b)
    }

    pub fn equals(&self, a: &V, b: &V, a_key: &K, b_key: &K) -> bool {
        (self.equals)(a, b, a_key, b_key)
    }
}

/// Comparison settings carried by an iteration chain
///
/// Views copy the configuration of their parent when they are created. Later
/// changes to the parent never reach views derived earlier.
pub struct Config<'a, K, V> {
    comparator: Option<Comparator<'a, K, V>>,
    equality: Option<Equality<'a, K, V>>,
}

impl<'a, K, V> Default for Config<'a, K, V> {
    fn default() -> Self {
        Config {
            comparator: None,
            equality: None,
        }
    }
}

impl<'a, K, V> Clone for Config<'a, K, V> {
    fn clone(&self) -> Self {
        Config {
            comparator: self.comparator.clone(),
            equality: self.equality.clone(),
        }
    }
}

impl<'a, K: 'a, V: 'a> Config<'a, K, V> {
    pub fn comparator(&self) -> Option<&Comparator<'a, K, V>> {
        self.comparator.as_ref()
    }

    pub fn equality(&self) -> Option<&Equality<'a, K, V>> {
        self.equality.as_ref()
    }

    /// Set the comparator. An unset equality is derived from it.
    pub fn with_comparator(mut self, comparator: Comparator<'a, K, V>) -> Self {
        if self.equality.is_none() {
            self.equality = Some(comparator.to_equality());
        }
        self.comparator = Some(comparator);
        self
    }

    pub fn with_equality(mut self, equality: Equality<'a, K, V>) -> Self {
        self.equality = Some(equality);
        self
    }

    /// Equality to use: the configured one, or `==` when none is set
    pub fn resolve_equality(&self) -> Equality<'a, K, V>
    where
        V: PartialEq,
    {
        self.equality.clone().unwrap_or_else(Equality::strict)
    }
}

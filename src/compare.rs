//! Preset comparators and equalities
//!
//! Every preset shares one policy for elements outside its domain (`None`,
//! NaN, ...): those elements are equal to each other and sort entirely before
//! or entirely after the valid ones, depending on `nulls_first`. Only valid
//! elements are compared with the domain ordering, which `ascending = false`
//! reverses without moving the nulls.

use crate::config::{Comparator, Equality};
use std::cmp::Ordering;

/// General builder behind every preset comparator
pub fn with_nulls<'a, K, V, P, C>(valid: P, compare: C, ascending: bool, nulls_first: bool) -> Comparator<'a, K, V>
where
    K: 'a,
    V: 'a,
    P: Fn(&V) -> bool + 'a,
    C: Fn(&V, &V) -> Ordering + 'a,
{
    Comparator::by_value(move |a: &V, b: &V| match (valid(a), valid(b)) {
        (true, true) if ascending => compare(a, b),
        (true, true) => compare(b, a),
        (false, false) => Ordering::Equal,
        (false, true) if nulls_first => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, false) if nulls_first => Ordering::Greater,
        (true, false) => Ordering::Less,
    })
}

/// General builder behind every preset equality
pub fn eq_with_nulls<'a, K, V, P, E>(valid: P, equals: E) -> Equality<'a, K, V>
where
    K: 'a,
    V: 'a,
    P: Fn(&V) -> bool + 'a,
    E: Fn(&V, &V) -> bool + 'a,
{
    Equality::by_value(move |a: &V, b: &V| match (valid(a), valid(b)) {
        (true, true) => equals(a, b),
        (false, false) => true,
        _ => false,
    })
}

/// `Ord` order, ascending
pub fn natural<'a, K: 'a, V: Ord + 'a>() -> Comparator<'a, K, V> {
    Comparator::by_value(|a: &V, b: &V| a.cmp(b))
}

fn float<V: Copy + Into<f64>>(value: &V) -> f64 {
    (*value).into()
}

/// Numeric order, ascending, NaN last
pub fn number<'a, K: 'a, V: Copy + Into<f64> + 'a>() -> Comparator<'a, K, V> {
    number_with(true, false)
}

/// Numeric order with explicit direction and NaN placement
pub fn number_with<'a, K: 'a, V: Copy + Into<f64> + 'a>(ascending: bool, nulls_first: bool) -> Comparator<'a, K, V> {
    with_nulls(
        |value: &V| !float(value).is_nan(),
        |a: &V, b: &V| float(a).total_cmp(&float(b)),
        ascending,
        nulls_first,
    )
}

/// Numeric equality; NaN equals NaN and nothing else
pub fn number_eq<'a, K: 'a, V: Copy + Into<f64> + 'a>() -> Equality<'a, K, V> {
    eq_with_nulls(
        |value: &V| !float(value).is_nan(),
        |a: &V, b: &V| float(a) == float(b),
    )
}

fn compare_text(a: &str, b: &str, ignore_case: bool) -> Ordering {
    if ignore_case {
        a.to_lowercase().cmp(&b.to_lowercase())
    } else {
        a.cmp(b)
    }
}

fn equal_text(a: &str, b: &str, ignore_case: bool) -> bool {
    if ignore_case {
        a.to_lowercase() == b.to_lowercase()
    } else {
        a == b
    }
}

/// Lexicographic order over anything string-like
pub fn text<'a, K: 'a, V: AsRef<str> + 'a>(ignore_case: bool) -> Comparator<'a, K, V> {
    Comparator::by_value(move |a: &V, b: &V| compare_text(a.as_ref(), b.as_ref(), ignore_case))
}

pub fn text_eq<'a, K: 'a, V: AsRef<str> + 'a>(ignore_case: bool) -> Equality<'a, K, V> {
    Equality::by_value(move |a: &V, b: &V| equal_text(a.as_ref(), b.as_ref(), ignore_case))
}

/// Lexicographic order over optional text with `None` as the null class
pub fn text_with<'a, K: 'a, S: AsRef<str> + 'a>(
    ignore_case: bool,
    ascending: bool,
    nulls_first: bool,
) -> Comparator<'a, K, Option<S>> {
    nullable(
        move |a: &S, b: &S| compare_text(a.as_ref(), b.as_ref(), ignore_case),
        ascending,
        nulls_first,
    )
}

/// Text equality over optional text; `None` equals `None` and nothing else
pub fn text_eq_with<'a, K: 'a, S: AsRef<str> + 'a>(ignore_case: bool) -> Equality<'a, K, Option<S>> {
    eq_with_nulls(Option::is_some, move |a: &Option<S>, b: &Option<S>| match (a, b) {
        (Some(a), Some(b)) => equal_text(a.as_ref(), b.as_ref(), ignore_case),
        _ => false,
    })
}

/// Order over `Option<T>` with `None` as the null class
pub fn nullable<'a, K, T, C>(compare: C, ascending: bool, nulls_first: bool) -> Comparator<'a, K, Option<T>>
where
    K: 'a,
    T: 'a,
    C: Fn(&T, &T) -> Ordering + 'a,
{
    with_nulls(
        Option::is_some,
        move |a: &Option<T>, b: &Option<T>| match (a, b) {
            (Some(a), Some(b)) => compare(a, b),
            _ => Ordering::Equal,
        },
        ascending,
        nulls_first,
    )
}

pub fn nullable_eq<'a, K: 'a, T: PartialEq + 'a>() -> Equality<'a, K, Option<T>> {
    eq_with_nulls(Option::is_some, |a: &Option<T>, b: &Option<T>| a == b)
}

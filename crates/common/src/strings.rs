//! String comparison helpers

use std::collections::{HashMap, HashSet};

/// Equal ignoring case, with Unicode lowercase mapping (`Ä` equals `ä`)
fn eq_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Same keys, and values equal ignoring case
pub fn equal_string_maps(a: &HashMap<String, String>, b: &HashMap<String, String>) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| eq_fold(value, other)))
}

/// Same length, and every element of `b` appears somewhere in `a`.
///
/// Duplicates are not counted; use [`equal_elements`] for that.
pub fn equal_string_lists<S: AsRef<str>>(a: &[S], b: &[S]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let seen: HashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    b.iter().all(|value| seen.contains(value.as_ref()))
}

/// Same elements with the same multiplicity, in any order
pub fn equal_elements<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut remaining: Vec<&T> = b.iter().collect();
    for value in a {
        match remaining.iter().position(|other| *other == value) {
            Some(index) => {
                remaining.swap_remove(index);
            }
            None => return false,
        }
    }
    true
}

/// Both present and equal ignoring case. Two absent values are not equal.
pub fn equal_ignore_case_opt(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => eq_fold(a, b),
        _ => false,
    }
}

pub fn contains_ignore_case<S: AsRef<str>>(values: &[S], search: &str) -> bool {
    values
        .iter()
        .any(|value| eq_fold(value.as_ref(), search))
}

pub fn to_lower_case<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| v.as_ref().to_lowercase()).collect()
}

/// Drop the last `chars_to_cut` characters. Cutting more than the length yields `""`.
pub fn shorten(s: &str, chars_to_cut: usize) -> &str {
    let keep = s.chars().count().saturating_sub(chars_to_cut);
    match s.char_indices().nth(keep) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}

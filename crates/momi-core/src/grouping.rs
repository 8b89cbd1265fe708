//! Alphabetical ordering and first-letter grouping for list views.
//!
//! Ordering is case-insensitive, with the raw strings as a tiebreak so the
//! result never depends on input order.

use std::cmp::Ordering;

/// Label used for items whose key is empty.
pub const EMPTY_INITIAL: &str = "#";

/// Case-insensitive comparison with a case-sensitive tiebreak.
///
/// Compares lowercased code points, not Danish collation: "Å" sorts before
/// "Æ" and "Ø".
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Uppercased first character of `label`, or [`EMPTY_INITIAL`].
pub fn initial(label: &str) -> String {
    match label.trim_start().chars().next() {
        Some(c) => c.to_uppercase().collect(),
        None => EMPTY_INITIAL.to_string(),
    }
}

/// Items sharing one initial, already sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGroup<'a, T> {
    pub letter: String,
    pub items: Vec<&'a T>,
}

/// Sort `items` by `key` and split them into groups by initial.
pub fn group_by_initial<'a, T, F>(items: &'a [T], key: F) -> Vec<LetterGroup<'a, T>>
where
    F: Fn(&T) -> &str,
{
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| compare_labels(key(a), key(b)));

    let mut groups: Vec<LetterGroup<'a, T>> = Vec::new();
    for item in sorted {
        let letter = initial(key(item));
        match groups.iter_mut().find(|g| g.letter == letter) {
            Some(group) => group.items.push(item),
            None => groups.push(LetterGroup {
                letter,
                items: vec![item],
            }),
        }
    }
    groups.sort_by(|a, b| compare_labels(&a.letter, &b.letter));
    groups
}

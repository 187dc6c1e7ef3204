use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::hash::Hash;

// '...of 1979', where the year is a 4-digit number
static TITLE_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\bof\s+[0-9]{4}\s*$").expect("title year pattern"));

/// Removes a trailing `of YYYY` and surrounding whitespace, so titles that only differ by
/// enactment year normalize to the same string.
#[must_use]
pub fn strip_trailing_year(title: &str) -> String {
    TITLE_YEAR_RE.replace(title.trim(), "").trim().to_string()
}

/// Drops repeated items, keeping the first occurrence of each.
#[must_use]
pub fn dedup_preserving_order<T>(items: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Pushes `item` unless it is already present. Returns `true` when pushed.
pub fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        return false;
    }
    items.push(item);
    true
}

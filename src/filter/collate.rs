use std::cmp::Ordering;

/// Locale-style string ordering.
///
/// Characters are ranked punctuation/whitespace < digits < letters and
/// compared case-insensitively first. Strings that are equal under that rule
/// are ordered lowercase-first, then by code point so the result is total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_key)
        .cmp(b.chars().map(primary_key))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

fn primary_key(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, fold(c))
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}

//! Ordering of grade level labels

use std::cmp::Ordering;

/// Compare two grade levels
///
/// Labels made only of ASCII digits compare by integer value and sort before
/// every other label. Non-numeric labels compare equal to each other, so a
/// stable sort keeps their input order.
pub fn grade_order(left: &str, right: &str) -> Ordering {
    match (numeric_digits(left), numeric_digits(right)) {
        (Some(l), Some(r)) => l.len().cmp(&r.len()).then_with(|| l.cmp(r)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort grade levels in place (stable)
pub fn sort_grades(grades: &mut [String]) {
    grades.sort_by(|a, b| grade_order(a, b));
}

/// Significant digits of a numeric label, compared by length then lexically
/// so arbitrarily long numbers never overflow
fn numeric_digits(label: &str) -> Option<&str> {
    if !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit()) {
        Some(label.trim_start_matches('0'))
    } else {
        None
    }
}

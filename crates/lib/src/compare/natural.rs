//! Natural-order string comparison.
//!
//! Runs of digits compare by numeric value, so `"img12"` sorts after `"img2"`.
//! Everything else compares character by character.

use std::{cmp::Ordering, iter::Peekable, str::Chars};

/// Compares two strings in natural order.
///
/// Leading whitespace is ignored. With `ignore_case`, letters compare by their
/// lowercase form.
///
/// ```
/// use std::cmp::Ordering;
/// use satchel::compare::natural_cmp;
///
/// assert_eq!(natural_cmp("img12.png", "img10.png", false), Ordering::Greater);
/// assert_eq!(natural_cmp("img2.png", "img10.png", false), Ordering::Less);
/// assert_eq!(natural_cmp("IMG2", "img10", true), Ordering::Less);
/// ```
pub fn natural_cmp(a: &str, b: &str, ignore_case: bool) -> Ordering {
    let mut left = a.trim_start().chars().peekable();
    let mut right = b.trim_start().chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let ordering = compare_digit_runs(&mut left, &mut right);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                let ordering = if ignore_case {
                    x.to_lowercase().cmp(y.to_lowercase())
                } else {
                    x.cmp(&y)
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(c);
        chars.next();
    }
    digits
}

/// Compares two digit runs by value; on a tie, the run with fewer leading zeros first
fn compare_digit_runs(left: &mut Peekable<Chars<'_>>, right: &mut Peekable<Chars<'_>>) -> Ordering {
    let a = take_digits(left);
    let b = take_digits(right);
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');

    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        .then_with(|| a.len().cmp(&b.len()))
}

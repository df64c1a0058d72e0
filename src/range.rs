//! Row index selections.
//!
//! A selection is a comma-separated list of tokens, each either a single position (`3`) or
//! an inclusive range (`0-5`). Tokens are parsed leniently: anything that does not start with
//! an integer is skipped, and out-of-range positions are dropped rather than reported.

use std::collections::BTreeSet;

/// Parse `selection` into the sorted, deduplicated positions it selects within `0..len`.
///
/// ```rust
/// use record_query::range::parse_indices;
///
/// assert_eq!(parse_indices("0-2,5,7-9", 8), vec![0, 1, 2, 5, 7]);
/// assert_eq!(parse_indices("0,5,10", 2), vec![0]);
/// assert_eq!(parse_indices("oops", 4), Vec::<usize>::new());
/// ```
pub fn parse_indices(selection: &str, len: usize) -> Vec<usize> {
    let mut out = BTreeSet::new();
    if len == 0 {
        return Vec::new();
    }
    let last = (len - 1) as i64;

    for token in selection.split(',').map(str::trim) {
        if token.contains('-') {
            let mut bounds = token.split('-').map(parse_int_prefix);
            let (Some(Some(start)), Some(Some(end))) = (bounds.next(), bounds.next()) else {
                continue;
            };
            let (start, end) = (start.max(0), end.min(last));
            if start <= end {
                out.extend((start..=end).map(|i| i as usize));
            }
        } else if let Some(index) = parse_int_prefix(token) {
            if (0..=last).contains(&index) {
                out.insert(index as usize);
            }
        }
    }

    out.into_iter().collect()
}

/// Leading-integer parse in the manner of `parseInt(s, 10)`: optional sign, then digits,
/// trailing junk ignored. Returns `None` when no digit follows the sign.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}

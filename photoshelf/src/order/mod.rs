//! Natural ordering for gallery file names.
//!
//! Directory listings sort with [`natural_cmp`], which treats embedded
//! digit runs as numbers rather than character sequences: `2.png`
//! sorts before `10.png`, and purely numeric names sort ahead of
//! everything else. The comparator is a strict weak order, so it is
//! safe to hand to a stable sort; ties keep their enumeration order.

use std::cmp::Ordering;
use std::path::Path;

/// Compare two file names in natural display order.
///
/// Rules, in priority order:
///
/// 1. Extensions are stripped before comparison.
/// 2. Two names that are entirely non-negative integers compare by
///    numeric value (`2` before `10`).
/// 3. A purely numeric name sorts before any non-numeric name.
/// 4. Otherwise compare case-insensitively character by character: at
///    the first difference, non-alphanumeric characters sort before
///    alphanumeric ones; maximal digit runs compare by numeric value
///    (`file2x` before `file10x`); otherwise the characters compare
///    directly, and a name that runs out first sorts first.
pub fn natural_cmp(a_name: &str, b_name: &str) -> Ordering {
    let a = stem(a_name);
    let b = stem(b_name);

    match (parse_whole_number(a), parse_whole_number(b)) {
        (Some(a_num), Some(b_num)) => a_num.cmp(&b_num),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => cmp_textual(a, b),
    }
}

/// File name with its final extension removed.
fn stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}

/// Parse a name that consists entirely of ASCII digits.
///
/// Literals too large for `u64` are treated as non-numeric, as are
/// signs and empty strings.
fn parse_whole_number(stem: &str) -> Option<u64> {
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse::<u64>().ok()
}

fn cmp_textual(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        let (ca, cb) = (a[i], b[j]);

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let a_end = digit_run_end(&a, i);
            let b_end = digit_run_end(&b, j);
            match cmp_digit_runs(&a[i..a_end], &b[j..b_end]) {
                Ordering::Equal => {
                    // Numerically equal runs ("01" vs "1") are skipped.
                    i = a_end;
                    j = b_end;
                    continue;
                }
                decided => return decided,
            }
        }

        if ca == cb {
            i += 1;
            j += 1;
            continue;
        }

        return match (ca.is_alphanumeric(), cb.is_alphanumeric()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => ca.cmp(&cb),
        };
    }

    // One side is a prefix of the other; the shorter name sorts first.
    (a.len() - i).cmp(&(b.len() - j))
}

fn digit_run_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}

/// Numeric comparison of two digit runs without parsing.
///
/// Leading zeros are stripped; a longer remaining run is the larger
/// number, equal lengths compare digit-wise. Never overflows, whatever
/// the run length.
fn cmp_digit_runs(a: &[char], b: &[char]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(run: &[char]) -> &[char] {
    let first = run.iter().position(|c| *c != '0').unwrap_or(run.len());
    &run[first..]
}

//! Lenient numeric parsing for user-typed inputs
//!
//! Range bounds and sample counts come straight from form fields, so they are
//! parsed from their longest numeric prefix: `"12px"` is `12`, `"4.5"` as a
//! count is `4`, and anything without leading digits is `None`.

/// Parse the longest leading float of `input`
///
/// Accepts leading whitespace, an optional sign, digits with an optional
/// fraction (`3.`, `.5`) and an optional exponent.
///
/// # Examples
/// ```
/// # use multiples_text::parse_float_prefix;
/// assert_eq!(parse_float_prefix(" -2.5e1 apples"), Some(-25.0));
/// assert_eq!(parse_float_prefix("abc"), None);
/// ```
#[must_use]
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when it carries at least one digit.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parse the longest leading integer of `input`
///
/// # Examples
/// ```
/// # use multiples_text::parse_int_prefix;
/// assert_eq!(parse_int_prefix("4.5"), Some(4));
/// assert_eq!(parse_int_prefix("-3"), Some(-3));
/// assert_eq!(parse_int_prefix(""), None);
/// ```
#[must_use]
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    s[..end].parse::<i64>().ok()
}

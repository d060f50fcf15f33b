//! ISBN normalization.

/// Normalize a raw ISBN string.
///
/// Uppercases the input and keeps only digits and `X`. The result is
/// returned only if it is 10 or 13 characters long; anything else yields an
/// empty string. Checksums are not verified.
pub fn normalize(raw: &str) -> String {
    let cleaned: String = raw
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X')
        .collect();

    match cleaned.len() {
        10 | 13 => cleaned,
        _ => String::new(),
    }
}

//! E.164 phone number normalization and validation

/// Normalize a user-entered phone number to E.164 with a US country code
/// default.
pub fn normalize_to_e164(input: &str) -> String {
    normalize_to_e164_with_country(input, "1")
}

/// Normalize a user-entered phone number to E.164.
///
/// Classification ladder:
/// - 11 digits starting with `1`: already carries a US country code
/// - exactly 10 digits: prepend the default country code
/// - original input started with `+` and has at least 10 digits: keep as
///   international
/// - anything else is returned unchanged rather than guessed at
///
/// US-biased by default; does not attempt full international validation.
pub fn normalize_to_e164_with_country(input: &str, default_country_digits: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 11 && digits.starts_with('1') {
        return format!("+{}", digits);
    }
    if digits.len() == 10 {
        return format!("+{}{}", default_country_digits, digits);
    }
    if input.starts_with('+') && digits.len() >= 10 {
        return format!("+{}", digits);
    }

    input.to_string()
}

/// True iff the string is `+` followed by a nonzero digit and 1-14 more
/// digits, with no other characters.
pub fn validate_e164(input: &str) -> bool {
    let Some(rest) = input.strip_prefix('+') else {
        return false;
    };
    let bytes = rest.as_bytes();
    if bytes.len() < 2 || bytes.len() > 15 {
        return false;
    }
    (b'1'..=b'9').contains(&bytes[0]) && bytes.iter().all(|b| b.is_ascii_digit())
}

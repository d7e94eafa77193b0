//! Contact (e-mail / mobile) validation and normalization.

use fintrack_shared::ContactType;
use thiserror::Error;

/// Contact validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    /// Not a plausible e-mail address.
    #[error("Invalid email address")]
    InvalidEmail,

    /// Not 10-15 digits with an optional leading `+`.
    #[error("Mobile number must be 10-15 digits")]
    InvalidMobile,
}

/// Validates a contact and returns its normalized form.
///
/// E-mail addresses are trimmed and lowercased and must have a non-empty
/// local part and a dotted domain. Mobile numbers are stripped of spaces and
/// dashes and must be 10-15 digits, optionally prefixed with `+`.
pub fn normalize_contact(contact: &str, kind: ContactType) -> Result<String, ContactError> {
    match kind {
        ContactType::Email => normalize_email(contact),
        ContactType::Mobile => normalize_mobile(contact),
    }
}

fn normalize_email(contact: &str) -> Result<String, ContactError> {
    let email = contact.trim().to_lowercase();
    let (local, domain) = email.split_once('@').ok_or(ContactError::InvalidEmail)?;

    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
    if local.is_empty() || domain.contains('@') || !domain_ok || email.contains(char::is_whitespace)
    {
        return Err(ContactError::InvalidEmail);
    }
    Ok(email)
}

fn normalize_mobile(contact: &str) -> Result<String, ContactError> {
    let compact: String = contact
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);

    if !(10..=15).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ContactError::InvalidMobile);
    }
    Ok(compact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("User@Example.com", "user@example.com")]
    #[case("  a.b@mail.co.in ", "a.b@mail.co.in")]
    fn test_valid_emails(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_contact(input, ContactType::Email).unwrap(), expected);
    }

    #[rstest]
    #[case("no-at-sign.com")]
    #[case("@example.com")]
    #[case("user@localhost")]
    #[case("user@.com")]
    #[case("user@example.")]
    #[case("a b@example.com")]
    fn test_invalid_emails(#[case] input: &str) {
        assert_eq!(
            normalize_contact(input, ContactType::Email),
            Err(ContactError::InvalidEmail)
        );
    }

    #[rstest]
    #[case("9876543210", "9876543210")]
    #[case("+91 98765-43210", "+919876543210")]
    #[case("123456789012345", "123456789012345")]
    fn test_valid_mobiles(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_contact(input, ContactType::Mobile).unwrap(), expected);
    }

    #[rstest]
    #[case("12345")]
    #[case("1234567890123456")]
    #[case("98765abc10")]
    #[case("++9876543210")]
    fn test_invalid_mobiles(#[case] input: &str) {
        assert_eq!(
            normalize_contact(input, ContactType::Mobile),
            Err(ContactError::InvalidMobile)
        );
    }
}

//! One-time passcodes for contact verification.
//!
//! Codes are six ASCII digits. Only a SHA-256 digest of the code is stored.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Number of digits in a passcode.
pub const OTP_LENGTH: usize = 6;

/// Default passcode lifetime in minutes.
pub const DEFAULT_OTP_TTL_MINUTES: i64 = 10;

/// Wrong guesses a passcode tolerates before it is locked.
pub const MAX_OTP_ATTEMPTS: u32 = 5;

/// Passcode verification failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpError {
    /// Code is not six digits.
    #[error("Passcode must be {OTP_LENGTH} digits")]
    Malformed,

    /// Code does not match.
    #[error("Invalid passcode")]
    Mismatch,

    /// Code has expired.
    #[error("Passcode has expired")]
    Expired,

    /// Code was already used.
    #[error("Passcode has already been used")]
    Consumed,

    /// Code was locked after too many wrong guesses.
    #[error("Too many failed attempts, request a new passcode")]
    TooManyAttempts,
}

/// A freshly issued passcode.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    /// Plaintext code, to be delivered and then discarded.
    pub code: String,
    /// Digest to persist.
    pub code_hash: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Stored passcode state checked on verification.
#[derive(Debug, Clone)]
pub struct StoredOtp<'a> {
    /// Persisted digest.
    pub code_hash: &'a str,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// When the code was used, if ever.
    pub consumed_at: Option<DateTime<Utc>>,
    /// Wrong guesses recorded so far.
    pub failed_attempts: u32,
}

/// Generates a random six-digit code.
#[must_use]
pub fn generate_code() -> String {
    let value: u32 = rand::rng().random_range(0..1_000_000);
    format!("{value:06}")
}

/// Hex SHA-256 digest of a code.
#[must_use]
pub fn hash_code(code: &str) -> String {
    format!("{:x}", Sha256::digest(code.as_bytes()))
}

/// Issues a new code valid for `ttl_minutes` from `now`.
#[must_use]
pub fn issue(now: DateTime<Utc>, ttl_minutes: i64) -> IssuedOtp {
    let code = generate_code();
    IssuedOtp {
        code_hash: hash_code(&code),
        code,
        expires_at: now + Duration::minutes(ttl_minutes),
    }
}

/// Returns true if `code` is exactly six ASCII digits.
#[must_use]
pub fn is_well_formed(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Checks a submitted code against stored state at `now`.
///
/// # Errors
///
/// Returns the first failing condition: malformed input, consumed code,
/// expiry, exhausted attempts, then mismatch.
pub fn verify(submitted: &str, stored: &StoredOtp<'_>, now: DateTime<Utc>) -> Result<(), OtpError> {
    if !is_well_formed(submitted) {
        return Err(OtpError::Malformed);
    }
    if stored.consumed_at.is_some() {
        return Err(OtpError::Consumed);
    }
    if now >= stored.expires_at {
        return Err(OtpError::Expired);
    }
    if stored.failed_attempts >= MAX_OTP_ATTEMPTS {
        return Err(OtpError::TooManyAttempts);
    }
    if hash_code(submitted) != stored.code_hash {
        return Err(OtpError::Mismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_six_digits() {
        for _ in 0..200 {
            let code = generate_code();
            assert!(is_well_formed(&code), "bad code {code}");
        }
    }

    #[test]
    fn test_hash_is_stable_hex() {
        let hash = hash_code("123456");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_code("123456"));
        assert_ne!(hash, hash_code("654321"));
    }

    #[test]
    fn test_verify_accepts_fresh_code() {
        let now = Utc::now();
        let issued = issue(now, DEFAULT_OTP_TTL_MINUTES);
        let stored = StoredOtp {
            code_hash: &issued.code_hash,
            expires_at: issued.expires_at,
            consumed_at: None,
            failed_attempts: 0,
        };

        assert_eq!(verify(&issued.code, &stored, now), Ok(()));
    }

    #[test]
    fn test_verify_rejects_expired_and_consumed() {
        let now = Utc::now();
        let issued = issue(now, DEFAULT_OTP_TTL_MINUTES);
        let mut stored = StoredOtp {
            code_hash: &issued.code_hash,
            expires_at: issued.expires_at,
            consumed_at: None,
            failed_attempts: 0,
        };

        let later = now + Duration::minutes(DEFAULT_OTP_TTL_MINUTES);
        assert_eq!(verify(&issued.code, &stored, later), Err(OtpError::Expired));

        stored.consumed_at = Some(now);
        assert_eq!(verify(&issued.code, &stored, now), Err(OtpError::Consumed));
    }

    #[test]
    fn test_verify_rejects_wrong_or_malformed() {
        let now = Utc::now();
        let stored_hash = hash_code("111111");
        let stored = StoredOtp {
            code_hash: &stored_hash,
            expires_at: now + Duration::minutes(5),
            consumed_at: None,
            failed_attempts: 0,
        };

        assert_eq!(verify("222222", &stored, now), Err(OtpError::Mismatch));
        assert_eq!(verify("12ab56", &stored, now), Err(OtpError::Malformed));
        assert_eq!(verify("1111111", &stored, now), Err(OtpError::Malformed));
    }

    #[test]
    fn test_verify_locks_after_max_attempts() {
        let now = Utc::now();
        let issued = issue(now, DEFAULT_OTP_TTL_MINUTES);
        let mut stored = StoredOtp {
            code_hash: &issued.code_hash,
            expires_at: issued.expires_at,
            consumed_at: None,
            failed_attempts: MAX_OTP_ATTEMPTS - 1,
        };
        assert_eq!(verify(&issued.code, &stored, now), Ok(()));

        stored.failed_attempts = MAX_OTP_ATTEMPTS;
        assert_eq!(
            verify(&issued.code, &stored, now),
            Err(OtpError::TooManyAttempts)
        );
        assert_eq!(verify("12ab56", &stored, now), Err(OtpError::Malformed));
    }
}

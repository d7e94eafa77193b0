//! Authentication primitives: password hashing, one-time passcodes and
//! contact validation.

mod contact;
pub mod otp;
mod password;

pub use contact::{ContactError, normalize_contact};
pub use otp::{IssuedOtp, MAX_OTP_ATTEMPTS, OtpError, StoredOtp};
pub use password::{
    MIN_PASSWORD_LENGTH, PasswordError, hash_password, validate_password, verify_password,
};

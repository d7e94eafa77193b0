//! Authentication types for JWT and the contact verification flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role claim for regular users.
pub const ROLE_USER: &str = "user";
/// Role claim for administrators.
pub const ROLE_ADMIN: &str = "admin";

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Contact the user signed in with (email or mobile number).
    pub contact: String,
    /// User's role.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, contact: &str, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            contact: contact.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns true if the claims carry the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Kind of contact a user registers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    /// Email address.
    Email,
    /// Mobile phone number.
    Mobile,
}

impl std::fmt::Display for ContactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Mobile => write!(f, "mobile"),
        }
    }
}

impl std::str::FromStr for ContactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "mobile" => Ok(Self::Mobile),
            _ => Err(format!("Unknown contact type: {s}")),
        }
    }
}

/// Register request payload. Triggers an OTP for the contact.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address or mobile number.
    pub contact: String,
    /// Plaintext password.
    pub password: String,
    /// Kind of contact supplied.
    pub contact_type: ContactType,
}

/// Response after a registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Human readable status.
    pub message: String,
    /// Contact the code was issued for.
    pub contact: String,
    /// The issued code, only present when code exposure is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

/// OTP verification payload.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
    /// Contact the code was issued for.
    pub contact: String,
    /// The code.
    pub otp: String,
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address or mobile number.
    pub contact: String,
    /// User password.
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Authenticated user.
    pub user: UserInfo,
    /// Bearer access token.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Public user information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address or mobile number.
    pub contact: String,
    /// Kind of contact.
    pub contact_type: ContactType,
    /// Whether the user is an administrator.
    pub is_admin: bool,
}

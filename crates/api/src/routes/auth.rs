//! Authentication routes: register, passcode verification and login.
//!
//! Passcode delivery is mocked: the code is written to the log at `info`
//! level and, when `otp.expose_code` is set, returned in the response.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::Utc;
use tracing::{info, warn};

use crate::{ApiError, ApiResult, AppState};
use fintrack_core::auth::{
    OtpError, StoredOtp, hash_password, normalize_contact, otp, validate_password, verify_password,
};
use fintrack_db::entities::users;
use fintrack_db::repositories::RegisterUserInput;
use fintrack_db::{CategoryRepository, OtpRepository, UserRepository};
use fintrack_shared::ContactType;
use fintrack_shared::auth::{
    AuthResponse, LoginRequest, ROLE_ADMIN, ROLE_USER, RegisterRequest, RegisterResponse,
    UserInfo, VerifyOtpRequest,
};

const INVALID_CREDENTIALS: &str = "Invalid contact or password";

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/verify", post(verify))
        .route("/auth/login", post(login))
}

/// Normalizes a contact whose kind is not given, inferring it from `@`.
fn normalize_any(contact: &str) -> Option<String> {
    let kind = if contact.contains('@') {
        ContactType::Email
    } else {
        ContactType::Mobile
    };
    normalize_contact(contact, kind).ok()
}

fn issue_token(state: &AppState, user: users::Model) -> ApiResult<AuthResponse> {
    let role = if user.is_admin { ROLE_ADMIN } else { ROLE_USER };
    let token = state
        .jwt_service
        .generate_access_token(user.id, &user.contact, role)?;

    Ok(AuthResponse {
        user: UserInfo {
            id: user.id,
            name: user.name,
            contact: user.contact,
            contact_type: user.contact_type.into(),
            is_admin: user.is_admin,
        },
        token,
        expires_in: state.jwt_service.access_token_expires_in(),
    })
}

/// POST /auth/register - Create an unverified account and issue a passcode.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    let contact = normalize_contact(&payload.contact, payload.contact_type)?;
    validate_password(&payload.password)?;
    let password_hash = hash_password(&payload.password)?;

    let user = UserRepository::new((*state.db).clone())
        .register(RegisterUserInput {
            name: name.to_string(),
            contact: contact.clone(),
            contact_type: payload.contact_type.into(),
            password_hash,
        })
        .await?;

    let issued = otp::issue(Utc::now(), state.otp.ttl_minutes);
    OtpRepository::new((*state.db).clone())
        .create(&contact, &issued.code_hash, issued.expires_at)
        .await?;

    info!(
        user_id = %user.id,
        contact = %contact,
        code = %issued.code,
        expires_at = %issued.expires_at,
        "Passcode issued (mock delivery)"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: format!("A verification code was sent to your {}", payload.contact_type),
            contact,
            otp: state.otp.expose_code.then_some(issued.code),
        }),
    ))
}

/// POST /auth/verify - Consume a passcode, verify the account and sign in.
async fn verify(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let contact = normalize_any(&payload.contact)
        .ok_or_else(|| ApiError::unauthorized("Invalid passcode"))?;

    let otps = OtpRepository::new((*state.db).clone());
    let pending = otps
        .find_latest_pending(&contact)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid passcode"))?;

    let checked = otp::verify(
        payload.otp.trim(),
        &StoredOtp {
            code_hash: &pending.code_hash,
            expires_at: pending.expires_at.with_timezone(&Utc),
            consumed_at: pending.consumed_at.map(|t| t.with_timezone(&Utc)),
            failed_attempts: u32::try_from(pending.failed_attempts).unwrap_or(0),
        },
        Utc::now(),
    );
    if checked == Err(OtpError::Mismatch) {
        let updated = otps.record_failed_attempt(pending.id).await?;
        if let Some(updated) = updated {
            warn!(
                otp_id = %updated.id,
                failed_attempts = updated.failed_attempts,
                "Wrong passcode submitted"
            );
        }
    }
    checked?;
    otps.consume(pending.id).await?;

    let users = UserRepository::new((*state.db).clone());
    let user = users
        .find_by_contact(&contact)
        .await?
        .ok_or_else(|| ApiError::not_found("No account for this contact"))?;
    let user = users.mark_verified(user.id).await?;

    let seeded = CategoryRepository::new((*state.db).clone())
        .seed_defaults(user.id)
        .await?;
    info!(user_id = %user.id, seeded_categories = seeded, "User verified");

    Ok(Json(issue_token(&state, user)?))
}

/// POST /auth/login - Sign in a verified user.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let contact =
        normalize_any(&payload.contact).ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let Some(user) = UserRepository::new((*state.db).clone())
        .find_by_contact(&contact)
        .await?
    else {
        info!(contact = %contact, "Login attempt for unknown contact");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    if !user.is_verified {
        return Err(ApiError::forbidden("Account is not verified"));
    }

    info!(user_id = %user.id, "User logged in");
    Ok(Json(issue_token(&state, user)?))
}

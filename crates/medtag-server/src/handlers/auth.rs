//! Registration and login handlers.
//!
//! Authentication is stateless: a successful login returns the account
//! summary and nothing else — no session or token is issued.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, warn};

use medtag_core::{password, User, ADMIN_SENTINEL};

use crate::dto::{GoogleLoginRequest, LoginRequest, RegisterRequest, UserResponse};
use crate::error::AppError;
use crate::ServerState;

/// POST /auth/register - Create a new user account.
pub async fn register(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let (Some(email), Some(pwd), Some(admin_id)) = (req.email, req.password, req.admin_id) else {
        return Err(AppError::Validation(
            "email, password, and adminId are required".into(),
        ));
    };

    let is_admin = admin_id == ADMIN_SENTINEL;

    // Duplicate check runs before the admin gate: an existing email reports
    // the conflict regardless of the supplied adminId.
    if state.users.find_by_email(&email)?.is_some() {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let hash = password::hash(&pwd).map_err(AppError::internal)?;

    // adminId must match the sentinel; every non-admin signup is rejected.
    if !is_admin {
        warn!("Registration rejected for {}: admin id mismatch", email);
        return Err(AppError::Authorization("Admin id did not match".into()));
    }

    let user = User::new(email, hash, is_admin);
    state.users.insert(&user)?;
    info!("Registered user {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            email: user.email,
            is_admin: user.is_admin,
        }),
    ))
}

/// POST /auth/login - Verify credentials and return the account summary.
pub async fn login(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let (Some(email), Some(pwd)) = (req.email, req.password) else {
        return Err(AppError::Validation(
            "Email and Password are required".into(),
        ));
    };

    let user = state.users.find_by_email(&email)?;
    let verified = match &user {
        Some(user) => password::verify(&pwd, &user.password).map_err(AppError::internal)?,
        None => false,
    };
    let Some(user) = user.filter(|_| verified) else {
        return Err(AppError::Authentication("Invalid email or password".into()));
    };

    Ok(Json(UserResponse {
        email: user.email,
        is_admin: user.is_admin,
    }))
}

/// POST /auth/googlelogin - Return the account summary for an email.
///
/// The lookup assumes the account exists; an unknown email is a server
/// error, not a 404.
pub async fn google_login(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<GoogleLoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let Some(email) = req.email else {
        return Err(AppError::Validation("email required".into()));
    };

    let user = state
        .users
        .find_by_email(&email)?
        .ok_or_else(|| AppError::Internal(format!("no account for {}", email)))?;

    Ok(Json(UserResponse {
        email: user.email,
        is_admin: user.is_admin,
    }))
}

/// User routes: registration, sign-in, and profile

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use bookvault_shared::auth::password::hash_password;
use bookvault_shared::auth::service::{validate_credentials, AuthenticatedIdentity};
use bookvault_shared::directory::UserDirectory;
use bookvault_shared::models::user::{Role, User};

use crate::app::{AppState, CurrentUser};
use crate::error::ApiResult;
use crate::response::ApiResponse;

/// Request to register a new user
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Desired username
    #[validate(length(min = 4, message = "Username must be at least 4 characters"))]
    pub username: String,

    /// Password
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
}

/// Request to sign in
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    /// Username
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Sign-in response payload
#[derive(Debug, Serialize)]
pub struct SignInData {
    /// Signed bearer token
    pub access_token: String,

    /// The authenticated user
    pub user: AuthenticatedIdentity,
}

/// POST /users/signup
///
/// Registers a new regular user. The plaintext password is hashed before it
/// reaches the directory and never stored.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    request.validate()?;

    let hash = hash_password(&request.password)?;
    let user = state
        .db
        .create_user(&request.username, &hash, Role::User)
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Registration successful", user)),
    ))
}

/// POST /users/signin
///
/// Validates credentials and returns a signed bearer token. Unknown users
/// and wrong passwords produce the same 401.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> ApiResult<Json<ApiResponse<SignInData>>> {
    request.validate()?;

    let identity = validate_credentials(&state.db, &request.username, &request.password).await?;

    let access_token = bookvault_shared::auth::service::issue_token(
        &identity,
        state.jwt_secret(),
        state.token_lifetime(),
    )
    .map_err(|_| crate::error::ApiError::InternalError("Token signing failed".to_string()))?;

    tracing::info!(user_id = identity.id, "User signed in");

    Ok(Json(ApiResponse::new(
        "Sign-in successful",
        SignInData {
            access_token,
            user: identity,
        },
    )))
}

/// GET /users/profile
///
/// Returns the authenticated caller's identity, re-resolved from the
/// directory by the extractor.
pub async fn profile(
    CurrentUser(identity): CurrentUser,
) -> ApiResult<Json<ApiResponse<AuthenticatedIdentity>>> {
    Ok(Json(ApiResponse::new(
        "Profile retrieved successfully",
        identity,
    )))
}

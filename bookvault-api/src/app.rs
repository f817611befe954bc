/// Application state, router builder, and the current-user extractor
///
/// The router mixes public and protected handlers; protection is per-handler
/// through the [`CurrentUser`] extractor rather than a route layer, so a
/// single router serves both without path juggling.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use bookvault_shared::auth::service::{authenticate_token, AuthenticatedIdentity};

use crate::config::Config;
use crate::error::ApiError;
use crate::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Configured token lifetime
    pub fn token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.config.jwt.token_ttl_seconds)
    }
}

/// The authenticated caller of a protected handler
///
/// Extracting this from a request validates the bearer token and re-resolves
/// the subject against the directory; handlers that take a `CurrentUser`
/// argument are therefore protected, handlers that don't are public.
pub struct CurrentUser(pub AuthenticatedIdentity);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing credentials".to_string()))?;

        // Any failed extraction is the same 401, including a non-Bearer scheme
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Missing credentials".to_string()))?;

        let identity = authenticate_token(&state.db, token, state.jwt_secret()).await?;

        Ok(CurrentUser(identity))
    }
}

/// Builds the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(routes::health::health_check))
        // Users
        .route("/users/signup", post(routes::users::sign_up))
        .route("/users/signin", post(routes::users::sign_in))
        .route("/users/profile", get(routes::users::profile))
        // Books
        .route(
            "/books",
            get(routes::books::list_books).post(routes::books::create_book),
        )
        .route(
            "/books/:id",
            get(routes::books::get_book)
                .put(routes::books::update_book)
                .delete(routes::books::delete_book),
        )
        .route("/books/:id/readers", post(routes::books::add_reader))
        // Middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

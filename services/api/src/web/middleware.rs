//! services/api/src/web/middleware.rs
//!
//! Identity middleware for the trip routes.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{ApiError, HttpError};
use crate::web::state::AppState;

/// The user id resolved for the current request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser(pub String);

/// Resolves the caller from an `Authorization: Bearer` header and inserts a
/// [`CurrentUser`] into the request extensions.
///
/// When the identity provider does not accept the caller, the request proceeds as
/// the configured anonymous user if anonymous access is allowed, and is rejected
/// with 401 otherwise.
pub async fn resolve_identity(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let resolved = match token {
        Some(token) => match state.identity.resolve_user(&token).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Identity provider failed to verify a bearer token: {}", e);
                None
            }
        },
        None => None,
    };

    let user_id = match resolved {
        Some(user_id) => user_id,
        None if state.config.allow_anonymous => {
            debug!("Proceeding as anonymous user {}", state.config.anonymous_user_id);
            state.config.anonymous_user_id.clone()
        }
        None => return Err(state.reject(ApiError::Unauthorized)),
    };

    req.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(req).await)
}

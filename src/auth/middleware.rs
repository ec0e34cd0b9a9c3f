//! Authentication middleware
//!
//! Protects routes that require authentication.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, State},
    http::{HeaderMap, Request, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::AppState;
use crate::data::UserId;
use crate::error::AppError;

/// Read the access token from the `Authorization` header
///
/// Accepts both `Bearer <token>` and the bare token. The scheme name is
/// matched case-insensitively.
pub fn extract_token_from_headers(headers: &HeaderMap) -> Option<String> {
    const SCHEME: &str = "bearer";

    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match value.split_at_checked(SCHEME.len()) {
        Some((scheme, rest))
            if scheme.eq_ignore_ascii_case(SCHEME) && (rest.is_empty() || rest.starts_with(' ')) =>
        {
            rest.trim()
        }
        _ => value,
    };
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<UserId, AppError> {
    let token = extract_token_from_headers(headers).ok_or(AppError::Unauthorized)?;
    state.auth.verify_token(&token).inspect_err(|_| {
        tracing::debug!("Rejected invalid or expired access token");
    })
}

/// Middleware to require authentication
///
/// Verifies the access token and adds the caller's `UserId` to request
/// extensions. Requests without a valid token never reach the handler.
///
/// # Usage
/// ```ignore
/// let protected_routes = Router::new()
///     .route("/tweet", ...)
///     .layer(middleware::from_fn_with_state(state, require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = authenticate(request.headers(), &state)?;

    request.extensions_mut().insert(user_id);

    Ok(next.run(request).await)
}

/// Extractor for current authenticated user
///
/// # Usage
/// ```ignore
/// async fn handler(CurrentUser(user_id): CurrentUser) -> impl IntoResponse {
///     format!("Hello, {}", user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Use the id set by `require_auth`, or verify the header directly
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user_id) = parts.extensions.get::<UserId>().copied() {
            return Ok(CurrentUser(user_id));
        }

        let state = AppState::from_ref(state);
        let user_id = authenticate(&parts.headers, &state)?;
        parts.extensions.insert(user_id);

        Ok(CurrentUser(user_id))
    }
}

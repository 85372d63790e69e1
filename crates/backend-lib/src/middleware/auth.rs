// crates/backend-lib/src/middleware/auth.rs

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AuthError, AppState};

/// Authorization gate middleware.
///
/// Rejects the request with the classified [`AuthError`] or forwards it with
/// the [`Authorized`](crate::auth::Authorized) outcome in its extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let authorized = state.gate.authorize(request.headers())?;

    request.extensions_mut().insert(authorized);

    // Continue to next middleware/handler
    Ok(next.run(request).await)
}

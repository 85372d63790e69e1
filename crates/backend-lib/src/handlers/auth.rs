// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Authentication handlers (login, refresh, whoami).

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    http::HeaderMap,
    Json,
};
use metrics::counter;
use tokengate_common::{LoginRequest, TokenResponse, WhoAmI};
use zeroize::Zeroize;

use crate::auth::{Authorized, IssuedToken};
use crate::error::AuthError;
use crate::metrics as keys;
use crate::AppState;

fn token_response(issued: IssuedToken) -> TokenResponse {
    let expires_in = issued.claims.exp - issued.claims.iat;
    TokenResponse::bearer(issued.token, issued.claims.exp, expires_in)
}

/// POST /auth/login
///
/// Exchange a username and password for a signed token
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let Json(mut req) = body.map_err(|e| AuthError::MalformedRequest(e.body_text()))?;

    // password hashing is CPU bound, keep it off the async workers
    let issuer = state.issuer.clone();
    let issued = tokio::task::spawn_blocking(move || {
        let result = issuer.login(&req.username, &req.password);
        req.password.zeroize();
        result
    })
    .await
    .map_err(|e| AuthError::StoreUnavailable(format!("credential check did not complete: {e}")))??;

    Ok(Json(token_response(issued)))
}

/// POST /auth/refresh
///
/// Exchange a token that is close to expiry for a fresh one
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AuthError> {
    let claims = state.gate.renewal_claims(&headers).inspect_err(|e| {
        counter!(keys::REFRESH_REJECTED).increment(1);
        tracing::debug!(error = %e, "refresh rejected");
    })?;

    let issued = state.issuer.renew_claims(&claims)?;
    Ok(Json(token_response(issued)))
}

/// GET /auth/whoami
///
/// Protected: reports who the presented token belongs to
pub async fn whoami(
    State(state): State<AppState>,
    Extension(authorized): Extension<Authorized>,
) -> Json<WhoAmI> {
    let claims = authorized.claims();
    Json(WhoAmI {
        username: claims.map(|c| c.username.clone()),
        issued_at: claims.map(|c| c.iat),
        expires_at: claims.map(|c| c.exp),
        auth_enabled: state.gate.is_enabled(),
    })
}

// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tokengate_common::ErrorBody;

/// Generic message for every failed login, whether or not the user exists
pub const INVALID_CREDENTIALS_MSG: &str = "invalid authentication credentials";

/// Classified authentication failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{}", INVALID_CREDENTIALS_MSG)]
    InvalidCredentials,

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("the token can be renewed only when it is close to expiration")]
    RenewalNotYetAllowed,

    #[error("{0}")]
    MissingOrMalformedToken(&'static str),

    #[error("unable to sign the token: {0}")]
    InternalSigningFailure(String),

    #[error("credential store unavailable: {0}")]
    StoreUnavailable(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MalformedToken(_)
            | AuthError::InvalidSignature
            | AuthError::Expired
            | AuthError::MissingOrMalformedToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::MalformedRequest(_) | AuthError::RenewalNotYetAllowed => {
                StatusCode::BAD_REQUEST
            },
            AuthError::InternalSigningFailure(_) | AuthError::StoreUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "AUTH_001",
            AuthError::MalformedRequest(_) => "REQ_001",
            AuthError::MalformedToken(_) => "TOKEN_001",
            AuthError::InvalidSignature => "TOKEN_002",
            AuthError::Expired => "TOKEN_003",
            AuthError::RenewalNotYetAllowed => "TOKEN_004",
            AuthError::MissingOrMalformedToken(_) => "TOKEN_005",
            AuthError::InternalSigningFailure(_) => "INT_001",
            AuthError::StoreUnavailable(_) => "INT_002",
        }
    }

    /// Server-side faults are reported without their detail
    pub fn is_server_fault(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Message safe to hand to the client
    pub fn public_message(&self) -> String {
        match self {
            AuthError::InternalSigningFailure(_) => "unable to sign the token".to_string(),
            AuthError::StoreUnavailable(_) => "authentication backend unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_fault() {
            tracing::error!(code = self.error_code(), error = %self, "authentication fault");
        }

        let body = ErrorBody::new(self.error_code(), self.public_message());
        (status, axum::Json(body)).into_response()
    }
}

//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use backend_lib::{
    auth::{hash_password_with, ManualClock, StaticCredentials},
    config::Settings,
    router, AppState,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// Start of the manual clock (Unix seconds)
pub const T0: i64 = 1_700_000_000;

/// base64 of "integration-test-signing-key-0123456789"
pub const SIGNING_KEY: &str = "aW50ZWdyYXRpb24tdGVzdC1zaWduaW5nLWtleS0wMTIzNDU2Nzg5";

pub const USERS: &[(&str, &str)] = &[("alice", "Wonderland-42!"), ("bob", "builder-bob-7")];

/// Cheap scrypt cost so the tests stay fast
pub fn cheap_params() -> scrypt::Params {
    scrypt::Params::new(4, 8, 1, 32).unwrap()
}

pub fn credentials() -> StaticCredentials {
    StaticCredentials::new(
        USERS
            .iter()
            .map(|(user, pw)| (user.to_string(), hash_password_with(pw, cheap_params()).unwrap())),
    )
}

/// Settings for the 15 minute / 120 second policy
pub fn settings(enabled: bool) -> Settings {
    let mut settings = Settings::default();
    settings.auth.enabled = enabled;
    settings.auth.signing_key = Some(SIGNING_KEY.to_string());
    settings.auth.expiration_minutes = 15;
    settings.auth.renewal_window_secs = 120;
    settings
}

pub struct TestApp {
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    pub router: Router,
}

pub fn test_app(settings: Settings) -> TestApp {
    let clock = Arc::new(ManualClock::at_timestamp(T0));
    let state = AppState::with_parts(settings, Arc::new(credentials()), clock.clone()).unwrap();
    let router = router::create_router(state.clone());
    TestApp {
        state,
        clock,
        router,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn login(&self, username: &str, password: &str) -> Response<Body> {
        let body = serde_json::json!({ "username": username, "password": password });
        self.send(
            Request::post("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn refresh(&self, authorization: Option<&str>) -> Response<Body> {
        let mut builder = Request::post("/auth/refresh");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn whoami(&self, authorization: Option<&str>) -> Response<Body> {
        let mut builder = Request::get("/auth/whoami");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}

pub async fn json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

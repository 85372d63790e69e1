// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const LOGIN_SUCCESS: &str = "auth.login.success";
pub const LOGIN_FAILURE: &str = "auth.login.failure";
pub const REFRESH_SUCCESS: &str = "auth.refresh.success";
pub const REFRESH_REJECTED: &str = "auth.refresh.rejected";
pub const GATE_REJECTED: &str = "auth.gate.rejected";

//! Wire DTOs for the REST backend, plus response-envelope decoding.
//!
//! DESIGN
//! ======
//! The backend is inconsistent about response shapes: some endpoints wrap
//! payloads in `{"data": ...}`, some return them bare, and the login endpoint
//! has shipped at least three different envelopes. Decoding is an explicit
//! step that tries a fixed priority order and fails closed with
//! [`ApiError::UnrecognizedShape`] instead of guessing.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::http::ApiError;

/// The signed-in employee as returned by `/api/me` and cached locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique employee identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Job title, if the backend exposes it.
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Avatar image URL, if available.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Login form payload for `POST /api/login`.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A successfully decoded login response.
///
/// `user` is `None` when the envelope carried no usable profile; callers
/// resolve it with a follow-up `/api/me` fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginSession {
    pub token: String,
    pub user: Option<UserProfile>,
}

/// Approval state shared by leave and overtime requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// One day's attendance entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    /// ISO 8601 date of the working day.
    pub date: String,
    #[serde(default)]
    pub clock_in: Option<String>,
    #[serde(default)]
    pub clock_out: Option<String>,
}

/// A submitted leave request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: i64,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
}

/// Payload for submitting a new leave request.
#[derive(Clone, Debug, Serialize)]
pub struct NewLeaveRequest {
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: Option<String>,
}

/// A submitted overtime request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    pub id: i64,
    pub date: String,
    pub hours: f64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
}

/// Payload for submitting a new overtime request.
#[derive(Clone, Debug, Serialize)]
pub struct NewOvertimeRequest {
    pub date: String,
    pub hours: f64,
    pub reason: Option<String>,
}

/// One payroll period's payslip summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    pub id: i64,
    /// Payroll period label, e.g. `"2026-07"`.
    pub period: String,
    pub gross_pay: f64,
    pub net_pay: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// A company document visible to the employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDocument {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

/// Strip the `{"data": ...}` envelope when present; bare payloads pass
/// through unchanged.
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}

/// Decode a single item out of either envelope form.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload does not match `T`.
pub fn decode_item<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(unwrap_data(value)).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Decode a list endpoint response: a bare array or `{"data": [...]}`.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload is not a list or an element
/// does not match `T`.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    match unwrap_data(value) {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|err| ApiError::Decode(err.to_string())))
            .collect(),
        _ => Err(ApiError::Decode("expected a list payload".to_owned())),
    }
}

/// Decode the login response, tolerating the envelopes the backend has
/// shipped, in fixed priority order:
///
/// 1. `{"token": ..., "user": ...}`
/// 2. `{"access_token": ..., "user": ...}`
/// 3. `{"data": {"token" | "access_token": ..., "user": ...}}`
///
/// # Errors
///
/// Returns [`ApiError::UnrecognizedShape`] when no form matches.
pub fn decode_login(value: &Value) -> Result<LoginSession, ApiError> {
    if let Some(session) = login_from_object(value) {
        return Ok(session);
    }
    if let Some(session) = value.get("data").and_then(login_from_object) {
        return Ok(session);
    }
    Err(ApiError::UnrecognizedShape)
}

fn login_from_object(value: &Value) -> Option<LoginSession> {
    let token = value
        .get("token")
        .and_then(Value::as_str)
        .or_else(|| value.get("access_token").and_then(Value::as_str))?;
    let user = value
        .get("user")
        .cloned()
        .and_then(|user| serde_json::from_value(user).ok());
    Some(LoginSession { token: token.to_owned(), user })
}

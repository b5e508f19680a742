//! Typed endpoint wrappers over the [`Gateway`].
//!
//! Each wrapper owns one backend resource, decodes through the tolerant
//! envelope helpers in [`types`](super::types), and returns plain DTOs so
//! pages never touch raw JSON.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::json;

use super::http::{ApiError, Gateway};
use super::types::{
    AttendanceRecord, Credentials, EmployeeDocument, LeaveRequest, LoginSession, NewLeaveRequest,
    NewOvertimeRequest, OvertimeRequest, Payslip, UserProfile, decode_item, decode_list, decode_login,
};

fn payslip_endpoint(id: i64) -> String {
    format!("/api/payslips/{id}")
}

/// Exchange credentials for a session via `POST /api/login`.
///
/// # Errors
///
/// Credential rejection surfaces as [`ApiError::Server`]; an envelope that
/// matches none of the tolerated shapes is [`ApiError::UnrecognizedShape`].
pub async fn login(gateway: &Gateway, credentials: &Credentials) -> Result<LoginSession, ApiError> {
    let value = gateway.post_json("/api/login", credentials).await?;
    decode_login(&value).map_err(|err| {
        #[cfg(feature = "hydrate")]
        log::warn!("login response matched no tolerated shape");
        err
    })
}

/// Invalidate the session server-side via `POST /api/logout`.
///
/// # Errors
///
/// Callers treat failure as advisory; local logout proceeds regardless.
pub async fn logout(gateway: &Gateway) -> Result<(), ApiError> {
    gateway.post_json("/api/logout", &json!({})).await?;
    Ok(())
}

/// Fetch the signed-in employee's profile via `GET /api/me`.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn fetch_me(gateway: &Gateway) -> Result<UserProfile, ApiError> {
    decode_item(gateway.get_json("/api/me").await?)
}

/// Persist profile edits via `PUT /api/profile`; returns the saved record.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn update_profile(gateway: &Gateway, profile: &UserProfile) -> Result<UserProfile, ApiError> {
    decode_item(gateway.put_json("/api/profile", profile).await?)
}

/// List the employee's attendance records.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn list_attendance(gateway: &Gateway) -> Result<Vec<AttendanceRecord>, ApiError> {
    decode_list(gateway.get_json("/api/attendance").await?)
}

/// Record the start of the working day.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn clock_in(gateway: &Gateway) -> Result<AttendanceRecord, ApiError> {
    decode_item(gateway.post_json("/api/attendance/clock-in", &json!({})).await?)
}

/// Record the end of the working day.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn clock_out(gateway: &Gateway) -> Result<AttendanceRecord, ApiError> {
    decode_item(gateway.post_json("/api/attendance/clock-out", &json!({})).await?)
}

/// List the employee's leave requests.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn list_leave(gateway: &Gateway) -> Result<Vec<LeaveRequest>, ApiError> {
    decode_list(gateway.get_json("/api/leave").await?)
}

/// Submit a new leave request; returns the created record.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn submit_leave(gateway: &Gateway, request: &NewLeaveRequest) -> Result<LeaveRequest, ApiError> {
    decode_item(gateway.post_json("/api/leave", request).await?)
}

/// List the employee's overtime requests.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn list_overtime(gateway: &Gateway) -> Result<Vec<OvertimeRequest>, ApiError> {
    decode_list(gateway.get_json("/api/overtime").await?)
}

/// Submit a new overtime request; returns the created record.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn submit_overtime(
    gateway: &Gateway,
    request: &NewOvertimeRequest,
) -> Result<OvertimeRequest, ApiError> {
    decode_item(gateway.post_json("/api/overtime", request).await?)
}

/// List the employee's payslips.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn list_payslips(gateway: &Gateway) -> Result<Vec<Payslip>, ApiError> {
    decode_list(gateway.get_json("/api/payslips").await?)
}

/// Fetch one payslip by id.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn fetch_payslip(gateway: &Gateway, id: i64) -> Result<Payslip, ApiError> {
    decode_item(gateway.get_json(&payslip_endpoint(id)).await?)
}

/// List documents shared with the employee.
///
/// # Errors
///
/// Returns any [`ApiError`] from the gateway or decode step.
pub async fn list_documents(gateway: &Gateway) -> Result<Vec<EmployeeDocument>, ApiError> {
    decode_list(gateway.get_json("/api/documents").await?)
}

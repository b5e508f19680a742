use super::*;

use serde_json::json;

fn sample_user_value() -> Value {
    json!({"id": 1, "name": "Jane"})
}

// =============================================================
// Login envelope decoding
// =============================================================

#[test]
fn decode_login_top_level_token() {
    let value = json!({"token": "abc123", "user": sample_user_value()});
    let session = decode_login(&value).expect("login");
    assert_eq!(session.token, "abc123");
    assert_eq!(session.user.expect("user").name, "Jane");
}

#[test]
fn decode_login_access_token_variant() {
    let value = json!({"access_token": "abc123", "user": sample_user_value()});
    let session = decode_login(&value).expect("login");
    assert_eq!(session.token, "abc123");
}

#[test]
fn decode_login_nested_data_envelope() {
    let value = json!({"data": {"token": "abc123", "user": sample_user_value()}});
    let session = decode_login(&value).expect("login");
    assert_eq!(session.token, "abc123");
    assert_eq!(session.user.expect("user").id, 1);
}

#[test]
fn decode_login_nested_access_token() {
    let value = json!({"data": {"access_token": "abc123"}});
    let session = decode_login(&value).expect("login");
    assert_eq!(session.token, "abc123");
    assert!(session.user.is_none());
}

#[test]
fn decode_login_prefers_token_over_access_token() {
    let value = json!({"token": "primary", "access_token": "secondary"});
    let session = decode_login(&value).expect("login");
    assert_eq!(session.token, "primary");
}

#[test]
fn decode_login_without_user_leaves_it_absent() {
    let value = json!({"token": "abc123"});
    let session = decode_login(&value).expect("login");
    assert!(session.user.is_none());
}

#[test]
fn decode_login_unusable_user_is_tolerated() {
    let value = json!({"token": "abc123", "user": "not-a-profile"});
    let session = decode_login(&value).expect("login");
    assert!(session.user.is_none());
}

#[test]
fn decode_login_rejects_unrecognized_shape() {
    let value = json!({"jwt": "abc123"});
    assert!(matches!(decode_login(&value), Err(ApiError::UnrecognizedShape)));
}

// =============================================================
// Generic envelope handling
// =============================================================

#[test]
fn unwrap_data_strips_envelope() {
    assert_eq!(unwrap_data(json!({"data": {"id": 1}})), json!({"id": 1}));
}

#[test]
fn unwrap_data_passes_bare_payload_through() {
    assert_eq!(unwrap_data(json!({"id": 1})), json!({"id": 1}));
    assert_eq!(unwrap_data(json!([1, 2])), json!([1, 2]));
}

#[test]
fn decode_list_accepts_bare_array() {
    let items: Vec<Payslip> = decode_list(json!([
        {"id": 1, "period": "2026-06", "gross_pay": 5200.0, "net_pay": 4100.5},
    ]))
    .expect("list");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].period, "2026-06");
}

#[test]
fn decode_list_accepts_data_envelope() {
    let items: Vec<Payslip> = decode_list(json!({"data": [
        {"id": 1, "period": "2026-06", "gross_pay": 5200.0, "net_pay": 4100.5},
    ]}))
    .expect("list");
    assert_eq!(items.len(), 1);
}

#[test]
fn decode_list_rejects_non_list_payload() {
    let result: Result<Vec<Payslip>, ApiError> = decode_list(json!({"id": 1}));
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[test]
fn decode_item_reads_either_envelope_form() {
    let bare: UserProfile = decode_item(sample_user_value()).expect("bare");
    let enveloped: UserProfile = decode_item(json!({"data": sample_user_value()})).expect("enveloped");
    assert_eq!(bare, enveloped);
}

// =============================================================
// DTO deserialization
// =============================================================

#[test]
fn user_profile_minimal_fields_deserialize() {
    let user: UserProfile = serde_json::from_value(sample_user_value()).expect("profile");
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Jane");
    assert!(user.email.is_none());
    assert!(user.avatar_url.is_none());
}

#[test]
fn request_status_parses_lowercase() {
    let status: RequestStatus = serde_json::from_value(json!("approved")).expect("status");
    assert_eq!(status, RequestStatus::Approved);
}

#[test]
fn leave_request_defaults_to_pending() {
    let request: LeaveRequest = serde_json::from_value(json!({
        "id": 3,
        "leave_type": "annual",
        "start_date": "2026-08-10",
        "end_date": "2026-08-14",
    }))
    .expect("leave request");
    assert_eq!(request.status, RequestStatus::Pending);
    assert!(request.reason.is_none());
}

#[test]
fn new_leave_request_serializes_expected_keys() {
    let request = NewLeaveRequest {
        leave_type: "annual".to_owned(),
        start_date: "2026-08-10".to_owned(),
        end_date: "2026-08-14".to_owned(),
        reason: Some("family visit".to_owned()),
    };
    let value = serde_json::to_value(&request).expect("serialize");
    assert_eq!(
        value,
        json!({
            "leave_type": "annual",
            "start_date": "2026-08-10",
            "end_date": "2026-08-14",
            "reason": "family visit",
        })
    );
}

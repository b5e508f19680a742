use super::*;

// =============================================================
// Credential handling
// =============================================================

#[test]
fn bearer_value_formats_header() {
    assert_eq!(bearer_value("abc123"), "Bearer abc123");
}

#[test]
fn redact_truncates_long_tokens() {
    assert_eq!(redact("abcdefghijklmnop"), "abcdefgh\u{2026}");
}

#[test]
fn redact_hides_short_tokens_entirely() {
    assert_eq!(redact("abc123"), "\u{2026}");
    assert_eq!(redact(""), "\u{2026}");
}

#[test]
fn login_route_is_the_login_page() {
    assert_eq!(LOGIN_ROUTE, "/login");
}

// =============================================================
// Server error message extraction
// =============================================================

#[test]
fn error_message_prefers_message_field() {
    let body = r#"{"message": "Leave balance exceeded", "error": "other"}"#;
    assert_eq!(error_message_from_body(422, body), "Leave balance exceeded");
}

#[test]
fn error_message_falls_back_to_error_field() {
    let body = r#"{"error": "Invalid credentials"}"#;
    assert_eq!(error_message_from_body(400, body), "Invalid credentials");
}

#[test]
fn error_message_uses_raw_text_when_not_json() {
    assert_eq!(error_message_from_body(500, "Internal Server Error"), "Internal Server Error");
}

#[test]
fn error_message_empty_body_reports_status() {
    assert_eq!(error_message_from_body(503, ""), "request failed: 503");
    assert_eq!(error_message_from_body(503, "   "), "request failed: 503");
}

// =============================================================
// Error taxonomy display
// =============================================================

#[test]
fn network_and_server_failures_are_distinct() {
    let network = ApiError::Network("connection refused".to_owned());
    let server = ApiError::Server { status: 422, message: "Leave balance exceeded".to_owned() };
    assert_eq!(network.to_string(), "network unavailable: connection refused");
    assert_eq!(server.to_string(), "Leave balance exceeded");
}

#[test]
fn unauthorized_display_names_the_rejection() {
    assert_eq!(ApiError::Unauthorized.to_string(), "authentication rejected");
}

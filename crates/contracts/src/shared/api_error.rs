//! Human readable messages from API error bodies.
//!
//! The REST API answers failures either with `{"detail": "..."}` or with a
//! field map such as `{"email": ["user with this email already exists."]}`.

use serde_json::Value;

pub const NO_RESPONSE_MESSAGE: &str =
    "No response from server. Please check your internet connection.";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// One message for an error response: `detail` first, then the first field
/// error as `"<field>: <message>"`, then a status fallback.
pub fn describe_error_body(status: u16, body: &Value) -> String {
    if let Some(detail) = body.get("detail").and_then(Value::as_str) {
        return detail.to_string();
    }

    if let Some((field, value)) = body.as_object().and_then(|map| map.iter().next()) {
        let message = match value {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => items.first().map(|first| match first {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
            _ => None,
        };
        if let Some(message) = message {
            return format!("{}: {}", field, message);
        }
    }

    format!("Request failed with status {}", status)
}

/// Same as [`describe_error_body`] for a raw text body that may not be JSON.
pub fn describe_error_text(status: u16, text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(body) => describe_error_body(status, &body),
        Err(_) => format!("Request failed with status {}", status),
    }
}

/// Login answers 401 for bad credentials; say so plainly.
pub fn describe_login_error(status: u16, text: &str) -> String {
    if status == 401 {
        return INVALID_CREDENTIALS_MESSAGE.to_string();
    }
    describe_error_text(status, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_wins() {
        let body = json!({"detail": "Not found.", "other": ["x"]});
        assert_eq!(describe_error_body(404, &body), "Not found.");
    }

    #[test]
    fn test_first_field_error() {
        let body = json!({"title": ["This field is required."], "price": ["bad"]});
        assert_eq!(describe_error_body(400, &body), "title: This field is required.");
        let body = json!({"email": "taken"});
        assert_eq!(describe_error_body(400, &body), "email: taken");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(describe_error_body(500, &json!({})), "Request failed with status 500");
        assert_eq!(describe_error_text(502, "<html>"), "Request failed with status 502");
        assert_eq!(describe_login_error(401, ""), INVALID_CREDENTIALS_MESSAGE);
        assert_eq!(describe_login_error(400, r#"{"detail":"Account disabled"}"#), "Account disabled");
    }
}

//! Response helpers. Bodies are bare JSON (no envelope): arrays, objects, or error objects.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

/// `{"error": message}`
pub fn error_body(message: String) -> serde_json::Value {
    serde_json::json!({ "error": message })
}

/// `{"errors": [..]}`
pub fn validation_errors_body(errors: &[&str]) -> serde_json::Value {
    serde_json::json!({ "errors": errors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_shapes() {
        assert_eq!(error_body("boom".into()), json!({"error": "boom"}));
        assert_eq!(
            validation_errors_body(&["Validation errors"]),
            json!({"errors": ["Validation errors"]})
        );
    }
}

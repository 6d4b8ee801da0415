//! JSON response shapes shared by every tool operation.
//!
//! Success responses are `{"success": true, ...payload}`; failures are
//! `{"error": <message>, "code": <stable code>}`. Hosting layers (CLI,
//! HTTP handlers) map the `code` onto their own status schemes.

use docshelf_core::Error;
use serde_json::{Value, json};

/// Wrap a payload object in the success envelope.
///
/// The payload must be a JSON object; its keys are merged next to
/// `success` and a completion timestamp.
pub fn success(payload: Value) -> Value {
    let mut response = json!({
        "success": true,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if let (Some(map), Some(extra)) = (response.as_object_mut(), payload.as_object()) {
        for (key, value) in extra {
            map.insert(key.clone(), value.clone());
        }
    }
    response
}

/// Build the error envelope for a store failure.
pub fn failure(err: &Error) -> Value {
    json!({
        "error": err.to_string(),
        "code": err.code(),
    })
}

/// Flatten a tool result into its final JSON form.
pub fn to_json(result: docshelf_core::Result<Value>) -> Value {
    match result {
        Ok(value) => value,
        Err(err) => failure(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let response = success(json!({"documents": []}));
        assert_eq!(response["success"], true);
        assert!(response["timestamp"].is_string());
        assert!(response["documents"].is_array());
    }

    #[test]
    fn test_failure_envelope() {
        let response = failure(&Error::not_found("v1/missing.mdx"));
        assert_eq!(response["code"], "NOT_FOUND");
        assert!(response["error"].as_str().unwrap().contains("missing.mdx"));
    }

    #[test]
    fn test_to_json_maps_err() {
        let response = to_json(Err(Error::invalid_path("bad")));
        assert_eq!(response["code"], "INVALID_PATH");
    }
}

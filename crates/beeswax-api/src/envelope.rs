// Response envelope
//
// Every Beeswax endpoint wraps its result:
//   { "success": true,  "payload": <object | array> }
//   { "success": false, "errors": ["..."] }   or   { "success": false, "message": "..." }

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;

const NO_DETAIL: &str = "request failed without an error message";

/// Standard Beeswax response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub payload: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Unwrap the envelope into its payload, or a protocol error.
    ///
    /// A success without a `payload` field yields `Value::Null`.
    pub fn into_result(self) -> Result<Value, Error> {
        if self.success {
            return Ok(self.payload.unwrap_or(Value::Null));
        }
        Err(Error::protocol(self.failure_message()))
    }

    /// `errors` joined by newlines, else `message`.
    fn failure_message(&self) -> String {
        match self.errors.as_deref() {
            Some(errors) if !errors.is_empty() => errors.join("\n"),
            _ => self
                .message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| NO_DETAIL.to_owned()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn decode(value: Value) -> Result<Value, Error> {
        serde_json::from_value::<Envelope>(value).unwrap().into_result()
    }

    fn protocol_message(result: Result<Value, Error>) -> String {
        match result {
            Err(Error::Protocol { message }) => message,
            other => panic!("expected Protocol error, got {other:?}"),
        }
    }

    #[test]
    fn success_returns_payload_verbatim() {
        let payload = json!([{ "account_id": 4, "account_name": "Acme", "active": true }]);
        let result = decode(json!({ "success": true, "payload": payload.clone() })).unwrap();
        assert_eq!(result, payload);
    }

    #[test]
    fn success_without_payload_is_null() {
        assert_eq!(decode(json!({ "success": true })).unwrap(), Value::Null);
    }

    #[test]
    fn errors_are_joined_by_newline() {
        let result = decode(json!({
            "success": false,
            "errors": ["error_1", "error_2"],
            "message": "ignored"
        }));
        assert_eq!(protocol_message(result), "error_1\nerror_2");
    }

    #[test]
    fn empty_errors_fall_back_to_message() {
        let result = decode(json!({ "success": false, "errors": [], "message": "Not logged in" }));
        assert_eq!(protocol_message(result), "Not logged in");
    }

    #[test]
    fn missing_errors_fall_back_to_message() {
        let result = decode(json!({ "success": false, "message": "Session expired" }));
        assert_eq!(protocol_message(result), "Session expired");
    }

    #[test]
    fn failure_without_detail_still_errors() {
        let result = decode(json!({ "success": false }));
        assert_eq!(protocol_message(result), NO_DETAIL);
    }

    #[test]
    fn success_field_is_required() {
        assert!(serde_json::from_value::<Envelope>(json!({ "payload": [] })).is_err());
    }
}

//! Type definitions for the runpad runner protocol.
//!
//! This crate provides the shared contract between the external execution
//! service and UI clients. Centralizing the wire types prevents drift between
//! the terminal client and any mock or real runner implementation, and gives
//! compile-time validation of protocol compliance on both ends.
//!
//! ## Example
//!
//! ```rust
//! use runpad_protocol::RunRequest;
//!
//! let request = RunRequest::new("int main() {}".to_string(), "20\n3".to_string());
//! assert_eq!(request.input, "20\n3");
//! ```

pub mod types;

pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_request_serializes_wire_field_names() {
        let request = RunRequest::new("int main() {}".to_string(), "20\n3".to_string());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["code"], "int main() {}");
        assert_eq!(json["input"], "20\n3");
    }

    #[test]
    fn test_run_request_round_trip() {
        let request = RunRequest::new("code".to_string(), "input".to_string());
        let json = serde_json::to_string(&request).unwrap();
        let deserialized: RunRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, deserialized);
    }

    #[test]
    fn test_run_response_with_output() {
        let response: RunResponse = serde_json::from_str(r#"{"output": "Quotient = 6"}"#).unwrap();
        assert_eq!(response.output.as_deref(), Some("Quotient = 6"));
    }

    #[test]
    fn test_run_response_missing_output() {
        let response: RunResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.output, None);
    }

    #[test]
    fn test_run_response_ignores_unknown_fields() {
        let body = r#"{"output": "ok", "exit_code": 0, "duration_ms": 12}"#;
        let response: RunResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.output.as_deref(), Some("ok"));
    }

    #[test]
    fn test_run_response_null_output() {
        let response: RunResponse = serde_json::from_str(r#"{"output": null}"#).unwrap();
        assert_eq!(response.output, None);
    }
}

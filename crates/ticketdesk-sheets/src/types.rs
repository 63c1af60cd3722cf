// Google API wire types
//
// Only the fields the store reads or writes are modelled.

use serde::{Deserialize, Serialize};

/// Claims of the service-account assertion sent to the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Service account email
    pub iss: String,
    /// Space-separated OAuth scopes
    pub scope: String,
    /// Token endpoint URL
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token endpoint success body
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Token endpoint error body (RFC 6749 section 5.2)
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// A block of cell values. The API omits `values` entirely for an empty range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Standard Google API error envelope
#[derive(Debug, Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleError,
}

/// The HTTP status already carries `code`, so only the message is kept
#[derive(Debug, Deserialize)]
pub struct GoogleError {
    pub message: String,
}

/// Render a cell as the string the sheet displays.
/// Formatted reads return strings; numbers and booleans appear when a cell is typed.
pub fn cell_to_string(cell: &serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_range_without_values() {
        let range: ValueRange =
            serde_json::from_value(json!({"range": "tembagapura!A1:B1000", "majorDimension": "ROWS"}))
                .unwrap();
        assert!(range.values.is_empty());
        assert_eq!(range.major_dimension.as_deref(), Some("ROWS"));
    }

    #[test]
    fn test_append_body_shape() {
        let body = ValueRange {
            values: vec![vec![json!("T1"), json!("t1")]],
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(body).unwrap(), json!({"values": [["T1", "t1"]]}));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&json!("A-7")), "A-7");
        assert_eq!(cell_to_string(&json!(42)), "42");
        assert_eq!(cell_to_string(&json!(true)), "true");
        assert_eq!(cell_to_string(&json!(null)), "");
    }

    #[test]
    fn test_google_error_envelope() {
        let body: GoogleErrorEnvelope = serde_json::from_value(json!({
            "error": {
                "code": 403,
                "message": "The caller does not have permission",
                "status": "PERMISSION_DENIED"
            }
        }))
        .unwrap();
        assert_eq!(body.error.message, "The caller does not have permission");
    }
}

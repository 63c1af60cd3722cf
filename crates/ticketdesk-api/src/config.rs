// Server configuration loaded from environment variables.
// Decision: A missing spreadsheet secret does not stop the server; ticket routes answer 500 instead
// Decision: CORS is off unless origins are listed (the form page is same-origin)

use axum::http::HeaderValue;
use ticketdesk_core::{ConfigError, SheetsConfig};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,
    /// Origins allowed to call the API from another site
    pub cors_origins: Vec<HeaderValue>,
    /// Spreadsheet credentials, or the variables that were missing
    pub sheets: Result<SheetsConfig, ConfigError>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        // Example: CORS_ALLOWED_ORIGINS="https://desk.example.com,https://staff.example.com"
        let cors_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        let sheets = SheetsConfig::from_lookup(&lookup);

        Self {
            bind_addr,
            cors_origins,
            sheets,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert!(config.cors_origins.is_empty());
        assert!(matches!(config.sheets, Err(ConfigError::Missing(ref vars)) if vars.len() == 3));
    }

    #[test]
    fn test_bind_addr_and_origins() {
        let config = ServerConfig::from_lookup(|key| match key {
            "BIND_ADDR" => Some("127.0.0.1:8080".to_string()),
            "CORS_ALLOWED_ORIGINS" => {
                Some("https://desk.example.com, ,https://staff.example.com".to_string())
            }
            _ => None,
        });
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(
            config.cors_origins,
            vec![
                HeaderValue::from_static("https://desk.example.com"),
                HeaderValue::from_static("https://staff.example.com"),
            ]
        );
    }

    #[test]
    fn test_sheets_config_is_loaded() {
        let config = ServerConfig::from_lookup(|key| match key {
            "GOOGLE_SERVICE_ACCOUNT_EMAIL" => Some("svc@example.com".to_string()),
            "GOOGLE_PRIVATE_KEY" => Some("key".to_string()),
            "GOOGLE_SHEET_ID" => Some("sheet".to_string()),
            _ => None,
        });
        assert_eq!(config.sheets.unwrap().spreadsheet_id, "sheet");
    }
}

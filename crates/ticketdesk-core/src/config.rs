// Spreadsheet configuration loaded from environment variables.
// Decision: Follow the GOOGLE_ prefix used by the deployed secrets
// Decision: Empty values count as missing

use std::fmt;

use thiserror::Error;

pub const SERVICE_ACCOUNT_EMAIL_VAR: &str = "GOOGLE_SERVICE_ACCOUNT_EMAIL";
pub const PRIVATE_KEY_VAR: &str = "GOOGLE_PRIVATE_KEY";
pub const SHEET_ID_VAR: &str = "GOOGLE_SHEET_ID";
pub const SHEETS_API_URL_VAR: &str = "GOOGLE_SHEETS_API_URL";
pub const TOKEN_URL_VAR: &str = "GOOGLE_TOKEN_URL";

pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Credentials and endpoints for the backing spreadsheet
#[derive(Clone)]
pub struct SheetsConfig {
    /// Service account that owns the credentials
    pub service_account_email: String,
    /// PEM-encoded RSA private key, newlines already normalized
    pub private_key: String,
    /// Spreadsheet identifier from the sheet URL
    pub spreadsheet_id: String,
    /// Base URL of the Sheets API (without /v4)
    pub sheets_api_url: String,
    /// OAuth token endpoint used for the JWT bearer exchange
    pub token_url: String,
}

impl SheetsConfig {
    pub fn new(
        service_account_email: impl Into<String>,
        private_key: impl Into<String>,
        spreadsheet_id: impl Into<String>,
    ) -> Self {
        Self {
            service_account_email: service_account_email.into(),
            private_key: normalize_private_key(&private_key.into()),
            spreadsheet_id: spreadsheet_id.into(),
            sheets_api_url: DEFAULT_SHEETS_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let email = required(SERVICE_ACCOUNT_EMAIL_VAR);
        let key = required(PRIVATE_KEY_VAR);
        let sheet_id = required(SHEET_ID_VAR);

        let (email, key, sheet_id) = match (email, key, sheet_id) {
            (Some(email), Some(key), Some(sheet_id)) => (email, key, sheet_id),
            (email, key, sheet_id) => {
                let missing = [
                    (SERVICE_ACCOUNT_EMAIL_VAR, email.is_none()),
                    (PRIVATE_KEY_VAR, key.is_none()),
                    (SHEET_ID_VAR, sheet_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                return Err(ConfigError::Missing(missing));
            }
        };

        let mut config = Self::new(email, key, sheet_id);
        if let Some(url) = required(SHEETS_API_URL_VAR) {
            config.sheets_api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = required(TOKEN_URL_VAR) {
            config.token_url = url;
        }

        Ok(config)
    }
}

impl fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("service_account_email", &self.service_account_email)
            .field("private_key", &"<redacted>")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheets_api_url", &self.sheets_api_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

/// Secrets stores often keep the PEM on one line with literal `\n` escapes.
pub fn normalize_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

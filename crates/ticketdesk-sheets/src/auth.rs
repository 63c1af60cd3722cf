// Service-account authentication for Google APIs
// Decision: RS256 assertion exchanged through the JWT bearer grant
// Decision: The private key is parsed per exchange so a malformed key surfaces as a request error

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::{header, Client};
use ticketdesk_core::{Result, SheetError, SheetsConfig};

use crate::types::{AssertionClaims, TokenErrorResponse, TokenResponse};

/// Read-only spreadsheet access
pub const SCOPE_READ_ONLY: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Read-write spreadsheet access
pub const SCOPE_READ_WRITE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// `urn:ietf:params:oauth:grant-type:jwt-bearer`, form-encoded
const JWT_BEARER_GRANT: &str = "urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer";

/// Assertion lifetime accepted by Google (maximum one hour)
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Bearer token returned by the token endpoint
#[derive(Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: Option<i64>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Exchanges service-account assertions for access tokens
#[derive(Clone)]
pub struct ServiceAccountAuth {
    client: Client,
    client_email: String,
    private_key: String,
    token_url: String,
}

impl ServiceAccountAuth {
    pub fn new(client: Client, config: &SheetsConfig) -> Self {
        Self {
            client,
            client_email: config.service_account_email.clone(),
            private_key: config.private_key.clone(),
            token_url: config.token_url.clone(),
        }
    }

    /// Sign the assertion for `scope`
    pub fn assertion(&self, scope: &str) -> Result<String> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| SheetError::auth(format!("Invalid private key: {}", e)))?;

        let now = Utc::now();
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: scope.to_string(),
            aud: self.token_url.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| SheetError::auth(format!("Failed to sign assertion: {}", e)))
    }

    /// Fetch a fresh access token for `scope`
    pub async fn access_token(&self, scope: &str) -> Result<AccessToken> {
        let assertion = self.assertion(scope)?;
        // Assertions are base64url segments joined by dots and need no escaping.
        let body = format!("grant_type={}&assertion={}", JWT_BEARER_GRANT, assertion);

        let response = self
            .client
            .post(&self.token_url)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| SheetError::transport(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorResponse>(&text) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                },
                Err(_) => format!("token endpoint returned {}", status),
            };
            return Err(SheetError::auth(message));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SheetError::decode(format!("Invalid token response: {}", e)))?;

        if let Some(token_type) = token.token_type.as_deref() {
            if !token_type.eq_ignore_ascii_case("bearer") {
                tracing::warn!(token_type, "Unexpected token type from token endpoint");
            }
        }

        Ok(AccessToken {
            token: token.access_token,
            expires_in: token.expires_in,
        })
    }
}

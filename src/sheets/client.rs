use super::Transport;
use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::sheets::auth::{AuthType, create_and_verify_authenticator};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

/// Scope for viewing and managing spreadsheet data, granted to the service account.
pub const AUTH_SCOPE: &str = "https://spreadsheets.google.com/feeds";

pub struct HttpTransport {
    client: Client,
    auth: AuthType,
    base_url: String,
}

impl HttpTransport {
    /// Create a new HttpTransport with authenticated access
    #[instrument(name = "Authenticating to Google Sheets", skip_all)]
    pub async fn new(config: &GoogleConfig) -> Result<Self> {
        let auth = create_and_verify_authenticator(config).await?;

        let client = reqwest::ClientBuilder::new()
            .build()
            .map_err(|e| AppError::Auth(format!("Failed to build reqwest client: {}", e)))?;

        Ok(Self {
            client,
            auth,
            base_url: config.base_url()?,
        })
    }

    /// Tokens are cached by the authenticator and refreshed when they expire.
    async fn access_token(&self) -> Result<String> {
        let token = self
            .auth
            .token(&[AUTH_SCOPE])
            .await
            .map_err(|e| AppError::Auth(format!("Failed to get token: {}", e)))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| AppError::Auth("Token response has no access token".to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        let access_token = self.access_token().await?;

        let response = self
            .client
            .get(&url)
            .bearer_auth(&access_token)
            .query(query)
            .send()
            .await?;
        debug!(status = %response.status(), path, "GET");

        Ok(response.bytes().await?.to_vec())
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        let access_token = self.access_token().await?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(&access_token)
            .json(body)
            .send()
            .await?;
        debug!(status = %response.status(), path, "POST");

        Ok(response.bytes().await?.to_vec())
    }
}

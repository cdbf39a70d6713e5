use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::sheets::client::AUTH_SCOPE;
use hyper_util::client::legacy::connect::HttpConnector;
use std::path::Path;
use tracing::debug;
use yup_oauth2::{
    ServiceAccountAuthenticator, authenticator::Authenticator, hyper_rustls::HttpsConnector,
};

pub(super) type AuthType = Authenticator<HttpsConnector<HttpConnector>>;

/// Create and verify authenticator by fetching a token
pub(super) async fn create_and_verify_authenticator(config: &GoogleConfig) -> Result<AuthType> {
    let auth = from_service_account(&config.secret_file()?).await?;

    // Fail on bad credentials now rather than on the first API call
    let _token = auth
        .token(&[AUTH_SCOPE])
        .await
        .map_err(|e| AppError::Auth(format!("Failed to get token: {}", e)))?;

    Ok(auth)
}

async fn from_service_account(secret_file: &Path) -> Result<AuthType> {
    debug!(path = ?secret_file, "Reading service account key");

    let key = yup_oauth2::read_service_account_key(secret_file)
        .await
        .map_err(|e| {
            AppError::Auth(format!(
                "Failed to read service account key {:?}: {}",
                secret_file, e
            ))
        })?;

    let auth = ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| AppError::Auth(format!("Failed to build authenticator: {}", e)))?;

    Ok(auth)
}

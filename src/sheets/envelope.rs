use crate::error::{AppError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;

// https://cloud.google.com/apis/design/errors#http_mapping
#[derive(Debug, Deserialize)]
struct Envelope {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Fail if the body is not JSON or carries an `error` object.
pub(crate) fn check_error(body: &[u8]) -> Result<()> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    match envelope.error {
        Some(err) => Err(AppError::Api {
            code: err.code,
            status: err.status,
            message: err.message,
        }),
        None => Ok(()),
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    check_error(body)?;
    Ok(serde_json::from_slice(body)?)
}

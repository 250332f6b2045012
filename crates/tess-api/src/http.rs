//! Shared HTTP response helpers.
//!
//! Centralizes the non-success → [`ApiError::Status`] check so endpoint
//! methods stay focused on request construction and response mapping.

use crate::error::ApiError;

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success; any non-success status becomes
/// [`ApiError::Status`] with the status code and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if !resp.status().is_success() {
        return Err(ApiError::Status {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

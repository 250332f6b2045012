//! File transfer requests.
//!
//! Two upload paths, two download paths, and the header ownership asymmetry
//! between them is contractual (see [`tess_core::transfer`]):
//!
//! - `direct` upload: one multipart POST/PUT to the ticket URL with
//!   client-built bearer + organization headers.
//! - `presigned` upload: one raw-body request to object storage carrying
//!   only the server-provided headers (the completion call is separate, in
//!   [`crate::ApiClient::complete_upload`]).
//! - `direct` download: one authenticated GET returning the bytes.
//! - `presigned` download: no client request at all; the caller navigates
//!   a browser to the URL.

use tess_core::UploadTicket;

use crate::ApiClient;
use crate::error::ApiError;
use crate::http::check_response;

/// Resolve the HTTP method named by a ticket, defaulting to POST.
fn ticket_method(method: &str) -> reqwest::Method {
    reqwest::Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
        .unwrap_or(reqwest::Method::POST)
}

impl ApiClient {
    /// Perform the `direct` upload branch: multipart form data with the file
    /// under the `file` field, bearer + organization headers built by the
    /// client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-success status.
    pub async fn upload_direct(
        &self,
        token: &str,
        organization_id: Option<&str>,
        ticket: &UploadTicket,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(ApiError::Http)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let req = self
            .http
            .request(ticket_method(&ticket.method), &ticket.url)
            .multipart(form);
        let req = req.header("Authorization", format!("Bearer {token}"));
        let req = match organization_id {
            Some(id) => req.header("X-Organization-ID", id),
            None => req,
        };

        check_response(req.send().await?).await?;
        Ok(())
    }

    /// Perform the transfer half of the `presigned` upload branch: raw body
    /// to the storage URL with exactly the server-provided headers. The
    /// caller must follow up with [`ApiClient::complete_upload`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-success status.
    pub async fn upload_presigned(
        &self,
        ticket: &UploadTicket,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let mut req = self
            .http
            .request(ticket_method(&ticket.method), &ticket.url);
        for (name, value) in &ticket.headers {
            req = req.header(name, value);
        }

        check_response(req.body(bytes).send().await?).await?;
        Ok(())
    }

    /// Perform the `direct` download branch: one authenticated GET of the
    /// ticket URL, returning the raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or a
    /// body read failure.
    pub async fn fetch_direct(
        &self,
        token: &str,
        organization_id: Option<&str>,
        url: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let req = self.http.get(url);
        let req = req.header("Authorization", format!("Bearer {token}"));
        let req = match organization_id {
            Some(id) => req.header("X-Organization-ID", id),
            None => req,
        };

        let resp = check_response(req.send().await?).await?;
        Ok(resp.bytes().await?.to_vec())
    }
}

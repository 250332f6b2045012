//! File-transfer tickets.
//!
//! The backend answers an upload/download request with a ticket that names
//! which of two transfer paths to take. The tag is modeled as an enum with
//! exactly the two wire cases so branch handling stays exhaustive.
//!
//! Header ownership differs by path and must stay that way: `direct`
//! transfers use client-built bearer + organization headers, `presigned`
//! transfers use only the server-provided header map.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How an upload is to be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UploadType {
    /// Multipart form POST through the backend, client-built auth headers.
    Direct,
    /// Raw body to object storage with server-provided headers, then a
    /// separate completion call.
    Presigned,
}

/// How a download is to be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DownloadType {
    /// Authenticated fetch of the bytes through the backend.
    Direct,
    /// Time-limited URL opened directly; no client fetch.
    Presigned,
}

/// Response from `POST /api/v1/files/upload-url`. Lives for one upload
/// attempt and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    pub file_id: String,
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub upload_type: UploadType,
}

/// Response from `GET /api/v1/files/{id}/download-url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadTicket {
    pub url: String,
    pub download_type: DownloadType,
}

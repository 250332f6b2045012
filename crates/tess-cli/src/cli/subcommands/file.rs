use std::path::PathBuf;

use clap::{Args, Subcommand};

/// File transfer commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FileCommands {
    /// Upload a file to the active organization.
    Upload(FileUploadArgs),
    /// Download a file (defaults to the most recent upload).
    Download(FileDownloadArgs),
}

#[derive(Clone, Debug, Args)]
pub struct FileUploadArgs {
    /// Path of the file to upload.
    pub path: PathBuf,
    /// MIME type sent with the upload.
    #[arg(long, default_value = "application/octet-stream")]
    pub content_type: String,
}

#[derive(Clone, Debug, Args)]
pub struct FileDownloadArgs {
    /// File id. Omit to download the most recent upload of this session.
    pub file_id: Option<String>,
    /// Destination path for direct downloads.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

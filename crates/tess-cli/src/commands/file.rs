use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tess_sync::DownloadOutcome;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{FileCommands, FileDownloadArgs, FileUploadArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct FileUploadResponse {
    file_id: String,
    size_bytes: u64,
}

#[derive(Serialize)]
struct FileDownloadResponse {
    opened_url: Option<String>,
    saved_to: Option<String>,
    size_bytes: Option<u64>,
}

/// Handle `tsr file <subcommand>`.
pub async fn handle(
    action: &FileCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_ready()?;
    match action {
        FileCommands::Upload(args) => upload(args, ctx, flags).await,
        FileCommands::Download(args) => download(args, ctx, flags).await,
    }
}

async fn upload(args: &FileUploadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filename = args
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .context("upload path has no usable filename")?
        .to_string();
    let bytes = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("failed to read '{}'", args.path.display()))?;
    let size_bytes = bytes.len() as u64;

    let file_id = ctx
        .loader
        .upload_file(&ctx.session, &filename, &args.content_type, bytes)
        .await?;
    output(&FileUploadResponse { file_id, size_bytes }, flags.format)
}

async fn download(
    args: &FileDownloadArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let outcome = match &args.file_id {
        Some(file_id) => ctx.loader.download(&ctx.session, file_id).await?,
        None => ctx.loader.download_last(&ctx.session).await?,
    };

    let response = match outcome {
        DownloadOutcome::OpenBrowser(url) => {
            open::that(&url).with_context(|| format!("failed to open '{url}'"))?;
            FileDownloadResponse {
                opened_url: Some(url),
                saved_to: None,
                size_bytes: None,
            }
        }
        DownloadOutcome::Bytes(bytes) => {
            let destination = destination_path(args, ctx);
            if let Some(parent) = destination.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.with_context(|| {
                        format!("failed to create '{}'", parent.display())
                    })?;
                }
            }
            tokio::fs::write(&destination, &bytes)
                .await
                .with_context(|| format!("failed to write '{}'", destination.display()))?;
            FileDownloadResponse {
                opened_url: None,
                saved_to: Some(destination.display().to_string()),
                size_bytes: Some(bytes.len() as u64),
            }
        }
    };

    output(&response, flags.format)
}

fn destination_path(args: &FileDownloadArgs, ctx: &AppContext) -> PathBuf {
    if let Some(out) = &args.out {
        return out.clone();
    }
    let general = &ctx.config.general;
    Path::new(&general.download_dir).join(&general.download_name)
}

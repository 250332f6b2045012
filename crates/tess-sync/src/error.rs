//! Dispatcher error types.
//!
//! Precondition failures are distinct variants so the UI can disable the
//! right control; remote failures collapse to [`DispatchError::Failed`] with
//! the operation name only; no structured backend detail crosses this
//! boundary.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("organization name must not be empty")]
    EmptyName,

    #[error("invite email must not be empty")]
    EmptyEmail,

    #[error("no active organization")]
    NoActiveOrganization,

    #[error("admin or owner role required")]
    InsufficientRole,

    #[error("invite token missing")]
    MissingInviteToken,

    #[error("no uploaded file to download")]
    NothingToDownload,

    #[error("could not complete {operation}")]
    Failed { operation: &'static str },
}

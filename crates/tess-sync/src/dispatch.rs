//! User-triggered action dispatchers.
//!
//! Every dispatcher follows the same shape: acquire the token, validate
//! preconditions, call the remote operation, and only on success commit
//! local state (optionally refetching a dependent loader slice). On failure
//! the transient in-progress flag is reset and nothing else changes; no
//! partial application of side effects. One attempt per call; no retry.

use tess_auth::Session;
use tess_core::{DownloadType, OrgRole, OrgSummary, UploadType};

use crate::active_org::OrgStorage;
use crate::backend::WorkspaceBackend;
use crate::error::DispatchError;
use crate::loader::WorkspaceLoader;
use crate::lock;

/// What the caller should do with a finished download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Presigned path: navigate a browser to the URL. The client performs no
    /// fetch of its own.
    OpenBrowser(String),
    /// Direct path: the authenticated fetch already happened; here are the
    /// bytes.
    Bytes(Vec<u8>),
}

impl<B: WorkspaceBackend, S: OrgStorage> WorkspaceLoader<B, S> {
    /// Create an organization and make it active.
    ///
    /// # Errors
    ///
    /// `EmptyName` before any network call; `NotAuthenticated` without a
    /// token; `Failed` if the backend declines.
    pub async fn create_organization(
        &self,
        session: &Session,
        name: &str,
    ) -> Result<OrgSummary, DispatchError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DispatchError::EmptyName);
        }
        let Some(token) = session.bearer() else {
            return Err(DispatchError::NotAuthenticated);
        };

        let Some(organization) = self.backend.create_organization(token, name).await else {
            return Err(DispatchError::Failed {
                operation: "create organization",
            });
        };

        self.switch_organization(&organization.id);
        self.load_organizations(session).await;
        Ok(organization)
    }

    /// Create an invite and surface its accept URL.
    ///
    /// The role gate runs client-side before any request is attempted; the
    /// server enforces the same rule independently.
    ///
    /// # Errors
    ///
    /// Precondition variants before any network call; `Failed` if the
    /// backend declines.
    pub async fn create_invite(
        &self,
        session: &Session,
        email: &str,
        role: OrgRole,
    ) -> Result<String, DispatchError> {
        let Some(organization_id) = self.store.get() else {
            return Err(DispatchError::NoActiveOrganization);
        };
        let email = email.trim();
        if email.is_empty() {
            return Err(DispatchError::EmptyEmail);
        }
        if !lock(&self.state).can_manage_members() {
            return Err(DispatchError::InsufficientRole);
        }
        let Some(token) = session.bearer() else {
            return Err(DispatchError::NotAuthenticated);
        };

        let Some(created) = self
            .backend
            .create_invite(token, &organization_id, email, role.as_str())
            .await
        else {
            return Err(DispatchError::Failed {
                operation: "create invite",
            });
        };

        lock(&self.state).last_invite_url = Some(created.accept_url.clone());
        Ok(created.accept_url)
    }

    /// Redeem an invite token and adopt the joined organization as active.
    ///
    /// # Errors
    ///
    /// `MissingInviteToken` / `NotAuthenticated` before any network call;
    /// `Failed` if the invite is invalid, used, or for a different email.
    pub async fn accept_invite(
        &self,
        session: &Session,
        invite_token: &str,
    ) -> Result<OrgSummary, DispatchError> {
        let invite_token = invite_token.trim();
        if invite_token.is_empty() {
            return Err(DispatchError::MissingInviteToken);
        }
        let Some(token) = session.bearer() else {
            return Err(DispatchError::NotAuthenticated);
        };

        let Some(accepted) = self.backend.accept_invite(token, invite_token).await else {
            return Err(DispatchError::Failed {
                operation: "accept invite",
            });
        };

        self.switch_organization(&accepted.organization.id);
        Ok(accepted.organization)
    }

    /// Upload a file, branching on the ticket's upload type.
    ///
    /// `direct`: exactly one multipart request with client-built bearer +
    /// organization headers. `presigned`: a raw-body transfer with
    /// server-provided headers, then a completion call carrying the observed
    /// byte size. Success records the file id and refetches audit events.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a token; `Failed` on any remote failure,
    /// in which case no last-uploaded reference is set.
    pub async fn upload_file(
        &self,
        session: &Session,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DispatchError> {
        {
            let mut state = lock(&self.state);
            state.uploading = true;
            state.last_uploaded_file_id = None;
        }

        let Some(token) = session.bearer() else {
            lock(&self.state).uploading = false;
            return Err(DispatchError::NotAuthenticated);
        };
        let organization_id = self.store.get();

        let Some(ticket) = self
            .backend
            .create_upload_url(token, organization_id.as_deref(), filename, content_type)
            .await
        else {
            lock(&self.state).uploading = false;
            return Err(DispatchError::Failed {
                operation: "create upload url",
            });
        };

        let size_bytes = bytes.len() as u64;
        let ok = match ticket.upload_type {
            UploadType::Direct => {
                self.backend
                    .upload_direct(
                        token,
                        organization_id.as_deref(),
                        &ticket,
                        filename,
                        content_type,
                        bytes,
                    )
                    .await
            }
            UploadType::Presigned => {
                self.backend.upload_presigned(&ticket, bytes).await
                    && self
                        .backend
                        .complete_upload(
                            token,
                            organization_id.as_deref(),
                            &ticket.file_id,
                            size_bytes,
                        )
                        .await
            }
        };

        lock(&self.state).uploading = false;
        if !ok {
            return Err(DispatchError::Failed {
                operation: "upload",
            });
        }

        lock(&self.state).last_uploaded_file_id = Some(ticket.file_id.clone());
        self.load_audit_events(session).await;
        Ok(ticket.file_id)
    }

    /// Fetch a download ticket and branch on its type.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a token; `Failed` if no ticket or (direct
    /// path) the byte fetch fails.
    pub async fn download(
        &self,
        session: &Session,
        file_id: &str,
    ) -> Result<DownloadOutcome, DispatchError> {
        let Some(token) = session.bearer() else {
            return Err(DispatchError::NotAuthenticated);
        };
        let organization_id = self.store.get();

        let Some(ticket) = self
            .backend
            .download_url(token, organization_id.as_deref(), file_id)
            .await
        else {
            return Err(DispatchError::Failed {
                operation: "get download url",
            });
        };

        match ticket.download_type {
            DownloadType::Presigned => Ok(DownloadOutcome::OpenBrowser(ticket.url)),
            DownloadType::Direct => {
                let Some(bytes) = self
                    .backend
                    .fetch_direct(token, organization_id.as_deref(), &ticket.url)
                    .await
                else {
                    return Err(DispatchError::Failed {
                        operation: "download",
                    });
                };
                Ok(DownloadOutcome::Bytes(bytes))
            }
        }
    }

    /// Download the most recently uploaded file.
    ///
    /// # Errors
    ///
    /// `NothingToDownload` when no upload has completed this session;
    /// otherwise as [`Self::download`].
    pub async fn download_last(&self, session: &Session) -> Result<DownloadOutcome, DispatchError> {
        let Some(file_id) = lock(&self.state).last_uploaded_file_id.clone() else {
            return Err(DispatchError::NothingToDownload);
        };
        self.download(session, &file_id).await
    }

    /// Start a checkout session for a plan. Returns the hosted checkout URL
    /// for the caller to navigate to.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a token; `Failed` if the backend declines.
    pub async fn start_checkout(
        &self,
        session: &Session,
        plan_code: &str,
    ) -> Result<String, DispatchError> {
        let Some(token) = session.bearer() else {
            return Err(DispatchError::NotAuthenticated);
        };
        let organization_id = self.store.get();

        self.backend
            .checkout_session(token, organization_id.as_deref(), plan_code)
            .await
            .ok_or(DispatchError::Failed {
                operation: "checkout session",
            })
    }

    /// Open a billing portal session. Returns the hosted portal URL for the
    /// caller to navigate to.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a token (portal flag reset); `Failed` if
    /// the backend declines (portal flag reset, no navigation).
    pub async fn open_billing_portal(&self, session: &Session) -> Result<String, DispatchError> {
        lock(&self.state).portal_opening = true;

        let Some(token) = session.bearer() else {
            lock(&self.state).portal_opening = false;
            return Err(DispatchError::NotAuthenticated);
        };
        let organization_id = self.store.get();

        let url = self
            .backend
            .portal_session(token, organization_id.as_deref())
            .await;

        lock(&self.state).portal_opening = false;
        url.ok_or(DispatchError::Failed {
            operation: "billing portal session",
        })
    }
}

//! End-to-end loader and dispatcher behavior against a scripted backend.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use pretty_assertions::assert_eq;
use tess_api::types::{AcceptedInvite, InviteCreated, InviteRecord};
use tess_auth::Session;
use tess_core::{
    AuditEvent, DownloadTicket, DownloadType, Member, OrgRole, OrgSummary, UploadTicket,
    UploadType, UserProfile, Viewer,
};
use tess_sync::{
    ActiveOrgStore, DispatchError, DownloadOutcome, LoadState, MemoryOrgStorage, WorkspaceBackend,
    WorkspaceLoader,
};

fn org(id: &str, role: OrgRole) -> OrgSummary {
    OrgSummary {
        id: id.to_string(),
        name: id.to_uppercase(),
        slug: id.to_string(),
        kind: "team".into(),
        role,
    }
}

fn viewer_in(org_id: &str, role: OrgRole) -> Viewer {
    Viewer {
        user: UserProfile {
            id: "user_1".into(),
            primary_email: "me@example.com".into(),
        },
        organization: org(org_id, role),
    }
}

fn member(user_id: &str) -> Member {
    Member {
        user_id: user_id.to_string(),
        primary_email: format!("{user_id}@example.com"),
        role: OrgRole::Member,
        joined_at: Utc::now(),
    }
}

fn event(id: &str) -> AuditEvent {
    AuditEvent {
        id: id.to_string(),
        organization_id: "org_1".into(),
        user_id: "user_1".into(),
        action: "file_uploaded".into(),
        data: serde_json::Value::Null,
        created_at: Utc::now(),
    }
}

fn ready_session() -> Session {
    Session {
        provider_configured: true,
        token: Some("tok_test".into()),
        user_id: Some("user_1".into()),
    }
}

/// One scripted response for a members fetch. An attached gate makes the
/// call wait until released, which lets tests order overlapping fetches
/// deterministically.
struct MembersResponse {
    gate: Option<tokio::sync::oneshot::Receiver<()>>,
    body: Option<Vec<Member>>,
}

#[derive(Default)]
struct Counts {
    viewer: AtomicUsize,
    organizations: AtomicUsize,
    members: AtomicUsize,
    audit: AtomicUsize,
    invites: AtomicUsize,
    upload_urls: AtomicUsize,
    direct_uploads: AtomicUsize,
    presigned_uploads: AtomicUsize,
    completes: AtomicUsize,
    direct_fetches: AtomicUsize,
}

/// Scripted in-memory stand-in for the API client.
#[derive(Default)]
struct FakeBackend {
    counts: Counts,
    viewer: Mutex<Option<Viewer>>,
    organizations: Mutex<Option<Vec<OrgSummary>>>,
    members_script: Mutex<VecDeque<MembersResponse>>,
    members_orgs: Mutex<Vec<String>>,
    audit: Mutex<Option<Vec<AuditEvent>>>,
    invite: Mutex<Option<InviteCreated>>,
    accepted: Mutex<Option<AcceptedInvite>>,
    created_org: Mutex<Option<OrgSummary>>,
    upload_ticket: Mutex<Option<UploadTicket>>,
    download_ticket: Mutex<Option<DownloadTicket>>,
    transfer_ok: Mutex<bool>,
}

impl FakeBackend {
    fn new() -> Self {
        Self {
            transfer_ok: Mutex::new(true),
            ..Self::default()
        }
    }

    fn script_members(&self, body: Option<Vec<Member>>) {
        self.members_script
            .lock()
            .unwrap()
            .push_back(MembersResponse { gate: None, body });
    }

    fn script_gated_members(&self, body: Option<Vec<Member>>) -> tokio::sync::oneshot::Sender<()> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.members_script
            .lock()
            .unwrap()
            .push_back(MembersResponse {
                gate: Some(rx),
                body,
            });
        tx
    }
}

impl WorkspaceBackend for FakeBackend {
    async fn viewer(&self, _token: &str, _organization_id: Option<&str>) -> Option<Viewer> {
        self.counts.viewer.fetch_add(1, Ordering::SeqCst);
        self.viewer.lock().unwrap().clone()
    }

    async fn organizations(&self, _token: &str) -> Option<Vec<OrgSummary>> {
        self.counts.organizations.fetch_add(1, Ordering::SeqCst);
        self.organizations.lock().unwrap().clone()
    }

    async fn members(&self, _token: &str, organization_id: &str) -> Option<Vec<Member>> {
        self.counts.members.fetch_add(1, Ordering::SeqCst);
        self.members_orgs
            .lock()
            .unwrap()
            .push(organization_id.to_string());
        let scripted = self.members_script.lock().unwrap().pop_front();
        match scripted {
            Some(MembersResponse { gate, body }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                body
            }
            None => Some(Vec::new()),
        }
    }

    async fn audit_events(
        &self,
        _token: &str,
        _organization_id: Option<&str>,
    ) -> Option<Vec<AuditEvent>> {
        self.counts.audit.fetch_add(1, Ordering::SeqCst);
        self.audit.lock().unwrap().clone()
    }

    async fn create_organization(&self, _token: &str, _name: &str) -> Option<OrgSummary> {
        self.created_org.lock().unwrap().clone()
    }

    async fn create_invite(
        &self,
        _token: &str,
        _organization_id: &str,
        _email: &str,
        _role: &str,
    ) -> Option<InviteCreated> {
        self.counts.invites.fetch_add(1, Ordering::SeqCst);
        self.invite.lock().unwrap().clone()
    }

    async fn accept_invite(&self, _token: &str, _invite_token: &str) -> Option<AcceptedInvite> {
        self.accepted.lock().unwrap().clone()
    }

    async fn create_upload_url(
        &self,
        _token: &str,
        _organization_id: Option<&str>,
        _filename: &str,
        _content_type: &str,
    ) -> Option<UploadTicket> {
        self.counts.upload_urls.fetch_add(1, Ordering::SeqCst);
        self.upload_ticket.lock().unwrap().clone()
    }

    async fn upload_direct(
        &self,
        _token: &str,
        _organization_id: Option<&str>,
        _ticket: &UploadTicket,
        _filename: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> bool {
        self.counts.direct_uploads.fetch_add(1, Ordering::SeqCst);
        *self.transfer_ok.lock().unwrap()
    }

    async fn upload_presigned(&self, _ticket: &UploadTicket, _bytes: Vec<u8>) -> bool {
        self.counts.presigned_uploads.fetch_add(1, Ordering::SeqCst);
        *self.transfer_ok.lock().unwrap()
    }

    async fn complete_upload(
        &self,
        _token: &str,
        _organization_id: Option<&str>,
        _file_id: &str,
        _size_bytes: u64,
    ) -> bool {
        self.counts.completes.fetch_add(1, Ordering::SeqCst);
        *self.transfer_ok.lock().unwrap()
    }

    async fn download_url(
        &self,
        _token: &str,
        _organization_id: Option<&str>,
        _file_id: &str,
    ) -> Option<DownloadTicket> {
        self.download_ticket.lock().unwrap().clone()
    }

    async fn fetch_direct(
        &self,
        _token: &str,
        _organization_id: Option<&str>,
        _url: &str,
    ) -> Option<Vec<u8>> {
        self.counts.direct_fetches.fetch_add(1, Ordering::SeqCst);
        Some(b"downloaded bytes".to_vec())
    }

    async fn checkout_session(
        &self,
        _token: &str,
        _organization_id: Option<&str>,
        _plan_code: &str,
    ) -> Option<String> {
        Some("https://billing.example.com/checkout/cs_1".into())
    }

    async fn portal_session(
        &self,
        _token: &str,
        _organization_id: Option<&str>,
    ) -> Option<String> {
        Some("https://billing.example.com/portal/ps_1".into())
    }
}

fn loader_with(
    backend: FakeBackend,
    active: Option<&str>,
) -> WorkspaceLoader<FakeBackend, MemoryOrgStorage> {
    let storage = active.map_or_else(MemoryOrgStorage::default, MemoryOrgStorage::with_value);
    WorkspaceLoader::new(backend, ActiveOrgStore::load(storage))
}

#[tokio::test]
async fn unconfigured_provider_fetches_nothing() {
    let loader = loader_with(FakeBackend::new(), None);
    let session = Session::default();

    loader.refresh(&session).await;

    let state = loader.snapshot();
    assert_eq!(state.viewer_state, LoadState::Idle);
    assert_eq!(loader.backend().counts.viewer.load(Ordering::SeqCst), 0);
    assert_eq!(
        loader.backend().counts.organizations.load(Ordering::SeqCst),
        0
    );
}

#[tokio::test]
async fn overlapping_members_fetches_commit_only_the_latest() {
    let backend = FakeBackend::new();
    // The first fetch stalls on a gate and answers with the stale list; the
    // second answers immediately with the fresh one.
    let release_first = backend.script_gated_members(Some(vec![member("stale_user")]));
    backend.script_members(Some(vec![member("fresh_user")]));

    let loader = loader_with(backend, Some("org_1"));
    let session = ready_session();

    let first = loader.load_members(&session);
    let second = async {
        loader.load_members(&session).await;
        // Fresh result committed; now let the stale fetch come back.
        let _ = release_first.send(());
    };
    tokio::join!(first, second);

    let state = loader.snapshot();
    assert_eq!(loader.backend().counts.members.load(Ordering::SeqCst), 2);
    assert_eq!(state.members.len(), 1);
    assert_eq!(state.members[0].user_id, "fresh_user");
    assert_eq!(state.members_state, LoadState::Idle);
}

#[tokio::test]
async fn members_failure_clears_the_list() {
    let backend = FakeBackend::new();
    backend.script_members(Some(vec![member("user_2")]));
    backend.script_members(None);

    let loader = loader_with(backend, Some("org_1"));
    let session = ready_session();

    loader.load_members(&session).await;
    assert_eq!(loader.snapshot().members.len(), 1);

    loader.load_members(&session).await;
    let state = loader.snapshot();
    assert!(state.members.is_empty());
    assert_eq!(state.members_state, LoadState::Error);
}

#[tokio::test]
async fn members_without_active_organization_clears_without_fetching() {
    let backend = FakeBackend::new();
    let loader = loader_with(backend, None);

    loader.load_members(&ready_session()).await;

    assert_eq!(loader.backend().counts.members.load(Ordering::SeqCst), 0);
    assert_eq!(loader.snapshot().members_state, LoadState::Idle);
}

#[tokio::test]
async fn audit_failure_keeps_the_previous_events() {
    let backend = FakeBackend::new();
    *backend.audit.lock().unwrap() = Some(vec![event("evt_1"), event("evt_2")]);

    let loader = loader_with(backend, Some("org_1"));
    let session = ready_session();

    loader.load_audit_events(&session).await;
    assert_eq!(loader.snapshot().audit_events.len(), 2);

    *loader.backend().audit.lock().unwrap() = None;
    loader.load_audit_events(&session).await;
    assert_eq!(loader.snapshot().audit_events.len(), 2);
}

#[tokio::test]
async fn viewer_adopts_the_server_reported_organization() {
    let backend = FakeBackend::new();
    *backend.viewer.lock().unwrap() = Some(viewer_in("org_1", OrgRole::Admin));
    *backend.invite.lock().unwrap() = Some(InviteCreated {
        invite: InviteRecord {
            id: "inv_1".into(),
            organization_id: "org_1".into(),
            email: "x@example.com".into(),
            role: OrgRole::Member,
            token: "sekrit".into(),
            created_at: Utc::now(),
        },
        accept_url: "https://app.example.com/app/invite?token=sekrit".into(),
    });

    let loader = loader_with(backend, Some("org_1"));
    let session = ready_session();

    loader.load_viewer(&session).await;
    loader
        .create_invite(&session, "x@example.com", OrgRole::Member)
        .await
        .unwrap();
    assert!(loader.snapshot().last_invite_url.is_some());

    // The server now reports a different organization for this token.
    *loader.backend().viewer.lock().unwrap() = Some(viewer_in("org_5", OrgRole::Owner));
    loader.load_viewer(&session).await;

    let state = loader.snapshot();
    assert_eq!(loader.active_org().as_deref(), Some("org_5"));
    assert!(state.last_invite_url.is_none(), "invite link is cleared on switch");
    assert_eq!(state.viewer_state, LoadState::Idle);
}

#[tokio::test]
async fn refresh_reconciles_before_fetching_dependent_slices() {
    let backend = FakeBackend::new();
    *backend.organizations.lock().unwrap() = Some(vec![
        org("org_2", OrgRole::Admin),
        org("org_3", OrgRole::Member),
    ]);
    *backend.viewer.lock().unwrap() = Some(viewer_in("org_2", OrgRole::Admin));
    backend.script_members(Some(vec![member("user_2")]));
    *backend.audit.lock().unwrap() = Some(vec![event("evt_1")]);

    // Persisted reference points at an organization the server no longer
    // lists.
    let loader = loader_with(backend, Some("org_1"));
    loader.refresh(&ready_session()).await;

    let state = loader.snapshot();
    assert_eq!(loader.active_org().as_deref(), Some("org_2"));
    assert_eq!(state.organizations.len(), 2);
    assert_eq!(
        loader.backend().members_orgs.lock().unwrap().as_slice(),
        ["org_2"]
    );
    assert_eq!(state.members.len(), 1);
    assert_eq!(state.audit_events.len(), 1);
}

#[tokio::test]
async fn organizations_failure_keeps_the_previous_list() {
    let backend = FakeBackend::new();
    *backend.organizations.lock().unwrap() = Some(vec![org("org_1", OrgRole::Member)]);

    let loader = loader_with(backend, Some("org_1"));
    let session = ready_session();

    loader.load_organizations(&session).await;
    assert_eq!(loader.snapshot().organizations.len(), 1);

    *loader.backend().organizations.lock().unwrap() = None;
    loader.load_organizations(&session).await;
    assert_eq!(loader.snapshot().organizations.len(), 1);
    assert_eq!(loader.active_org().as_deref(), Some("org_1"));
}

#[tokio::test]
async fn invite_requires_admin_or_owner_before_any_request() {
    let backend = FakeBackend::new();
    *backend.viewer.lock().unwrap() = Some(viewer_in("org_1", OrgRole::Member));

    let loader = loader_with(backend, Some("org_1"));
    let session = ready_session();
    loader.load_viewer(&session).await;

    let result = loader
        .create_invite(&session, "new@example.com", OrgRole::Member)
        .await;

    assert_eq!(result, Err(DispatchError::InsufficientRole));
    assert_eq!(loader.backend().counts.invites.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invite_surfaces_the_accept_url() {
    let backend = FakeBackend::new();
    *backend.viewer.lock().unwrap() = Some(viewer_in("org_1", OrgRole::Admin));
    *backend.invite.lock().unwrap() = Some(InviteCreated {
        invite: InviteRecord {
            id: "inv_1".into(),
            organization_id: "org_1".into(),
            email: "new@example.com".into(),
            role: OrgRole::Member,
            token: "sekrit".into(),
            created_at: Utc::now(),
        },
        accept_url: "https://app.example.com/app/invite?token=sekrit".into(),
    });

    let loader = loader_with(backend, Some("org_1"));
    let session = ready_session();
    loader.load_viewer(&session).await;

    let url = loader
        .create_invite(&session, "new@example.com", OrgRole::Member)
        .await
        .unwrap();

    assert!(url.ends_with("token=sekrit"));
    assert_eq!(loader.snapshot().last_invite_url.as_deref(), Some(url.as_str()));
}

#[tokio::test]
async fn accept_invite_switches_to_the_joined_organization() {
    let backend = FakeBackend::new();
    *backend.accepted.lock().unwrap() = Some(AcceptedInvite {
        organization: org("org_7", OrgRole::Member),
        accepted_at: Some("2026-03-01T12:05:00Z".into()),
    });

    let loader = loader_with(backend, Some("org_1"));
    let joined = loader
        .accept_invite(&ready_session(), "sekrit")
        .await
        .unwrap();

    assert_eq!(joined.id, "org_7");
    assert_eq!(loader.active_org().as_deref(), Some("org_7"));
}

#[tokio::test]
async fn create_organization_becomes_active() {
    let backend = FakeBackend::new();
    *backend.created_org.lock().unwrap() = Some(org("org_new", OrgRole::Owner));
    *backend.organizations.lock().unwrap() = Some(vec![
        org("org_1", OrgRole::Member),
        org("org_new", OrgRole::Owner),
    ]);

    let loader = loader_with(backend, Some("org_1"));
    let created = loader
        .create_organization(&ready_session(), "  New Org  ")
        .await
        .unwrap();

    assert_eq!(created.id, "org_new");
    assert_eq!(loader.active_org().as_deref(), Some("org_new"));
    assert_eq!(loader.snapshot().organizations.len(), 2);
}

#[tokio::test]
async fn create_organization_rejects_blank_names_locally() {
    let loader = loader_with(FakeBackend::new(), None);
    let result = loader.create_organization(&ready_session(), "   ").await;
    assert_eq!(result, Err(DispatchError::EmptyName));
}

#[tokio::test]
async fn direct_upload_sends_exactly_one_transfer_request() {
    let backend = FakeBackend::new();
    *backend.upload_ticket.lock().unwrap() = Some(UploadTicket {
        file_id: "file_1".into(),
        method: "POST".into(),
        url: "http://localhost:8080/api/v1/files/file_1/upload".into(),
        headers: std::collections::HashMap::new(),
        upload_type: UploadType::Direct,
    });

    let loader = loader_with(backend, Some("org_1"));
    let file_id = loader
        .upload_file(&ready_session(), "a.txt", "text/plain", b"hello".to_vec())
        .await
        .unwrap();

    assert_eq!(file_id, "file_1");
    let counts = &loader.backend().counts;
    assert_eq!(counts.direct_uploads.load(Ordering::SeqCst), 1);
    assert_eq!(counts.presigned_uploads.load(Ordering::SeqCst), 0);
    assert_eq!(counts.completes.load(Ordering::SeqCst), 0);
    assert_eq!(counts.audit.load(Ordering::SeqCst), 1);

    let state = loader.snapshot();
    assert_eq!(state.last_uploaded_file_id.as_deref(), Some("file_1"));
    assert!(!state.uploading);
}

#[tokio::test]
async fn presigned_upload_transfers_then_completes() {
    let backend = FakeBackend::new();
    *backend.upload_ticket.lock().unwrap() = Some(UploadTicket {
        file_id: "file_2".into(),
        method: "PUT".into(),
        url: "https://bucket.example.com/file_2?sig=abc".into(),
        headers: std::collections::HashMap::from([(
            "Content-Type".to_string(),
            "text/plain".to_string(),
        )]),
        upload_type: UploadType::Presigned,
    });

    let loader = loader_with(backend, Some("org_1"));
    loader
        .upload_file(&ready_session(), "b.txt", "text/plain", b"hello".to_vec())
        .await
        .unwrap();

    let counts = &loader.backend().counts;
    assert_eq!(counts.presigned_uploads.load(Ordering::SeqCst), 1);
    assert_eq!(counts.completes.load(Ordering::SeqCst), 1);
    assert_eq!(counts.direct_uploads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_upload_records_no_file_reference() {
    let backend = FakeBackend::new();
    *backend.upload_ticket.lock().unwrap() = Some(UploadTicket {
        file_id: "file_3".into(),
        method: "POST".into(),
        url: "http://localhost:8080/api/v1/files/file_3/upload".into(),
        headers: std::collections::HashMap::new(),
        upload_type: UploadType::Direct,
    });
    *backend.transfer_ok.lock().unwrap() = false;

    let loader = loader_with(backend, Some("org_1"));
    let result = loader
        .upload_file(&ready_session(), "c.txt", "text/plain", b"hello".to_vec())
        .await;

    assert_eq!(result, Err(DispatchError::Failed { operation: "upload" }));
    let state = loader.snapshot();
    assert!(state.last_uploaded_file_id.is_none());
    assert!(!state.uploading);
    assert_eq!(loader.backend().counts.audit.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn presigned_download_opens_the_url_without_fetching() {
    let backend = FakeBackend::new();
    *backend.download_ticket.lock().unwrap() = Some(DownloadTicket {
        url: "https://bucket.example.com/file_1?sig=abc".into(),
        download_type: DownloadType::Presigned,
    });

    let loader = loader_with(backend, Some("org_1"));
    let outcome = loader.download(&ready_session(), "file_1").await.unwrap();

    assert_eq!(
        outcome,
        DownloadOutcome::OpenBrowser("https://bucket.example.com/file_1?sig=abc".into())
    );
    assert_eq!(
        loader.backend().counts.direct_fetches.load(Ordering::SeqCst),
        0
    );
}

#[tokio::test]
async fn direct_download_fetches_the_bytes() {
    let backend = FakeBackend::new();
    *backend.download_ticket.lock().unwrap() = Some(DownloadTicket {
        url: "http://localhost:8080/api/v1/files/file_1/download".into(),
        download_type: DownloadType::Direct,
    });

    let loader = loader_with(backend, Some("org_1"));
    let outcome = loader.download(&ready_session(), "file_1").await.unwrap();

    assert_eq!(outcome, DownloadOutcome::Bytes(b"downloaded bytes".to_vec()));
    assert_eq!(
        loader.backend().counts.direct_fetches.load(Ordering::SeqCst),
        1
    );
}

#[tokio::test]
async fn download_last_requires_a_prior_upload() {
    let loader = loader_with(FakeBackend::new(), Some("org_1"));
    let result = loader.download_last(&ready_session()).await;
    assert_eq!(result, Err(DispatchError::NothingToDownload));
}

#[tokio::test]
async fn billing_urls_come_back_for_navigation() {
    let loader = loader_with(FakeBackend::new(), Some("org_1"));
    let session = ready_session();

    let checkout = loader.start_checkout(&session, "pro").await.unwrap();
    assert!(checkout.contains("/checkout/"));

    let portal = loader.open_billing_portal(&session).await.unwrap();
    assert!(portal.contains("/portal/"));
    assert!(!loader.snapshot().portal_opening);
}

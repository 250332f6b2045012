//! The workspace data loader.
//!
//! Four independent, cancellable fetch effects (viewer, organizations,
//! members, audit events), all keyed on the same dependency set: token
//! readiness and the active-organization reference. Each invocation captures
//! a [`crate::cancel::CancelFlag`]; a newer invocation of the same effect
//! stales the older one, whose result is then discarded on arrival. Only the
//! most recently started invocation ever commits.

use tess_auth::Session;

use crate::active_org::{ActiveOrgStore, OrgStorage};
use crate::backend::WorkspaceBackend;
use crate::cancel::EffectSlot;
use crate::lock;
use crate::state::{LoadState, WorkspaceState};

/// Owns the workspace state, the active-organization store, and the backend
/// seam. Loader effects live here; dispatchers are in [`crate::dispatch`].
#[derive(Debug)]
pub struct WorkspaceLoader<B, S: OrgStorage> {
    pub(crate) backend: B,
    pub(crate) store: ActiveOrgStore<S>,
    pub(crate) state: std::sync::Mutex<WorkspaceState>,
    viewer_effect: EffectSlot,
    orgs_effect: EffectSlot,
    members_effect: EffectSlot,
    audit_effect: EffectSlot,
}

impl<B: WorkspaceBackend, S: OrgStorage> WorkspaceLoader<B, S> {
    pub fn new(backend: B, store: ActiveOrgStore<S>) -> Self {
        Self {
            backend,
            store,
            state: std::sync::Mutex::new(WorkspaceState::default()),
            viewer_effect: EffectSlot::default(),
            orgs_effect: EffectSlot::default(),
            members_effect: EffectSlot::default(),
            audit_effect: EffectSlot::default(),
        }
    }

    /// Clone of the current workspace state.
    #[must_use]
    pub fn snapshot(&self) -> WorkspaceState {
        lock(&self.state).clone()
    }

    /// The backend this loader talks to.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// The active-organization reference.
    #[must_use]
    pub fn active_org(&self) -> Option<String> {
        self.store.get()
    }

    /// Switch the active organization: persist the new reference and clear
    /// the displayed invite link (a stale cross-organization artifact).
    pub fn switch_organization(&self, org_id: &str) {
        self.store.set(org_id);
        lock(&self.state).last_invite_url = None;
    }

    /// Viewer fetch. On success, commits the viewer and adopts the
    /// server-reported organization id when it differs from the local
    /// reference. On failure or a missing token, the slice goes to `Error`.
    pub async fn load_viewer(&self, session: &Session) {
        if !session.provider_configured {
            lock(&self.state).viewer_state = LoadState::Idle;
            return;
        }

        let flag = self.viewer_effect.begin();
        lock(&self.state).viewer_state = LoadState::Loading;

        let Some(token) = session.bearer() else {
            if !flag.is_cancelled() {
                lock(&self.state).viewer_state = LoadState::Error;
            }
            return;
        };

        let local_org = self.store.get();
        let fetched = self.backend.viewer(token, local_org.as_deref()).await;
        if flag.is_cancelled() {
            return;
        }

        {
            let mut state = lock(&self.state);
            state.viewer_state = if fetched.is_some() {
                LoadState::Idle
            } else {
                LoadState::Error
            };
            state.viewer.clone_from(&fetched);
        }

        if let Some(viewer) = fetched {
            let server_org = viewer.organization.id;
            if !server_org.is_empty() && local_org.as_deref() != Some(server_org.as_str()) {
                self.switch_organization(&server_org);
            }
        }
    }

    /// Organizations fetch. Drives the reconciliation invariant: after a
    /// successful fetch the active reference is `None` or present in the
    /// list. Failure keeps the prior list.
    pub async fn load_organizations(&self, session: &Session) {
        if !session.provider_configured {
            return;
        }

        let flag = self.orgs_effect.begin();
        let Some(token) = session.bearer() else {
            return;
        };

        let fetched = self.backend.organizations(token).await;
        if flag.is_cancelled() {
            return;
        }

        if let Some(organizations) = fetched {
            self.store.reconcile(&organizations);
            lock(&self.state).organizations = organizations;
        }
    }

    /// Members fetch. Only attempted with an active organization; failure
    /// yields an empty list with its own error state, never anything
    /// destructive beyond that slice.
    pub async fn load_members(&self, session: &Session) {
        if !session.provider_configured {
            return;
        }

        let flag = self.members_effect.begin();
        let Some(organization_id) = self.store.get() else {
            let mut state = lock(&self.state);
            state.members.clear();
            state.members_state = LoadState::Idle;
            return;
        };

        lock(&self.state).members_state = LoadState::Loading;
        let Some(token) = session.bearer() else {
            if !flag.is_cancelled() {
                let mut state = lock(&self.state);
                state.members.clear();
                state.members_state = LoadState::Error;
            }
            return;
        };

        let fetched = self.backend.members(token, &organization_id).await;
        if flag.is_cancelled() {
            return;
        }

        let mut state = lock(&self.state);
        match fetched {
            Some(members) => {
                state.members = members;
                state.members_state = LoadState::Idle;
            }
            None => {
                state.members.clear();
                state.members_state = LoadState::Error;
            }
        }
    }

    /// Audit events fetch. Best-effort: failure (or a missing token) leaves
    /// the previous event list untouched.
    pub async fn load_audit_events(&self, session: &Session) {
        if !session.provider_configured {
            return;
        }

        let flag = self.audit_effect.begin();
        let Some(token) = session.bearer() else {
            return;
        };

        let organization_id = self.store.get();
        let fetched = self
            .backend
            .audit_events(token, organization_id.as_deref())
            .await;
        if flag.is_cancelled() {
            return;
        }

        if let Some(events) = fetched {
            lock(&self.state).audit_events = events;
        }
    }

    /// Run the full dependency-triggered load: organizations first so that
    /// reconciliation settles the active reference, then the dependent
    /// slices against the reconciled context.
    pub async fn refresh(&self, session: &Session) {
        self.load_organizations(session).await;
        tokio::join!(
            self.load_viewer(session),
            self.load_members(session),
            self.load_audit_events(session),
        );
    }
}

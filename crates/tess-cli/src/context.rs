use anyhow::Context;
use tess_api::ApiClient;
use tess_auth::Session;
use tess_config::TessConfig;
use tess_sync::{ActiveOrgStore, FileOrgStorage, WorkspaceLoader};

/// Everything a command handler needs: loaded config, the resolved session,
/// and the workspace loader wired to the real API client.
pub struct AppContext {
    pub config: TessConfig,
    pub session: Session,
    pub loader: WorkspaceLoader<ApiClient, FileOrgStorage>,
}

impl AppContext {
    pub fn init() -> anyhow::Result<Self> {
        let config = TessConfig::load_with_dotenv().context("failed to load configuration")?;
        let client = ApiClient::new(&config.api.normalized_base_url());
        let session = Session::resolve(config.clerk.is_configured());
        let store = ActiveOrgStore::load(FileOrgStorage::default_location());

        Ok(Self {
            config,
            session,
            loader: WorkspaceLoader::new(client, store),
        })
    }

    /// The API client behind the loader, for unauthenticated calls.
    pub fn api(&self) -> &ApiClient {
        self.loader.backend()
    }

    /// Bail with actionable guidance unless the session can authenticate.
    pub fn require_ready(&self) -> anyhow::Result<()> {
        if !self.session.provider_configured {
            anyhow::bail!(
                "identity provider not configured (set TESSERA_CLERK__PUBLISHABLE_KEY)"
            );
        }
        if self.session.token.is_none() {
            anyhow::bail!("not authenticated. Run 'tsr auth login' first.");
        }
        Ok(())
    }
}

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    provider_configured: bool,
    authenticated: bool,
    user_id: Option<String>,
    token_org_id: Option<String>,
    expires_at: Option<String>,
    token_source: Option<String>,
    note: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = &ctx.session;

    let status = if !session.provider_configured {
        AuthStatusResponse {
            provider_configured: false,
            authenticated: false,
            user_id: None,
            token_org_id: None,
            expires_at: None,
            token_source: None,
            note: Some("TESSERA_CLERK__PUBLISHABLE_KEY not configured".into()),
        }
    } else if let Some(token) = session.bearer() {
        let claims = tess_auth::claims::decode(token).ok();
        AuthStatusResponse {
            provider_configured: true,
            authenticated: true,
            user_id: session.user_id.clone(),
            token_org_id: claims.as_ref().and_then(|c| c.org_id.clone()),
            expires_at: claims
                .as_ref()
                .and_then(|c| c.expires_at)
                .map(|at| at.to_rfc3339()),
            token_source: tess_auth::token_store::detect_token_source()
                .map(|source| source.as_str().to_string()),
            note: None,
        }
    } else {
        AuthStatusResponse {
            provider_configured: true,
            authenticated: false,
            user_id: None,
            token_org_id: None,
            expires_at: None,
            token_source: None,
            note: Some("no stored token found".into()),
        }
    };

    output(&status, flags.format)
}

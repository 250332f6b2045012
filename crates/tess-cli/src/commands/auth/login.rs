use std::io::Read;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    stored: bool,
    user_id: Option<String>,
    token_source: Option<String>,
}

pub fn handle(args: &AuthLoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !ctx.config.clerk.is_configured() {
        anyhow::bail!("auth login: TESSERA_CLERK__PUBLISHABLE_KEY is not configured");
    }

    let token = match &args.token {
        Some(token) => token.trim().to_string(),
        None => read_token_from_stdin()?,
    };
    if token.is_empty() {
        anyhow::bail!("auth login: empty token");
    }

    tess_auth::login(&token)?;

    let user_id = tess_auth::claims::decode(&token)
        .ok()
        .map(|claims| claims.user_id);
    output(
        &AuthLoginResponse {
            stored: true,
            user_id,
            token_source: tess_auth::token_store::detect_token_source()
                .map(|source| source.as_str().to_string()),
        },
        flags.format,
    )
}

fn read_token_from_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

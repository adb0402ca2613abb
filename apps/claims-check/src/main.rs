//! `claims-check`: print the claims the resolver chain grants to a credential pair.
//!
//! Exit status is 0 when meaningful claims were resolved, 2 when nobody
//! recognised the caller, and 1 on configuration errors.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use api_key_plugin::Service as ApiKeyService;
use clap::Parser;
use claims_resolver::ResolverChain;
use claims_resolver::config::API_KEY_RESOLVER;
use claims_resolver_sdk::{AuthCredentials, Claims, ClaimsResolverClient};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LoggingConfig};

/// Resolve the claims granted to a credential pair.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Primary credential, as sent in the `Authorization` header
    #[arg(long)]
    token: Option<String>,

    /// Secondary credential, as sent in the auxiliary header
    #[arg(long)]
    extra_data: Option<String>,
}

impl Cli {
    fn credentials(&self) -> AuthCredentials {
        AuthCredentials::from_parts(
            self.token.clone().map(SecretString::from),
            self.extra_data.clone().map(SecretString::from),
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    let chain = build_chain(&config)?;
    let claims = resolve(&chain, &cli.credentials()).await;

    println!("{}", serde_json::to_string_pretty(&claims)?);

    Ok(if claims.is_meaningful() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cfg.level)
            .with_context(|| format!("invalid logging.level '{}'", cfg.level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

/// Run the chain, logging the outcome but never the credential or subject.
async fn resolve(chain: &ResolverChain, credentials: &AuthCredentials) -> Claims {
    let claims = chain.resolve(credentials).await;
    tracing::info!(
        resolvers = ?chain.names().collect::<Vec<_>>(),
        recognised = claims.is_meaningful(),
        "Claims resolved"
    );
    claims
}

/// Build the chain from the resolvers this binary provides.
fn build_chain(config: &AppConfig) -> anyhow::Result<ResolverChain> {
    let api_key = ApiKeyService::from_config(&config.api_key_plugin)
        .context("invalid API key configuration")?;
    let api_key: Arc<dyn ClaimsResolverClient> = Arc::new(api_key);

    ResolverChain::from_config(
        &config.claims_resolver,
        [(API_KEY_RESOLVER.to_owned(), api_key)],
    )
    .context("invalid claims resolver configuration")
}

//! Export an Exact Online collection as JSON lines.
//!
//! ```sh
//! export EXACT_DIVISION=123456
//! export EXACT_CLIENT_ID=... EXACT_CLIENT_SECRET=... EXACT_REFRESH_TOKEN=...
//! cargo run --bin eo-export -- sales-orders --modified-after 2024-01-01
//! cargo run --bin eo-export -- budgets --count
//! ```
//!
//! With `EXACT_CLIENT_ID` set, tokens are refreshed through OAuth and the
//! rotated refresh token is kept in `~/.exact-online/tokens/`. Without it,
//! `EXACT_ACCESS_TOKEN` is used as is.
//!
//! Log output goes to stderr and is controlled by `RUST_LOG`.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use exact_online_api::auth::{
    FileTokenStorage, OAuthClient, OAuthConfig, RefreshingTokenProvider, TokenSet, TokenStorage,
};
use exact_online_api::{
    Entity, ExactConfig, ExactOnline, ListParams, ResourceClient, StaticToken, TokenProvider,
};
use futures::TryStreamExt;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eo-export")]
#[command(about = "Export an Exact Online collection as JSON lines")]
struct Cli {
    /// Collection to read
    #[arg(value_enum)]
    resource: Resource,

    /// Only records modified after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    modified_after: Option<DateTime<Utc>>,

    /// Only records created before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    created_before: Option<DateTime<Utc>>,

    /// Print the number of records instead of the records
    #[arg(long)]
    count: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Resource {
    SubscriptionTypes,
    Budgets,
    SalesOrders,
    Transactions,
    TransactionLines,
}

impl Cli {
    fn params(&self) -> ListParams {
        let mut params = ListParams::new();
        if let Some(since) = self.modified_after {
            params = params.modified_after(since);
        }
        if let Some(before) = self.created_before {
            params = params.created_before(before);
        }
        params
    }
}

/// Midnight UTC of a `YYYY-MM-DD` date.
fn parse_date(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse()).await
}

fn token_provider(config: &ExactConfig) -> anyhow::Result<Arc<dyn TokenProvider>> {
    if std::env::var("EXACT_CLIENT_ID").is_err() {
        return Ok(Arc::new(StaticToken::from_env()?));
    }

    let oauth = OAuthClient::new(OAuthConfig::from_env()?, config.base_url());
    let storage = Arc::new(FileTokenStorage::new()?);
    let key = format!("division-{}", config.division());

    // Environment tokens only seed a session that has nothing stored yet;
    // the stored refresh token is newer once it has been rotated.
    let seed = match storage.load(&key)? {
        Some(_) => None,
        None => TokenSet::from_env().ok(),
    };

    let mut provider = RefreshingTokenProvider::new(oauth, storage, key);
    if let Some(tokens) = seed {
        provider = provider.with_tokens(tokens);
    }

    Ok(Arc::new(provider))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ExactConfig::from_env().context("reading Exact Online configuration")?;
    let tokens = token_provider(&config).context("setting up authentication")?;
    let eo = ExactOnline::new(config, tokens)?;

    info!(division = eo.division(), resource = ?cli.resource, "Exporting");

    match cli.resource {
        Resource::SubscriptionTypes => export(eo.subscription_types(), &cli).await,
        Resource::Budgets => export(eo.budgets(), &cli).await,
        Resource::SalesOrders => export(eo.sales_orders(), &cli).await,
        Resource::Transactions => export(eo.financial_transactions(), &cli).await,
        Resource::TransactionLines => export(eo.transaction_lines(), &cli).await,
    }
}

async fn export<E: Entity + Serialize>(client: ResourceClient<E>, cli: &Cli) -> anyhow::Result<()> {
    if cli.count {
        let total = client.count(cli.created_before).await?;
        println!("{total}");
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut records = Box::pin(client.list(&cli.params())?.into_stream());
    let mut written = 0usize;

    while let Some(record) = records.try_next().await? {
        let mut out = stdout.lock();
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
        written += 1;
    }

    info!(records = written, "Export finished");
    Ok(())
}

//! Assign URL slugs to every product that does not have one yet.
//!
//! Progress lines go to stdout; diagnostics go to stderr. Any failure aborts
//! the run with exit code 1.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

use storefront::domain::{BackfillEntry, BackfillMode, SlugBackfillService};
use storefront::outbound::persistence::{DbPool, DieselProductRepository, PoolConfig};

/// `backfill-slugs` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "backfill-slugs",
    about = "Assign unique URL slugs to products that lack one",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Resolve and print slugs without writing them.
    #[arg(long = "dry-run")]
    dry_run: bool,
}

impl CliArgs {
    fn mode(&self) -> BackfillMode {
        if self.dry_run {
            BackfillMode::DryRun
        } else {
            BackfillMode::Apply
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    let mode = args.mode();
    let database_url = resolve_database_url(args.database_url, env::var("DATABASE_URL").ok())?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(1))
        .await
        .map_err(|error| eyre!("create database pool: {error}"))?;

    let service = SlugBackfillService::new(Arc::new(DieselProductRepository::new(pool)));
    let report = service
        .run_with_mode(mode, |entry| println!("{}", progress_line(entry, mode)))
        .await
        .wrap_err("slug backfill failed")?;

    println!("{}", summary_line(report.len(), mode));
    Ok(())
}

fn progress_line(entry: &BackfillEntry, mode: BackfillMode) -> String {
    let verb = match mode {
        BackfillMode::Apply => "assigned",
        BackfillMode::DryRun => "would assign",
    };
    format!("{verb} {} to \"{}\" ({})", entry.slug, entry.name, entry.id)
}

fn summary_line(count: usize, mode: BackfillMode) -> String {
    let noun = if count == 1 { "product" } else { "products" };
    match mode {
        BackfillMode::Apply => format!("backfill complete: {count} {noun} updated"),
        BackfillMode::DryRun => format!("dry run complete: {count} {noun} would be updated"),
    }
}

fn resolve_database_url(explicit: Option<String>, from_env: Option<String>) -> Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(eyre!("--database-url must not be empty when provided"));
        }
        return Ok(value);
    }

    let from_env =
        from_env.ok_or_else(|| eyre!("database URL missing: set --database-url or DATABASE_URL"))?;
    if from_env.trim().is_empty() {
        return Err(eyre!("DATABASE_URL must not be empty"));
    }
    Ok(from_env)
}

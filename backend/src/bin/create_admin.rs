//! Create an administrator account, or promote an existing user to admin.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

use crm_backend::config::resolve_database_url;
use crm_backend::domain::AdminProvisioningService;
use crm_backend::inbound::cli::{Console, CreateAdminArgs, CreateAdminCommand, TerminalPrompt};
use crm_backend::outbound::hashing::Argon2PasswordHasher;
use crm_backend::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations_async,
};

/// `create-admin` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "create-admin",
    about = "Create a new admin user or promote an existing user to admin",
    version
)]
struct CliArgs {
    #[command(flatten)]
    command: CreateAdminArgs,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .with_writer(io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {error}");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: CliArgs) -> Result<ExitCode> {
    let database_url = resolve_database_url(args.database_url, &DefaultEnv::new())?;
    run_pending_migrations_async(database_url.clone()).await?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("create database pool")?;

    let service = AdminProvisioningService::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
    );
    let mut prompt = TerminalPrompt::default();
    let mut console = Console::styled(io::stdout());

    let status = CreateAdminCommand::new(&service, &mut prompt, &mut console)
        .run(args.command)
        .await
        .wrap_err("write console output")?;
    Ok(status.into())
}

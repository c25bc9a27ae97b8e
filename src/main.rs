//! rbac-admin - RBAC policy and navigation menu administration server

use anyhow::Context;
use clap::{Parser, Subcommand};
use rbac_admin::auth::{Enforcer, JwtHandler, PolicyStore};
use rbac_admin::storage::{Database, seed};
use rbac_admin::utils::logging::{bootstrap_subscriber, init_tracing};
use rbac_admin::{Config, server};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "rbac-admin")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file; defaults apply when it does not exist
    #[arg(
        short,
        long,
        env = "RBAC_ADMIN_CONFIG",
        default_value = "config/rbac-admin.yaml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Migrate, then create the default roles and policies
    Seed,
    /// Print a bearer token for local testing
    Token {
        /// Token subject
        subject: String,
        /// Role carried by the token
        #[arg(short, long)]
        role: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = {
        // logging config is not known yet; cover the load with a plain subscriber
        let _bootstrap = tracing::subscriber::set_default(bootstrap_subscriber());
        Config::load(&cli.config)
            .await
            .with_context(|| format!("loading {}", cli.config.display()))?
    };
    init_tracing(&config.logging);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::run_server(config).await?,
        Command::Migrate => {
            let db = Database::new(&config.storage.database).await?;
            db.migrate().await?;
        }
        Command::Seed => {
            let db = Arc::new(Database::new(&config.storage.database).await?);
            db.migrate().await?;
            let store: Arc<dyn PolicyStore> = db.clone();
            let enforcer = Enforcer::load(store).await?;
            seed::seed_defaults(&db, &enforcer).await?;
        }
        Command::Token { subject, role } => {
            let jwt = JwtHandler::new(&config.auth);
            let token = jwt
                .create_access_token(&subject, role.as_deref())
                .context("creating token")?;
            println!("{}", token);
        }
    }
    Ok(())
}

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use guestbook::banner::{BannerInfo, print_banner};
use guestbook::consts::{
    DEFAULT_AUTH_URL, DEFAULT_BIND, DEFAULT_GUESTBOOK, DEFAULT_USER_HEADER, LOG_ENV,
    default_db_path,
};
use guestbook::guestbook::GuestbookKey;
use guestbook::guestbook::sqlite::SqliteStore;
use guestbook::identity::{FixedIdentity, HostedIdentity, Identity};
use guestbook::web::{AppState, router};

#[derive(Parser)]
#[command(name = "guestbook", version, about = "Sign the guestbook.")]
struct Cli {
    /// SQLite database path (use :memory: for ephemeral; default ~/.guestbook/guestbook.db)
    #[arg(short, long)]
    db: Option<String>,

    /// Address to listen on
    #[arg(short, long, default_value = DEFAULT_BIND)]
    bind: String,

    /// Guestbook all greetings are written to and read from
    #[arg(short, long, default_value = DEFAULT_GUESTBOOK)]
    guestbook: String,

    /// Base URL of the hosted sign-in service
    #[arg(long, default_value = DEFAULT_AUTH_URL)]
    auth_url: String,

    /// Request header the front proxy puts the signed-in email in
    #[arg(long, default_value = DEFAULT_USER_HEADER)]
    user_header: String,

    /// Treat every request as signed in by this email (local development)
    #[arg(long)]
    dev_user: Option<String>,

    /// Don't print the startup banner
    #[arg(long, default_value_t = false)]
    no_banner: bool,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let db = match cli.db {
        Some(db) => db,
        None => {
            let path = default_db_path()?;
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create {}", dir.display()))?;
            }
            path.to_string_lossy().into_owned()
        }
    };

    let (identity, identity_label): (Arc<dyn Identity>, String) = match cli.dev_user {
        Some(email) => (
            Arc::new(FixedIdentity::signed_in(email.as_str())),
            format!("dev ({email})"),
        ),
        None => (
            Arc::new(HostedIdentity::new(cli.auth_url.as_str(), cli.user_header)),
            format!("hosted ({})", cli.auth_url),
        ),
    };

    let store = Arc::new(SqliteStore::open(&db)?);
    let state =
        AppState::new(store, identity).with_guestbook(GuestbookKey::new(cli.guestbook.as_str()));

    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    let address = listener.local_addr()?.to_string();

    if !cli.no_banner {
        print_banner(&BannerInfo {
            address: &address,
            guestbook: &cli.guestbook,
            identity: &identity_label,
            database: if db == ":memory:" { "ephemeral" } else { &db },
        });
    }

    info!(addr = %address, guestbook = %cli.guestbook, "starting guestbook");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("guestbook stopped");
    Ok(())
}

async fn shutdown_signal() {
    // If the handler can't be installed, run until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

//! Project-wide constants.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Partition every greeting is written under unless `--guestbook` says otherwise.
pub const DEFAULT_GUESTBOOK: &str = "default_guestbook";

/// Maximum number of greetings shown on the front page.
pub const QUERY_LIMIT: usize = 10;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Hosted identity service used for sign-in/sign-out links.
pub const DEFAULT_AUTH_URL: &str = "https://auth.example.com";

/// Header the authenticating front proxy stamps the user's email into.
pub const DEFAULT_USER_HEADER: &str = "x-authenticated-user-email";

/// Env var read for the tracing filter.
pub const LOG_ENV: &str = "GUESTBOOK_LOG";

/// Default database path: `~/.guestbook/guestbook.db`.
pub fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".guestbook").join("guestbook.db"))
}

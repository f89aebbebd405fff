pub mod sqlite;

use std::fmt;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::consts::{DEFAULT_GUESTBOOK, QUERY_LIMIT};
use crate::identity::User;

/// A single signed entry in the guestbook. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    /// Email of the signer, empty for anonymous posts.
    pub author: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

/// Parent key every greeting is stored under.
///
/// Queries scoped to one guestbook are strongly consistent; the price is that
/// all writes to it land in the same partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuestbookKey {
    name: String,
}

impl GuestbookKey {
    pub const KIND: &'static str = "Guestbook";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for GuestbookKey {
    fn default() -> Self {
        Self::new(DEFAULT_GUESTBOOK)
    }
}

impl fmt::Display for GuestbookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", Self::KIND, self.name)
    }
}

/// Store-assigned identifier of a greeting. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GreetingKey(pub i64);

impl fmt::Display for GreetingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Greeting({})", self.0)
    }
}

/// Where greetings live. Could be SQLite, a hosted datastore, etc.
#[async_trait]
pub trait GreetingStore: Send + Sync {
    /// Append a greeting under `parent`, returning the key the store picked.
    async fn put(&self, parent: &GuestbookKey, greeting: Greeting) -> Result<GreetingKey>;

    /// Up to `limit` greetings under `ancestor`, newest first.
    async fn query(&self, ancestor: &GuestbookKey, limit: usize) -> Result<Vec<Greeting>>;
}

/// The front page listing: the ten most recent greetings of one guestbook.
pub async fn recent_greetings(
    store: &dyn GreetingStore,
    guestbook: &GuestbookKey,
) -> Result<Vec<Greeting>> {
    store
        .query(guestbook, QUERY_LIMIT)
        .await
        .with_context(|| format!("failed to list greetings in {guestbook}"))
}

/// Record a new greeting, stamped with the current time and the signer (if any).
///
/// Content is stored exactly as submitted, empty included.
pub async fn sign_guestbook(
    store: &dyn GreetingStore,
    guestbook: &GuestbookKey,
    content: String,
    author: Option<&User>,
) -> Result<GreetingKey> {
    let greeting = Greeting {
        author: author.map(|u| u.email.clone()).unwrap_or_default(),
        content,
        date: Utc::now(),
    };
    store
        .put(guestbook, greeting)
        .await
        .with_context(|| format!("failed to sign {guestbook}"))
}

//! HTTP surface: three handlers wired to an explicit route table.
//!
//! Handlers reach the store and the identity provider only through
//! [`AppState`], so tests can swap either one out.

pub mod error;
pub mod handlers;
pub mod template;

use std::sync::Arc;

use axum::Router;
use axum::routing::{MethodRouter, get, post};
use tower_http::trace::TraceLayer;

use crate::guestbook::{GreetingStore, GuestbookKey};
use crate::identity::Identity;

/// Shared state for guestbook handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GreetingStore>,
    pub identity: Arc<dyn Identity>,
    /// Partition every read and write in this process is scoped to.
    pub guestbook: GuestbookKey,
}

impl AppState {
    pub fn new(store: Arc<dyn GreetingStore>, identity: Arc<dyn Identity>) -> Self {
        Self {
            store,
            identity,
            guestbook: GuestbookKey::default(),
        }
    }

    pub fn with_guestbook(mut self, guestbook: GuestbookKey) -> Self {
        self.guestbook = guestbook;
        self
    }
}

/// Path-to-handler table served by [`router`].
///
/// Paths match exactly: the listing is only served on `/`, and any other
/// path is a 404 rather than falling through to the front page.
pub fn routes() -> Vec<(&'static str, MethodRouter<AppState>)> {
    vec![
        ("/", get(handlers::root)),
        ("/sign", post(handlers::sign)),
        ("/welcome", get(handlers::welcome)),
    ]
}

/// Build the guestbook router from [`routes`].
pub fn router(state: AppState) -> Router {
    routes()
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| {
            router.route(path, handler)
        })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guestbook::sqlite::SqliteStore;
    use crate::identity::FixedIdentity;

    #[test]
    fn route_table_has_three_paths() {
        let paths: Vec<_> = routes().into_iter().map(|(path, _)| path).collect();
        assert_eq!(paths, ["/", "/sign", "/welcome"]);
    }

    #[test]
    fn state_defaults_to_default_guestbook() {
        let state = AppState::new(
            Arc::new(SqliteStore::in_memory().unwrap()),
            Arc::new(FixedIdentity::anonymous()),
        );
        assert_eq!(state.guestbook, GuestbookKey::default());
        let state = state.with_guestbook(GuestbookKey::new("other"));
        assert_eq!(state.guestbook.name(), "other");
        let _router = router(state);
    }
}

use axum::http::HeaderMap;

use super::{Identity, User, absolute_dest, urlencoded};

/// A scripted identity for tests and local development.
/// Reports the same user (or nobody) for every request.
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity {
    user: Option<User>,
}

impl FixedIdentity {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(email: impl Into<String>) -> Self {
        Self {
            user: Some(User::new(email)),
        }
    }
}

impl Identity for FixedIdentity {
    fn current_user(&self, _headers: &HeaderMap) -> Option<User> {
        self.user.clone()
    }

    fn login_url(&self, headers: &HeaderMap, dest: &str) -> String {
        format!(
            "/_ah/login?continue={}",
            urlencoded(&absolute_dest(headers, dest))
        )
    }

    fn logout_url(&self, headers: &HeaderMap, dest: &str) -> String {
        format!(
            "/_ah/logout?continue={}",
            urlencoded(&absolute_dest(headers, dest))
        )
    }
}

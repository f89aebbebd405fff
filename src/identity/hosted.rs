use axum::http::HeaderMap;

use super::{Identity, User, absolute_dest, urlencoded};
use crate::consts::{DEFAULT_AUTH_URL, DEFAULT_USER_HEADER};

/// Identity supplied by an authenticating front proxy.
///
/// The proxy signs users in against the hosted auth service and forwards the
/// email in a trusted header. Only deploy behind such a proxy: the header is
/// taken at face value.
#[derive(Debug, Clone)]
pub struct HostedIdentity {
    auth_url: String,
    user_header: String,
}

impl Default for HostedIdentity {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_URL, DEFAULT_USER_HEADER)
    }
}

impl HostedIdentity {
    pub fn new(auth_url: impl Into<String>, user_header: impl Into<String>) -> Self {
        let auth_url = auth_url.into().trim_end_matches('/').to_string();
        Self {
            auth_url,
            user_header: user_header.into().to_ascii_lowercase(),
        }
    }

    fn auth_link(&self, action: &str, headers: &HeaderMap, dest: &str) -> String {
        format!(
            "{}/{}?continue={}",
            self.auth_url,
            action,
            urlencoded(&absolute_dest(headers, dest))
        )
    }
}

impl Identity for HostedIdentity {
    fn current_user(&self, headers: &HeaderMap) -> Option<User> {
        let raw = headers.get(self.user_header.as_str())?.to_str().ok()?;
        // Some proxies prefix the issuer: "accounts.google.com:alice@example.com"
        let email = raw.rsplit_once(':').map_or(raw, |(_, email)| email).trim();
        if email.is_empty() {
            return None;
        }
        Some(User::new(email))
    }

    fn login_url(&self, headers: &HeaderMap, dest: &str) -> String {
        self.auth_link("login", headers, dest)
    }

    fn logout_url(&self, headers: &HeaderMap, dest: &str) -> String {
        self.auth_link("logout", headers, dest)
    }
}

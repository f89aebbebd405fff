//! Who is making the request, and where to send them to sign in or out.
//!
//! The guestbook never authenticates anyone itself. It asks an [`Identity`]
//! provider, which is usually a hosted service fronting the app.

pub mod fixed;
pub mod hosted;

use std::fmt;

use axum::http::HeaderMap;
use axum::http::header::HOST;

pub use fixed::FixedIdentity;
pub use hosted::HostedIdentity;

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

/// The identity capability handed to every handler.
pub trait Identity: Send + Sync {
    /// The signed-in user, or `None` for anonymous requests.
    fn current_user(&self, headers: &HeaderMap) -> Option<User>;

    /// URL that signs the user in and then returns to `dest`.
    fn login_url(&self, headers: &HeaderMap, dest: &str) -> String;

    /// URL that signs the user out and then returns to `dest`.
    fn logout_url(&self, headers: &HeaderMap, dest: &str) -> String;
}

/// Header a TLS-terminating proxy uses to report the client's scheme.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Make `dest` absolute using the request's `Host` header.
/// The scheme is taken from `x-forwarded-proto` when it names http or https.
/// Absolute URLs and host-less requests are passed through unchanged.
pub(crate) fn absolute_dest(headers: &HeaderMap, dest: &str) -> String {
    if dest.contains("://") {
        return dest.to_string();
    }
    match headers.get(HOST).and_then(|h| h.to_str().ok()) {
        Some(host) if !host.is_empty() => {
            let sep = if dest.starts_with('/') { "" } else { "/" };
            format!("{}://{host}{sep}{dest}", request_scheme(headers))
        }
        _ => dest.to_string(),
    }
}

fn request_scheme(headers: &HeaderMap) -> &'static str {
    // Chained proxies append: "https, http". The first hop is the client's.
    let proto = headers
        .get(FORWARDED_PROTO)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase());
    match proto.as_deref() {
        Some("https") => "https",
        _ => "http",
    }
}

/// Minimal URL encoding for query parameters.
pub(crate) fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push_str(&format!("%{:02X}", b));
            }
        }
    }
    out
}

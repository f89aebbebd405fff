use std::convert::Infallible;

use async_trait::async_trait;
use axum::Form;
use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;
use tracing::{debug, info};

use super::AppState;
use super::error::AppResult;
use super::template::{render_guestbook, render_sign_in, render_welcome};
use crate::guestbook::{recent_greetings, sign_guestbook};

/// Submitted greeting for `POST /sign`. A missing field is the same as an empty one.
#[derive(Debug, Default)]
pub struct SignForm {
    pub content: String,
}

#[derive(Deserialize)]
struct ContentField {
    content: Option<String>,
}

/// Never rejects: `content` comes from a urlencoded or multipart body, then
/// from the query string, and is empty when neither has it.
#[async_trait]
impl<S> FromRequest<S> for SignForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<ContentField>::try_from_uri(req.uri())
            .ok()
            .and_then(|Query(field)| field.content);

        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"));

        let body = if is_multipart {
            multipart_content(req, state).await
        } else {
            Form::<ContentField>::from_request(req, state)
                .await
                .ok()
                .and_then(|Form(field)| field.content)
        };

        Ok(SignForm {
            content: body.or(query).unwrap_or_default(),
        })
    }
}

async fn multipart_content<S>(req: Request, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    let mut multipart = Multipart::from_request(req, state).await.ok()?;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("content") {
            return field.text().await.ok();
        }
    }
    None
}

/// `GET /`: the most recent greetings plus the sign form.
pub async fn root(State(state): State<AppState>) -> AppResult<Html<String>> {
    let greetings = recent_greetings(state.store.as_ref(), &state.guestbook).await?;
    debug!(count = greetings.len(), guestbook = %state.guestbook, "listed greetings");
    Ok(Html(render_guestbook(&greetings)))
}

/// `POST /sign`: store the greeting, then send the browser back to `/`.
pub async fn sign(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: SignForm,
) -> AppResult<impl IntoResponse> {
    let user = state.identity.current_user(&headers);
    let key = sign_guestbook(
        state.store.as_ref(),
        &state.guestbook,
        form.content,
        user.as_ref(),
    )
    .await?;
    info!(
        key = %key,
        guestbook = %state.guestbook,
        signed_in = user.is_some(),
        "guestbook signed"
    );
    Ok((StatusCode::FOUND, [(LOCATION, "/")]))
}

/// `GET /welcome`: a sign-in link, or a greeting with a sign-out link.
pub async fn welcome(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    match state.identity.current_user(&headers) {
        Some(user) => {
            let url = state.identity.logout_url(&headers, "/");
            Html(render_welcome(&user.email, &url))
        }
        None => {
            let url = state.identity.login_url(&headers, "/");
            Html(render_sign_in(&url))
        }
    }
}

//! Per-client sessions. The cookie carries only an opaque token; the
//! authenticated username and the one-shot flash message live server-side.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "quill_session";

/// Sessions idle longer than this are evicted on the next write.
const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct SessionData {
    pub username: Option<String>,
    pub message: Option<String>,
    touched: Instant,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            username: None,
            message: None,
            touched: Instant::now(),
        }
    }
}

impl SessionData {
    fn is_empty(&self) -> bool {
        self.username.is_none() && self.message.is_none()
    }
}

/// Active sessions: token -> session data.
#[derive(Clone, Default)]
pub struct Sessions {
    inner: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn username(&self, token: &str) -> Option<String> {
        self.inner
            .read()
            .await
            .get(token)
            .and_then(|session| session.username.clone())
    }

    pub async fn set_username(&self, token: &str, username: &str) {
        let mut sessions = self.inner.write().await;
        Self::evict_stale(&mut sessions);
        let session = sessions.entry(token.to_string()).or_default();
        session.username = Some(username.to_string());
        session.touched = Instant::now();
    }

    pub async fn clear_username(&self, token: &str) {
        let mut sessions = self.inner.write().await;
        if let Some(session) = sessions.get_mut(token) {
            session.username = None;
        }
        if sessions.get(token).is_some_and(SessionData::is_empty) {
            sessions.remove(token);
        }
    }

    pub async fn set_message(&self, token: &str, message: impl Into<String>) {
        let mut sessions = self.inner.write().await;
        Self::evict_stale(&mut sessions);
        let session = sessions.entry(token.to_string()).or_default();
        session.message = Some(message.into());
        session.touched = Instant::now();
    }

    /// One-shot: the message is cleared as it is read. A session left with
    /// neither username nor message is dropped from the map, so anonymous
    /// flash-only sessions do not accumulate.
    pub async fn take_message(&self, token: &str) -> Option<String> {
        let mut sessions = self.inner.write().await;
        let message = sessions.get_mut(token).and_then(|session| {
            session.touched = Instant::now();
            session.message.take()
        });
        if sessions.get(token).is_some_and(SessionData::is_empty) {
            sessions.remove(token);
        }
        message
    }

    fn evict_stale(sessions: &mut HashMap<String, SessionData>) {
        sessions.retain(|_, session| session.touched.elapsed() < SESSION_TTL);
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Read the session token from the cookie jar, minting a fresh one (and the
/// cookie carrying it) if the client has none yet.
pub fn ensure_token(jar: CookieJar) -> (CookieJar, String) {
    if let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
        return (jar, token);
    }
    let token = Uuid::new_v4().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .build();
    (jar.add(cookie), token)
}

/// Authorization guard for mutating routes and their form views. On an
/// anonymous session this sets the flash message and yields the redirect the
/// caller must return immediately; no handler logic may run after it.
pub async fn require_signin(sessions: &Sessions, token: &str) -> Result<String, Response> {
    match sessions.username(token).await {
        Some(username) => Ok(username),
        None => {
            sessions
                .set_message(token, "You must be signed in to do that.")
                .await;
            Err(Redirect::to("/").into_response())
        }
    }
}

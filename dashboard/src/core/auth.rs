//! Authentication context and session bookkeeping
//!
//! A session is an opaque token mapped to a username with a fixed one-day
//! lifetime. The per-request `AuthContext` is built from the
//! session cookie and handed to handlers explicitly.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "stock_session";

/// Fixed session lifetime in seconds (one day)
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Who is making the current request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub authenticated: bool,
    pub username: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            username: Some(username.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn current_username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

/// One logged-in session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            created_at: now,
            expires_at: now + Duration::seconds(SESSION_TTL_SECS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Token -> session map with lazy expiry
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: HashMap<String, Session>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: Session) {
        self.sessions.insert(session.token.clone(), session);
    }

    /// Live session for the token; an expired one is dropped and reported as absent
    pub fn resolve(&mut self, token: &str, now: DateTime<Utc>) -> Option<&Session> {
        if self.sessions.get(token).is_some_and(|s| s.is_expired(now)) {
            self.sessions.remove(token);
            return None;
        }
        self.sessions.get(token)
    }

    pub fn remove(&mut self, token: &str) -> Option<Session> {
        self.sessions.remove(token)
    }

    /// Drop every expired session, returning how many were removed
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired(now));
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// `Set-Cookie` value carrying a new session token
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; Max-Age={SESSION_TTL_SECS}; HttpOnly; SameSite=Strict")
}

/// `Set-Cookie` value that clears the session cookie
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Strict")
}

/// Extract the session token from a `Cookie` request header
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

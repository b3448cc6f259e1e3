//! In-memory session store

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::{Component, component_debug, component_info};

use crate::core::auth::{AuthContext, Session, SessionTable};

/// Shared session table guarded by an async lock
#[derive(Debug, Default)]
pub struct SessionStore {
    table: RwLock<SessionTable>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for an already validated user and return its token
    pub async fn create(&self, username: &str) -> Session {
        let now = Utc::now();
        let session = Session::new(Uuid::new_v4().to_string(), username, now);

        let mut table = self.table.write().await;
        let purged = table.purge_expired(now);
        if purged > 0 {
            component_debug!(Component::Auth, "🗑️ Purged {} expired sessions", purged);
        }
        table.insert(session.clone());

        component_info!(Component::Auth, "🔑 Session opened for {}", username);
        session
    }

    /// Build the request's auth context from an optional session token
    pub async fn context_for(&self, token: Option<&str>) -> AuthContext {
        let Some(token) = token else {
            return AuthContext::anonymous();
        };

        let mut table = self.table.write().await;
        match table.resolve(token, Utc::now()) {
            Some(session) => AuthContext::for_user(session.username.clone()),
            None => AuthContext::anonymous(),
        }
    }

    /// Close the session, if it exists
    pub async fn end(&self, token: &str) -> bool {
        let removed = self.table.write().await.remove(token);
        if let Some(session) = &removed {
            component_info!(Component::Auth, "👋 Session closed for {}", session.username);
        }
        removed.is_some()
    }

    pub async fn active_count(&self) -> usize {
        let mut table = self.table.write().await;
        table.purge_expired(Utc::now());
        table.len()
    }
}

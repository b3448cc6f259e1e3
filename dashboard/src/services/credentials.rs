//! Static credential allow-list

use std::collections::HashMap;

use crate::config::UserCredential;
use crate::traits::CredentialStore;

/// In-memory allow-list loaded from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    users: HashMap<String, String>,
}

impl StaticCredentialStore {
    pub fn new(users: &[UserCredential]) -> Self {
        Self {
            users: users
                .iter()
                .map(|u| (u.username.clone(), u.password.clone()))
                .collect(),
        }
    }
}

impl CredentialStore for StaticCredentialStore {
    fn validate(&self, username: &str, password: &str) -> bool {
        self.users.get(username).is_some_and(|expected| expected == password)
    }

    fn user_count(&self) -> usize {
        self.users.len()
    }
}

//! Application state: store handle plus a DashMap cache of session tokens.

use anyhow::Result;
use dashmap::DashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::persistence::{InteropStore, TeamUser};
use crate::state::AuthenticatedUser;

pub struct AppState {
    store: Arc<dyn InteropStore>,
    config: Config,
    sessions: DashMap<String, AuthenticatedUser>,
}

impl AppState {
    pub fn new(store: Arc<dyn InteropStore>, config: Config) -> Self {
        Self {
            store,
            config,
            sessions: DashMap::new(),
        }
    }

    pub fn store(&self) -> &dyn InteropStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load persisted session tokens into the cache. Returns how many.
    pub async fn load_sessions(&self) -> Result<usize> {
        let users = self.store.users().await?;
        for user in &users {
            self.cache_session(user);
        }
        Ok(users.len())
    }

    /// Create a team account and make its token usable immediately.
    pub async fn register_user(&self, username: &str) -> Result<TeamUser> {
        let user = self.store.create_user(username).await?;
        self.cache_session(&user);
        Ok(user)
    }

    pub fn user_for_token(&self, token: &str) -> Option<AuthenticatedUser> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    fn cache_session(&self, user: &TeamUser) {
        self.sessions
            .insert(user.session_token.clone(), AuthenticatedUser::from_user(user));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[tokio::test]
    async fn registered_tokens_resolve_to_users() {
        let state = AppState::new(Arc::new(MemoryStore::new()), Config::from_env());
        let user = state.register_user("testuser").await.unwrap();

        let caller = state.user_for_token(&user.session_token).unwrap();
        assert_eq!(caller.id(), user.id);
        assert_eq!(caller.username(), "testuser");
        assert!(state.user_for_token("bogus").is_none());
    }

    #[tokio::test]
    async fn sessions_reload_from_store() {
        let store = Arc::new(MemoryStore::new());
        let user = store.create_user("testuser").await.unwrap();

        let state = AppState::new(store, Config::from_env());
        assert!(state.user_for_token(&user.session_token).is_none());
        assert_eq!(state.load_sessions().await.unwrap(), 1);
        assert!(state.user_for_token(&user.session_token).is_some());
    }
}

use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace, warn};

/// In-process `users` collection with unique `email` and `username`.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn count(&self) -> usize {
        self.storage.read().await.len()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id, username = %user.username))]
    async fn insert_user(&self, user: User) -> Result<()> {
        trace!("Acquiring write lock for user storage");
        let mut storage = self.storage.write().await;
        // Uniqueness is checked under the write lock so concurrent inserts
        // cannot both pass.
        if storage
            .values()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            warn!(username = %user.username, "Duplicate key on user insert");
            return Err(DomainError::Conflict("Email or username already in use".to_string()).into());
        }
        storage.insert(user.id.clone(), user);
        debug!(count = storage.len(), "User saved to memory storage");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        let user = storage.values().find(|u| u.username == username).cloned();
        match &user {
            Some(u) => debug!(user_id = %u.id, "User found in storage"),
            None => trace!("User not found in storage"),
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_user_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .find(|u| u.email == email || u.username == username)
            .cloned())
    }
}

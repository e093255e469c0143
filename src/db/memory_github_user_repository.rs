use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::{github_user_repository::GitHubUserRepository, StoreError};
use crate::models::github_user::GitHubUser;
use crate::services::github::factory::create_github_user_with_avatar;

/// Process-local store for tests that run the server in-process.
pub struct InMemoryGitHubUserRepository {
    users: RwLock<Vec<GitHubUser>>,
    avatar_url: String,
}

impl InMemoryGitHubUserRepository {
    pub fn new(avatar_url: impl Into<String>) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            avatar_url: avatar_url.into(),
        }
    }
}

#[async_trait]
impl GitHubUserRepository for InMemoryGitHubUserRepository {
    async fn load(&self) -> Vec<GitHubUser> {
        self.users.read().await.clone()
    }

    async fn save(&self, users: &[GitHubUser]) -> Result<(), StoreError> {
        *self.users.write().await = users.to_vec();
        Ok(())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        self.users.write().await.clear();
        Ok(())
    }

    fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    // Same semantics as the provided method, but under one write lock.
    async fn upsert(&self, code: Option<&str>) -> Result<GitHubUser, StoreError> {
        let fresh = create_github_user_with_avatar(code, &self.avatar_url);
        let mut users = self.users.write().await;

        match code.and_then(|code| users.iter().position(|u| u.code == code)) {
            Some(index) => users[index] = fresh.clone(),
            None => users.push(fresh.clone()),
        }
        Ok(fresh)
    }
}

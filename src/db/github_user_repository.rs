use async_trait::async_trait;

use crate::db::StoreError;
use crate::models::github_user::GitHubUser;
use crate::services::github::factory::create_github_user_with_avatar;

/// Storage for synthetic GitHub accounts.
///
/// Implementors only provide whole-collection `load`/`save`/`reset`; lookups
/// and the upsert path are built on top of those.
#[async_trait]
pub trait GitHubUserRepository: Send + Sync {
    /// Returns every stored account. A missing or unreadable store is empty.
    async fn load(&self) -> Vec<GitHubUser>;
    async fn save(&self, users: &[GitHubUser]) -> Result<(), StoreError>;
    async fn reset(&self) -> Result<(), StoreError>;

    /// Avatar URL stamped on newly generated profiles.
    fn avatar_url(&self) -> &str;

    async fn find_by_code(&self, code: &str) -> Option<GitHubUser> {
        self.load().await.into_iter().find(|u| u.code == code)
    }

    async fn find_by_access_token(&self, token: &str) -> Option<GitHubUser> {
        self.load().await.into_iter().find(|u| u.access_token == token)
    }

    async fn find_by_profile_id(&self, id: &str) -> Option<GitHubUser> {
        self.load().await.into_iter().find(|u| u.profile.id == id)
    }

    /// Creates the account for `code`, or regenerates every field of the
    /// existing one while keeping its code.
    async fn upsert(&self, code: Option<&str>) -> Result<GitHubUser, StoreError> {
        let mut users = self.load().await;
        let fresh = create_github_user_with_avatar(code, self.avatar_url());

        match code.and_then(|code| users.iter().position(|u| u.code == code)) {
            Some(index) => users[index] = fresh.clone(),
            None => users.push(fresh.clone()),
        }

        self.save(&users).await?;
        Ok(fresh)
    }

    /// Returns the stored account for `code` untouched, creating it if absent.
    async fn get_or_create(&self, code: Option<&str>) -> Result<GitHubUser, StoreError> {
        if let Some(code) = code {
            if let Some(user) = self.find_by_code(code).await {
                return Ok(user);
            }
        }
        self.upsert(code).await
    }
}

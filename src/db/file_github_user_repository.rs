use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::db::{github_user_repository::GitHubUserRepository, StoreError};
use crate::models::github_user::GitHubUser;

/// Fixture file scoped to one test worker:
/// `<fixtures_dir>/github/users.<worker_id>.local.json`.
pub fn worker_fixture_path(fixtures_dir: &Path, worker_id: &str) -> PathBuf {
    fixtures_dir
        .join("github")
        .join(format!("users.{}.local.json", worker_id))
}

/// Keeps accounts as a pretty-printed JSON array on disk.
///
/// There is no locking or atomic rename; each worker owns its own file.
pub struct FileGitHubUserRepository {
    pub path: PathBuf,
    pub avatar_url: String,
}

impl FileGitHubUserRepository {
    pub fn new(path: impl Into<PathBuf>, avatar_url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            avatar_url: avatar_url.into(),
        }
    }

    pub fn for_worker(fixtures_dir: &Path, worker_id: &str, avatar_url: &str) -> Self {
        Self::new(worker_fixture_path(fixtures_dir, worker_id), avatar_url)
    }
}

#[async_trait]
impl GitHubUserRepository for FileGitHubUserRepository {
    async fn load(&self) -> Vec<GitHubUser> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::error!(error = %err, path = %self.path.display(), "failed to read GitHub user fixtures");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(users) => users,
            Err(err) => {
                tracing::error!(error = %err, path = %self.path.display(), "failed to parse GitHub user fixtures");
                Vec::new()
            }
        }
    }

    async fn save(&self, users: &[GitHubUser]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(users)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn avatar_url(&self) -> &str {
        &self.avatar_url
    }
}

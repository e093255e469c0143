use crate::config::{Config, StoreBackend};
use crate::db::{
    file_github_user_repository::FileGitHubUserRepository,
    github_user_repository::GitHubUserRepository,
    memory_github_user_repository::InMemoryGitHubUserRepository,
};
use crate::services::email_outbox::{EmailOutbox, FileEmailOutbox, InMemoryEmailOutbox};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub github_users: Arc<dyn GitHubUserRepository>,
    pub outbox: Arc<dyn EmailOutbox>,
    pub http_client: Arc<Client>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the stores selected by `config`.
    pub fn from_config(config: Config) -> Self {
        let github_users: Arc<dyn GitHubUserRepository> = match config.store {
            StoreBackend::File => Arc::new(FileGitHubUserRepository::for_worker(
                &config.fixtures_dir,
                &config.worker_id,
                &config.avatar_url(),
            )),
            StoreBackend::Memory => {
                Arc::new(InMemoryGitHubUserRepository::new(config.avatar_url()))
            }
        };

        let outbox: Arc<dyn EmailOutbox> = match config.store {
            StoreBackend::File => Arc::new(FileEmailOutbox::new(&config.fixtures_dir)),
            StoreBackend::Memory => Arc::new(InMemoryEmailOutbox::default()),
        };

        AppState {
            github_users,
            outbox,
            http_client: Arc::new(Client::new()),
            config: Arc::new(config),
        }
    }

    /// Whether GitHub routes should forward instead of answering.
    pub fn passthrough_github(&self) -> bool {
        self.config.passthrough_github
    }
}

pub mod file_github_user_repository;
pub mod github_user_repository;
pub mod memory_github_user_repository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("fixture io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("fixture serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

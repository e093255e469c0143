use async_trait::async_trait;
use std::fmt;

use crate::models::email::{OutboundEmail, StoredEmail};

#[derive(Debug)]
pub enum MailError {
    MissingRecipient,
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailError::MissingRecipient => write!(f, "Email has no recipient"),
            MailError::Io(e) => write!(f, "Outbox io error: {}", e),
            MailError::Serialize(e) => write!(f, "Outbox serialization error: {}", e),
        }
    }
}

impl std::error::Error for MailError {}

impl From<std::io::Error> for MailError {
    fn from(err: std::io::Error) -> Self {
        MailError::Io(err)
    }
}

impl From<serde_json::Error> for MailError {
    fn from(err: serde_json::Error) -> Self {
        MailError::Serialize(err)
    }
}

/// Destination for emails captured by the simulated send endpoint.
#[async_trait]
pub trait EmailOutbox: Send + Sync {
    async fn write_email(&self, email: &OutboundEmail) -> Result<StoredEmail, MailError>;
    /// Most recent email addressed to `recipient`.
    async fn read_email(&self, recipient: &str) -> Result<Option<StoredEmail>, MailError>;
}

mod file_outbox;
mod memory_outbox;

pub use file_outbox::FileEmailOutbox;
pub use memory_outbox::InMemoryEmailOutbox;

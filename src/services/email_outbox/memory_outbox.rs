use crate::models::email::{OutboundEmail, StoredEmail};
use crate::services::email_outbox::{EmailOutbox, MailError};
use async_trait::async_trait;
use std::sync::Mutex;

/// An outbox that records sent emails in memory.
#[derive(Debug, Default)]
pub struct InMemoryEmailOutbox {
    pub sent: Mutex<Vec<StoredEmail>>,
    pub fail_send: bool,
}

impl InMemoryEmailOutbox {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or_default()
    }
}

#[async_trait]
impl EmailOutbox for InMemoryEmailOutbox {
    async fn write_email(&self, email: &OutboundEmail) -> Result<StoredEmail, MailError> {
        if self.fail_send {
            return Err(MailError::Io(std::io::Error::other("mock failure")));
        }
        if email.to.first().is_none() {
            return Err(MailError::MissingRecipient);
        }

        self.sent
            .lock()
            .map_err(|_| MailError::Io(std::io::Error::other("outbox lock poisoned")))?
            .push(email.clone());
        Ok(email.clone())
    }

    async fn read_email(&self, recipient: &str) -> Result<Option<StoredEmail>, MailError> {
        let sent = self
            .sent
            .lock()
            .map_err(|_| MailError::Io(std::io::Error::other("outbox lock poisoned")))?;
        Ok(sent.iter().rev().find(|e| e.to.contains(recipient)).cloned())
    }
}

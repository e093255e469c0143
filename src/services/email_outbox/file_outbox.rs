use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::email::{OutboundEmail, StoredEmail};
use crate::services::email_outbox::{EmailOutbox, MailError};

/// Writes each email to `<fixtures_dir>/email/<recipient>.json`, replacing
/// whatever was last sent to that address.
pub struct FileEmailOutbox {
    dir: PathBuf,
}

impl FileEmailOutbox {
    pub fn new(fixtures_dir: &Path) -> Self {
        Self {
            dir: fixtures_dir.join("email"),
        }
    }

    fn path_for(&self, recipient: &str) -> PathBuf {
        self.dir.join(format!(
            "{}.json",
            urlencoding::encode(&recipient.to_lowercase())
        ))
    }
}

#[async_trait]
impl EmailOutbox for FileEmailOutbox {
    async fn write_email(&self, email: &OutboundEmail) -> Result<StoredEmail, MailError> {
        let recipient = email.to.first().ok_or(MailError::MissingRecipient)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(recipient);
        tokio::fs::write(&path, serde_json::to_vec_pretty(email)?).await?;
        tracing::debug!(path = %path.display(), "wrote mocked email");

        Ok(email.clone())
    }

    async fn read_email(&self, recipient: &str) -> Result<Option<StoredEmail>, MailError> {
        match tokio::fs::read(self.path_for(recipient)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::email::Recipients;
    use serde_json::Map;
    use tempfile::TempDir;

    fn email_to(to: Recipients) -> OutboundEmail {
        OutboundEmail {
            from: "noreply@example.com".into(),
            to,
            subject: "Your verification code".into(),
            html: None,
            text: Some("123456".into()),
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn written_email_can_be_read_back() {
        let dir = TempDir::new().unwrap();
        let outbox = FileEmailOutbox::new(dir.path());

        let email = email_to(Recipients::One("Kody@Example.com".into()));
        outbox.write_email(&email).await.unwrap();

        let stored = outbox.read_email("kody@example.com").await.unwrap();
        assert_eq!(stored, Some(email));
        assert!(dir.path().join("email").is_dir());
    }

    #[tokio::test]
    async fn unknown_recipient_reads_none() {
        let dir = TempDir::new().unwrap();
        let outbox = FileEmailOutbox::new(dir.path());
        assert!(outbox.read_email("ghost@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_recipient_list_is_rejected() {
        let dir = TempDir::new().unwrap();
        let outbox = FileEmailOutbox::new(dir.path());

        let err = outbox
            .write_email(&email_to(Recipients::Many(vec![])))
            .await
            .unwrap_err();
        assert!(matches!(err, MailError::MissingRecipient));
    }
}

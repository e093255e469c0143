use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Resend accepts a single address or a list for `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    pub fn first(&self) -> Option<&str> {
        match self {
            Recipients::One(to) => Some(to.as_str()),
            Recipients::Many(list) => list.first().map(String::as_str),
        }
    }

    pub fn contains(&self, address: &str) -> bool {
        match self {
            Recipients::One(to) => to.eq_ignore_ascii_case(address),
            Recipients::Many(list) => list.iter().any(|to| to.eq_ignore_ascii_case(address)),
        }
    }
}

/// Request body of `POST /emails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Recipients,
    #[serde(default)]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Fields the mock does not interpret (`cc`, `reply_to`, `headers`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What the outbox hands back after an email has been written.
pub type StoredEmail = OutboundEmail;

#[derive(Debug, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub id: String,
    pub from: String,
    pub to: Recipients,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_single_and_list_recipients() {
        let single: OutboundEmail = serde_json::from_value(json!({
            "from": "noreply@example.com",
            "to": "kody@example.com",
            "subject": "Welcome",
            "html": "<p>hi</p>"
        }))
        .unwrap();
        assert_eq!(single.to.first(), Some("kody@example.com"));

        let many: OutboundEmail = serde_json::from_value(json!({
            "from": "noreply@example.com",
            "to": ["a@example.com", "b@example.com"],
            "subject": "Welcome",
            "text": "hi",
            "reply_to": "support@example.com"
        }))
        .unwrap();
        assert_eq!(many.to.first(), Some("a@example.com"));
        assert!(many.to.contains("B@example.com"));
        assert_eq!(many.extra["reply_to"], "support@example.com");
    }
}

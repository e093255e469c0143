pub mod email_outbox;
pub mod github;
pub mod passthrough;

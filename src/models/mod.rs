pub mod email;
pub mod github_user;

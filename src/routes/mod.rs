pub mod control;
pub mod github;
pub mod misc;
pub mod resend;

#[cfg(test)]
pub(crate) mod test_support;

pub mod errors;
pub mod factory;

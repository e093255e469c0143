pub mod config;
pub mod db;
pub mod models;
pub mod responses;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;

pub use config::Config;
pub use server::MockServer;
pub use state::AppState;

pub mod client;
pub mod config;
pub mod logging;
pub mod protocol;
pub mod server;

pub use client::{ClientError, ReminderClient};
pub use config::ServerConfig;
pub use logging::{init_logging, LogFormat};
pub use server::{router, run, serve, AppState};

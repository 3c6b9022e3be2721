//! Core server plumbing: configuration, shared state, runner

mod config;
mod server;
mod state;

pub use config::{setup_environment, Config};
pub use server::Server;
pub use state::ServerState;

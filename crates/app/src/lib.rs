// CLI modules
pub mod cli;

// Service modules (HTTP server, session store, process bootstrap)
mod config;
pub mod http_server;
pub mod process;
pub mod session;
mod state;

pub use config::Config;
pub use state::AppState;

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cli::Args;

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// address the HTTP server listens on
    pub listen_addr: SocketAddr,

    // store configuration
    /// directory holding the managed documents
    pub data_dir: PathBuf,
    /// path to the credential artifact (TOML map of username -> digest),
    /// kept outside the document directory
    pub users_path: PathBuf,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            listen_addr: args.listen_addr,
            data_dir: args.data_dir,
            users_path: args.users_file,
            log_level: args.log_level,
            log_dir: args.log_dir,
        }
    }
}

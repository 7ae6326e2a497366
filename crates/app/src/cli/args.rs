pub use clap::Parser;

use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "A minimal file-backed CMS")]
pub struct Args {
    /// Address for the HTTP server to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub listen_addr: SocketAddr,

    /// Directory holding the managed documents
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Path to the credential file (kept outside the document directory)
    #[arg(long, default_value = "users.toml")]
    pub users_file: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// Directory for log files; stdout only when unset
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

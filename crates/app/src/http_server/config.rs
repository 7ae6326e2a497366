use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct Config {
    /// address the server binds to
    pub listen_addr: SocketAddr,
    /// level request traces are emitted at
    pub log_level: tracing::Level,
}

impl Config {
    pub fn new(listen_addr: SocketAddr, log_level: tracing::Level) -> Self {
        Self {
            listen_addr,
            log_level,
        }
    }
}

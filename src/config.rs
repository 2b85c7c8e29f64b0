//! Server configuration.

use clap::Parser;

/// Room-scoped chat relay server
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Username authorized to delete rooms
    #[arg(long, default_value = "admin")]
    pub admin: String,

    /// Messages replayed to a freshly joined connection
    #[arg(long, default_value_t = 50)]
    pub history_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::parse_from::<_, &str>([])
    }
}

//! Runtime configuration, read from command-line flags with environment fallbacks.

use clap::Parser;
use std::net::SocketAddr;

/// Default session lifetime: 30 days (seconds).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 24 * 3600;

#[derive(Debug, Clone, Parser)]
#[command(name = "cash-statements-backend", about = "Cash denomination statement service")]
pub struct Config {
    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:statements.db")]
    pub database_url: String,

    /// Address the HTTP server binds to
    #[arg(long = "bind", env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind_addr: SocketAddr,

    /// Origin allowed to call the API from a browser
    #[arg(long, env = "CORS_ORIGIN", default_value = "http://localhost:8080")]
    pub cors_origin: String,

    /// How long an issued session token stays valid
    #[arg(long, env = "SESSION_TTL_SECS", default_value_t = DEFAULT_SESSION_TTL_SECS)]
    pub session_ttl_secs: u64,

    /// Populate an empty denomination catalog with the standard yen set
    #[arg(
        long,
        env = "SEED_DENOMINATIONS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub seed_denominations: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

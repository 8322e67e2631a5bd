//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;

/// Public demo service exposing a compatible `/users` resource.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone, Parser)]
#[command(name = "user-list", about = "List, add, update and delete users with optimistic updates")]
pub struct Config {
    /// Base URL of the service that serves `/users`.
    #[arg(long, env = "USERS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Give up on a request after this many seconds.
    #[arg(long, env = "USERS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

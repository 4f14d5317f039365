use std::{env, net::SocketAddr};

use database::{DatabaseConnectionInfo, DEFAULT_DATABASE_URL};
use feed::DEFAULT_FEED_URL;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Settings of the `metro` binary, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub feed_url: String,
    pub bind_address: SocketAddr,
    /// Replace the stored network by the seed network on start.
    pub reset_on_start: bool,
}

impl Config {
    /// Unset variables take their defaults. Fails on a malformed
    /// `METRO_BIND_ADDRESS` or `METRO_RESET_ON_START`.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("METRO_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let feed_url = lookup("METRO_FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_owned());
        let bind_address = lookup("METRO_BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned())
            .parse()
            .map_err(|why| format!("invalid METRO_BIND_ADDRESS: {}", why))?;
        let reset_on_start = match lookup("METRO_RESET_ON_START").as_deref() {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => return Err(format!("invalid METRO_RESET_ON_START: {:?}", other)),
        };
        Ok(Self {
            database_url,
            feed_url,
            bind_address,
            reset_on_start,
        })
    }

    pub fn database_connection_info(&self) -> DatabaseConnectionInfo {
        DatabaseConnectionInfo::new(self.database_url.clone())
    }
}

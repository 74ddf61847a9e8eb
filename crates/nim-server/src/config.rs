//! Server configuration from the environment.

use anyhow::Context;
use nim_core::MatchRules;
use std::net::SocketAddr;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Rules every new session starts with
    pub rules: MatchRules,
}

impl ServerConfig {
    /// Read `SERVER_ADDR` and `NIM_SCRIPTED_DELAY_MS`
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(
            std::env::var("SERVER_ADDR").ok(),
            std::env::var("NIM_SCRIPTED_DELAY_MS").ok(),
        )
    }

    fn from_vars(addr: Option<String>, delay_ms: Option<String>) -> anyhow::Result<Self> {
        let addr: SocketAddr = addr
            .as_deref()
            .unwrap_or(DEFAULT_ADDR)
            .parse()
            .context("SERVER_ADDR is not a socket address")?;

        let mut rules = MatchRules::default();
        if let Some(delay) = delay_ms {
            rules.scripted_delay_ms = delay
                .trim()
                .parse()
                .context("NIM_SCRIPTED_DELAY_MS is not a number of milliseconds")?;
        }
        rules.validate()?;

        Ok(Self { addr, rules })
    }
}

use anyhow::{Context, Result};
use huddle_core::IceServerConfig;
use std::env;
use std::time::Duration;

pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";
pub const DEFAULT_STUN_ADDR_2: &str = "stun:stun1.l.google.com:19302";
pub const DEFAULT_STUN_ADDR_3: &str = "stun:stun2.l.google.com:19302";
pub const DEFAULT_STUN_ADDR_4: &str = "stun:stun3.l.google.com:19302";

/// Settings for a client engine.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub ice_servers: Vec<IceServerConfig>,
    /// Abort sessions still negotiating after this long. `None` waits forever.
    pub negotiation_timeout: Option<Duration>,
    /// Capacity of the command queue feeding the engine.
    pub command_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![IceServerConfig {
                urls: vec![
                    DEFAULT_STUN_ADDR.to_owned(),
                    DEFAULT_STUN_ADDR_2.to_owned(),
                    DEFAULT_STUN_ADDR_3.to_owned(),
                    DEFAULT_STUN_ADDR_4.to_owned(),
                ],
                username: None,
                credential: None,
            }],
            negotiation_timeout: None,
            command_buffer: 100,
        }
    }
}

impl ClientConfig {
    /// Reads `HUDDLE_*` variables, falling back to the defaults for anything unset.
    ///
    /// * `HUDDLE_STUN_URLS` - comma separated STUN urls, replaces the default set
    /// * `HUDDLE_TURN_URL`, `HUDDLE_TURN_USERNAME`, `HUDDLE_TURN_CREDENTIAL`
    /// * `HUDDLE_NEGOTIATION_TIMEOUT_MS`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(urls) = env::var("HUDDLE_STUN_URLS") {
            let urls: Vec<String> = urls
                .split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_owned)
                .collect();
            config.ice_servers = vec![IceServerConfig {
                urls,
                username: None,
                credential: None,
            }];
        }

        if let Ok(turn_url) = env::var("HUDDLE_TURN_URL") {
            config.ice_servers.push(IceServerConfig {
                urls: vec![turn_url],
                username: env::var("HUDDLE_TURN_USERNAME").ok(),
                credential: env::var("HUDDLE_TURN_CREDENTIAL").ok(),
            });
        }

        if let Ok(ms) = env::var("HUDDLE_NEGOTIATION_TIMEOUT_MS") {
            let ms: u64 = ms
                .parse()
                .context("HUDDLE_NEGOTIATION_TIMEOUT_MS must be a number of milliseconds")?;
            config.negotiation_timeout = Some(Duration::from_millis(ms));
        }

        Ok(config)
    }
}

//! Node configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::Context;
use merit_core::curve::DEFAULT_XP_DIVISOR;
use merit_core::reward::DEFAULT_UNIT_REWARD;
use merit_core::score::DEFAULT_MIN_TOKENS;

/// Runtime configuration for the node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Address the HTTP API binds to.
    pub bind_addr: SocketAddr,

    /// URL of the member directory page used for address resolution.
    pub directory_url: String,

    /// URL of the wallet bridge used for payment sending.
    pub wallet_url: String,

    /// The `K` in `level = floor(sqrt(xp / K))`.
    pub xp_divisor: u64,

    /// Smallest-unit payout per level reached.
    pub unit_reward: u64,

    /// Token floor below which activity scores zero.
    pub min_tokens: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5002)),
            directory_url: "https://1satsociety.com/show_users".to_string(),
            wallet_url: "http://127.0.0.1:5010".to_string(),
            xp_divisor: DEFAULT_XP_DIVISOR,
            unit_reward: DEFAULT_UNIT_REWARD,
            min_tokens: DEFAULT_MIN_TOKENS,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw.parse().with_context(|| format!("invalid {key}: {raw}")),
        Err(_) => Ok(default),
    }
}

impl NodeConfig {
    /// Build configuration from `MERIT_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let xp_divisor = env_or("MERIT_XP_DIVISOR", defaults.xp_divisor)?;
        if xp_divisor == 0 {
            anyhow::bail!("invalid MERIT_XP_DIVISOR: must be positive");
        }

        Ok(Self {
            bind_addr: env_or("MERIT_ADDR", defaults.bind_addr)?,
            directory_url: env_or("MERIT_DIRECTORY_URL", defaults.directory_url)?,
            wallet_url: env_or("MERIT_WALLET_URL", defaults.wallet_url)?,
            xp_divisor,
            unit_reward: env_or("MERIT_UNIT_REWARD", defaults.unit_reward)?,
            min_tokens: env_or("MERIT_MIN_TOKENS", defaults.min_tokens)?,
        })
    }
}

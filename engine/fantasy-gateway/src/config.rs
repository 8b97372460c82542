//! Configuration for the fantasy gateway

use crate::error::{GatewayError, GatewayResult};
use crate::models::UserId;
use roster_engine::RosterRules;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://nfl-fpl-backend.onrender.com";

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Root URL of the fantasy service API
    pub api_base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Account the session acts for, once registered
    pub user_id: Option<UserId>,

    /// Roster limits applied before submission
    pub rules: RosterRules,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            user_id: None,
            rules: RosterRules::default(),
        }
    }
}

impl GatewayConfig {
    /// Create config from environment variables (and a `.env` file if present)
    pub fn from_env() -> GatewayResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> GatewayResult<Self> {
        let mut config = Self::default();

        if let Some(api_base_url) = lookup("FANTASY_API_BASE_URL") {
            config.api_base_url = api_base_url.trim_end_matches('/').to_string();
        }

        if let Some(user_id) = lookup("FANTASY_USER_ID") {
            let id = user_id
                .parse::<u64>()
                .map_err(|_| GatewayError::invalid_config("Invalid FANTASY_USER_ID"))?;
            config.user_id = Some(UserId(id));
        }

        if let Some(timeout) = lookup("FANTASY_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout.parse::<u64>().map_err(|_| {
                GatewayError::invalid_config("Invalid FANTASY_REQUEST_TIMEOUT_SECS")
            })?;
        }

        if let Some(cap) = lookup("BUDGET_CAP") {
            let budget_cap = Decimal::from_str(&cap)
                .ok()
                .filter(|cap| *cap > Decimal::ZERO)
                .ok_or_else(|| GatewayError::invalid_config("Invalid BUDGET_CAP"))?;
            config.rules.budget_cap = budget_cap;
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The configured user, or a configuration error naming the variable to set
    pub fn require_user(&self) -> GatewayResult<UserId> {
        self.user_id.ok_or_else(|| GatewayError::invalid_config("FANTASY_USER_ID not set"))
    }
}

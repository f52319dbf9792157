//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Policy applied when a cash payment would drive an account balance
/// below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverdraftPolicy {
    /// Allow the debit; the balance goes negative.
    #[default]
    Allow,
    /// Refuse the debit and abort the payment.
    Reject,
}

/// Payment engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Overdraft policy for cash account debits.
    #[serde(default)]
    pub overdraft_policy: OverdraftPolicy,
    /// Base value for the payment voucher serial counter.
    #[serde(default)]
    pub payment_serial_base: i64,
    /// Base value for the check payment voucher serial counter.
    #[serde(default)]
    pub check_serial_base: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overdraft_policy: OverdraftPolicy::default(),
            payment_serial_base: 0,
            check_serial_base: 0,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FLEETPAY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_engine_config_defaults() {
        let engine = EngineConfig::default();
        assert_eq!(engine.overdraft_policy, OverdraftPolicy::Allow);
        assert_eq!(engine.payment_serial_base, 0);
        assert_eq!(engine.check_serial_base, 0);
    }

    #[test]
    fn test_overdraft_policy_deserialize() {
        let policy: OverdraftPolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(policy, OverdraftPolicy::Reject);
        let policy: OverdraftPolicy = serde_json::from_str("\"allow\"").unwrap();
        assert_eq!(policy, OverdraftPolicy::Allow);
    }
}

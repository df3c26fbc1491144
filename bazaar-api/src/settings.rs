//! SDK configuration for hosts that wire the clients from a file.

use anyhow::{Context, Result};
use bazaar_logger::LogConfig;
use serde::Deserialize;

/// The top-level SDK configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub api: ApiSettings,
    /// EVM RPC endpoint, when the host uses the EVM client.
    pub evm: Option<ChainSettings>,
    /// Solana RPC endpoint, when the host uses the Solana client.
    pub solana: Option<ChainSettings>,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Marketplace API connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiSettings {
    pub url: String,
    pub bearer_token: String,
}

/// One chain's RPC endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ChainSettings {
    pub rpc_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            url: "https://api.bazaar.example/graphql".to_string(),
            bearer_token: String::new(),
        }
    }
}

/// Loads the SDK configuration from a TOML file, with `BAZAAR__`-prefixed
/// environment variables overriding file values.
pub fn load_settings(path: &str) -> Result<Settings> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path))
        .add_source(config::Environment::with_prefix("BAZAAR").separator("__"));

    let settings: Settings = builder
        .build()
        .context(format!("Failed to build configuration from '{}'", path))?
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_toml_file() -> Result<()> {
        let path = std::env::temp_dir().join("bazaar-settings-test.toml");
        let mut file = std::fs::File::create(&path)?;
        writeln!(
            file,
            r#"
[api]
url = "https://api.example.com/graphql"
bearer-token = "token-1"

[solana]
rpc-url = "http://127.0.0.1:8899"

[log]
level = "debug"
"#
        )?;

        let settings = load_settings(path.to_str().unwrap())?;
        assert_eq!(settings.api.url, "https://api.example.com/graphql");
        assert_eq!(settings.api.bearer_token, "token-1");
        assert_eq!(settings.solana.unwrap().rpc_url, "http://127.0.0.1:8899");
        assert!(settings.evm.is_none());
        assert_eq!(settings.log.level, "debug");
        Ok(())
    }
}

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{
    filter::EnvFilter,
    fmt::{self, writer::BoxMakeWriter},
    prelude::*,
    Layer, Registry,
};

/// The SDK crates a dedicated `sdk_level` directive applies to.
const SDK_TARGETS: &[&str] = &[
    "bazaar_core",
    "bazaar_api",
    "bazaar_evm",
    "bazaar_solana",
];

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Plain,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    File,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogConfig {
    /// Base directive for everything, `info` when empty.
    #[serde(default)]
    pub level: String,
    /// Overrides `level` for the SDK crates only.
    #[serde(default)]
    pub sdk_level: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub output: LogOutput,
    /// Required when `output` is `file`.
    #[serde(default)]
    pub file_path: Option<String>,
}

impl LogConfig {
    /// The `EnvFilter` directive string: the base level followed by a
    /// per-crate directive for each SDK crate.
    fn directives(&self) -> String {
        let base = if self.level.is_empty() {
            "info"
        } else {
            self.level.as_str()
        };
        let sdk = self.sdk_level.as_deref().unwrap_or(base);
        let mut directives = base.to_string();
        for target in SDK_TARGETS {
            directives.push_str(&format!(",{target}={sdk}"));
        }
        directives
    }

    fn filter(&self) -> EnvFilter {
        // An explicit RUST_LOG takes precedence over the config file.
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directives()))
    }

    fn writer(&self) -> Result<BoxMakeWriter> {
        match self.output {
            LogOutput::Stdout => Ok(BoxMakeWriter::new(std::io::stdout)),
            LogOutput::File => {
                let file_path = self
                    .file_path
                    .as_deref()
                    .ok_or_else(|| anyhow!("log output is 'file' but 'file_path' is not set"))?;
                Ok(BoxMakeWriter::new(Arc::new(File::create(file_path)?)))
            }
        }
    }
}

pub fn init(config: &LogConfig) -> Result<()> {
    let layer = fmt::layer().with_writer(config.writer()?);
    let layer = match config.format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Plain => layer.pretty().boxed(),
    };
    Registry::default().with(config.filter()).with(layer).init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_default_to_info_everywhere() {
        assert_eq!(
            LogConfig::default().directives(),
            "info,bazaar_core=info,bazaar_api=info,bazaar_evm=info,bazaar_solana=info"
        );
    }

    #[test]
    fn sdk_level_only_touches_the_sdk_crates() {
        let config = LogConfig {
            level: "warn".to_string(),
            sdk_level: Some("debug".to_string()),
            ..LogConfig::default()
        };
        assert_eq!(
            config.directives(),
            "warn,bazaar_core=debug,bazaar_api=debug,bazaar_evm=debug,bazaar_solana=debug"
        );
    }

    #[test]
    fn file_output_requires_a_path() {
        let config = LogConfig {
            output: LogOutput::File,
            ..LogConfig::default()
        };
        assert!(config.writer().is_err());
    }
}

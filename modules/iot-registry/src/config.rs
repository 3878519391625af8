//! Module configuration.
//!
//! Layered with `figment`: built-in defaults, then a YAML file, then
//! `IOT_REGISTRY__*` environment variables (`__` separates nested keys, e.g.
//! `IOT_REGISTRY__SERVICE__CACHE_TTL=10s`).

use std::path::Path;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use modkit_db::ConnectOpts;
use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

pub const ENV_PREFIX: &str = "IOT_REGISTRY__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IotRegistryConfig {
    pub database: DatabaseConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub dsn: String,
    pub max_conns: Option<u32>,
    pub min_conns: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: "sqlite::memory:".to_owned(),
            // Every connection to `sqlite::memory:` opens its own database.
            max_conns: Some(1),
            min_conns: None,
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn connect_opts(&self) -> ConnectOpts {
        ConnectOpts {
            max_conns: self.max_conns,
            min_conns: self.min_conns,
            ..ConnectOpts::default()
        }
    }
}

impl IotRegistryConfig {
    /// Defaults, then `path`, then the environment.
    ///
    /// # Errors
    ///
    /// If the file cannot be parsed or a value has the wrong shape.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        Self::from_figment(&Self::figment().merge(Yaml::file(path)))
            .with_context(|| format!("loading iot-registry config from {}", path.display()))
    }

    /// Defaults overridden by the environment only.
    ///
    /// # Errors
    ///
    /// If an environment value has the wrong shape.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_figment(&Self::figment()).context("loading iot-registry config from env")
    }

    /// Extract from an arbitrary figment, layering the environment on top.
    ///
    /// # Errors
    ///
    /// If extraction fails.
    pub fn from_figment(figment: &Figment) -> anyhow::Result<Self> {
        let cfg = figment
            .clone()
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract::<Self>()?;
        Ok(cfg)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }
}

/// `Duration` as a humantime string (`"250ms"`, `"2s"`).
pub(crate) mod humantime_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::Duration;

    use figment::Jail;

    use super::*;

    fn parse(yaml: &str) -> IotRegistryConfig {
        let parsed: Result<IotRegistryConfig, _> = serde_saphyr::from_str(yaml);
        match parsed {
            Ok(cfg) => cfg,
            Err(e) => panic!("failed to parse config: {e}"),
        }
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg = parse("service:\n  cache_ttl: 10s\n");
        assert_eq!(cfg.service.cache_ttl, Duration::from_secs(10));
        assert_eq!(cfg.service.decision_timeout, Duration::from_secs(2));
        assert_eq!(cfg.database, DatabaseConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: Result<IotRegistryConfig, _> =
            serde_saphyr::from_str("service:\n  cache_tll: 10s\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn malformed_duration_is_rejected() {
        let parsed: Result<IotRegistryConfig, _> =
            serde_saphyr::from_str("service:\n  storage_timeout: soon\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "registry.yaml",
                "database:\n  dsn: sqlite://registry.db\nservice:\n  cache_ttl: 1m\n  cache_key_prefix: \"edge:\"\n",
            )?;
            jail.set_env("IOT_REGISTRY__SERVICE__CACHE_TTL", "5s");

            let cfg = IotRegistryConfig::load("registry.yaml")
                .map_err(|e| figment::Error::from(e.to_string()))?;

            assert_eq!(cfg.database.dsn, "sqlite://registry.db");
            assert_eq!(cfg.service.cache_ttl, Duration::from_secs(5));
            assert_eq!(cfg.service.cache_key_prefix, "edge:");
            assert_eq!(cfg.database.max_conns, Some(1));
            Ok(())
        });
    }

    #[test]
    fn missing_file_keeps_defaults() {
        Jail::expect_with(|_| {
            let cfg = IotRegistryConfig::load("absent.yaml")
                .map_err(|e| figment::Error::from(e.to_string()))?;
            assert_eq!(cfg, IotRegistryConfig::default());
            Ok(())
        });
    }
}

//! INI file configuration adapter with environment overrides.
//!
//! A variable named `SCALPER_<SECTION>_<KEY>` overrides `[section] key` from
//! the file. Section names never contain underscores, so the first `_` after
//! the prefix separates section from key: `SCALPER_RISK_STOP_PERCENT` maps to
//! `[risk] stop_percent`.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::collections::HashMap;
use std::path::Path;

pub const ENV_PREFIX: &str = "SCALPER";

pub struct FileConfigAdapter {
    config: Ini,
    overrides: HashMap<(String, String), String>,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self::with_ini(config))
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self::with_ini(config))
    }

    fn with_ini(config: Ini) -> Self {
        Self {
            config,
            overrides: HashMap::new(),
        }
    }

    /// Applies `SCALPER_*` variables from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(ENV_PREFIX, std::env::vars())
    }

    /// Applies overrides from any `(name, value)` source. Names not starting
    /// with `<prefix>_` are ignored.
    pub fn with_overrides<I>(mut self, prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix = format!("{}_", prefix.to_uppercase());
        for (name, value) in vars {
            let Some(rest) = name.strip_prefix(&prefix) else {
                continue;
            };
            let Some((section, key)) = rest.split_once('_') else {
                continue;
            };
            if section.is_empty() || key.is_empty() {
                continue;
            }
            self.overrides
                .insert((section.to_lowercase(), key.to_lowercase()), value);
        }
        self
    }

    fn lookup(&self, section: &str, key: &str) -> Option<String> {
        self.overrides
            .get(&(section.to_lowercase(), key.to_lowercase()))
            .cloned()
            .or_else(|| self.config.get(section, key))
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.lookup(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.lookup(section, key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.lookup(section, key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.lookup(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}

//! Scope configuration loaded from a TOML file and `REMUT_*` variables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use remut_mutate::{OptionsProvider, RequestOptions, Scope};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {0} does not exist")]
    Missing(PathBuf),
    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),
}

/// Ambient settings for every mutation the CLI sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root base URL of the scope.
    pub base: String,
    pub headers: BTreeMap<String, String>,
    pub timeout_secs: Option<u64>,
    /// Environment variable holding a bearer token. Read again on every
    /// request, never cached.
    pub token_env: Option<String>,
}

impl Config {
    const FILE_NAME: &str = ".remut.toml";
    const ENV_PREFIX: &str = "REMUT_";

    /// Load `path` (or `~/.remut.toml` when it exists), then overlay
    /// `REMUT_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) if !path.exists() => return Err(ConfigError::Missing(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        };
        Self::figment(file.as_deref()).extract().map_err(|e| Box::new(e).into())
    }

    fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::new();
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(Self::ENV_PREFIX))
    }

    pub fn default_path() -> Option<PathBuf> { home::home_dir().map(|h| h.join(Self::FILE_NAME)) }

    /// Root scope carrying the configured ambient options. `root` replaces
    /// the configured base when given.
    pub fn scope(&self, root: Option<&str>) -> Scope {
        Scope::root(root.unwrap_or(&self.base)).with_options(self.options_provider())
    }

    fn options_provider(&self) -> OptionsProvider {
        let mut options = RequestOptions::default();
        for (name, value) in &self.headers {
            options.headers.insert(name, value.clone());
        }
        options.timeout = self.timeout_secs.map(Duration::from_secs);

        let Some(var) = self.token_env.clone() else {
            return OptionsProvider::Static(options);
        };
        OptionsProvider::dynamic(move || {
            let token = std::env::var(&var).map_err(|e| format!("{var}: {e}"))?;
            Ok(options.clone().bearer(token))
        })
    }
}

use std::fs;
use std::time::Duration;

use camino::Utf8PathBuf;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::domain::Endpoint;
use crate::error::CatalogError;

pub const DEFAULT_BASE_URL: &str = "https://groupietrackers.herokuapp.com/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const CONFIG_FILE_NAME: &str = "groupie-catalog.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub endpoints: EndpointPaths,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub artists: String,
    pub locations: String,
    pub dates: String,
    pub relation: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            artists: "/artists".to_string(),
            locations: "/locations".to_string(),
            dates: "/dates".to_string(),
            relation: "/relation".to_string(),
        }
    }
}

impl EndpointPaths {
    pub fn path(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Artists => &self.artists,
            Endpoint::Locations => &self.locations,
            Endpoint::Dates => &self.dates,
            Endpoint::Relation => &self.relation,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub endpoints: EndpointPaths,
    pub source_path: Option<Utf8PathBuf>,
}

impl ResolvedConfig {
    pub fn url(&self, endpoint: Endpoint) -> String {
        let path = self.endpoints.path(endpoint);
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            endpoints: EndpointPaths::default(),
            source_path: None,
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the explicit `path` if given, otherwise the first config file
    /// found among [`candidate_paths`], otherwise built-in defaults.
    pub fn resolve(
        path: Option<&str>,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, CatalogError> {
        let config_path = match path {
            Some(path) => Some(Utf8PathBuf::from(path)),
            None => candidate_paths()
                .into_iter()
                .find(|candidate| candidate.as_std_path().is_file()),
        };

        let mut config = match &config_path {
            Some(config_path) => {
                tracing::debug!(path = %config_path, "loading config file");
                let content = fs::read_to_string(config_path.as_std_path())
                    .map_err(|_| CatalogError::ConfigRead(config_path.clone().into()))?;
                serde_json::from_str::<Config>(&content)
                    .map_err(|err| CatalogError::ConfigParse(err.to_string()))?
            }
            None => Config::default(),
        };

        if let Some(base_url) = overrides.base_url {
            config.base_url = Some(base_url);
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            config.timeout_secs = Some(timeout_secs);
        }

        let mut resolved = Self::resolve_config(config)?;
        resolved.source_path = config_path;
        Ok(resolved)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, CatalogError> {
        let base_url = config
            .base_url
            .map(|url| url.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CatalogError::InvalidConfig(format!(
                "base_url must be an http(s) URL: {base_url}"
            )));
        }

        let timeout_secs = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CatalogError::InvalidConfig(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(ResolvedConfig {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            user_agent: config.user_agent.unwrap_or_else(default_user_agent),
            endpoints: config.endpoints,
            source_path: None,
        })
    }
}

/// `./groupie-catalog.json`, then `<config dir>/groupie-catalog/config.json`.
pub fn candidate_paths() -> Vec<Utf8PathBuf> {
    let mut paths = vec![Utf8PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(path) = BaseDirs::new().and_then(|dirs| {
        Utf8PathBuf::from_path_buf(dirs.config_dir().join("groupie-catalog").join("config.json"))
            .ok()
    }) {
        paths.push(path);
    }
    paths
}

pub fn default_user_agent() -> String {
    format!("groupie-catalog/{}", env!("CARGO_PKG_VERSION"))
}

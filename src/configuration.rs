use ini::Ini;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = ".odcli";
pub const SYSTEM_CONFIGURATION_FILE: &str = "/etc/opendrive-cli.conf";
pub const CONFIGURATION_FILE_ENV: &str = "ODCLI_CONFIG";

const SECTION_GLOBAL: &str = "global";
const KEY_USER: &str = "user";
const KEY_PASSWORD: &str = "password";
const KEY_API_URL: &str = "api_url";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to load configuration data from {path:?}, because of: {cause}")]
    FailedToLoadData { path: PathBuf, cause: ini::Error },
    #[error("failed to parse configuration data, because of: {0}")]
    FailedToParseData(#[from] ini::ParseError),
    #[error("invalid value for property {name:?}: {value}")]
    InvalidPropertyValue { name: String, value: String },
    #[error("Username or password not set")]
    MissingCredentials,
}

/// Username and password used to open a session
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Defaults read from the `[global]` section of the configuration file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configuration {
    user: Option<String>,
    password: Option<String>,
    api_url: Option<Url>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

impl Configuration {
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn api_url(&self) -> Option<&Url> {
        self.api_url.as_ref()
    }

    /// Files checked in order: `ODCLI_CONFIG`, `~/.odcli`, then the system file.
    pub fn candidate_paths() -> Vec<PathBuf> {
        Self::candidate_paths_from(
            std::env::var_os(CONFIGURATION_FILE_ENV).map(PathBuf::from),
            dirs::home_dir(),
        )
    }

    fn candidate_paths_from(env_path: Option<PathBuf>, home: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        paths.extend(env_path.filter(|p| !p.as_os_str().is_empty()));
        if let Some(home) = home {
            paths.push(home.join(DEFAULT_CONFIGURATION_FILE_NAME));
        }
        paths.push(PathBuf::from(SYSTEM_CONFIGURATION_FILE));
        paths
    }

    /// Load the first configuration file that exists, or an empty configuration.
    pub fn load_default() -> Result<Configuration, ConfigurationError> {
        Self::load_first_existing(&Self::candidate_paths())
    }

    fn load_first_existing(paths: &[PathBuf]) -> Result<Configuration, ConfigurationError> {
        match paths.iter().find(|p| p.is_file()) {
            Some(path) => Self::load_from_file(path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Configuration::default())
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Configuration, ConfigurationError> {
        debug!("Loading configuration from {}...", path.display());
        let ini = Ini::load_from_file(path).map_err(|cause| ConfigurationError::FailedToLoadData {
            path: path.to_path_buf(),
            cause,
        })?;
        Self::from_ini(&ini)
    }

    pub fn load_from_str(content: &str) -> Result<Configuration, ConfigurationError> {
        Self::from_ini(&Ini::load_from_str(content)?)
    }

    fn from_ini(ini: &Ini) -> Result<Configuration, ConfigurationError> {
        let Some(global) = ini.section(Some(SECTION_GLOBAL)) else {
            return Ok(Configuration::default());
        };

        let api_url = match non_empty(global.get(KEY_API_URL)) {
            Some(value) => Some(Url::parse(&value).map_err(|_| {
                ConfigurationError::InvalidPropertyValue {
                    name: KEY_API_URL.to_string(),
                    value,
                }
            })?),
            None => None,
        };

        Ok(Configuration {
            user: non_empty(global.get(KEY_USER)),
            password: non_empty(global.get(KEY_PASSWORD)),
            api_url,
        })
    }

    /// Command line values win over the configuration file. Empty values count as unset.
    pub fn resolve_credentials(
        &self,
        user: Option<&str>,
        password: Option<&str>,
    ) -> Result<Credentials, ConfigurationError> {
        let username = non_empty(user).or_else(|| self.user.clone());
        let password = non_empty(password).or_else(|| self.password.clone());

        match (username, password) {
            (Some(username), Some(password)) => Ok(Credentials { username, password }),
            _ => Err(ConfigurationError::MissingCredentials),
        }
    }
}

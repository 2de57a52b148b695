use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Construction-time settings of a [`crate::git::GitAdapter`].
///
/// The adapter never mutates these after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Used whenever a request carries no explicit path.
    pub working_dir: PathBuf,
    /// Executable invoked for every operation.
    pub git_program: String,
    /// Default per-call timeout applied by the CLI when building contexts.
    /// Stored as whole seconds; `validate` rejects anything finer.
    #[serde(with = "optional_secs")]
    pub timeout: Option<Duration>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            git_program: "git".to_string(),
            timeout: None,
        }
    }
}

impl AdapterConfig {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self::default().with_working_dir(working_dir)
    }

    /// An empty path keeps the current default.
    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        if !working_dir.as_os_str().is_empty() {
            self.working_dir = working_dir;
        }
        self
    }

    pub fn with_git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_toml_str(raw: &str, origin: &str) -> ConfigResult<Self> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&raw, &path.display().to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.working_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                message: "Working directory cannot be empty".to_string(),
            });
        }

        if self.git_program.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "Git program cannot be empty".to_string(),
            });
        }

        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                return Err(ConfigError::Invalid {
                    message: "Timeout must be greater than 0".to_string(),
                });
            }
            if timeout.subsec_nanos() != 0 {
                return Err(ConfigError::Invalid {
                    message: format!("Timeout must be whole seconds, got {:?}", timeout),
                });
            }
        }

        Ok(())
    }
}

/// Timeouts are written as whole seconds in config files. Sub-second parts
/// are dropped on write, which `AdapterConfig::validate` rules out.
mod optional_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&duration.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}

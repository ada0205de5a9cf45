//! Locating and reading the CLI's TOML configuration.
//!
//! Without `--config`, the first existing file among the implicit sources
//! wins; if there is none, defaults apply.

use std::{
    fs, io, iter,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use diagrammar::{DiagrammarError, config::AppConfig};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for DiagrammarError {
    fn from(err: ConfigError) -> Self {
        DiagrammarError::Config(err.to_string())
    }
}

/// Where a configuration file came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// Given on the command line; must exist.
    Explicit(PathBuf),
    /// `diagrammar/config.toml` under the working directory.
    Project(PathBuf),
    /// The platform config directory.
    Platform(PathBuf),
}

impl ConfigSource {
    fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Project(path) | Self::Platform(path) => path,
        }
    }

    fn origin(&self) -> &'static str {
        match self {
            Self::Explicit(_) => "explicit",
            Self::Project(_) => "project",
            Self::Platform(_) => "platform",
        }
    }

    fn load(&self) -> Result<AppConfig, DiagrammarError> {
        let path = self.path();
        info!(origin = self.origin(), path:? = path; "Loading configuration");

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::MissingFile(path.to_path_buf()).into());
            }
            Err(err) => return Err(err.into()),
        };

        toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()).into())
    }
}

/// Sources consulted when no explicit path is given, in priority order.
fn implicit_sources() -> impl Iterator<Item = ConfigSource> {
    let project = ConfigSource::Project(Path::new("diagrammar").join(CONFIG_FILE));
    let platform = ProjectDirs::from("com", "diagrammar", "diagrammar")
        .map(|dirs| ConfigSource::Platform(dirs.config_dir().join(CONFIG_FILE)));
    if platform.is_none() {
        debug!("No platform config directory on this system");
    }

    iter::once(project).chain(platform)
}

/// Load the configuration for this run.
///
/// # Errors
///
/// Returns [`DiagrammarError::Config`] if an explicit path does not exist or
/// any chosen file is not valid configuration TOML.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, DiagrammarError> {
    if let Some(path) = explicit_path {
        return ConfigSource::Explicit(path.as_ref().to_path_buf()).load();
    }

    match implicit_sources().find(|source| source.path().is_file()) {
        Some(source) => source.load(),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

//! User configuration at ~/.config/calcut/config.toml.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalcutError, CalcutResult};
use crate::split::ModeKind;

static DEFAULT_OUTPUT_DIR: &str = "./split_output";

const ENV_PREFIX: &str = "CALCUT";

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Defaults for `calcut split`. Command-line flags take precedence.
///
/// Values can also come from `CALCUT_*` environment variables, e.g.
/// `CALCUT_MAX_SIZE=1M`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcutConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Size budget per file, e.g. "1M" or "512K".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ModeKind>,
}

impl Default for CalcutConfig {
    fn default() -> Self {
        CalcutConfig {
            output_dir: default_output_dir(),
            prefix: None,
            max_size: None,
            mode: None,
        }
    }
}

impl CalcutConfig {
    pub fn config_path() -> CalcutResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalcutError::Config("Could not determine config directory".into()))?
            .join("calcut");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path. A missing file is not an error.
    pub fn load() -> CalcutResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CalcutResult<Self> {
        Self::load_layered(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// File values first, then `env` on top.
    fn load_layered(path: &Path, env: Environment) -> CalcutResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| CalcutError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalcutError::Config(e.to_string()))
    }

    /// Output directory with a leading `~` expanded.
    pub fn expanded_output_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.output_dir.to_string_lossy()).into_owned();
        PathBuf::from(expanded)
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalcutResult<()> {
        let contents = format!(
            "\
# calcut configuration

# Where split files are written:
# output_dir = \"{}\"

# Prefix for generated filenames:
# prefix = \"work\"

# Maximum size per file (enables size-bounded splitting):
# max_size = \"1M\"

# Splitting strategy, \"per-event\" or \"by-size\":
# mode = \"per-event\"
",
            DEFAULT_OUTPUT_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalcutError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalcutError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

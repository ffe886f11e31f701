use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DEFAULT_CLOSE_ARG;
use crate::DEFAULT_OPEN_ARG;
use crate::LoreError;
use crate::LoreResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["lore.toml", ".lore.toml", ".config/lore.toml"];

/// Default location of the data file, relative to the project root.
pub const DEFAULT_DATA_FILE: &str = "data.toml";

/// Configuration loaded from a `lore.toml` file.
///
/// ```toml
/// data_file = "data.toml"
///
/// [defaults]
/// open_arg = "{{"
/// close_arg = "}}"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LoreConfig {
	/// Where matchers and presets are stored, relative to the project root.
	#[serde(default = "default_data_file")]
	pub data_file: PathBuf,
	/// Delimiters used for new matchers unless given explicitly.
	#[serde(default)]
	pub defaults: DefaultsConfig,
}

/// Delimiters applied to matchers created without explicit ones.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
	#[serde(default = "default_open_arg")]
	pub open_arg: String,
	#[serde(default = "default_close_arg")]
	pub close_arg: String,
}

impl Default for DefaultsConfig {
	fn default() -> Self {
		Self {
			open_arg: default_open_arg(),
			close_arg: default_close_arg(),
		}
	}
}

impl Default for LoreConfig {
	fn default() -> Self {
		Self {
			data_file: default_data_file(),
			defaults: DefaultsConfig::default(),
		}
	}
}

fn default_data_file() -> PathBuf {
	PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_open_arg() -> String {
	DEFAULT_OPEN_ARG.to_string()
}

fn default_close_arg() -> String {
	DEFAULT_CLOSE_ARG.to_string()
}

impl LoreConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> LoreResult<Option<LoreConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: LoreConfig =
			toml::from_str(&content).map_err(|e| LoreError::ConfigParse(e.to_string()))?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to defaults.
	pub fn load_or_default(root: &Path) -> LoreResult<LoreConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// Absolute path of the data file for a project rooted at `root`.
	pub fn data_path(&self, root: &Path) -> PathBuf {
		root.join(&self.data_file)
	}
}

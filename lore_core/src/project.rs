use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::LoreConfig;
use crate::LoreEngine;
use crate::LoreError;
use crate::LoreMatcher;
use crate::LoreResult;
use crate::MatcherEntry;
use crate::MatcherRegistry;
use crate::PresetOverlay;

/// The contents of a data file.
///
/// ```toml
/// [[lores.self-effect]]
/// template = "Self effect: {{effect}}"
///
/// [[lores.arrow]]
/// open-arg = "<"
/// close-arg = ">"
/// templates = ["Name: <name>", "Cooldown: <cooldown>"]
///
/// [presets.arrow]
/// cooldown = "20"
/// ```
///
/// Ids are stored with dashes and underscores swapped, so the snake_case id
/// `self_effect` appears as `self-effect`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoreData {
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub lores: BTreeMap<String, Vec<MatcherEntry>>,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub presets: BTreeMap<String, BTreeMap<String, String>>,
}

impl LoreData {
	/// Read a data file. A missing file is empty data.
	pub fn load(path: &Path) -> LoreResult<Self> {
		if !path.is_file() {
			tracing::debug!(path = %path.display(), "no data file, starting empty");
			return Ok(Self::default());
		}

		let content = std::fs::read_to_string(path)?;
		toml::from_str(&content).map_err(|e| {
			LoreError::DataParse {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		})
	}

	/// Write the data file, replacing it atomically.
	///
	/// Empty template lines are written as they are but dropped again by
	/// [`LoreData::into_engine`], so a matcher containing them does not
	/// survive a reload unchanged.
	pub fn save(&self, path: &Path) -> LoreResult<()> {
		let payload =
			toml::to_string_pretty(self).map_err(|e| LoreError::DataSerialize(e.to_string()))?;

		if let Some(parent) = path.parent() {
			if !parent.as_os_str().is_empty() {
				std::fs::create_dir_all(parent)?;
			}
		}

		let temp_path = path.with_extension(format!("toml.tmp-{}", std::process::id()));
		std::fs::write(&temp_path, payload)?;
		if let Err(e) = std::fs::rename(&temp_path, path) {
			let _ = std::fs::remove_file(&temp_path);
			return Err(e.into());
		}

		tracing::debug!(path = %path.display(), "saved lore data");
		Ok(())
	}

	/// Compile the stored matchers and collect the presets.
	///
	/// Entries without any template string are skipped with a warning. An
	/// entry that fails to compile fails the whole load.
	pub fn into_engine(self) -> LoreResult<LoreEngine> {
		let mut registry = MatcherRegistry::new();
		for (key, entries) in self.lores {
			let id = swap_underscores_and_dashes(&key);
			for entry in entries {
				if entry.template_strings().is_empty() {
					tracing::warn!(%id, "skipping lore matcher without templates");
					continue;
				}

				let matcher = LoreMatcher::try_from(entry).map_err(|e| {
					LoreError::InvalidEntry {
						id: id.clone(),
						source: Box::new(e),
					}
				})?;
				registry.add(id.as_str(), matcher);
			}
		}

		let mut presets = PresetOverlay::new();
		for (key, values) in self.presets {
			let id = swap_underscores_and_dashes(&key);
			for (name, value) in values {
				presets.add(id.as_str(), name, value);
			}
		}

		Ok(LoreEngine::new(registry, presets))
	}

	/// The stored form of `engine`.
	pub fn from_engine(engine: &LoreEngine) -> Self {
		let lores = engine
			.registry
			.iter()
			.map(|(id, matchers)| {
				(
					swap_underscores_and_dashes(id),
					matchers.iter().map(LoreMatcher::to_entry).collect(),
				)
			})
			.collect();
		let presets = engine
			.presets
			.iter()
			.map(|(id, values)| (swap_underscores_and_dashes(id), values.clone()))
			.collect();

		Self { lores, presets }
	}
}

/// Swap every `_` with `-` and vice versa. Config keys prefer dashes while
/// stat ids use underscores.
pub fn swap_underscores_and_dashes(original: &str) -> String {
	original
		.chars()
		.map(|ch| {
			match ch {
				'-' => '_',
				'_' => '-',
				other => other,
			}
		})
		.collect()
}

/// A loaded project: its root, config, and the engine built from its data
/// file.
#[derive(Debug, Clone)]
pub struct ProjectContext {
	pub root: PathBuf,
	pub config: LoreConfig,
	pub engine: LoreEngine,
}

impl ProjectContext {
	/// Absolute path of the project's data file.
	pub fn data_path(&self) -> PathBuf {
		self.config.data_path(&self.root)
	}

	/// Persist the engine back to the data file.
	pub fn save(&self) -> LoreResult<()> {
		LoreData::from_engine(&self.engine).save(&self.data_path())
	}
}

/// Load the config and data file of the project at `root`.
pub fn load_project(root: &Path) -> LoreResult<ProjectContext> {
	let config = LoreConfig::load_or_default(root)?;
	let data_path = config.data_path(root);
	let engine = LoreData::load(&data_path)?.into_engine()?;

	Ok(ProjectContext {
		root: root.to_path_buf(),
		config,
		engine,
	})
}

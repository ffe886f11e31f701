use std::collections::BTreeMap;

use crate::Record;

/// Default values merged underneath every match for a stat id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetOverlay {
	presets: BTreeMap<String, BTreeMap<String, String>>,
}

impl PresetOverlay {
	pub fn new() -> Self {
		Self::default()
	}

	/// Ids with at least one preset, sorted.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.presets.keys().map(String::as_str)
	}

	/// Presets of `id`; `None` if there are none.
	pub fn get(&self, id: &str) -> Option<&BTreeMap<String, String>> {
		self.presets.get(id)
	}

	/// Presets of `id` as the base record for matching.
	pub fn record(&self, id: &str) -> Record {
		self.presets.get(id).cloned().map(Record::from).unwrap_or_default()
	}

	pub fn add(&mut self, id: impl Into<String>, key: impl Into<String>, value: impl Into<String>) {
		self.presets
			.entry(id.into())
			.or_default()
			.insert(key.into(), value.into());
	}

	/// Remove every preset of `id`, returning whether any existed.
	pub fn clear(&mut self, id: &str) -> bool {
		self.presets.remove(id).is_some()
	}

	pub fn is_empty(&self) -> bool {
		self.presets.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> {
		self.presets.iter().map(|(id, values)| (id.as_str(), values))
	}
}

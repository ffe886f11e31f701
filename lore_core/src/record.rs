use std::collections::BTreeMap;

use derive_more::Deref;
use derive_more::DerefMut;
use serde::Deserialize;
use serde::Serialize;

/// Structured data recovered from (or rendered into) lore text.
///
/// Keys are dotted paths such as `effect.level`, values are always strings.
/// Interpreting a value as a number or a boolean is up to the stat consuming
/// the record. Keys iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deref, DerefMut, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
	/// An empty record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set `key` to `value`, returning the record for chaining.
	#[must_use]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.insert(key.into(), value.into());
		self
	}

	/// Overlay `other` onto this record. A value that is empty never
	/// overwrites, so a line that matched without supplying a value keeps the
	/// preset default underneath it.
	pub fn merge_non_empty(&mut self, other: Record) {
		for (key, value) in other.0 {
			if !value.is_empty() {
				self.0.insert(key, value);
			}
		}
	}

	pub fn into_inner(self) -> BTreeMap<String, String> {
		self.0
	}
}

impl From<BTreeMap<String, String>> for Record {
	fn from(value: BTreeMap<String, String>) -> Self {
		Self(value)
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

impl IntoIterator for Record {
	type IntoIter = std::collections::btree_map::IntoIter<String, String>;
	type Item = (String, String);

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

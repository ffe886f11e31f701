use std::collections::BTreeMap;

use crate::LoreMatcher;

/// Matchers keyed by stat id, in registration order per id.
///
/// The position of a matcher inside its id's list is stable until the id is
/// cleared, so commands can address a matcher as `id` + index. Ids are not
/// validated here; snake_case is a convention enforced by callers.
///
/// The registry is not synchronized. Wrap it (or the
/// [`LoreEngine`](crate::LoreEngine) that owns it) in a lock if it must be
/// shared between threads.
#[derive(Debug, Clone, Default)]
pub struct MatcherRegistry {
	matchers: BTreeMap<String, Vec<LoreMatcher>>,
}

impl MatcherRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Ids with at least one matcher, sorted.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.matchers.keys().map(String::as_str)
	}

	/// Matchers registered for `id`. Unknown ids yield an empty slice.
	pub fn get(&self, id: &str) -> &[LoreMatcher] {
		self.matchers
			.get(id)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	/// The matcher at `index` for `id`.
	pub fn get_at(&self, id: &str, index: usize) -> Option<&LoreMatcher> {
		self.get(id).get(index)
	}

	/// Append a matcher to the list of `id`.
	pub fn add(&mut self, id: impl Into<String>, matcher: LoreMatcher) {
		let id = id.into();
		tracing::debug!(%id, lines = matcher.len(), "adding lore matcher");
		self.matchers.entry(id).or_default().push(matcher);
	}

	/// Remove every matcher of `id`, returning what was removed.
	pub fn clear(&mut self, id: &str) -> Vec<LoreMatcher> {
		let removed = self.matchers.remove(id).unwrap_or_default();
		tracing::debug!(%id, removed = removed.len(), "cleared lore matchers");
		removed
	}

	/// Remove every matcher of every id.
	pub fn clear_all(&mut self) {
		self.matchers.clear();
	}

	pub fn is_empty(&self) -> bool {
		self.matchers.is_empty()
	}

	/// Iterate over each id with its matchers.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[LoreMatcher])> {
		self.matchers
			.iter()
			.map(|(id, matchers)| (id.as_str(), matchers.as_slice()))
	}
}

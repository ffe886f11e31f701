use crate::LoreError;
use crate::LoreMatcher;
use crate::LoreResult;
use crate::MatcherRegistry;
use crate::PresetOverlay;
use crate::Record;

/// The matchers and presets of every stat, together.
///
/// This is what stats hold on to: build it once (usually through
/// [`ProjectContext`](crate::ProjectContext)), hand it to whatever needs to
/// read lore, and drop it when the stats are disabled. It performs no I/O and
/// no locking.
#[derive(Debug, Clone, Default)]
pub struct LoreEngine {
	pub registry: MatcherRegistry,
	pub presets: PresetOverlay,
}

/// Lore lines rendered by [`LoreEngine::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedLore {
	/// One rendered line per template, in template order.
	pub lines: Vec<String>,
	/// Argument names the caller did not supply. They were rendered as
	/// empty strings.
	pub ignored: Vec<String>,
}

impl LoreEngine {
	pub fn new(registry: MatcherRegistry, presets: PresetOverlay) -> Self {
		Self { registry, presets }
	}

	/// Match `lines` against every matcher registered for `id`.
	///
	/// Matchers run independently in registration order; each contributes
	/// one record per matching window, merged on top of the presets of `id`.
	pub fn match_lore<S: AsRef<str>>(&self, id: &str, lines: &[S]) -> Vec<Record> {
		let presets = self.presets.record(id);
		let records: Vec<Record> = self
			.registry
			.get(id)
			.iter()
			.flat_map(|matcher| matcher.match_lines(lines, &presets))
			.collect();
		tracing::debug!(%id, lines = lines.len(), records = records.len(), "matched lore");
		records
	}

	/// The matcher at `index` for `id`.
	pub fn matcher(&self, id: &str, index: usize) -> LoreResult<&LoreMatcher> {
		self.registry
			.get_at(id, index)
			.ok_or_else(|| LoreError::NoSuchMatcher {
				id: id.to_string(),
				index: index.to_string(),
			})
	}

	/// Like [`LoreEngine::matcher`], but with the index as typed by a user.
	pub fn matcher_by_str(&self, id: &str, index: &str) -> LoreResult<&LoreMatcher> {
		let no_such_matcher = || LoreError::NoSuchMatcher {
			id: id.to_string(),
			index: index.to_string(),
		};
		let index: usize = index.parse().map_err(|_| no_such_matcher())?;
		self.registry.get_at(id, index).ok_or_else(no_such_matcher)
	}

	/// Render the matcher at `index` for `id` with `args`.
	///
	/// Arguments missing from `args` are reported in
	/// [`AppliedLore::ignored`] and rendered empty, so every template yields
	/// a line.
	pub fn apply(&self, id: &str, index: usize, args: &Record) -> LoreResult<AppliedLore> {
		Ok(apply_matcher(self.matcher(id, index)?, args))
	}
}

/// Render every template of `matcher`, filling missing arguments with empty
/// strings.
pub fn apply_matcher(matcher: &LoreMatcher, args: &Record) -> AppliedLore {
	let mut data = args.clone();
	let mut applied = AppliedLore::default();

	for template in matcher.templates() {
		for name in template.arg_names() {
			if !data.contains_key(name) {
				applied.ignored.push(name.to_string());
				data.insert(name.to_string(), String::new());
			}
		}

		if let Some(line) = template.render(&data) {
			applied.lines.push(line);
		}
	}

	applied
}

/// Parse `key=value` arguments into a record.
///
/// The key must be non-empty and may not repeat. Everything after the first
/// `=` is the value, which may be empty.
pub fn parse_assignments<S: AsRef<str>>(arguments: &[S]) -> LoreResult<Record> {
	let mut record = Record::new();
	for argument in arguments {
		let argument = argument.as_ref();
		let Some((key, value)) = argument.split_once('=') else {
			return Err(LoreError::InvalidAssignment(argument.to_string()));
		};

		if key.is_empty() {
			return Err(LoreError::InvalidAssignment(argument.to_string()));
		}

		if record.contains_key(key) {
			return Err(LoreError::DuplicateAssignment {
				argument: argument.to_string(),
				key: key.to_string(),
			});
		}

		record.insert(key.to_string(), value.to_string());
	}

	Ok(record)
}

/// Check that `id` is snake_case: non-empty, lowercase ASCII letters, digits
/// and underscores.
pub fn validate_id(id: &str) -> LoreResult<()> {
	let valid = !id.is_empty()
		&& id
			.bytes()
			.all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'_');

	if valid {
		Ok(())
	} else {
		Err(LoreError::InvalidId(id.to_string()))
	}
}

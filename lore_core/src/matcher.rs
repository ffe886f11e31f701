use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::LoreError;
use crate::LoreResult;
use crate::Record;
use crate::Template;

/// Default open delimiter for template arguments.
pub const DEFAULT_OPEN_ARG: &str = "{{";
/// Default close delimiter for template arguments.
pub const DEFAULT_CLOSE_ARG: &str = "}}";

/// An ordered list of templates matched against consecutive lines of lore.
///
/// Template `i` must match line `offset + i`; the records of every template
/// are merged into one. All templates share the matcher's delimiters.
///
/// A matcher serializes to the same shape it is stored in:
///
/// ```toml
/// open-arg = "{{"
/// close-arg = "}}"
/// templates = ["Name: {{name}}", "Cooldown: {{cooldown}}"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MatcherEntry", try_from = "MatcherEntry")]
pub struct LoreMatcher {
	open_arg: String,
	close_arg: String,
	templates: Vec<Template>,
}

impl LoreMatcher {
	/// Compile every template string with the given delimiters.
	///
	/// Fails when `templates` is empty or either delimiter is empty.
	pub fn new<I, S>(
		open_arg: impl Into<String>,
		close_arg: impl Into<String>,
		templates: I,
	) -> LoreResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let open_arg = open_arg.into();
		let close_arg = close_arg.into();
		let templates = templates
			.into_iter()
			.map(|template| Template::new(template, open_arg.as_str(), close_arg.as_str()))
			.collect::<LoreResult<Vec<_>>>()?;

		if templates.is_empty() {
			return Err(LoreError::EmptyTemplates);
		}

		Ok(Self {
			open_arg,
			close_arg,
			templates,
		})
	}

	/// Compile templates with the default `{{` / `}}` delimiters.
	pub fn with_default_args<I, S>(templates: I) -> LoreResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::new(DEFAULT_OPEN_ARG, DEFAULT_CLOSE_ARG, templates)
	}

	pub fn open_arg(&self) -> &str {
		&self.open_arg
	}

	pub fn close_arg(&self) -> &str {
		&self.close_arg
	}

	pub fn templates(&self) -> &[Template] {
		&self.templates
	}

	/// The template strings in match order.
	pub fn raw_templates(&self) -> Vec<&str> {
		self.templates.iter().map(Template::raw).collect()
	}

	/// Number of lines a match spans.
	pub fn len(&self) -> usize {
		self.templates.len()
	}

	/// Always `false`: a matcher cannot be built without templates.
	pub fn is_empty(&self) -> bool {
		self.templates.is_empty()
	}

	/// Distinct argument names across all templates, sorted.
	pub fn arg_names(&self) -> Vec<&str> {
		self.templates
			.iter()
			.flat_map(Template::arg_names)
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}

	/// Match every window of consecutive lines against the templates.
	///
	/// Each successful window produces one record, built on top of a copy of
	/// `presets`. Captured values that are empty do not overwrite. Records
	/// are returned in ascending offset order and windows may overlap. Fewer
	/// lines than templates simply yields nothing.
	pub fn match_lines<S: AsRef<str>>(&self, lines: &[S], presets: &Record) -> Vec<Record> {
		lines
			.windows(self.templates.len())
			.enumerate()
			.filter_map(|(offset, window)| {
				let record = self.match_window(window, presets);
				tracing::trace!(offset, matched = record.is_some(), "matched lore window");
				record
			})
			.collect()
	}

	fn match_window<S: AsRef<str>>(&self, window: &[S], presets: &Record) -> Option<Record> {
		let mut record = presets.clone();
		for (template, line) in self.templates.iter().zip(window) {
			record.merge_non_empty(template.matches(line.as_ref())?);
		}

		Some(record)
	}

	/// The stored form of this matcher.
	pub fn to_entry(&self) -> MatcherEntry {
		let mut templates: Vec<String> = self
			.raw_templates()
			.into_iter()
			.map(ToString::to_string)
			.collect();
		let template = if templates.len() == 1 {
			templates.pop()
		} else {
			None
		};

		MatcherEntry {
			open_arg: self.open_arg.clone(),
			close_arg: self.close_arg.clone(),
			template,
			templates,
		}
	}
}

/// Stored form of a [`LoreMatcher`].
///
/// Either `template` (a single line) or `templates` (several lines) is
/// given. A non-empty `template` takes precedence and empty strings in
/// `templates` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MatcherEntry {
	#[serde(default = "default_open_arg")]
	pub open_arg: String,
	#[serde(default = "default_close_arg")]
	pub close_arg: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub template: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub templates: Vec<String>,
}

impl MatcherEntry {
	/// The template strings this entry describes.
	pub fn template_strings(&self) -> Vec<String> {
		match self.template.as_deref() {
			Some(template) if !template.is_empty() => vec![template.to_string()],
			_ => {
				self.templates
					.iter()
					.filter(|template| !template.is_empty())
					.cloned()
					.collect()
			}
		}
	}
}

impl Default for MatcherEntry {
	fn default() -> Self {
		Self {
			open_arg: default_open_arg(),
			close_arg: default_close_arg(),
			template: None,
			templates: Vec::new(),
		}
	}
}

fn default_open_arg() -> String {
	DEFAULT_OPEN_ARG.to_string()
}

fn default_close_arg() -> String {
	DEFAULT_CLOSE_ARG.to_string()
}

impl TryFrom<MatcherEntry> for LoreMatcher {
	type Error = LoreError;

	fn try_from(entry: MatcherEntry) -> LoreResult<Self> {
		let templates = entry.template_strings();
		Self::new(entry.open_arg, entry.close_arg, templates)
	}
}

impl From<LoreMatcher> for MatcherEntry {
	fn from(matcher: LoreMatcher) -> Self {
		matcher.to_entry()
	}
}

use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;

use crate::LoreError;
use crate::LoreResult;
use crate::Record;

/// A single-line template translating between lore text and a [`Record`].
///
/// ```text
/// Template:    "Skill: {{name}} (Cooldown {{cooldown}})"
/// Translation: "Skill: arrow (Cooldown 100)" <=> {name: "arrow", cooldown: "100"}
/// ```
///
/// The template string is split once, at construction, into alternating
/// literal and argument parts:
///
/// ```text
/// ["Skill: ", "name", " (Cooldown ", "cooldown", ")"]
/// ```
///
/// There is always one more literal than there are arguments, so the first
/// and the last part are literals (either may be empty). Argument names may
/// be empty and may repeat.
#[derive(Debug, Clone)]
pub struct Template {
	raw: String,
	open_arg: String,
	close_arg: String,
	parts: Vec<String>,
}

impl Template {
	/// Compile `template` using `open_arg` and `close_arg` as the argument
	/// delimiters.
	///
	/// The scan is flat: delimiters never nest, and a close delimiter that
	/// appears before (or overlaps) the next open delimiter ends the scan,
	/// leaving the rest of the string as the final literal. When both
	/// delimiters are the same string they are found at the same index, so
	/// such a template never has arguments.
	pub fn new(
		template: impl Into<String>,
		open_arg: impl Into<String>,
		close_arg: impl Into<String>,
	) -> LoreResult<Self> {
		let raw = template.into();
		let open_arg = open_arg.into();
		let close_arg = close_arg.into();

		if open_arg.is_empty() {
			return Err(LoreError::EmptyOpenArg);
		}

		if close_arg.is_empty() {
			return Err(LoreError::EmptyCloseArg);
		}

		let parts = split_parts(&raw, &open_arg, &close_arg);
		tracing::trace!(template = %raw, args = parts.len() / 2, "compiled template");

		Ok(Self {
			raw,
			open_arg,
			close_arg,
			parts,
		})
	}

	/// The template string this template was compiled from.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Delimiter opening an argument.
	pub fn open_arg(&self) -> &str {
		&self.open_arg
	}

	/// Delimiter closing an argument.
	pub fn close_arg(&self) -> &str {
		&self.close_arg
	}

	/// Alternating literal and argument parts, starting and ending with a
	/// literal.
	pub fn parts(&self) -> &[String] {
		&self.parts
	}

	/// All argument names in declaration order. Duplicates are kept.
	pub fn arg_names(&self) -> Vec<&str> {
		self.parts
			.iter()
			.skip(1)
			.step_by(2)
			.map(String::as_str)
			.collect()
	}

	/// Translate a line of lore into a record.
	///
	/// Returns `None` when the line does not fit the template: the leading
	/// literal is not a prefix, no placement of the arguments satisfies every
	/// literal, or characters are left over at the end.
	///
	/// Each argument takes the shortest value for which the remainder of the
	/// template still matches, so with `{{x}}-{{y}}` the line `a-b-c` yields
	/// `x = "a"` and `y = "b-c"`. The search backtracks, which is exponential
	/// in the number of arguments for adversarial input; templates are short
	/// and written by hand, so this is accepted.
	///
	/// When an argument name repeats, the value captured last wins.
	pub fn matches(&self, line: &str) -> Option<Record> {
		let prefix = self.parts[0].as_str();
		if !line.starts_with(prefix) {
			return None;
		}

		let captures = self.capture(line, prefix.len(), 1)?;
		// captures come back innermost first
		Some(captures.into_iter().rev().collect())
	}

	/// Render a record into a line of lore.
	///
	/// Returns `None` if any argument is missing from the record. Missing
	/// arguments are never treated as empty strings here.
	pub fn render(&self, record: &Record) -> Option<String> {
		let mut rendered = String::new();
		for (index, part) in self.parts.iter().enumerate() {
			if index % 2 == 0 {
				rendered.push_str(part);
			} else {
				rendered.push_str(record.get(part)?);
			}
		}

		Some(rendered)
	}

	/// Bind the argument at `part` (and every argument after it) starting at
	/// byte offset `start` of `line`.
	fn capture<'a>(
		&'a self,
		line: &'a str,
		start: usize,
		part: usize,
	) -> Option<Vec<(&'a str, &'a str)>> {
		let Some(name) = self.parts.get(part) else {
			return (start == line.len()).then(Vec::new);
		};

		let literal = self.parts[part + 1].as_str();
		let mut search = start;
		while search <= line.len() {
			let boundary = search + line[search..].find(literal)?;
			if let Some(mut captures) = self.capture(line, boundary + literal.len(), part + 2) {
				captures.push((name.as_str(), &line[start..boundary]));
				return Some(captures);
			}

			search = boundary + line[boundary..].chars().next().map_or(1, char::len_utf8);
		}

		None
	}
}

fn split_parts(template: &str, open_arg: &str, close_arg: &str) -> Vec<String> {
	let mut parts = Vec::new();
	let mut start = 0;

	loop {
		let rest = &template[start..];
		let (Some(open_index), Some(close_index)) = (rest.find(open_arg), rest.find(close_arg))
		else {
			break;
		};

		if open_index + open_arg.len() > close_index {
			break;
		}

		parts.push(rest[..open_index].to_string());
		parts.push(rest[open_index + open_arg.len()..close_index].to_string());
		start += close_index + close_arg.len();
	}

	parts.push(template[start..].to_string());
	parts
}

impl PartialEq for Template {
	fn eq(&self, other: &Self) -> bool {
		self.parts == other.parts
	}
}

impl Eq for Template {}

impl Hash for Template {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.parts.hash(state);
	}
}

impl Display for Template {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.raw)
	}
}

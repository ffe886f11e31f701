use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Translate item lore to stat data and back using registered templates.",
	long_about = "lore keeps a registry of lore matchers per stat id. A matcher is a list of \
	              template lines such as `Skill: {{name}} (Cooldown {{cooldown}})` that can \
	              read structured data out of item lore, or render data back into lore \
	              lines.\n\nQuick start:\n  lore init            Create lore.toml and the data \
	              file\n  lore matcher-add     Register a matcher for a stat id\n  lore match   \
	              Match a lore file against a stat id\n  lore matcher-apply   Render lore lines \
	              from key=value arguments"
)]
pub struct LoreCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize lore in a project.
	///
	/// Creates `lore.toml` and an empty data file in the project root.
	/// Existing files are left untouched.
	Init,
	/// List the registered matchers.
	///
	/// Prints every matcher as `id (index)` with its number of lines and
	/// argument names. An optional glob such as `arrow*` restricts the ids.
	#[command(name = "matcher-list", visible_alias = "ml")]
	MatcherList {
		/// Glob over stat ids.
		wildcard: Option<String>,
	},
	/// Register a new matcher for a stat id.
	///
	/// Each template argument is one line of lore. The matcher is appended
	/// after the existing matchers of the id and the data file is saved.
	#[command(name = "matcher-add", visible_alias = "mp")]
	MatcherAdd {
		/// Delimiter opening an argument. Defaults to `[defaults] open_arg`
		/// from `lore.toml`, or `{{`.
		#[arg(long)]
		open_arg: Option<String>,

		/// Delimiter closing an argument. Defaults to `[defaults] close_arg`
		/// from `lore.toml`, or `}}`.
		#[arg(long)]
		close_arg: Option<String>,

		/// The snake_case stat id.
		key: String,

		/// Template lines, in the order they appear in the lore.
		#[arg(required = true)]
		templates: Vec<String>,
	},
	/// Remove matchers.
	#[command(name = "matcher-clear", visible_alias = "mc")]
	MatcherClear {
		/// The stat id whose matchers are removed.
		#[arg(required_unless_present = "all", conflicts_with = "all")]
		key: Option<String>,

		/// Remove the matchers of every stat id.
		#[arg(long, default_value_t = false)]
		all: bool,
	},
	/// Render lore lines with a registered matcher.
	///
	/// Arguments not given as `key=value` are rendered as empty strings and
	/// reported. With `--lore`, the rendered lines are appended to the file.
	#[command(name = "matcher-apply", visible_alias = "ma")]
	MatcherApply {
		/// The stat id.
		key: String,

		/// Index of the matcher as shown by `matcher-list`.
		index: String,

		/// Argument values written as `key=value`.
		arguments: Vec<String>,

		/// Append the rendered lines to this lore file.
		#[arg(long)]
		lore: Option<PathBuf>,
	},
	/// Match a lore file against the matchers of a stat id.
	///
	/// The file holds one lore line per line. Every match is printed as a
	/// record merged over the presets of the id. Exits with status 1 when
	/// nothing matches.
	Match {
		/// The stat id.
		key: String,

		/// File with the lore lines.
		lore_file: PathBuf,

		/// Output format for the matched records.
		#[arg(long, value_enum, default_value_t = MatchOutputFormat::Text)]
		format: MatchOutputFormat,
	},
	/// List the presets of every stat id.
	#[command(name = "preset-list")]
	PresetList {
		/// Glob over stat ids.
		wildcard: Option<String>,
	},
	/// Set a preset value for a stat id.
	///
	/// Presets are merged underneath every match result of the id, so a
	/// template argument that captures nothing falls back to the preset.
	#[command(name = "preset-add")]
	PresetAdd {
		/// The snake_case stat id.
		id: String,

		/// The record key.
		key: String,

		/// The default value.
		value: String,
	},
	/// Remove every preset of a stat id.
	#[command(name = "preset-clear")]
	PresetClear {
		/// The stat id.
		id: String,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MatchOutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output: an array with one object per matched record.
	Json,
}

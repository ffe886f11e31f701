use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum LoreError {
	#[error(transparent)]
	#[diagnostic(code(lore::io_error))]
	Io(#[from] std::io::Error),

	#[error("the open-arg should not be empty")]
	#[diagnostic(
		code(lore::empty_open_arg),
		help("use a non-empty delimiter such as `{{{{`")
	)]
	EmptyOpenArg,

	#[error("the close-arg should not be empty")]
	#[diagnostic(
		code(lore::empty_close_arg),
		help("use a non-empty delimiter such as `}}}}`")
	)]
	EmptyCloseArg,

	#[error("the templates should not be empty")]
	#[diagnostic(
		code(lore::empty_templates),
		help("a matcher needs at least one template string")
	)]
	EmptyTemplates,

	#[error("template line {line} is empty")]
	#[diagnostic(
		code(lore::empty_template_line),
		help("empty template lines are dropped when the data file is loaded, so they cannot be stored")
	)]
	EmptyTemplateLine { line: usize },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(lore::config_parse),
		help("check that lore.toml is valid TOML with an optional [defaults] section")
	)]
	ConfigParse(String),

	#[error("failed to load data file `{path}`: {reason}")]
	#[diagnostic(code(lore::data_parse))]
	DataParse { path: String, reason: String },

	#[error("failed to serialize lore data: {0}")]
	#[diagnostic(code(lore::data_serialize))]
	DataSerialize(String),

	#[error("invalid matcher for `{id}`: {source}")]
	#[diagnostic(code(lore::invalid_entry))]
	InvalidEntry {
		id: String,
		#[source]
		source: Box<LoreError>,
	},

	#[error("no matcher `{id}` at index {index}")]
	#[diagnostic(
		code(lore::no_such_matcher),
		help("run `lore matcher-list` to see the available matchers and their indices")
	)]
	NoSuchMatcher { id: String, index: String },

	#[error("invalid argument `{0}`")]
	#[diagnostic(
		code(lore::invalid_assignment),
		help("arguments are written as `key=value`")
	)]
	InvalidAssignment(String),

	#[error("duplicate key `{key}` in argument `{argument}`")]
	#[diagnostic(code(lore::duplicate_assignment))]
	DuplicateAssignment { argument: String, key: String },

	#[error("invalid id `{0}`")]
	#[diagnostic(
		code(lore::invalid_id),
		help("ids are snake_case: lowercase letters, digits and underscores")
	)]
	InvalidId(String),

	#[error("there are no matchers for `{0}`")]
	#[diagnostic(code(lore::already_empty))]
	AlreadyEmpty(String),

	#[error("there are no presets for `{0}`")]
	#[diagnostic(code(lore::no_presets))]
	NoPresets(String),

	#[error("invalid wildcard `{pattern}`: {reason}")]
	#[diagnostic(code(lore::invalid_wildcard))]
	InvalidWildcard { pattern: String, reason: String },
}

pub type LoreResult<T> = Result<T, LoreError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;

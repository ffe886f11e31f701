use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::Once;

use clap::Parser;
use globset::Glob;
use globset::GlobMatcher;
use lore_cli::Commands;
use lore_cli::LoreCli;
use lore_cli::MatchOutputFormat;
use lore_core::CONFIG_FILE_CANDIDATES;
use lore_core::LoreConfig;
use lore_core::LoreError;
use lore_core::LoreMatcher;
use lore_core::Record;
use lore_core::apply_matcher;
use lore_core::parse_assignments;
use lore_core::project::ProjectContext;
use lore_core::project::load_project;
use lore_core::validate_id;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = LoreCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::MatcherList { wildcard }) => run_matcher_list(&args, wildcard.as_deref()),
		Some(Commands::MatcherAdd {
			open_arg,
			close_arg,
			key,
			templates,
		}) => run_matcher_add(&args, open_arg.clone(), close_arg.clone(), key, templates),
		Some(Commands::MatcherClear { key, all }) => run_matcher_clear(&args, key.as_deref(), *all),
		Some(Commands::MatcherApply {
			key,
			index,
			arguments,
			lore,
		}) => run_matcher_apply(&args, key, index, arguments, lore.as_deref()),
		Some(Commands::Match {
			key,
			lore_file,
			format,
		}) => run_match(&args, key, lore_file, *format),
		Some(Commands::PresetList { wildcard }) => run_preset_list(&args, wildcard.as_deref()),
		Some(Commands::PresetAdd { id, key, value }) => run_preset_add(&args, id, key, value),
		Some(Commands::PresetClear { id }) => run_preset_clear(&args, id),
		None => {
			eprintln!("No subcommand specified. Run `lore --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<LoreError>() {
			Ok(lore_err) => {
				let report: miette::Report = (*lore_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over
/// `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	static INIT: Once = Once::new();

	INIT.call_once(|| {
		let filter = if std::env::var_os("RUST_LOG").is_some() {
			EnvFilter::from_default_env()
		} else if verbose {
			EnvFilter::new("lore_core=debug,lore=debug")
		} else {
			EnvFilter::new("warn")
		};

		tracing_subscriber::registry()
			.with(filter)
			.with(
				fmt::layer()
					.with_target(true)
					.with_ansi(use_color)
					.with_writer(std::io::stderr),
			)
			.try_init()
			.ok();
	});
}

fn resolve_root(args: &LoreCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load(args: &LoreCli) -> Result<ProjectContext, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	Ok(load_project(&root)?)
}

/// Compile an optional glob over stat ids. No pattern matches every id.
fn wildcard_matcher(pattern: Option<&str>) -> Result<Option<GlobMatcher>, LoreError> {
	pattern
		.map(|pattern| {
			Glob::new(pattern)
				.map(|glob| glob.compile_matcher())
				.map_err(|e| {
					LoreError::InvalidWildcard {
						pattern: pattern.to_string(),
						reason: e.kind().to_string(),
					}
				})
		})
		.transpose()
}

fn wildcard_allows(matcher: Option<&GlobMatcher>, id: &str) -> bool {
	matcher.is_none_or(|matcher| matcher.is_match(id))
}

fn warning(message: impl std::fmt::Display) {
	eprintln!("{} {message}", colored!("warning:", yellow));
}

fn run_init(args: &LoreCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = LoreConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
	} else {
		let sample_config = "# lore configuration\n\n# Where matchers and presets are stored, \
		                     relative to this directory.\ndata_file = \"data.toml\"\n\n# \
		                     Delimiters used by `lore matcher-add` when none are \
		                     given.\n[defaults]\nopen_arg = \"{{\"\nclose_arg = \"}}\"\n";

		std::fs::write(root.join(CONFIG_FILE_CANDIDATES[0]), sample_config)?;
		println!("Created {}", CONFIG_FILE_CANDIDATES[0]);
	}

	let config = LoreConfig::load_or_default(&root)?;
	let data_path = config.data_path(&root);
	if data_path.exists() {
		println!("Data file already exists: {}", data_path.display());
		return Ok(());
	}

	if let Some(parent) = data_path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	let sample_data = "# Lore matchers and presets, managed by `lore`.\n#\n# \
	                   [[lores.self-effect]]\n# template = \"Self effect: {{effect}}\"\n#\n# \
	                   [presets.self-effect]\n# effect = \"speed\"\n";
	std::fs::write(&data_path, sample_data)?;
	println!("Created data file: {}", data_path.display());

	println!();
	println!("Next steps:");
	println!("  1. Register a matcher:");
	println!("     lore matcher-add arrow \"Name: {{{{n}}}}\" \"Cooldown: {{{{c}}}}\"");
	println!("  2. Match a lore file with `lore match arrow lore.txt`");

	Ok(())
}

fn run_matcher_list(
	args: &LoreCli,
	wildcard: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
	let glob = wildcard_matcher(wildcard)?;
	let ctx = load(args)?;

	let mut count = 0;
	for (id, matchers) in ctx.engine.registry.iter() {
		if !wildcard_allows(glob.as_ref(), id) {
			continue;
		}

		for (index, matcher) in matchers.iter().enumerate() {
			if count > 0 {
				println!();
			}
			count += 1;
			print_matcher(id, index, matcher);
		}
	}

	if count == 0 {
		println!("No matchers found.");
		return Ok(());
	}

	println!("\n{count} matcher(s)");
	Ok(())
}

fn print_matcher(id: &str, index: usize, matcher: &LoreMatcher) {
	let heading = format!("{id} ({index})");
	let arguments = matcher.arg_names();
	let arguments = if arguments.is_empty() {
		"no arguments".to_string()
	} else {
		format!("arguments: {}", arguments.join(", "))
	};

	println!(
		"{} {} line(s), {arguments}",
		colored!(heading, bold),
		matcher.len()
	);
	for template in matcher.raw_templates() {
		println!("  {template}");
	}
}

fn run_matcher_add(
	args: &LoreCli,
	open_arg: Option<String>,
	close_arg: Option<String>,
	key: &str,
	templates: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
	validate_id(key)?;
	if let Some(position) = templates.iter().position(String::is_empty) {
		return Err(LoreError::EmptyTemplateLine { line: position + 1 }.into());
	}

	let mut ctx = load(args)?;

	let open_arg = open_arg.unwrap_or_else(|| ctx.config.defaults.open_arg.clone());
	let close_arg = close_arg.unwrap_or_else(|| ctx.config.defaults.close_arg.clone());
	let matcher = LoreMatcher::new(open_arg, close_arg, templates)?;
	let lines = matcher.len();

	ctx.engine.registry.add(key, matcher);
	let index = ctx.engine.registry.get(key).len() - 1;
	ctx.save()?;

	println!(
		"{} matcher {key} ({index}) with {lines} line(s)",
		colored!("Added", green)
	);
	Ok(())
}

fn run_matcher_clear(
	args: &LoreCli,
	key: Option<&str>,
	all: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let mut ctx = load(args)?;

	let (label, removed) = match key {
		Some(key) if !all => {
			let removed = ctx.engine.registry.clear(key).len();
			if removed == 0 {
				return Err(LoreError::AlreadyEmpty(key.to_string()).into());
			}
			(format!("for {key}"), removed)
		}
		_ => {
			let removed = ctx
				.engine
				.registry
				.iter()
				.map(|(_, matchers)| matchers.len())
				.sum::<usize>();
			ctx.engine.registry.clear_all();
			("in total".to_string(), removed)
		}
	};

	ctx.save()?;
	println!(
		"{} {removed} matcher(s) {label}",
		colored!("Cleared", green)
	);
	Ok(())
}

fn run_matcher_apply(
	args: &LoreCli,
	key: &str,
	index: &str,
	arguments: &[String],
	lore: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load(args)?;
	let matcher = ctx.engine.matcher_by_str(key, index)?;
	let values = parse_assignments(arguments)?;
	let applied = apply_matcher(matcher, &values);

	for name in &applied.ignored {
		warning(format!("argument `{name}` was not given and is left empty"));
	}

	for line in &applied.lines {
		println!("{line}");
	}

	if let Some(path) = lore {
		append_lines(path, &applied.lines)?;
		println!(
			"Appended {} line(s) to {}",
			applied.lines.len(),
			path.display()
		);
	}

	Ok(())
}

/// Append `lines` to the lore file at `path`, creating it if needed.
fn append_lines(path: &Path, lines: &[String]) -> std::io::Result<()> {
	let needs_newline = std::fs::read_to_string(path)
		.map(|content| !content.is_empty() && !content.ends_with('\n'))
		.unwrap_or(false);

	let mut file = std::fs::OpenOptions::new()
		.create(true)
		.append(true)
		.open(path)?;
	if needs_newline {
		writeln!(file)?;
	}
	for line in lines {
		writeln!(file, "{line}")?;
	}

	Ok(())
}

fn run_match(
	args: &LoreCli,
	key: &str,
	lore_file: &Path,
	format: MatchOutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load(args)?;
	let content = std::fs::read_to_string(lore_file)?;
	let lines: Vec<&str> = content.lines().collect();

	if ctx.engine.registry.get(key).is_empty() {
		warning(format!("no matchers are registered for `{key}`"));
	}

	let records = ctx.engine.match_lore(key, &lines);

	match format {
		MatchOutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&records)?);
		}
		MatchOutputFormat::Text if records.is_empty() => {
			println!("No lore matched {key}.");
		}
		MatchOutputFormat::Text => print_records(&records),
	}

	if records.is_empty() {
		process::exit(1);
	}

	Ok(())
}

fn print_records(records: &[Record]) {
	for (index, record) in records.iter().enumerate() {
		if index > 0 {
			println!();
		}
		println!("{}", colored!(format!("Record {index}:"), bold));
		for (key, value) in record.iter() {
			println!("  {key} = {value}");
		}
	}

	println!("\n{} record(s)", records.len());
}

fn run_preset_list(
	args: &LoreCli,
	wildcard: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
	let glob = wildcard_matcher(wildcard)?;
	let ctx = load(args)?;

	let mut count = 0;
	for (id, values) in ctx.engine.presets.iter() {
		if !wildcard_allows(glob.as_ref(), id) {
			continue;
		}

		if count > 0 {
			println!();
		}
		count += 1;
		println!("{}", colored!(id, bold));
		for (key, value) in values {
			println!("  {key} = {value}");
		}
	}

	if count == 0 {
		println!("No presets found.");
	}

	Ok(())
}

fn run_preset_add(
	args: &LoreCli,
	id: &str,
	key: &str,
	value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
	validate_id(id)?;
	let mut ctx = load(args)?;
	ctx.engine.presets.add(id, key, value);
	ctx.save()?;

	println!("{} preset {id}: {key} = {value}", colored!("Set", green));
	Ok(())
}

fn run_preset_clear(args: &LoreCli, id: &str) -> Result<(), Box<dyn std::error::Error>> {
	let mut ctx = load(args)?;
	if !ctx.engine.presets.clear(id) {
		return Err(LoreError::NoPresets(id.to_string()).into());
	}

	ctx.save()?;
	println!("{} presets for {id}", colored!("Cleared", green));
	Ok(())
}

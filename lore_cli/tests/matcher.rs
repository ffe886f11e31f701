mod common;

use std::path::Path;

use lore_core::AnyEmptyResult;
use lore_core::LoreData;
use predicates::prelude::*;
use rstest::rstest;
use similar_asserts::assert_eq;

fn add_matcher(root: &Path, key: &str, templates: &[&str]) {
	common::lore_cmd()
		.arg("--path")
		.arg(root)
		.arg("matcher-add")
		.arg(key)
		.args(templates)
		.assert()
		.success();
}

#[test]
fn add_saves_matcher() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("matcher-add")
		.arg("arrow")
		.arg("Name: {{n}}")
		.arg("Cooldown: {{c}}")
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Added matcher arrow (0) with 2 line(s)",
		));

	let engine = LoreData::load(&tmp.path().join("data.toml"))?.into_engine()?;
	let matchers = engine.registry.get("arrow");
	assert_eq!(matchers.len(), 1);
	assert_eq!(
		matchers[0].raw_templates(),
		vec!["Name: {{n}}", "Cooldown: {{c}}"]
	);

	Ok(())
}

#[test]
fn add_appends_after_existing_matchers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	add_matcher(tmp.path(), "arrow", &["Name: {{n}}"]);

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("mp")
		.arg("--open-arg")
		.arg("<")
		.arg("--close-arg")
		.arg(">")
		.arg("arrow")
		.arg("Arrow cooldown <c>")
		.assert()
		.success()
		.stdout(predicates::str::contains("Added matcher arrow (1)"));

	let engine = LoreData::load(&tmp.path().join("data.toml"))?.into_engine()?;
	let matchers = engine.registry.get("arrow");
	assert_eq!(matchers.len(), 2);
	assert_eq!(matchers[1].open_arg(), "<");
	assert_eq!(matchers[1].arg_names(), vec!["c"]);

	Ok(())
}

#[test]
fn add_stores_ids_with_dashes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	add_matcher(tmp.path(), "self_effect", &["Self effect: {{effect}}"]);

	let content = std::fs::read_to_string(tmp.path().join("data.toml"))?;
	assert!(content.contains("self-effect"), "{content}");
	assert!(content.contains("template = \"Self effect: {{effect}}\""), "{content}");

	Ok(())
}

#[test]
fn add_rejects_invalid_id() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("matcher-add")
		.arg("SelfEffect")
		.arg("Self effect: {{effect}}")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid id `SelfEffect`"));

	assert!(!tmp.path().join("data.toml").exists());

	Ok(())
}

#[test]
fn add_rejects_empty_delimiter() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("matcher-add")
		.arg("--open-arg")
		.arg("")
		.arg("arrow")
		.arg("Cooldown {{c}}")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("the open-arg should not be empty"));

	Ok(())
}

#[test]
fn add_rejects_empty_template_line() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("matcher-add")
		.arg("arrow")
		.arg("Name: {{n}}")
		.arg("")
		.arg("Cooldown: {{c}}")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("template line 2 is empty"));

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("matcher-add")
		.arg("axe")
		.arg("")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("template line 1 is empty"));

	assert!(!tmp.path().join("data.toml").exists());

	Ok(())
}

#[test]
fn list_shows_matchers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	add_matcher(tmp.path(), "arrow", &["Name: {{n}}", "Cooldown: {{c}}"]);
	add_matcher(tmp.path(), "soulbound", &["Soulbound"]);

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("matcher-list")
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"arrow (0) 2 line(s), arguments: c, n",
		))
		.stdout(predicates::str::contains("  Name: {{n}}"))
		.stdout(predicates::str::contains("soulbound (0) 1 line(s), no arguments"))
		.stdout(predicates::str::contains("2 matcher(s)"));

	Ok(())
}

#[test]
fn list_filters_by_wildcard() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	add_matcher(tmp.path(), "arrow", &["Name: {{n}}"]);
	add_matcher(tmp.path(), "self_effect", &["Self effect: {{effect}}"]);

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("ml")
		.arg("self_*")
		.assert()
		.success()
		.stdout(predicates::str::contains("self_effect (0)"))
		.stdout(predicates::str::contains("arrow").not())
		.stdout(predicates::str::contains("1 matcher(s)"));

	Ok(())
}

#[test]
fn list_without_matchers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("matcher-list")
		.assert()
		.success()
		.stdout(predicates::str::contains("No matchers found."));

	Ok(())
}

#[test]
fn list_rejects_invalid_wildcard() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("matcher-list")
		.arg("[arrow")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid wildcard `[arrow`"));

	Ok(())
}

#[test]
fn clear_removes_matchers_of_id() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	add_matcher(tmp.path(), "arrow", &["Name: {{n}}"]);
	add_matcher(tmp.path(), "arrow", &["Cooldown: {{c}}"]);
	add_matcher(tmp.path(), "axe", &["Damage: {{d}}"]);

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("matcher-clear")
		.arg("arrow")
		.assert()
		.success()
		.stdout(predicates::str::contains("Cleared 2 matcher(s) for arrow"));

	let engine = LoreData::load(&tmp.path().join("data.toml"))?.into_engine()?;
	assert!(engine.registry.get("arrow").is_empty());
	assert_eq!(engine.registry.get("axe").len(), 1);

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("mc")
		.arg("arrow")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("there are no matchers for `arrow`"));

	Ok(())
}

#[test]
fn clear_all_matchers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	add_matcher(tmp.path(), "arrow", &["Name: {{n}}"]);
	add_matcher(tmp.path(), "axe", &["Damage: {{d}}"]);

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("matcher-clear")
		.arg("--all")
		.assert()
		.success()
		.stdout(predicates::str::contains("Cleared 2 matcher(s) in total"));

	let engine = LoreData::load(&tmp.path().join("data.toml"))?.into_engine()?;
	assert!(engine.registry.is_empty());

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("mc")
		.arg("--all")
		.assert()
		.success()
		.stdout(predicates::str::contains("Cleared 0 matcher(s) in total"));

	Ok(())
}

#[test]
fn clear_requires_key_or_all() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("matcher-clear")
		.assert()
		.failure();

	Ok(())
}

#[rstest]
#[case::full_name("matcher-list")]
#[case::alias("ml")]
fn list_accepts_alias(#[case] command: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	add_matcher(tmp.path(), "arrow", &["Name: {{n}}"]);

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg(command)
		.assert()
		.success()
		.stdout(predicates::str::contains("arrow (0) 1 line(s), arguments: n"));

	Ok(())
}

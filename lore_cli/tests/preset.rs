mod common;

use lore_core::AnyEmptyResult;
use lore_core::LoreData;
use predicates::prelude::*;

#[test]
fn add_and_list_presets() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("preset-add")
		.arg("self_effect")
		.arg("duration")
		.arg("60")
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Set preset self_effect: duration = 60",
		));

	let content = std::fs::read_to_string(tmp.path().join("data.toml"))?;
	assert!(content.contains("self-effect"), "{content}");

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("preset-list")
		.assert()
		.success()
		.stdout(predicates::str::contains("self_effect\n  duration = 60"));

	Ok(())
}

#[test]
fn list_presets_by_wildcard() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	for (id, key, value) in [("arrow", "c", "20"), ("axe", "damage", "4")] {
		common::lore_cmd()
			.arg("--path")
			.arg(tmp.path())
			.arg("preset-add")
			.arg(id)
			.arg(key)
			.arg(value)
			.assert()
			.success();
	}

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("preset-list")
		.arg("ar*")
		.assert()
		.success()
		.stdout(predicates::str::contains("  c = 20"))
		.stdout(predicates::str::contains("damage").not());

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("preset-list")
		.arg("bow*")
		.assert()
		.success()
		.stdout(predicates::str::contains("No presets found."));

	Ok(())
}

#[test]
fn clear_presets() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("preset-add")
		.arg("arrow")
		.arg("c")
		.arg("20")
		.assert()
		.success();

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("preset-clear")
		.arg("arrow")
		.assert()
		.success()
		.stdout(predicates::str::contains("Cleared presets for arrow"));

	let engine = LoreData::load(&tmp.path().join("data.toml"))?.into_engine()?;
	assert!(engine.presets.is_empty());

	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("preset-clear")
		.arg("arrow")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("there are no presets for `arrow`"));

	Ok(())
}

#[test]
fn add_preset_rejects_invalid_id() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::lore_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("preset-add")
		.arg("self-effect")
		.arg("duration")
		.arg("60")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid id `self-effect`"));

	Ok(())
}

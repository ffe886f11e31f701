use crate::LoreEngine;
use crate::LoreMatcher;
use crate::MatcherRegistry;
use crate::PresetOverlay;
use crate::Record;
use crate::Template;

pub fn template(raw: &str) -> Template {
	Template::new(raw, "{{", "}}").unwrap_or_else(|e| panic!("template `{raw}`: {e}"))
}

pub fn record(pairs: &[(&str, &str)]) -> Record {
	pairs.iter().copied().collect()
}

pub fn skill_template() -> Template {
	template("Skill: {{name}} (Cooldown {{cooldown}})")
}

pub fn name_cooldown_matcher() -> LoreMatcher {
	LoreMatcher::with_default_args(["Name: {{n}}", "Cooldown: {{c}}"])
		.unwrap_or_else(|e| panic!("matcher: {e}"))
}

pub fn arrow_lore() -> Vec<&'static str> {
	vec![
		"Name: Arrow",
		"Cooldown: 100",
		"Name: Axe",
		"Cooldown: 50",
	]
}

/// An engine with two matchers for `arrow` and presets for `arrow` and
/// `self_effect`.
pub fn sample_engine() -> LoreEngine {
	let mut registry = MatcherRegistry::new();
	registry.add("arrow", name_cooldown_matcher());
	registry.add(
		"arrow",
		LoreMatcher::new("<", ">", ["Arrow cooldown <c>"]).unwrap_or_else(|e| panic!("{e}")),
	);
	registry.add(
		"self_effect",
		LoreMatcher::with_default_args(["Self effect: {{effect}}:{{level}}"])
			.unwrap_or_else(|e| panic!("{e}")),
	);

	let mut presets = PresetOverlay::new();
	presets.add("arrow", "c", "20");
	presets.add("arrow", "speed", "1.5");
	presets.add("self_effect", "duration", "60");

	LoreEngine::new(registry, presets)
}

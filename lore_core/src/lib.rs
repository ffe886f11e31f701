//! `lore_core` is the core library for [lore](https://github.com/ustc-zzzz/lore). It translates between
//! human-readable item lore and structured stat data, in both directions, using templates registered per stat.
//!
//! ## Matching Pipeline
//!
//! ```text
//! Template string + delimiters
//!   → Template (literal / argument parts)
//!   → LoreMatcher (templates matched against consecutive lore lines)
//!   → MatcherRegistry (matchers per stat id, in registration order)
//!   → LoreEngine (matches an id's matchers, merges results over its presets)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Loads `lore.toml`, which names the data file and the default delimiters.
//! - [`project`]: Loading and saving the data file that stores matchers and presets.
//!
//! ## Key Types
//!
//! - [`Template`]: One template line, e.g. `Skill: {{name}} (Cooldown {{cooldown}})`.
//! - [`LoreMatcher`]: An ordered list of templates sharing a delimiter pair.
//! - [`Record`]: The string-keyed data a match produces or a render consumes.
//! - [`MatcherRegistry`]: Matchers keyed by stat id.
//! - [`PresetOverlay`]: Default values merged underneath match results.
//! - [`LoreEngine`]: Registry and presets together.
//!
//! ## Quick Start
//!
//! ```rust
//! use lore_core::LoreEngine;
//! use lore_core::LoreMatcher;
//!
//! let mut engine = LoreEngine::default();
//! let matcher = LoreMatcher::with_default_args(["Name: {{name}}", "Cooldown: {{cooldown}}"]).unwrap();
//! engine.registry.add("arrow", matcher);
//! engine.presets.add("arrow", "cooldown", "20");
//!
//! let records = engine.match_lore("arrow", &["Name: Arrow", "Cooldown: 100"]);
//! assert_eq!(records[0]["name"], "Arrow");
//! assert_eq!(records[0]["cooldown"], "100");
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use matcher::*;
pub use presets::*;
pub use project::*;
pub use record::*;
pub use registry::*;
pub use template::*;

pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
mod matcher;
mod presets;
pub mod project;
mod record;
mod registry;
mod template;

#[cfg(test)]
mod __fixtures;

//! Domain logic: turn raw contact records into keep/remove recommendations.
//!
//! This crate owns *what* should be kept and why. It does not own selection state or exporting;
//! that's the `meshprune-core` crate.

mod classifier;
pub mod interpret;
mod resolver;
mod rules;

pub use classifier::{Classification, Classifier, ClassifierConfig, DEFAULT_STALE_AFTER_DAYS};
pub use resolver::{PATH_OVERRIDE_NOTE, repeater_prefix, resolve_path_dependencies};
pub use rules::{RetentionRule, RuleInput, Verdict, builtin_rules, rule_ids};

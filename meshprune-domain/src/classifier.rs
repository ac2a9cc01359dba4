use crate::interpret::{self, DEFAULT_FLOOD_MARKERS};
use crate::resolver::resolve_path_dependencies;
use crate::rules::{self, RetentionRule, RuleInput, rule_ids};
use chrono::{DateTime, Utc};
use meshprune_types::contact::{RawContact, fields};
use meshprune_types::review::{Recommendation, ReviewedContact};
use tracing::{debug, info};

/// Default staleness threshold, in days.
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 10;

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub stale_after_days: i64,
    /// Routing path values that mean "flood", compared case-insensitively.
    pub flood_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            stale_after_days: DEFAULT_STALE_AFTER_DAYS,
            flood_markers: DEFAULT_FLOOD_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl ClassifierConfig {
    fn normalized_markers(&self) -> Vec<String> {
        self.flood_markers
            .iter()
            .map(|m| m.trim().to_lowercase())
            .collect()
    }
}

/// Result of one classification run.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub contacts: Vec<ReviewedContact>,
    /// Ids promoted to keep by the path resolver.
    pub path_overrides: Vec<usize>,
}

impl Classification {
    pub fn count(&self, recommendation: Recommendation) -> usize {
        self.contacts
            .iter()
            .filter(|c| c.recommendation == recommendation)
            .count()
    }
}

pub struct Classifier {
    config: ClassifierConfig,
    rules: Vec<Box<dyn RetentionRule>>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            rules: rules::builtin_rules(),
        }
    }

    pub fn with_rules(config: ClassifierConfig, rules: Vec<Box<dyn RetentionRule>>) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify `raw` as of `now`. Ids follow input order.
    pub fn classify(&self, raw: &[RawContact], now: DateTime<Utc>) -> Classification {
        let markers = self.config.normalized_markers();

        let mut contacts: Vec<ReviewedContact> = raw
            .iter()
            .enumerate()
            .map(|(id, r)| self.review_one(id, r, now, &markers))
            .collect();

        let path_overrides = resolve_path_dependencies(&mut contacts);

        let out = Classification {
            contacts,
            path_overrides,
        };
        info!(
            total = out.contacts.len(),
            keep = out.count(Recommendation::Keep),
            remove = out.count(Recommendation::Remove),
            path_overrides = out.path_overrides.len(),
            "classified contacts"
        );
        out
    }

    /// Rule verdict for a single record, before the path pass.
    fn review_one(
        &self,
        id: usize,
        raw: &RawContact,
        now: DateTime<Utc>,
        flood_markers: &[String],
    ) -> ReviewedContact {
        let category = interpret::classify_type(raw.field(fields::TYPE));
        let favorite = interpret::detect_favorite(raw.field(fields::FLAGS));
        let last_seen = interpret::compute_last_seen(
            raw.field(fields::LAST_ADVERT),
            raw.field(fields::LAST_MODIFIED),
        );
        let age_days = interpret::age_in_days(now, last_seen);
        let custom_path = interpret::has_custom_path(raw.field(fields::OUT_PATH), flood_markers);

        let input = RuleInput {
            category,
            favorite,
            age_days,
            custom_path,
            stale_after_days: self.config.stale_after_days,
        };

        let (rule_id, recommendation, reason) =
            match self.rules.iter().find(|r| r.applies_to(category)) {
                Some(rule) => {
                    let v = rule.evaluate(&input);
                    (rule.id(), v.recommendation, v.reason)
                }
                None => (
                    rule_ids::DEFAULT,
                    Recommendation::Keep,
                    "Kept by default.".to_string(),
                ),
            };
        debug!(id, %category, %recommendation, rule = rule_id, "rule verdict");

        ReviewedContact {
            id,
            raw: raw.clone(),
            display_name: interpret::display_name(raw),
            category,
            favorite,
            last_seen,
            age_days,
            custom_path,
            recommendation,
            rule_id,
            reason,
            path_override: false,
        }
    }
}

use meshprune_types::review::{Recommendation, TypeCategory};

/// Derived facts a retention rule decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInput {
    pub category: TypeCategory,
    pub favorite: bool,
    pub age_days: Option<i64>,
    pub custom_path: bool,
    pub stale_after_days: i64,
}

impl RuleInput {
    /// Unknown age never counts as stale.
    pub fn is_stale(&self) -> bool {
        self.age_days.is_some_and(|age| age > self.stale_after_days)
    }

    fn age_label(&self) -> String {
        self.age_days.map(|a| a.to_string()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub recommendation: Recommendation,
    pub reason: String,
}

impl Verdict {
    fn keep(reason: impl Into<String>) -> Self {
        Self {
            recommendation: Recommendation::Keep,
            reason: reason.into(),
        }
    }

    fn remove(reason: impl Into<String>) -> Self {
        Self {
            recommendation: Recommendation::Remove,
            reason: reason.into(),
        }
    }
}

/// Per-category retention heuristic.
pub trait RetentionRule {
    fn id(&self) -> &'static str;

    fn applies_to(&self, category: TypeCategory) -> bool;

    fn evaluate(&self, input: &RuleInput) -> Verdict;
}

pub mod rule_ids {
    pub const REPEATER: &str = "retain.repeater";
    pub const COMPANION: &str = "retain.companion";
    pub const SENSOR: &str = "retain.sensor";
    pub const ROOM: &str = "retain.room";
    pub const UNKNOWN: &str = "retain.unknown";
    /// Used when no registered rule matched.
    pub const DEFAULT: &str = "retain.default";
}

struct RepeaterRule;

impl RetentionRule for RepeaterRule {
    fn id(&self) -> &'static str {
        rule_ids::REPEATER
    }

    fn applies_to(&self, category: TypeCategory) -> bool {
        category == TypeCategory::Repeater
    }

    fn evaluate(&self, input: &RuleInput) -> Verdict {
        if input.is_stale() && !input.favorite {
            Verdict::remove(format!(
                "Repeater: not heard for {} days, not favorite.",
                input.age_label()
            ))
        } else {
            Verdict::keep("Repeater: recently heard or favorite.")
        }
    }
}

struct CompanionRule;

impl RetentionRule for CompanionRule {
    fn id(&self) -> &'static str {
        rule_ids::COMPANION
    }

    fn applies_to(&self, category: TypeCategory) -> bool {
        category == TypeCategory::Companion
    }

    fn evaluate(&self, input: &RuleInput) -> Verdict {
        if input.is_stale() && !input.favorite && !input.custom_path {
            Verdict::remove(format!(
                "Companion: not heard for {} days, not favorite, no custom path.",
                input.age_label()
            ))
        } else {
            Verdict::keep("Companion: recently heard, favorite, or has custom path.")
        }
    }
}

struct SensorRule;

impl RetentionRule for SensorRule {
    fn id(&self) -> &'static str {
        rule_ids::SENSOR
    }

    fn applies_to(&self, category: TypeCategory) -> bool {
        category == TypeCategory::Sensor
    }

    fn evaluate(&self, input: &RuleInput) -> Verdict {
        if input.favorite {
            Verdict::keep("Sensor: favorite sensors are kept.")
        } else {
            Verdict::remove("Sensor: not marked as favorite.")
        }
    }
}

struct RoomRule;

impl RetentionRule for RoomRule {
    fn id(&self) -> &'static str {
        rule_ids::ROOM
    }

    fn applies_to(&self, category: TypeCategory) -> bool {
        category == TypeCategory::Room
    }

    fn evaluate(&self, _input: &RuleInput) -> Verdict {
        Verdict::keep("Room: rooms are never suggested for removal.")
    }
}

struct UnknownRule;

impl RetentionRule for UnknownRule {
    fn id(&self) -> &'static str {
        rule_ids::UNKNOWN
    }

    fn applies_to(&self, category: TypeCategory) -> bool {
        category == TypeCategory::Unknown
    }

    fn evaluate(&self, _input: &RuleInput) -> Verdict {
        Verdict::keep("Unknown type: kept by default.")
    }
}

pub fn builtin_rules() -> Vec<Box<dyn RetentionRule>> {
    vec![
        Box::new(RepeaterRule),
        Box::new(CompanionRule),
        Box::new(SensorRule),
        Box::new(RoomRule),
        Box::new(UnknownRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(category: TypeCategory) -> RuleInput {
        RuleInput {
            category,
            favorite: false,
            age_days: None,
            custom_path: false,
            stale_after_days: 10,
        }
    }

    fn evaluate(input: &RuleInput) -> (&'static str, Verdict) {
        let rules = builtin_rules();
        let rule = rules
            .iter()
            .find(|r| r.applies_to(input.category))
            .expect("every category has a rule");
        (rule.id(), rule.evaluate(input))
    }

    #[test]
    fn every_category_has_exactly_one_rule() {
        let rules = builtin_rules();
        for category in TypeCategory::ALL {
            let n = rules.iter().filter(|r| r.applies_to(category)).count();
            assert_eq!(n, 1, "{category}");
        }
    }

    #[test]
    fn stale_repeater_is_removed() {
        let i = RuleInput {
            age_days: Some(15),
            ..input(TypeCategory::Repeater)
        };
        let (id, v) = evaluate(&i);
        assert_eq!(id, rule_ids::REPEATER);
        assert_eq!(v.recommendation, Recommendation::Remove);
        assert_eq!(v.reason, "Repeater: not heard for 15 days, not favorite.");
    }

    #[test]
    fn threshold_is_exclusive() {
        let i = RuleInput {
            age_days: Some(10),
            ..input(TypeCategory::Repeater)
        };
        assert_eq!(evaluate(&i).1.recommendation, Recommendation::Keep);
    }

    #[test]
    fn favorite_repeater_is_kept() {
        let i = RuleInput {
            age_days: Some(400),
            favorite: true,
            ..input(TypeCategory::Repeater)
        };
        let v = evaluate(&i).1;
        assert_eq!(v.recommendation, Recommendation::Keep);
        assert_eq!(v.reason, "Repeater: recently heard or favorite.");
    }

    #[test]
    fn never_heard_repeater_is_kept() {
        let v = evaluate(&input(TypeCategory::Repeater)).1;
        assert_eq!(v.recommendation, Recommendation::Keep);
    }

    #[test]
    fn companion_needs_all_three_conditions() {
        let stale = RuleInput {
            age_days: Some(30),
            ..input(TypeCategory::Companion)
        };
        let v = evaluate(&stale).1;
        assert_eq!(v.recommendation, Recommendation::Remove);
        assert_eq!(
            v.reason,
            "Companion: not heard for 30 days, not favorite, no custom path."
        );

        let with_path = RuleInput {
            custom_path: true,
            ..stale
        };
        let v = evaluate(&with_path).1;
        assert_eq!(v.recommendation, Recommendation::Keep);
        assert_eq!(
            v.reason,
            "Companion: recently heard, favorite, or has custom path."
        );

        let favorite = RuleInput {
            favorite: true,
            ..stale
        };
        assert_eq!(evaluate(&favorite).1.recommendation, Recommendation::Keep);
    }

    #[test]
    fn sensor_kept_only_when_favorite() {
        let v = evaluate(&input(TypeCategory::Sensor)).1;
        assert_eq!(v.recommendation, Recommendation::Remove);
        assert_eq!(v.reason, "Sensor: not marked as favorite.");

        let fav = RuleInput {
            favorite: true,
            age_days: Some(1000),
            ..input(TypeCategory::Sensor)
        };
        let v = evaluate(&fav).1;
        assert_eq!(v.recommendation, Recommendation::Keep);
        assert_eq!(v.reason, "Sensor: favorite sensors are kept.");
    }

    #[test]
    fn rooms_and_unknown_always_kept() {
        for category in [TypeCategory::Room, TypeCategory::Unknown] {
            let i = RuleInput {
                age_days: Some(9999),
                ..input(category)
            };
            assert_eq!(evaluate(&i).1.recommendation, Recommendation::Keep);
        }
        assert_eq!(
            evaluate(&input(TypeCategory::Room)).1.reason,
            "Room: rooms are never suggested for removal."
        );
        assert_eq!(
            evaluate(&input(TypeCategory::Unknown)).1.reason,
            "Unknown type: kept by default."
        );
    }

    #[test]
    fn custom_stale_threshold() {
        let i = RuleInput {
            age_days: Some(4),
            stale_after_days: 3,
            ..input(TypeCategory::Repeater)
        };
        assert_eq!(evaluate(&i).1.recommendation, Recommendation::Remove);
    }
}

//! Rendering helpers (markdown and plain text) for human-readable review output.

use meshprune_types::report::{ReviewEntry, ReviewReport};
use meshprune_types::review::Recommendation;

pub fn render_review_md(report: &ReviewReport) -> String {
    let mut out = String::new();
    out.push_str("# meshprune review\n\n");
    out.push_str(&format!("- Input: `{}`\n", report.input.path));
    out.push_str(&format!(
        "- Evaluated at: {}\n",
        report.evaluated_at.to_rfc3339()
    ));
    out.push_str(&format!(
        "- Stale after: {} days\n",
        report.policy.stale_after_days
    ));
    out.push_str(&format!(
        "- Contacts: {} (keep {}, remove {})\n",
        report.summary.total, report.summary.keep, report.summary.remove
    ));
    out.push_str(&format!(
        "- Repeaters kept for routing: {}\n\n",
        report.path_overrides
    ));

    out.push_str("## Contacts\n\n");
    if report.contacts.is_empty() {
        out.push_str("_No contacts loaded._\n");
        return out;
    }

    out.push_str("| # | Keep | Name | Type | Key | Favorite | Reason |\n");
    out.push_str("|---|---|---|---|---|---|---|\n");
    for entry in &report.contacts {
        let name = if entry.recommendation == Recommendation::Remove {
            format!("{} **remove**", md_escape(&entry.display_name))
        } else {
            md_escape(&entry.display_name)
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} | `{}` | {} | {} |\n",
            entry.id,
            if entry.selected { "[x]" } else { "[ ]" },
            name,
            entry.category,
            entry.short_id,
            if entry.favorite { "yes" } else { "" },
            md_escape(&entry.reason),
        ));
    }

    out
}

/// Plain listing for terminals, one block per contact.
pub fn render_review_text(report: &ReviewReport) -> String {
    let mut out = String::new();
    if report.contacts.is_empty() {
        out.push_str("No contacts loaded yet.\n");
    }

    for entry in &report.contacts {
        out.push_str(&entry_line(entry));
        out.push('\n');
        out.push_str(&format!("      {}\n", meta_line(entry)));
        out.push_str(&format!("      {}\n", entry.reason));
    }

    out.push_str(&format!(
        "\nTotal: {}  Keep: {}  Remove: {}\n",
        report.summary.total, report.summary.keep, report.summary.remove
    ));
    out
}

fn entry_line(entry: &ReviewEntry) -> String {
    let check = if entry.selected { "[x]" } else { "[ ]" };
    let badge = if entry.recommendation == Recommendation::Remove {
        "  (remove)"
    } else {
        ""
    };
    format!("{check} {:>4}  {}{badge}", entry.id, entry.display_name)
}

fn meta_line(entry: &ReviewEntry) -> String {
    let mut meta = format!("{} • {}", entry.category, entry.short_id);
    if entry.favorite {
        meta.push_str(" • favorite");
    }
    if let Some(age) = entry.age_days {
        meta.push_str(&format!(" • {age}d ago"));
    }
    meta
}

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use meshprune_types::report::{ReviewInput, ReviewPolicy, ToolInfo};
    use meshprune_types::review::{ReviewSummary, TypeCategory};
    use pretty_assertions::assert_eq;

    fn report(entries: Vec<ReviewEntry>) -> ReviewReport {
        let mut r = ReviewReport::new(
            ToolInfo {
                name: "meshprune".to_string(),
                version: None,
            },
            ReviewInput {
                path: "contacts.json".to_string(),
                sha256: None,
            },
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            ReviewPolicy {
                stale_after_days: 10,
                flood_markers: vec![],
            },
        );
        let selected: Vec<bool> = entries.iter().map(|e| e.selected).collect();
        r.summary = ReviewSummary::from_selection(&selected);
        r.contacts = entries;
        r
    }

    fn entry(id: usize, recommendation: Recommendation, selected: bool) -> ReviewEntry {
        ReviewEntry {
            id,
            display_name: format!("node|{id}"),
            category: TypeCategory::Repeater,
            short_id: "a1b2c3d4e5…".to_string(),
            favorite: id == 0,
            last_seen: None,
            age_days: Some(15),
            custom_path: false,
            recommendation,
            rule_id: "retain.repeater".to_string(),
            reason: "Repeater: not heard for 15 days, not favorite.".to_string(),
            path_override: false,
            selected,
        }
    }

    #[test]
    fn markdown_empty_review() {
        let md = render_review_md(&report(vec![]));
        assert!(md.contains("- Contacts: 0 (keep 0, remove 0)"));
        assert!(md.ends_with("_No contacts loaded._\n"));
    }

    #[test]
    fn markdown_marks_removals_and_escapes_pipes() {
        let md = render_review_md(&report(vec![
            entry(0, Recommendation::Keep, true),
            entry(1, Recommendation::Remove, false),
        ]));
        assert!(md.contains("| 0 | [x] | node\\|0 | repeater | `a1b2c3d4e5…` | yes |"));
        assert!(md.contains("| 1 | [ ] | node\\|1 **remove** | repeater |"));
    }

    #[test]
    fn text_listing() {
        let text = render_review_text(&report(vec![entry(1, Recommendation::Remove, false)]));
        let expected = "[ ]    1  node|1  (remove)\n      \
                        repeater • a1b2c3d4e5… • 15d ago\n      \
                        Repeater: not heard for 15 days, not favorite.\n\
                        \nTotal: 1  Keep: 0  Remove: 1\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn text_empty() {
        let text = render_review_text(&report(vec![]));
        assert_eq!(text, "No contacts loaded yet.\n\nTotal: 0  Keep: 0  Remove: 0\n");
    }
}

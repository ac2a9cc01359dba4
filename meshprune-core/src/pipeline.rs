//! Review and export pipelines, extracted from the CLI.
//!
//! These entry points are I/O-agnostic: reading the export and writing
//! artifacts go through the port traits.

use crate::export::{ExportError, render_export};
use crate::ports::{ContactSource, WritePort};
use crate::session::ReviewSession;
use crate::settings::{BulkAction, ExportSettings, ReviewSettings};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use meshprune_contacts::{ContactPayload, ContactsLoadError};
use meshprune_domain::Classifier;
use meshprune_render::render_review_md;
use meshprune_types::contact::ContactsDocument;
use meshprune_types::report::{ReviewEntry, ReviewInput, ReviewPolicy, ReviewReport, ToolInfo};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

pub const REVIEW_JSON: &str = "review.json";
pub const REVIEW_MD: &str = "review.md";

/// Error type for pipeline results. Exit code 2 = consent required, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("export disclaimer not accepted")]
    ConsentRequired,
    #[error(transparent)]
    Load(#[from] ContactsLoadError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExportError> for ToolError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::ConsentRequired => ToolError::ConsentRequired,
            other => ToolError::Internal(anyhow::Error::new(other)),
        }
    }
}

/// Outcome of `run_review`.
pub struct ReviewOutcome {
    pub session: ReviewSession,
    pub report: ReviewReport,
}

/// Outcome of `run_export`.
pub struct ExportOutcome {
    pub session: ReviewSession,
    pub report: ReviewReport,
    pub document: ContactsDocument,
    pub path: Utf8PathBuf,
    /// Override ids that did not match any contact.
    pub unknown_ids: Vec<usize>,
}

struct Loaded {
    session: ReviewSession,
    input: ReviewInput,
    policy: ReviewPolicy,
    now: DateTime<Utc>,
}

fn load(settings: &ReviewSettings, source: &dyn ContactSource) -> Result<Loaded, ToolError> {
    let now = settings.now.unwrap_or_else(Utc::now);
    let payload = source.read_payload()?;

    let classifier = Classifier::new(settings.classifier_config());
    let mut session = ReviewSession::new();
    session.load_payload(&payload, &classifier, now)?;

    let config = classifier.config();
    Ok(Loaded {
        session,
        input: review_input(&payload),
        policy: ReviewPolicy {
            stale_after_days: config.stale_after_days,
            flood_markers: config.flood_markers.clone(),
        },
        now,
    })
}

fn review_input(payload: &ContactPayload) -> ReviewInput {
    let digest = Sha256::digest(payload.text.as_bytes());
    ReviewInput {
        path: payload
            .path
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string()),
        sha256: Some(hex::encode(digest)),
    }
}

fn build_report(loaded: &Loaded, tool: ToolInfo) -> ReviewReport {
    let session = &loaded.session;
    let mut report = ReviewReport::new(
        tool,
        loaded.input.clone(),
        loaded.now,
        loaded.policy.clone(),
    );
    report.summary = session.summary();
    report.path_overrides = session.path_overrides().len() as u64;
    report.contacts = session
        .contacts()
        .iter()
        .map(|c| ReviewEntry::from_contact(c, session.is_selected(c.id).unwrap_or(false)))
        .collect();
    report
}

/// Run the review pipeline: load, classify, report.
pub fn run_review(
    settings: &ReviewSettings,
    source: &dyn ContactSource,
    tool: ToolInfo,
) -> Result<ReviewOutcome, ToolError> {
    let loaded = load(settings, source)?;
    let report = build_report(&loaded, tool);
    Ok(ReviewOutcome {
        session: loaded.session,
        report,
    })
}

/// Write `review.json` and `review.md` into `out_dir`.
pub fn write_review_artifacts(
    outcome: &ReviewOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer
        .create_dir_all(out_dir)
        .with_context(|| format!("create {}", out_dir))?;

    let json = serde_json::to_string_pretty(&outcome.report).context("serialize review")?;
    writer.write_file(&out_dir.join(REVIEW_JSON), json.as_bytes())?;
    writer.write_file(
        &out_dir.join(REVIEW_MD),
        render_review_md(&outcome.report).as_bytes(),
    )?;

    debug!(dir = %out_dir, "wrote review artifacts");
    Ok(())
}

/// Apply bulk action, then keep ids, then remove ids. Returns ids that matched nothing.
fn apply_overrides(session: &mut ReviewSession, settings: &ExportSettings) -> Vec<usize> {
    match settings.bulk {
        Some(BulkAction::KeepAll) => session.set_all(true),
        Some(BulkAction::RemoveAll) => session.set_all(false),
        None => {}
    }

    let mut unknown = Vec::new();
    let toggles = settings
        .keep
        .iter()
        .map(|id| (*id, true))
        .chain(settings.remove.iter().map(|id| (*id, false)));
    for (id, value) in toggles {
        if !session.toggle(id, value) {
            unknown.push(id);
        }
    }
    unknown
}

/// Run the export pipeline: review, apply overrides, pass the disclaimer gate, write the file.
pub fn run_export(
    settings: &ExportSettings,
    source: &dyn ContactSource,
    writer: &dyn WritePort,
    tool: ToolInfo,
) -> Result<ExportOutcome, ToolError> {
    let mut loaded = load(&settings.review, source)?;
    let unknown_ids = apply_overrides(&mut loaded.session, settings);

    if settings.accept_disclaimer {
        loaded.session.accept_disclaimer();
    } else {
        loaded.session.decline_disclaimer();
    }

    let document = loaded.session.export_document()?;
    let text = render_export(&document)?;

    let path = settings
        .out_dir
        .join(loaded.session.export_file_name(&settings.suffix));
    writer.write_file(&path, text.as_bytes())?;

    let report = build_report(&loaded, tool);
    info!(
        path = %path,
        kept = report.summary.keep,
        removed = report.summary.remove,
        "wrote cleaned export"
    );

    Ok(ExportOutcome {
        session: loaded.session,
        report,
        document,
        path,
        unknown_ids,
    })
}

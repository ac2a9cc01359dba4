use crate::export::{ExportError, export_file_name};
use crate::ports::ContactSource;
use crate::selection::Selection;
use chrono::{DateTime, Utc};
use meshprune_contacts::{ContactPayload, ContactsLoadError, parse_contacts};
use meshprune_domain::Classifier;
use meshprune_types::contact::{ContactsDocument, RawContact};
use meshprune_types::review::{ReviewSummary, ReviewedContact};
use tracing::{debug, info, warn};

/// Everything one review works on: the classified contacts, the user's
/// selection, and whether the export disclaimer was accepted.
///
/// A successful load replaces the contacts and reseeds the selection. A
/// format failure clears both. A read failure changes nothing.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    contacts: Vec<ReviewedContact>,
    selection: Selection,
    path_overrides: Vec<usize>,
    source_name: Option<String>,
    disclaimer_accepted: bool,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from `source`, then classify. See [`ReviewSession::load_payload`].
    pub fn load(
        &mut self,
        source: &dyn ContactSource,
        classifier: &Classifier,
        now: DateTime<Utc>,
    ) -> Result<ReviewSummary, ContactsLoadError> {
        let payload = source.read_payload().inspect_err(|e| {
            warn!(error = %e, "could not read contacts; keeping current session");
        })?;
        self.load_payload(&payload, classifier, now)
    }

    pub fn load_payload(
        &mut self,
        payload: &ContactPayload,
        classifier: &Classifier,
        now: DateTime<Utc>,
    ) -> Result<ReviewSummary, ContactsLoadError> {
        let raw = match parse_contacts(&payload.text) {
            Ok(raw) => raw,
            Err(e) => {
                if let ContactsLoadError::Format { detail } = &e {
                    warn!(%detail, "not a contacts export; clearing session");
                }
                self.clear();
                return Err(e);
            }
        };

        let classification = classifier.classify(&raw, now);
        self.selection = Selection::initialize(&classification.contacts);
        self.contacts = classification.contacts;
        self.path_overrides = classification.path_overrides;
        self.source_name = payload.file_name().map(str::to_string);

        info!(
            count = self.contacts.len(),
            source = self.source_name.as_deref().unwrap_or("-"),
            "loaded contacts"
        );
        Ok(self.summary())
    }

    fn clear(&mut self) {
        self.contacts.clear();
        self.selection.clear();
        self.path_overrides.clear();
    }

    pub fn contacts(&self) -> &[ReviewedContact] {
        &self.contacts
    }

    pub fn contact(&self, id: usize) -> Option<&ReviewedContact> {
        self.contacts.get(id)
    }

    /// Ids the path resolver promoted to keep during the last load.
    pub fn path_overrides(&self) -> &[usize] {
        &self.path_overrides
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn is_selected(&self, id: usize) -> Option<bool> {
        self.selection.is_selected(id)
    }

    /// Set one contact's keep flag. Unknown ids are ignored and reported as `false`.
    pub fn toggle(&mut self, id: usize, value: bool) -> bool {
        let known = self.selection.toggle(id, value);
        if known {
            debug!(id, value, "toggled selection");
        } else {
            warn!(id, "toggle for unknown contact id ignored");
        }
        known
    }

    pub fn set_all(&mut self, value: bool) {
        debug!(value, count = self.selection.len(), "set all selections");
        self.selection.set_all(value);
    }

    /// Raw records of the currently selected contacts, in input order.
    pub fn snapshot(&self) -> Vec<RawContact> {
        self.selection.snapshot(&self.contacts)
    }

    pub fn summary(&self) -> ReviewSummary {
        self.selection.summary()
    }

    pub fn disclaimer_accepted(&self) -> bool {
        self.disclaimer_accepted
    }

    /// Accepting holds for the rest of the session.
    pub fn accept_disclaimer(&mut self) {
        self.disclaimer_accepted = true;
    }

    /// Declining leaves everything as it was.
    pub fn decline_disclaimer(&mut self) {
        debug!("export disclaimer declined");
    }

    /// The cleaned document, once contacts are loaded and the disclaimer accepted.
    pub fn export_document(&self) -> Result<ContactsDocument, ExportError> {
        if self.contacts.is_empty() {
            return Err(ExportError::NothingLoaded);
        }
        if !self.disclaimer_accepted {
            return Err(ExportError::ConsentRequired);
        }
        Ok(ContactsDocument::new(self.snapshot()))
    }

    pub fn export_file_name(&self, suffix: &str) -> String {
        export_file_name(self.source_name(), suffix)
    }
}

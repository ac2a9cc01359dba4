//! User-adjustable keep/remove flags, one per contact id.

use meshprune_types::contact::RawContact;
use meshprune_types::review::{ReviewSummary, ReviewedContact};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Vec<bool>,
}

impl Selection {
    /// Seed from the final recommendations: keep means selected.
    pub fn initialize(contacts: &[ReviewedContact]) -> Self {
        Self {
            selected: contacts
                .iter()
                .map(|c| c.recommendation.is_keep())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: usize) -> Option<bool> {
        self.selected.get(id).copied()
    }

    /// Set one flag. Returns `false` (and changes nothing) for an unknown id.
    pub fn toggle(&mut self, id: usize, value: bool) -> bool {
        match self.selected.get_mut(id) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn set_all(&mut self, value: bool) {
        self.selected.iter_mut().for_each(|s| *s = value);
    }

    /// Raw records of selected contacts, in input order.
    pub fn snapshot(&self, contacts: &[ReviewedContact]) -> Vec<RawContact> {
        contacts
            .iter()
            .filter(|c| self.is_selected(c.id).unwrap_or(false))
            .map(|c| c.raw.clone())
            .collect()
    }

    pub fn summary(&self) -> ReviewSummary {
        ReviewSummary::from_selection(&self.selected)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

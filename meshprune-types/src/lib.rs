//! Shared DTOs (schemas-as-code) for the meshprune workspace.
//!
//! # Design constraints
//! - Contact records are kept exactly as found so an export reproduces them untouched.
//! - Review artifacts are intended to be serialized to disk.
//! - Prefer adding optional fields over changing semantics.

pub mod contact;
pub mod report;
pub mod review;

/// Schema identifiers.
pub mod schema {
    pub const MESHPRUNE_REVIEW_V1: &str = "meshprune.review.v1";
}

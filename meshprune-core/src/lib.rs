//! Embeddable core library for meshprune.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into the CLI or another host process.
//!
//! # Session
//!
//! [`ReviewSession`](session::ReviewSession) owns the loaded contacts, the
//! user's selection and the disclaimer gate. Every operation takes `&mut self`;
//! there is no shared state.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`ContactSource`](ports::ContactSource): read the raw export
//! - [`WritePort`](ports::WritePort): write files and create directories
//!
//! The [`adapters`] module provides default filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`run_review`](pipeline::run_review): classify an export and build a report
//! - [`run_export`](pipeline::run_export): classify, apply overrides, write the cleaned export

pub mod adapters;
pub mod export;
pub mod pipeline;
pub mod ports;
pub mod selection;
pub mod session;
pub mod settings;

// Re-export loader types so embedders don't need meshprune-contacts directly.
pub use meshprune_contacts::{ContactPayload, ContactsLoadError};

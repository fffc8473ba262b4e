//! Umbrella crate for the fzsl workspace.
//!
//! Re-exports the scanner engine so the workspace-level integration tests in
//! `tests/` exercise the same public surface downstream users see.

pub use fzsl_core::*;

//! Common types and utilities for the grove parser.
//!
//! This crate provides foundational types used across all grove crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, codes and message templates)
//! - Parser limits and thresholds
//! - Line/column positions for byte offsets

// Diagnostic types, codes and message lookup
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};

// Centralized limits and thresholds
pub mod limits;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

//! Diagnostic system for the Kestrel IR.
//!
//! Turns the error channels of a lowered [`Document`](kestrel_ir::Document)
//! into reportable diagnostics:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes (context a pass attached, or the origin of generated code)
//!
//! Parse errors and per-node semantic errors are collected with
//! [`collect_diagnostics`], ordered and limited by a [`DiagnosticQueue`],
//! and rendered by an emitter.

mod collect;
mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;
pub mod span_utils;

pub use collect::{collect_diagnostics, internal_error, report};
pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};

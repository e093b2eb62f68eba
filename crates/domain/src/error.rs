// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::field::Field;
use crate::types::ReportStatus;

/// Errors that can occur while building or mutating domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field name does not belong to the incident field catalogue.
    UnknownField(String),
    /// A value could not be parsed or does not fit the field's kind.
    InvalidFieldValue {
        /// The field the value was destined for.
        field: Field,
        /// Why the value was rejected.
        reason: String,
    },
    /// Report status string is not recognised.
    InvalidReportStatus(String),
    /// Stage string is not recognised.
    InvalidStage(String),
    /// Line item kind string is not recognised.
    InvalidLineItemKind(String),
    /// A report status transition is not permitted.
    InvalidTransition {
        /// The current status.
        from: ReportStatus,
        /// The requested status.
        to: ReportStatus,
    },
    /// A well-known reference entry is missing from the reference tables.
    MissingReferenceEntry {
        /// The reference table that was searched.
        table: &'static str,
        /// The entry name that was expected.
        name: &'static str,
    },
    /// A stored document could not be decoded.
    InvalidDocument(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "Unknown field '{name}'"),
            Self::InvalidFieldValue { field, reason } => {
                write!(f, "Invalid value for field '{}': {reason}", field.as_str())
            }
            Self::InvalidReportStatus(status) => write!(f, "Invalid report status: {status}"),
            Self::InvalidStage(stage) => write!(f, "Invalid stage: {stage}"),
            Self::InvalidLineItemKind(kind) => write!(f, "Invalid line item kind: {kind}"),
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot move report from {from} to {to}")
            }
            Self::MissingReferenceEntry { table, name } => {
                write!(f, "Reference table '{table}' has no entry named '{name}'")
            }
            Self::InvalidDocument(msg) => write!(f, "Invalid incident document: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}

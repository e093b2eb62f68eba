// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bfrs_domain::{DomainError, Field, ReportStatus, Stage};
use thiserror::Error;

/// Errors that can occur while building rules or applying saves.
///
/// Field-level validation failures are not errors at this layer; they are
/// returned as `FieldErrors` alongside the cleaned values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The dependency rules contain a cycle.
    #[error("Dependency cycle between fields: {}", format_fields(.fields))]
    DependencyCycle {
        /// The fields that could not be ordered.
        fields: Vec<Field>,
    },
    /// A save requested a status change that is not allowed.
    #[error("Cannot move report from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ReportStatus,
        /// The requested status.
        to: ReportStatus,
    },
    /// The incident's status does not match the stage it is saved under.
    #[error("A {status} report cannot be saved as {stage}")]
    StageMismatch {
        /// The requested stage.
        stage: Stage,
        /// The incident's current status.
        status: ReportStatus,
    },
    /// The incident is archived and can no longer be edited.
    #[error("Incident {0} is archived")]
    Archived(i64),
    /// The operation requires a persisted incident.
    #[error("Incident has not been saved")]
    NotPersisted,
}

fn format_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<&str>>()
        .join(", ")
}

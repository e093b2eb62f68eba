// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use bfrs::CoreError;
use bfrs_domain::{DomainError, Field, FieldErrors, FieldValue, ReportStatus};
use bfrs_persistence::PersistenceError;
use std::collections::BTreeMap;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain, core and persistence errors and
/// represent the API contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The submission failed validation. Nothing was saved.
    #[error("Validation failed with {} error(s): {errors}", errors.len())]
    ValidationFailed {
        /// Every field's value as validated, for redisplay.
        cleaned: BTreeMap<Field, FieldValue>,
        /// The field-scoped errors.
        errors: FieldErrors,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The requested status change is not allowed.
    #[error("Cannot move report from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ReportStatus,
        /// The requested status.
        to: ReportStatus,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the field errors of a failed validation.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::ValidationFailed { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::UnknownField(name) => ApiError::InvalidInput {
            field: name.clone(),
            message: format!("Unknown field '{name}'"),
        },
        DomainError::InvalidFieldValue { field, reason } => ApiError::InvalidInput {
            field: field.as_str().to_string(),
            message: reason,
        },
        DomainError::InvalidReportStatus(status) => ApiError::InvalidInput {
            field: String::from("report_status"),
            message: format!("Invalid report status: {status}"),
        },
        DomainError::InvalidStage(stage) => ApiError::InvalidInput {
            field: String::from("stage"),
            message: format!("Invalid stage: {stage}"),
        },
        DomainError::InvalidLineItemKind(kind) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Invalid line item kind: {kind}"),
        },
        DomainError::InvalidTransition { from, to } => ApiError::InvalidTransition { from, to },
        DomainError::MissingReferenceEntry { table, name } => ApiError::Internal {
            message: format!("Reference table '{table}' has no entry named '{name}'"),
        },
        DomainError::InvalidDocument(msg) => ApiError::InvalidInput {
            field: String::from("payload"),
            message: msg,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidTransition { from, to } => ApiError::InvalidTransition { from, to },
        CoreError::StageMismatch { stage, status } => ApiError::DomainRuleViolation {
            rule: String::from("stage_matches_status"),
            message: format!("A {status} report cannot be saved as {stage}"),
        },
        CoreError::Archived(incident_id) => ApiError::DomainRuleViolation {
            rule: String::from("archived_is_read_only"),
            message: format!("Incident {incident_id} is archived"),
        },
        CoreError::NotPersisted => ApiError::DomainRuleViolation {
            rule: String::from("incident_must_exist"),
            message: String::from("Incident has not been saved"),
        },
        CoreError::DependencyCycle { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::IncidentNotFound(incident_id) => Self::ResourceNotFound {
                resource_type: String::from("Incident"),
                message: format!("Incident {incident_id} does not exist"),
            },
            PersistenceError::SnapshotNotFound(snapshot_id) => Self::ResourceNotFound {
                resource_type: String::from("Snapshot"),
                message: format!("Snapshot {snapshot_id} does not exist"),
            },
            PersistenceError::NotFound(msg) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message: msg,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

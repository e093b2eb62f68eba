// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::validator::LineItemPlans;
use bfrs_audit::{Actor, AuditEvent};
use bfrs_domain::{Field, FieldErrors, FieldValue, Incident};
use serde_json::Value;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Who is saving, with which capabilities, and when.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveContext {
    /// The user performing the save.
    pub actor: Actor,
    /// Whether the user may maintain authoritative data.
    pub can_maintain_data: bool,
    /// The commit time.
    pub now: OffsetDateTime,
}

impl SaveContext {
    /// Creates a new save context.
    ///
    /// # Arguments
    ///
    /// * `actor` - The user performing the save
    /// * `can_maintain_data` - Whether the user may maintain authoritative data
    /// * `now` - The commit time
    #[must_use]
    pub const fn new(actor: Actor, can_maintain_data: bool, now: OffsetDateTime) -> Self {
        Self {
            actor,
            can_maintain_data,
            now,
        }
    }
}

/// Everything a successful command commits.
///
/// Commits are atomic: the persistence layer writes all of it or none of it.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveResult {
    /// The incident as it is to be stored.
    pub incident: Incident,
    /// Line-item commit plans.
    pub plans: LineItemPlans,
    /// Side records to store, by name.
    pub properties: Vec<(String, Value)>,
    /// Record a snapshot of the committed incident.
    pub take_snapshot: bool,
    /// The audit event recording this change.
    pub audit_event: AuditEvent,
}

/// The outcome of applying a command.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The command passed validation and is ready to commit.
    Saved(Box<SaveResult>),
    /// Validation failed. Nothing is to be committed.
    Rejected {
        /// Every field's value as validated.
        cleaned: BTreeMap<Field, FieldValue>,
        /// The errors raised.
        errors: FieldErrors,
    },
}

impl SaveOutcome {
    /// Returns whether the command was accepted.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use bfrs_domain::{Field, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// Represents the entity performing an action.
///
/// Usually the user saving an incident; imports run on behalf of the user
/// who triggered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The user id of this actor.
    pub id: i64,
    /// The type of actor (e.g., "user", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The user id of this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: i64, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// Creates an actor for an interactive user.
    #[must_use]
    pub fn user(id: i64) -> Self {
        Self::new(id, String::from("user"))
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`CreateIncident`", "`SaveSubmitted`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The recorded field values on one side of a change.
///
/// Stored as a JSON object keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// JSON rendering of the captured values.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot` from already rendered data.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Captures a set of field values.
    #[must_use]
    pub fn of_fields(values: &BTreeMap<Field, FieldValue>) -> Self {
        let object: serde_json::Map<String, serde_json::Value> = values
            .iter()
            .map(|(field, value)| (field.as_str().to_string(), value.to_json()))
            .collect();
        Self {
            data: serde_json::Value::Object(object).to_string(),
        }
    }

    /// An empty snapshot, used for the "before" side of a creation.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: String::from("{}"),
        }
    }
}

/// An immutable audit event for one committed incident save.
///
/// Captures who saved, what kind of save it was, and the changed field
/// values before and after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The canonical identifier. `None` until persisted.
    pub event_id: Option<i64>,
    /// The incident the save applied to. `None` for a creation that has not
    /// been persisted yet.
    pub incident_id: Option<i64>,
    /// The actor who initiated this change.
    pub actor: Actor,
    /// The action that was performed.
    pub action: Action,
    /// The changed values before the save.
    pub before: StateSnapshot,
    /// The changed values after the save.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `incident_id` - The incident the save applied to
    /// * `actor` - The actor who initiated the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the save
    /// * `after` - The state after the save
    #[must_use]
    pub const fn new(
        incident_id: Option<i64>,
        actor: Actor,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            incident_id,
            actor,
            action,
            before,
            after,
        }
    }

    /// Returns a copy bound to `incident_id`.
    #[must_use]
    pub const fn for_incident(mut self, incident_id: i64) -> Self {
        self.incident_id = Some(incident_id);
        self
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{audit_events, incident_properties, incident_snapshots, incidents};

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: i64,
    pub actor_type: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Insertable and updatable incident columns.
///
/// `None` writes NULL on update so cleared fields stay cleared.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = incidents)]
#[diesel(treat_none_as_null = true)]
pub struct IncidentRecord<'a> {
    pub report_status: &'a str,
    pub archive: i32,
    pub region_id: Option<i64>,
    pub district_id: Option<i64>,
    pub name: Option<&'a str>,
    pub year: Option<i64>,
    pub reporting_year: Option<i64>,
    pub fire_detected_date: Option<String>,
    pub tenure_id: Option<i64>,
    pub cause_id: Option<i64>,
    pub sss_id: Option<&'a str>,
    pub fire_not_found: i32,
    pub creator_id: Option<i64>,
    pub modifier_id: Option<i64>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
    pub document: String,
}

/// Stored incident: the document plus its identity.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = incidents)]
pub struct IncidentRow {
    pub incident_id: i64,
    pub document: String,
}

/// Stored side record.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = incident_properties)]
pub struct PropertyRow {
    pub property_id: i64,
    pub incident_id: i64,
    pub name: String,
    pub value_json: String,
}

/// Stored snapshot.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = incident_snapshots)]
pub struct SnapshotRow {
    pub snapshot_id: i64,
    pub incident_id: i64,
    pub snapshot_status: String,
    pub created_at: String,
    pub snapshot_json: String,
}

/// Stored audit event.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub incident_id: i64,
    pub actor_id: i64,
    pub actor_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    #[allow(dead_code)]
    pub created_at: Option<String>,
}

/// Type alias for injury and damage rows: `(id, incident_id, type_id, number)`.
pub type LineItemTuple = (i64, i64, i64, i64);

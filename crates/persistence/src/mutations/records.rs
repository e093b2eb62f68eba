// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Side record and snapshot mutations.

use bfrs::ExistingLineItems;
use bfrs_domain::{Incident, IncidentSnapshot, timestamp};
use diesel::prelude::*;
use diesel::SqliteConnection;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{incident_properties, incident_snapshots};
use crate::error::PersistenceError;
use crate::queries::{get_existing_line_items, get_incident};

/// Stores a named side record, replacing any previous value of that name.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `incident_id` - The owning incident
/// * `name` - The record name
/// * `value` - The record contents
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn upsert_property(
    conn: &mut SqliteConnection,
    incident_id: i64,
    name: &str,
    value: &Value,
) -> Result<(), PersistenceError> {
    let value_json: String = serde_json::to_string(value)?;

    let updated: usize = diesel::update(
        incident_properties::table
            .filter(incident_properties::incident_id.eq(incident_id))
            .filter(incident_properties::name.eq(name)),
    )
    .set(incident_properties::value_json.eq(&value_json))
    .execute(conn)?;

    if updated == 0 {
        diesel::insert_into(incident_properties::table)
            .values((
                incident_properties::incident_id.eq(incident_id),
                incident_properties::name.eq(name),
                incident_properties::value_json.eq(&value_json),
            ))
            .execute(conn)?;
    }

    debug!(incident_id, name, "Stored incident property");
    Ok(())
}

/// Records a snapshot of an incident as currently stored.
///
/// The incident and its line items are read back, so the snapshot reflects
/// every write made earlier in the same transaction.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `incident_id` - The incident to snapshot
/// * `created` - The snapshot time
///
/// # Returns
///
/// The snapshot ID.
///
/// # Errors
///
/// Returns an error if the incident cannot be read or the write fails.
pub fn persist_snapshot(
    conn: &mut SqliteConnection,
    incident_id: i64,
    created: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let incident: Incident = get_incident(conn, incident_id)?;
    let line_items: ExistingLineItems = get_existing_line_items(conn, incident_id)?;

    let snapshot: IncidentSnapshot = IncidentSnapshot {
        id: None,
        incident_id,
        snapshot_status: incident.report_status,
        created: Some(created),
        incident,
        injuries: line_items.injuries,
        damages: line_items.damages,
        areas_burnt: line_items.areas_burnt,
    };

    diesel::insert_into(incident_snapshots::table)
        .values((
            incident_snapshots::incident_id.eq(incident_id),
            incident_snapshots::snapshot_status.eq(snapshot.snapshot_status.as_str()),
            incident_snapshots::created_at.eq(timestamp::format(created)?),
            incident_snapshots::snapshot_json.eq(serde_json::to_string(&snapshot)?),
        ))
        .execute(conn)?;

    let snapshot_id: i64 = conn.get_last_insert_rowid()?;
    debug!(incident_id, snapshot_id, status = %snapshot.snapshot_status, "Persisted incident snapshot");
    Ok(snapshot_id)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use bfrs_audit::{Action, Actor, AuditEvent, StateSnapshot};
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{ActionData, ActorData, AuditEventRow, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Retrieves the audit trail of an incident, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `incident_id` - The incident whose events are read
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_audit_events(
    conn: &mut SqliteConnection,
    incident_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::incident_id.eq(incident_id))
        .select(AuditEventRow::as_select())
        .order(audit_events::event_id.asc())
        .load(conn)?;

    rows.into_iter().map(audit_event_from_row).collect()
}

fn audit_event_from_row(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    let mut event: AuditEvent = AuditEvent::new(
        Some(row.incident_id),
        Actor::new(row.actor_id, actor_data.actor_type),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
    );
    event.event_id = Some(row.event_id);
    Ok(event)
}

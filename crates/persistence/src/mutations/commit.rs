// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The atomic commit of a save.

use bfrs::SaveResult;
use bfrs_domain::LineItemKind;
use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::{
    apply_area_burnt_plan, apply_line_item_plan, persist_audit_event, persist_snapshot,
    save_incident, upsert_property,
};

/// Identifiers produced by a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitResult {
    /// The incident written.
    pub incident_id: i64,
    /// The audit event recorded.
    pub event_id: i64,
    /// The snapshot recorded, if the save took one.
    pub snapshot_id: Option<i64>,
}

/// Commits a save in a single transaction.
///
/// Writes the incident, applies the injury, damage and area-burnt plans,
/// stores side records, records the audit event and, when requested, a
/// snapshot. Any failure rolls the whole save back.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `result` - The accepted save
///
/// # Errors
///
/// Returns an error if any write fails. Nothing is committed in that case.
pub fn commit_save(
    conn: &mut SqliteConnection,
    result: &SaveResult,
) -> Result<CommitResult, PersistenceError> {
    conn.transaction::<CommitResult, PersistenceError, _>(|conn| {
        let incident_id: i64 = save_incident(conn, &result.incident)?;

        apply_line_item_plan(conn, LineItemKind::Injury, incident_id, &result.plans.injuries)?;
        apply_line_item_plan(conn, LineItemKind::Damage, incident_id, &result.plans.damages)?;
        apply_area_burnt_plan(conn, incident_id, &result.plans.areas_burnt)?;

        for (name, value) in &result.properties {
            upsert_property(conn, incident_id, name, value)?;
        }

        let event_id: i64 = persist_audit_event(conn, &result.audit_event, incident_id)?;

        let snapshot_id: Option<i64> = if result.take_snapshot {
            let created: OffsetDateTime = result
                .incident
                .modified
                .unwrap_or_else(OffsetDateTime::now_utc);
            Some(persist_snapshot(conn, incident_id, created)?)
        } else {
            None
        };

        info!(
            incident_id,
            event_id,
            action = %result.audit_event.action.name,
            status = %result.incident.report_status,
            snapshot = snapshot_id.is_some(),
            "Committed incident save"
        );

        Ok(CommitResult {
            incident_id,
            event_id,
            snapshot_id,
        })
    })
}

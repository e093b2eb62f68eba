// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident snapshot queries.

use bfrs_domain::{IncidentSnapshot, timestamp};
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::SnapshotRow;
use crate::diesel_schema::incident_snapshots;
use crate::error::PersistenceError;

fn snapshot_from_row(row: SnapshotRow) -> Result<IncidentSnapshot, PersistenceError> {
    let mut snapshot: IncidentSnapshot = serde_json::from_str(&row.snapshot_json)?;
    snapshot.id = Some(row.snapshot_id);
    snapshot.incident_id = row.incident_id;
    snapshot.snapshot_status = row.snapshot_status.parse()?;
    snapshot.created = Some(timestamp::parse(&row.created_at)?);
    Ok(snapshot)
}

/// Lists the snapshots of an incident, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `incident_id` - The owning incident
///
/// # Errors
///
/// Returns an error if the query fails or a snapshot cannot be decoded.
pub fn list_snapshots(
    conn: &mut SqliteConnection,
    incident_id: i64,
) -> Result<Vec<IncidentSnapshot>, PersistenceError> {
    incident_snapshots::table
        .filter(incident_snapshots::incident_id.eq(incident_id))
        .select(SnapshotRow::as_select())
        .order(incident_snapshots::snapshot_id.asc())
        .load::<SnapshotRow>(conn)?
        .into_iter()
        .map(snapshot_from_row)
        .collect()
}

/// Retrieves a snapshot by ID.
///
/// # Errors
///
/// Returns `PersistenceError::SnapshotNotFound` if no such snapshot exists,
/// or an error if it cannot be decoded.
pub fn get_snapshot(
    conn: &mut SqliteConnection,
    snapshot_id: i64,
) -> Result<IncidentSnapshot, PersistenceError> {
    let result = incident_snapshots::table
        .filter(incident_snapshots::snapshot_id.eq(snapshot_id))
        .select(SnapshotRow::as_select())
        .first::<SnapshotRow>(conn);

    let row: SnapshotRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::SnapshotNotFound(snapshot_id));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    snapshot_from_row(row)
}

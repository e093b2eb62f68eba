// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident and side record queries.

use bfrs_domain::{Incident, IncidentProperty};
use diesel::prelude::*;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;

use crate::data_models::{IncidentRow, PropertyRow};
use crate::diesel_schema::{incident_properties, incidents};
use crate::error::PersistenceError;

/// Restores an incident from its row. The row id wins over the document.
pub(crate) fn incident_from_row(row: IncidentRow) -> Result<Incident, PersistenceError> {
    let mut incident: Incident = Incident::from_document(&row.document)?;
    incident.id = Some(row.incident_id);
    Ok(incident)
}

/// Retrieves an incident by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `incident_id` - The incident to retrieve
///
/// # Errors
///
/// Returns `PersistenceError::IncidentNotFound` if no such incident exists,
/// or an error if the stored document cannot be decoded.
pub fn get_incident(
    conn: &mut SqliteConnection,
    incident_id: i64,
) -> Result<Incident, PersistenceError> {
    let row: IncidentRow = incidents::table
        .filter(incidents::incident_id.eq(incident_id))
        .select(IncidentRow::as_select())
        .first::<IncidentRow>(conn)
        .optional()?
        .ok_or(PersistenceError::IncidentNotFound(incident_id))?;

    incident_from_row(row)
}

/// Lists incidents ordered by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `include_archived` - Whether archived incidents are listed
///
/// # Errors
///
/// Returns an error if the query fails or a document cannot be decoded.
pub fn list_incidents(
    conn: &mut SqliteConnection,
    include_archived: bool,
) -> Result<Vec<Incident>, PersistenceError> {
    let mut query = incidents::table
        .select(IncidentRow::as_select())
        .order(incidents::incident_id.asc())
        .into_boxed();
    if !include_archived {
        query = query.filter(incidents::archive.eq(0));
    }

    query
        .load::<IncidentRow>(conn)?
        .into_iter()
        .map(incident_from_row)
        .collect()
}

/// Counts all incidents, archived or not.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_incidents(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let count: i64 = incidents::table.count().get_result(conn)?;
    count
        .to_usize()
        .ok_or_else(|| PersistenceError::ReconstructionError("Count out of range".to_string()))
}

/// Retrieves the side records of an incident, ordered by name.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `incident_id` - The owning incident
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is not valid JSON.
pub fn get_properties(
    conn: &mut SqliteConnection,
    incident_id: i64,
) -> Result<Vec<IncidentProperty>, PersistenceError> {
    let rows: Vec<PropertyRow> = incident_properties::table
        .filter(incident_properties::incident_id.eq(incident_id))
        .select(PropertyRow::as_select())
        .order(incident_properties::name.asc())
        .load(conn)?;

    rows.into_iter()
        .map(|row| {
            Ok(IncidentProperty {
                id: Some(row.property_id),
                incident_id: row.incident_id,
                name: row.name,
                value: serde_json::from_str(&row.value_json)?,
            })
        })
        .collect()
}

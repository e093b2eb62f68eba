// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident row mutations.

use bfrs_domain::{Incident, timestamp};
use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::IncidentRecord;
use crate::diesel_schema::incidents;
use crate::error::PersistenceError;

fn format_optional(value: Option<OffsetDateTime>) -> Result<Option<String>, PersistenceError> {
    Ok(value.map(timestamp::format).transpose()?)
}

/// Inserts a new incident or updates a persisted one.
///
/// The full incident is written as the document; filter columns are
/// projected from it.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `incident` - The incident to store
///
/// # Returns
///
/// The incident ID.
///
/// # Errors
///
/// Returns `PersistenceError::IncidentNotFound` when updating an incident
/// that does not exist, or an error if serialization or the write fails.
pub fn save_incident(
    conn: &mut SqliteConnection,
    incident: &Incident,
) -> Result<i64, PersistenceError> {
    let record: IncidentRecord<'_> = IncidentRecord {
        report_status: incident.report_status.as_str(),
        archive: i32::from(incident.archive),
        region_id: incident.region,
        district_id: incident.district,
        name: incident.name.as_deref(),
        year: incident.year,
        reporting_year: incident.reporting_year,
        fire_detected_date: format_optional(incident.fire_detected_date)?,
        tenure_id: incident.tenure,
        cause_id: incident.cause,
        sss_id: incident.sss_id.as_deref(),
        fire_not_found: i32::from(incident.fire_not_found),
        creator_id: incident.creator,
        modifier_id: incident.modifier,
        created_at: format_optional(incident.created)?,
        modified_at: format_optional(incident.modified)?,
        document: incident.to_document()?,
    };

    if let Some(incident_id) = incident.id {
        let updated: usize = diesel::update(
            incidents::table.filter(incidents::incident_id.eq(incident_id)),
        )
        .set(&record)
        .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::IncidentNotFound(incident_id));
        }
        debug!(incident_id, "Updated incident");
        return Ok(incident_id);
    }

    diesel::insert_into(incidents::table)
        .values(&record)
        .execute(conn)?;
    let incident_id: i64 = conn.get_last_insert_rowid()?;
    debug!(incident_id, "Inserted incident");
    Ok(incident_id)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Line-item queries, filtered by their owning incident.

use bfrs::ExistingLineItems;
use bfrs_domain::{AreaBurnt, LineItem, LineItemKind};
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::LineItemTuple;
use crate::diesel_schema::{areas_burnt, damages, injuries};
use crate::error::PersistenceError;

/// Retrieves the injury or damage rows of an incident, ordered by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `kind` - Which collection to read
/// * `incident_id` - The owning incident
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_line_items(
    conn: &mut SqliteConnection,
    kind: LineItemKind,
    incident_id: i64,
) -> Result<Vec<LineItem>, PersistenceError> {
    let rows: Vec<LineItemTuple> = match kind {
        LineItemKind::Injury => injuries::table
            .filter(injuries::incident_id.eq(incident_id))
            .select((
                injuries::injury_id,
                injuries::incident_id,
                injuries::injury_type_id,
                injuries::number,
            ))
            .order(injuries::injury_id.asc())
            .load(conn)?,
        LineItemKind::Damage => damages::table
            .filter(damages::incident_id.eq(incident_id))
            .select((
                damages::damage_id,
                damages::incident_id,
                damages::damage_type_id,
                damages::number,
            ))
            .order(damages::damage_id.asc())
            .load(conn)?,
    };

    Ok(rows
        .into_iter()
        .map(|(id, incident_id, item_type, number)| LineItem {
            id: Some(id),
            incident_id,
            item_type,
            number,
        })
        .collect())
}

/// Retrieves the area-burnt buckets of an incident, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_areas_burnt(
    conn: &mut SqliteConnection,
    incident_id: i64,
) -> Result<Vec<AreaBurnt>, PersistenceError> {
    let rows: Vec<(i64, i64, i64, f64)> = areas_burnt::table
        .filter(areas_burnt::incident_id.eq(incident_id))
        .select((
            areas_burnt::area_burnt_id,
            areas_burnt::incident_id,
            areas_burnt::tenure_id,
            areas_burnt::area,
        ))
        .order(areas_burnt::area_burnt_id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, incident_id, tenure, area)| AreaBurnt {
            id: Some(id),
            incident_id,
            tenure,
            area,
        })
        .collect())
}

/// Retrieves every line-item collection of an incident.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn get_existing_line_items(
    conn: &mut SqliteConnection,
    incident_id: i64,
) -> Result<ExistingLineItems, PersistenceError> {
    Ok(ExistingLineItems {
        injuries: get_line_items(conn, LineItemKind::Injury, incident_id)?,
        damages: get_line_items(conn, LineItemKind::Damage, incident_id)?,
        areas_burnt: get_areas_burnt(conn, incident_id)?,
    })
}

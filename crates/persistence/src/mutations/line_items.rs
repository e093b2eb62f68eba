// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applies line-item commit plans.
//!
//! Rows are upserted by their natural key scoped to the incident: update
//! first, insert when nothing matched.

use bfrs::{AreaBurntPlan, LineItemPlan};
use bfrs_domain::LineItemKind;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema::{areas_burnt, damages, injuries};
use crate::error::PersistenceError;

fn delete_all(
    conn: &mut SqliteConnection,
    kind: LineItemKind,
    incident_id: i64,
) -> Result<usize, PersistenceError> {
    let deleted: usize = match kind {
        LineItemKind::Injury => {
            diesel::delete(injuries::table.filter(injuries::incident_id.eq(incident_id)))
                .execute(conn)?
        }
        LineItemKind::Damage => {
            diesel::delete(damages::table.filter(damages::incident_id.eq(incident_id)))
                .execute(conn)?
        }
    };
    Ok(deleted)
}

fn delete_rows(
    conn: &mut SqliteConnection,
    kind: LineItemKind,
    incident_id: i64,
    ids: &[i64],
) -> Result<usize, PersistenceError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let deleted: usize = match kind {
        LineItemKind::Injury => diesel::delete(
            injuries::table
                .filter(injuries::incident_id.eq(incident_id))
                .filter(injuries::injury_id.eq_any(ids)),
        )
        .execute(conn)?,
        LineItemKind::Damage => diesel::delete(
            damages::table
                .filter(damages::incident_id.eq(incident_id))
                .filter(damages::damage_id.eq_any(ids)),
        )
        .execute(conn)?,
    };
    Ok(deleted)
}

fn upsert_line_item(
    conn: &mut SqliteConnection,
    kind: LineItemKind,
    incident_id: i64,
    item_type: i64,
    number: i64,
) -> Result<(), PersistenceError> {
    match kind {
        LineItemKind::Injury => {
            let updated: usize = diesel::update(
                injuries::table
                    .filter(injuries::incident_id.eq(incident_id))
                    .filter(injuries::injury_type_id.eq(item_type)),
            )
            .set(injuries::number.eq(number))
            .execute(conn)?;
            if updated == 0 {
                diesel::insert_into(injuries::table)
                    .values((
                        injuries::incident_id.eq(incident_id),
                        injuries::injury_type_id.eq(item_type),
                        injuries::number.eq(number),
                    ))
                    .execute(conn)?;
            }
        }
        LineItemKind::Damage => {
            let updated: usize = diesel::update(
                damages::table
                    .filter(damages::incident_id.eq(incident_id))
                    .filter(damages::damage_type_id.eq(item_type)),
            )
            .set(damages::number.eq(number))
            .execute(conn)?;
            if updated == 0 {
                diesel::insert_into(damages::table)
                    .values((
                        damages::incident_id.eq(incident_id),
                        damages::damage_type_id.eq(item_type),
                        damages::number.eq(number),
                    ))
                    .execute(conn)?;
            }
        }
    }
    Ok(())
}

/// Applies an injury or damage plan to an incident's rows.
///
/// Deletes run before upserts, so a row whose type was changed frees its
/// old type before the new one is written.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `kind` - Which collection the plan applies to
/// * `incident_id` - The owning incident
/// * `plan` - The plan to apply
///
/// # Errors
///
/// Returns an error if a write fails, including a type that is not in the
/// reference table.
pub fn apply_line_item_plan(
    conn: &mut SqliteConnection,
    kind: LineItemKind,
    incident_id: i64,
    plan: &LineItemPlan,
) -> Result<(), PersistenceError> {
    match plan {
        LineItemPlan::Unchanged => {}
        LineItemPlan::DeleteAll => {
            let deleted: usize = delete_all(conn, kind, incident_id)?;
            debug!(incident_id, %kind, deleted, "Deleted all line items");
        }
        LineItemPlan::Apply {
            delete_ids,
            upserts,
        } => {
            let deleted: usize = delete_rows(conn, kind, incident_id, delete_ids)?;
            for &(item_type, number) in upserts {
                upsert_line_item(conn, kind, incident_id, item_type, number)?;
            }
            debug!(
                incident_id,
                %kind,
                deleted,
                upserted = upserts.len(),
                "Applied line item plan"
            );
        }
    }
    Ok(())
}

/// Applies an area-burnt plan to an incident's buckets.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `incident_id` - The owning incident
/// * `plan` - The plan to apply
///
/// # Errors
///
/// Returns an error if a write fails.
pub fn apply_area_burnt_plan(
    conn: &mut SqliteConnection,
    incident_id: i64,
    plan: &AreaBurntPlan,
) -> Result<(), PersistenceError> {
    match plan {
        AreaBurntPlan::Untouched => {}
        AreaBurntPlan::DeleteAll => {
            let deleted: usize =
                diesel::delete(areas_burnt::table.filter(areas_burnt::incident_id.eq(incident_id)))
                    .execute(conn)?;
            debug!(incident_id, deleted, "Deleted all areas burnt");
        }
        AreaBurntPlan::KeepOnly { tenure, area } => {
            diesel::delete(
                areas_burnt::table
                    .filter(areas_burnt::incident_id.eq(incident_id))
                    .filter(areas_burnt::tenure_id.ne(tenure)),
            )
            .execute(conn)?;

            let updated: usize = diesel::update(
                areas_burnt::table
                    .filter(areas_burnt::incident_id.eq(incident_id))
                    .filter(areas_burnt::tenure_id.eq(tenure)),
            )
            .set(areas_burnt::area.eq(area))
            .execute(conn)?;
            if updated == 0 {
                diesel::insert_into(areas_burnt::table)
                    .values((
                        areas_burnt::incident_id.eq(incident_id),
                        areas_burnt::tenure_id.eq(tenure),
                        areas_burnt::area.eq(area),
                    ))
                    .execute(conn)?;
            }
            debug!(incident_id, tenure, area, "Kept single area burnt bucket");
        }
    }
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference table loading.

use bfrs_domain::{DistrictEntry, ReferenceData, ReferenceEntry, ReferenceTables};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema::{
    agencies, causes, damage_types, districts, injury_types, officers, regions, tenures,
};
use crate::error::PersistenceError;

fn entries(rows: Vec<(i64, String)>) -> Vec<ReferenceEntry> {
    rows.into_iter()
        .map(|(id, name)| ReferenceEntry::new(id, name))
        .collect()
}

/// Loads every reference table, each ordered by id.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn load_reference_tables(
    conn: &mut SqliteConnection,
) -> Result<ReferenceTables, PersistenceError> {
    let regions: Vec<(i64, String)> = regions::table
        .select((regions::region_id, regions::name))
        .order(regions::region_id.asc())
        .load(conn)?;

    let districts: Vec<DistrictEntry> = districts::table
        .select((districts::district_id, districts::region_id, districts::name))
        .order(districts::district_id.asc())
        .load::<(i64, i64, String)>(conn)?
        .into_iter()
        .map(|(id, region_id, name)| DistrictEntry {
            id,
            region_id,
            name,
        })
        .collect();

    let tenures: Vec<(i64, String)> = tenures::table
        .select((tenures::tenure_id, tenures::name))
        .order(tenures::tenure_id.asc())
        .load(conn)?;

    let causes: Vec<(i64, String)> = causes::table
        .select((causes::cause_id, causes::name))
        .order(causes::cause_id.asc())
        .load(conn)?;

    let agencies: Vec<(i64, String)> = agencies::table
        .select((agencies::agency_id, agencies::name))
        .order(agencies::agency_id.asc())
        .load(conn)?;

    let injury_types: Vec<(i64, String)> = injury_types::table
        .select((injury_types::injury_type_id, injury_types::name))
        .order(injury_types::injury_type_id.asc())
        .load(conn)?;

    let damage_types: Vec<(i64, String)> = damage_types::table
        .select((damage_types::damage_type_id, damage_types::name))
        .order(damage_types::damage_type_id.asc())
        .load(conn)?;

    let officers: Vec<(i64, String)> = officers::table
        .select((officers::officer_id, officers::username))
        .order(officers::officer_id.asc())
        .load(conn)?;

    debug!(
        regions = regions.len(),
        districts = districts.len(),
        tenures = tenures.len(),
        "Loaded reference tables"
    );

    Ok(ReferenceTables {
        regions: entries(regions),
        districts,
        tenures: entries(tenures),
        causes: entries(causes),
        agencies: entries(agencies),
        injury_types: entries(injury_types),
        damage_types: entries(damage_types),
        officers: entries(officers),
    })
}

/// Loads the reference tables and resolves their well-known entries.
///
/// # Errors
///
/// Returns `PersistenceError::IncompleteReferenceData` if a well-known entry
/// is missing, or an error if a query fails.
pub fn load_reference_data(conn: &mut SqliteConnection) -> Result<ReferenceData, PersistenceError> {
    let tables: ReferenceTables = load_reference_tables(conn)?;
    Ok(ReferenceData::new(tables)?)
}

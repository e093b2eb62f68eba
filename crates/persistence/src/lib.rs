// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Bushfire Reporting System.
//!
//! This crate stores incidents, their line items, side records, snapshots
//! and audit trail. It is built on Diesel over `SQLite`.
//!
//! ## Storage Layout
//!
//! - Incidents are stored as a JSON document with filter columns (status,
//!   archive flag, region, district, tenure, cause, years, `sss_id`)
//!   projected next to it.
//! - Injuries, damages and areas burnt are rows unique per incident on
//!   their type or tenure.
//! - Snapshots hold a full copy of the incident and its line items.
//! - Reference tables are created and seeded by the embedded migrations.
//!
//! ## Commit Model
//!
//! `Persistence::commit_save` writes everything a save produced in one
//! transaction, or nothing.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases created by
//! `Persistence::new_in_memory()`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use bfrs::{ExistingLineItems, SaveResult};
use bfrs_audit::AuditEvent;
use bfrs_domain::{
    AreaBurnt, Incident, IncidentProperty, IncidentSnapshot, LineItem, LineItemKind,
    ReferenceData, ReferenceTables,
};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::CommitResult;

use backend::PersistenceBackend;

/// Persistence adapter for incidents and everything attached to them.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared in-memory database, so tests are
    /// isolated from one another.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Commit
    // ========================================================================

    /// Commits an accepted save atomically.
    ///
    /// # Arguments
    ///
    /// * `result` - The save to commit
    ///
    /// # Returns
    ///
    /// The incident, audit event and snapshot IDs written.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails. Nothing is committed in that case.
    pub fn commit_save(&mut self, result: &SaveResult) -> Result<CommitResult, PersistenceError> {
        mutations::commit_save(&mut self.conn, result)
    }

    // ========================================================================
    // Reference Data
    // ========================================================================

    /// Loads the raw reference tables.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn load_reference_tables(&mut self) -> Result<ReferenceTables, PersistenceError> {
        queries::load_reference_tables(&mut self.conn)
    }

    /// Loads the reference data with its well-known entries resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a well-known entry is missing.
    pub fn load_reference_data(&mut self) -> Result<ReferenceData, PersistenceError> {
        queries::load_reference_data(&mut self.conn)
    }

    // ========================================================================
    // Incidents
    // ========================================================================

    /// Retrieves an incident by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::IncidentNotFound` if it does not exist.
    pub fn get_incident(&mut self, incident_id: i64) -> Result<Incident, PersistenceError> {
        queries::get_incident(&mut self.conn, incident_id)
    }

    /// Lists incidents ordered by ID.
    ///
    /// # Arguments
    ///
    /// * `include_archived` - Whether archived incidents are listed
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_incidents(
        &mut self,
        include_archived: bool,
    ) -> Result<Vec<Incident>, PersistenceError> {
        queries::list_incidents(&mut self.conn, include_archived)
    }

    /// Counts all incidents, archived or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_incidents(&mut self) -> Result<usize, PersistenceError> {
        queries::count_incidents(&mut self.conn)
    }

    /// Retrieves the side records of an incident.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_properties(
        &mut self,
        incident_id: i64,
    ) -> Result<Vec<IncidentProperty>, PersistenceError> {
        queries::get_properties(&mut self.conn, incident_id)
    }

    // ========================================================================
    // Line Items
    // ========================================================================

    /// Retrieves the injury or damage rows of an incident.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_line_items(
        &mut self,
        kind: LineItemKind,
        incident_id: i64,
    ) -> Result<Vec<LineItem>, PersistenceError> {
        queries::get_line_items(&mut self.conn, kind, incident_id)
    }

    /// Retrieves the area-burnt buckets of an incident.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_areas_burnt(&mut self, incident_id: i64) -> Result<Vec<AreaBurnt>, PersistenceError> {
        queries::get_areas_burnt(&mut self.conn, incident_id)
    }

    /// Retrieves every line-item collection of an incident.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn get_existing_line_items(
        &mut self,
        incident_id: i64,
    ) -> Result<ExistingLineItems, PersistenceError> {
        queries::get_existing_line_items(&mut self.conn, incident_id)
    }

    // ========================================================================
    // Snapshots & Audit
    // ========================================================================

    /// Lists the snapshots of an incident, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_snapshots(
        &mut self,
        incident_id: i64,
    ) -> Result<Vec<IncidentSnapshot>, PersistenceError> {
        queries::list_snapshots(&mut self.conn, incident_id)
    }

    /// Retrieves a snapshot by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SnapshotNotFound` if it does not exist.
    pub fn get_snapshot(&mut self, snapshot_id: i64) -> Result<IncidentSnapshot, PersistenceError> {
        queries::get_snapshot(&mut self.conn, snapshot_id)
    }

    /// Retrieves the audit trail of an incident, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_events(&mut self, incident_id: i64) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_events(&mut self.conn, incident_id)
    }
}

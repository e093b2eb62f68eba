// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test also exercises connection setup, migrations
//! and foreign key enforcement through `Persistence::new_in_memory()`.

use super::{create_test_incident, create_test_persistence};
use crate::{Persistence, PersistenceError};
use bfrs_domain::{ReferenceData, ReferenceTables};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = create_test_persistence();
    let mut db2: Persistence = create_test_persistence();

    create_test_incident(&mut db1, false);

    assert_eq!(db1.count_incidents().unwrap(), 1, "db1 should have 1 incident");
    assert_eq!(db2.count_incidents().unwrap(), 0, "db2 should be isolated");
}

#[test]
fn test_migrations_seed_reference_data() {
    let mut persistence: Persistence = create_test_persistence();

    let tables: ReferenceTables = persistence.load_reference_tables().unwrap();
    assert!(!tables.regions.is_empty());
    assert!(tables.districts.iter().all(|d| tables.regions.iter().any(|r| r.id == d.region_id)));

    let reference: ReferenceData = persistence.load_reference_data().unwrap();
    assert_eq!(reference.tenure_private_property(), 2);
    assert_eq!(reference.tenure_other_crown(), 3);
    assert_eq!(reference.tenure_other(), 4);
    assert_eq!(reference.cause_escape_dpaw_burning(), 2);
    assert_eq!(reference.cause_other(), 3);
    assert_eq!(reference.agency_other(), 3);
    assert_eq!(reference.officer_other(), 1);
}

#[test]
fn test_file_database_persists_between_connections() {
    let dir: std::path::PathBuf = std::env::temp_dir().join(format!(
        "bfrs-persistence-test-{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path: std::path::PathBuf = dir.join("incidents.db");
    let _ = std::fs::remove_file(&path);

    let incident_id: i64 = {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        create_test_incident(&mut persistence, false)
    };

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    assert!(reopened.get_incident(incident_id).is_ok());

    drop(reopened);
    let _ = std::fs::remove_dir_all(&dir);
}

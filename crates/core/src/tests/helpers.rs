// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{SaveContext, Submission, Validator};
use bfrs_audit::Actor;
use bfrs_domain::{
    DistrictEntry, Incident, ReferenceData, ReferenceEntry, ReferenceTables, ReportStatus,
};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::macros::datetime;

pub const TENURE_DBCA: i64 = 1;
pub const TENURE_PRIVATE_PROPERTY: i64 = 2;
pub const TENURE_OTHER_CROWN: i64 = 3;
pub const TENURE_OTHER: i64 = 4;
pub const CAUSE_LIGHTNING: i64 = 1;
pub const CAUSE_ESCAPE: i64 = 2;
pub const CAUSE_OTHER: i64 = 3;
pub const AGENCY_DBCA: i64 = 1;
pub const AGENCY_OTHER: i64 = 3;
pub const OFFICER_OTHER: i64 = 1;

pub fn create_test_reference() -> ReferenceData {
    ReferenceData::new(ReferenceTables {
        regions: vec![ReferenceEntry::new(1, "Swan"), ReferenceEntry::new(2, "South West")],
        districts: vec![
            DistrictEntry {
                id: 10,
                region_id: 1,
                name: String::from("Perth Hills"),
            },
            DistrictEntry {
                id: 20,
                region_id: 2,
                name: String::from("Blackwood"),
            },
        ],
        tenures: vec![
            ReferenceEntry::new(TENURE_DBCA, "DBCA Managed Land"),
            ReferenceEntry::new(TENURE_PRIVATE_PROPERTY, "Private Property"),
            ReferenceEntry::new(TENURE_OTHER_CROWN, "Other Crown"),
            ReferenceEntry::new(TENURE_OTHER, "Other"),
            ReferenceEntry::new(5, "Plantation"),
            ReferenceEntry::new(6, "Private Plantation"),
        ],
        causes: vec![
            ReferenceEntry::new(CAUSE_LIGHTNING, "Lightning"),
            ReferenceEntry::new(CAUSE_ESCAPE, "Escape DPaW burning"),
            ReferenceEntry::new(CAUSE_OTHER, "Other"),
        ],
        agencies: vec![
            ReferenceEntry::new(AGENCY_DBCA, "DBCA"),
            ReferenceEntry::new(2, "DFES"),
            ReferenceEntry::new(AGENCY_OTHER, "Other"),
        ],
        injury_types: vec![
            ReferenceEntry::new(1, "Fatality"),
            ReferenceEntry::new(2, "Injury"),
        ],
        damage_types: vec![
            ReferenceEntry::new(1, "Dwelling"),
            ReferenceEntry::new(2, "Fencing"),
        ],
        officers: vec![
            ReferenceEntry::new(OFFICER_OTHER, "other"),
            ReferenceEntry::new(2, "jsmith"),
        ],
    })
    .unwrap()
}

pub fn create_test_validator() -> Validator {
    Validator::new(create_test_reference()).unwrap()
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-02-01 12:00 +8)
}

pub fn create_test_context(can_maintain_data: bool) -> SaveContext {
    SaveContext::new(Actor::user(7), can_maintain_data, create_test_now())
}

/// A persisted incident in `status`, detected in the 2023/24 financial year.
pub fn create_test_incident(status: ReportStatus) -> Incident {
    Incident {
        id: Some(42),
        report_status: status,
        region: Some(1),
        district: Some(10),
        name: Some(String::from("Mundaring Weir Rd")),
        year: Some(2023),
        reporting_year: Some(2023),
        fire_detected_date: Some(datetime!(2024-01-05 10:00 +8)),
        tenure: Some(TENURE_DBCA),
        cause: Some(CAUSE_LIGHTNING),
        cause_state: Some(1),
        created: Some(datetime!(2024-01-05 11:00 +8)),
        creator: Some(3),
        ..Incident::default()
    }
}

/// Builds a submission from a JSON object of field values.
pub fn submission(fields: Value) -> Submission {
    let map: Map<String, Value> = match fields {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Submission::from_fields(map)
}

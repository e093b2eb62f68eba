// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use bfrs::Submission;
use bfrs_domain::{ReportStatus, Stage};
use bfrs_persistence::Persistence;
use serde_json::{Map, Value, json};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{CreateIncidentRequest, SaveIncidentRequest, Session, create_incident};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_session() -> Session {
    Session::user(7, false)
}

pub fn create_test_maintainer() -> Session {
    Session::user(8, true)
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-02-01 12:00 +8)
}

/// Builds a submission from a JSON object of field values.
pub fn submission(fields: Value) -> Submission {
    let map: Map<String, Value> = match fields {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Submission::from_fields(map)
}

pub fn create_test_request(submit: bool) -> CreateIncidentRequest {
    CreateIncidentRequest {
        payload: Some(json!({
            "sss_id": "sss-0042",
            "region_id": 2,
            "district_id": 20,
            "area": { "total_area": 0 },
            "plantations": [{ "name": "Pine block" }],
        })),
        submission: submission(json!({
            "name": "Nannup Rd",
            "fire_detected_date": "2024-01-20T14:00:00+08:00",
            "other_tenure": 1,
        })),
        submit,
    }
}

pub fn save_request(
    stage: Stage,
    fields: Value,
    target_status: Option<ReportStatus>,
) -> SaveIncidentRequest {
    SaveIncidentRequest {
        stage,
        target_status,
        submission: submission(fields),
    }
}

/// Creates an incident through the API and returns its id.
pub fn create_test_incident(persistence: &mut Persistence, submit: bool) -> i64 {
    create_incident(
        persistence,
        &create_test_session(),
        create_test_request(submit),
        create_test_now(),
    )
    .unwrap()
    .incident_id
}

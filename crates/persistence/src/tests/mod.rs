// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use crate::{CommitResult, Persistence};
use bfrs::{
    Command, ExistingLineItems, SaveContext, SaveOutcome, SaveResult, Submission, Validator, apply,
};
use bfrs_audit::Actor;
use bfrs_domain::Incident;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::macros::datetime;

pub const TENURE_OTHER_CROWN: i64 = 3;
pub const TENURE_OTHER: i64 = 4;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-02-01 12:00 +8)
}

pub fn create_test_context() -> SaveContext {
    SaveContext::new(Actor::user(7), false, create_test_now())
}

/// Builds a submission from a JSON object of field values.
pub fn submission(fields: Value) -> Submission {
    let map: Map<String, Value> = match fields {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Submission::from_fields(map)
}

/// Runs `command` against the stored incident and returns the accepted save.
pub fn accept(persistence: &mut Persistence, incident_id: Option<i64>, command: Command) -> SaveResult {
    let validator: Validator = Validator::new(persistence.load_reference_data().unwrap()).unwrap();
    let (incident, existing): (Incident, ExistingLineItems) = match incident_id {
        Some(id) => (
            persistence.get_incident(id).unwrap(),
            persistence.get_existing_line_items(id).unwrap(),
        ),
        None => (Incident::default(), ExistingLineItems::default()),
    };

    match apply(&validator, &incident, &existing, command, &create_test_context()).unwrap() {
        SaveOutcome::Saved(result) => *result,
        SaveOutcome::Rejected { errors, .. } => panic!("save rejected: {errors}"),
    }
}

/// Runs `command` and commits the result.
pub fn commit(persistence: &mut Persistence, incident_id: Option<i64>, command: Command) -> CommitResult {
    let result: SaveResult = accept(persistence, incident_id, command);
    persistence.commit_save(&result).unwrap()
}

/// Creates an incident from an import payload with no tenure category, so
/// its tenure is "Other".
pub fn create_test_incident(persistence: &mut Persistence, submit: bool) -> i64 {
    let command: Command = Command::Create {
        payload: Some(serde_json::json!({
            "sss_id": "sss-0001",
            "region_id": 1,
            "district_id": 10,
            "area": { "total_area": 4.5 },
            "plantations": [{ "name": "Pine block" }],
        })),
        submission: submission(serde_json::json!({
            "name": "Mundaring Weir Rd",
            "fire_detected_date": "2024-01-20T14:00:00+08:00",
            "other_tenure": 2,
        })),
        submit,
    };
    commit(persistence, None, command).incident_id
}

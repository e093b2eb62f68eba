// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Field, FieldValue, Incident, ReportStatus};
use time::macros::datetime;

#[test]
fn test_value_and_set_value_cover_every_field() {
    let incident: Incident = Incident::default();
    for field in Field::ALL {
        let mut copy: Incident = incident.clone();
        let value: FieldValue = incident.value(*field);
        copy.set_value(*field, value).unwrap();
        assert_eq!(copy, incident);
    }
}

#[test]
fn test_set_value_updates_typed_member() {
    let mut incident: Incident = Incident::default();
    incident
        .set_value(Field::FireDetectedDate, FieldValue::DateTime(datetime!(2024-01-05 10:30 +8)))
        .unwrap();
    incident.set_value(Field::Area, FieldValue::Decimal(12.5)).unwrap();
    incident.set_value(Field::AreaLimit, FieldValue::Bool(true)).unwrap();

    assert_eq!(incident.fire_detected_date, Some(datetime!(2024-01-05 10:30 +8)));
    assert_eq!(incident.area, Some(12.5));
    assert!(incident.area_limit);
}

#[test]
fn test_null_clears_switch_to_false() {
    let mut incident: Incident = Incident {
        fire_not_found: true,
        ..Incident::default()
    };
    incident.set_value(Field::FireNotFound, FieldValue::Null).unwrap();
    assert!(!incident.fire_not_found);
}

#[test]
fn test_mismatched_value_is_rejected() {
    let mut incident: Incident = Incident::default();
    let result: Result<(), DomainError> =
        incident.set_value(Field::Cause, FieldValue::Text(String::from("lightning")));
    assert!(matches!(
        result,
        Err(DomainError::InvalidFieldValue { field: Field::Cause, .. })
    ));
}

#[test]
fn test_document_round_trip_keeps_timestamps() {
    let incident: Incident = Incident {
        id: Some(7),
        report_status: ReportStatus::Submitted,
        name: Some(String::from("Mundaring 12")),
        fire_detected_date: Some(datetime!(2024-01-05 10:30 +8)),
        area: Some(3.25),
        ..Incident::default()
    };

    let document: String = incident.to_document().unwrap();
    assert!(document.contains("2024-01-05T10:30:00+08:00"));

    let restored: Incident = Incident::from_document(&document).unwrap();
    assert_eq!(restored, incident);
}

#[test]
fn test_bad_document_is_rejected() {
    assert!(matches!(
        Incident::from_document("{\"fire_detected_date\": \"soon\"}"),
        Err(DomainError::InvalidDocument(_))
    ));
}

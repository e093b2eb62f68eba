// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TENURE_DBCA, TENURE_OTHER, TENURE_PRIVATE_PROPERTY, create_test_now, create_test_reference,
};
use crate::{CoreError, ImportedValues, finalize_import, import_initial_values};
use bfrs_domain::{Field, FieldValue, Incident, MultiPolygon, Point, ReferenceData};
use serde_json::{Value, json};

fn import(payload: &Value) -> ImportedValues {
    let reference: ReferenceData = create_test_reference();
    import_initial_values(payload, &reference).unwrap()
}

#[test]
fn test_zero_total_area_is_floored() {
    let values: ImportedValues = import(&json!({ "area": { "total_area": 0 } }));
    assert_eq!(values.get(Field::InitialArea), Some(&FieldValue::Decimal(0.01)));
}

#[test]
fn test_areas_are_rounded_to_two_places() {
    let values: ImportedValues = import(&json!({
        "area": { "total_area": 12.3456, "other_area": "0.001" }
    }));

    assert_eq!(values.get(Field::InitialArea), Some(&FieldValue::Decimal(12.35)));
    assert_eq!(values.get(Field::OtherArea), Some(&FieldValue::Decimal(0.01)));
}

#[test]
fn test_tenure_matches_unique_prefix() {
    let values: ImportedValues = import(&json!({
        "tenure_ignition_point": { "category": "dbca" }
    }));
    assert_eq!(values.get(Field::Tenure), Some(&FieldValue::Int(TENURE_DBCA)));
}

#[test]
fn test_ambiguous_or_missing_tenure_falls_back_to_other() {
    let ambiguous: ImportedValues = import(&json!({
        "tenure_ignition_point": { "category": "Private" }
    }));
    assert_eq!(ambiguous.get(Field::Tenure), Some(&FieldValue::Int(TENURE_OTHER)));

    let missing: ImportedValues = import(&json!({}));
    assert_eq!(missing.get(Field::Tenure), Some(&FieldValue::Int(TENURE_OTHER)));

    let exact: ImportedValues = import(&json!({
        "tenure_ignition_point": { "category": "Private Property" }
    }));
    assert_eq!(
        exact.get(Field::Tenure),
        Some(&FieldValue::Int(TENURE_PRIVATE_PROPERTY))
    );
}

#[test]
fn test_region_and_district_need_both_known() {
    let both: ImportedValues = import(&json!({ "region_id": 2, "district_id": 20 }));
    assert_eq!(both.get(Field::Region), Some(&FieldValue::Int(2)));
    assert_eq!(both.get(Field::District), Some(&FieldValue::Int(20)));

    let only_region: ImportedValues = import(&json!({ "region_id": 2 }));
    assert_eq!(only_region.get(Field::Region), None);

    let unknown: ImportedValues = import(&json!({ "region_id": 2, "district_id": 99 }));
    assert_eq!(unknown.get(Field::District), None);
}

#[test]
fn test_side_records_are_split_out() {
    let values: ImportedValues = import(&json!({
        "sss_id": "abc-123",
        "plantations": [{ "name": "Pine block" }],
        "fire_boundary": [[[[115.9, -31.9], [116.0, -31.9], [116.0, -32.0], [115.9, -31.9]]]],
        "fb_validation_req": true,
        "origin_point": [115.95, -31.95],
        "weather": "hot",
    }));

    assert_eq!(values.sss_id.as_deref(), Some("abc-123"));
    assert_eq!(values.plantations, Some(json!([{ "name": "Pine block" }])));
    assert_eq!(values.fire_boundary.as_ref().map(MultiPolygon::len), Some(1));
    assert_eq!(values.fb_validation_req, Some(true));
    assert_eq!(
        values.get(Field::OriginPoint),
        Some(&FieldValue::Point(Point::new(115.95, -31.95)))
    );
    assert!(!values.sss_data.contains_key("plantations"));
    assert!(!values.sss_data.contains_key("fire_boundary"));
    assert_eq!(values.sss_data.get("weather"), Some(&json!("hot")));
}

#[test]
fn test_non_object_payload_is_rejected() {
    let reference: ReferenceData = create_test_reference();
    let result: Result<ImportedValues, CoreError> =
        import_initial_values(&json!([1, 2, 3]), &reference);
    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}

#[test]
fn test_seed_applies_imported_values() {
    let values: ImportedValues = import(&json!({
        "area": { "total_area": 4 },
        "fire_position": "10km N of Collie",
    }));

    let draft: Incident = values.seed().unwrap();

    assert_eq!(draft.initial_area, Some(4.0));
    assert_eq!(draft.fire_position.as_deref(), Some("10km N of Collie"));
    assert_eq!(draft.tenure, Some(TENURE_OTHER));
    assert!(draft.id.is_none());
}

#[test]
fn test_finalize_rederives_authoritative_fields() {
    let values: ImportedValues = import(&json!({
        "area": { "total_area": 4, "other_area": 1 },
        "tenure_ignition_point": { "category": "DBCA" },
        "region_id": 1,
        "district_id": 10,
        "fire_position": "SSS position",
        "fire_boundary": [[[[115.9, -31.9], [116.0, -31.9], [116.0, -32.0], [115.9, -31.9]]]],
    }));
    let mut incident: Incident = Incident {
        tenure: Some(TENURE_OTHER),
        region: Some(2),
        district: Some(20),
        initial_area: Some(99.0),
        fire_position_override: true,
        fire_position: Some(String::from("User position")),
        ..Incident::default()
    };

    finalize_import(&mut incident, &values, 7, create_test_now());

    assert_eq!(incident.tenure, Some(TENURE_DBCA));
    assert_eq!(incident.region, Some(1));
    assert_eq!(incident.district, Some(10));
    assert_eq!(incident.initial_area, Some(4.0));
    assert_eq!(incident.other_area, Some(1.0));
    assert_eq!(incident.fire_position.as_deref(), Some("User position"));
    assert_eq!(incident.fireboundary_uploaded_by, Some(7));
    assert_eq!(incident.fireboundary_uploaded_date, Some(create_test_now()));
    assert!(incident.sss_data.is_some());
}

#[test]
fn test_finalize_clears_areas_when_unknown() {
    let values: ImportedValues = import(&json!({
        "area": { "total_area": 4, "other_area": 1 }
    }));
    let mut incident: Incident = Incident {
        initial_area_unknown: true,
        ..Incident::default()
    };

    finalize_import(&mut incident, &values, 7, create_test_now());

    assert_eq!(incident.initial_area, None);
    assert_eq!(incident.other_area, None);
    assert_eq!(incident.fireboundary_uploaded_by, None);
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    AGENCY_DBCA, AGENCY_OTHER, CAUSE_ESCAPE, CAUSE_OTHER, OFFICER_OTHER, TENURE_OTHER,
    TENURE_OTHER_CROWN, create_test_incident, create_test_validator, submission,
};
use crate::{
    AreaBurntPlan, ExistingLineItems, LineItemPlan, REQUIRED_MESSAGE, Submission, Validation,
    Validator, is_fire_not_found,
};
use bfrs_domain::{
    DISPATCH_PW_NO, DISPATCH_PW_YES, Field, FieldValue, IGNITION_POINT_CROWN, Incident,
    JOB_CODE_MESSAGE, LineItem, LineItemKind, ReportStatus, Stage, SubmittedRow,
};
use serde_json::json;
use time::macros::datetime;

fn validate(
    stage: Stage,
    submission: &Submission,
    instance: &Incident,
    can_maintain_data: bool,
) -> Validation {
    let validator: Validator = create_test_validator();
    validator.validate(
        stage,
        submission,
        instance,
        &ExistingLineItems::default(),
        can_maintain_data,
    )
}

#[test]
fn test_fire_not_found_clears_dependent_fields() {
    let mut instance: Incident = create_test_incident(ReportStatus::Submitted);
    instance.max_fire_level = Some(2);
    instance.arson_squad_notified = Some(true);
    instance.offence_no = Some(String::from("OFF-9"));
    instance.fire_contained_date = Some(datetime!(2024-01-05 12:00 +8));
    instance.fire_controlled_date = Some(datetime!(2024-01-05 13:00 +8));
    instance.fire_safe_date = Some(datetime!(2024-01-05 14:00 +8));
    instance.first_attack = Some(AGENCY_DBCA);
    instance.area_limit = true;
    instance.area = Some(5.0);

    let form: Submission = submission(json!({
        "fire_not_found": true,
        "max_fire_level": 3,
        "area": 7.5,
        "region": 2,
        "district": 20,
    }));

    let validation: Validation = validate(Stage::Submitted, &form, &instance, true);

    assert!(validation.is_valid(), "{}", validation.errors);
    let cleaned = &validation.cleaned;
    for field in [
        Field::MaxFireLevel,
        Field::ArsonSquadNotified,
        Field::FireContainedDate,
        Field::FireControlledDate,
        Field::FireSafeDate,
        Field::FirstAttack,
        Field::Area,
        Field::OffenceNo,
        Field::ReportingYear,
    ] {
        assert_eq!(cleaned[&field], FieldValue::Null, "{field} should be cleared");
    }
    assert_eq!(cleaned[&Field::AreaLimit], FieldValue::Bool(false));
    assert_eq!(cleaned[&Field::Region], FieldValue::Int(1));
    assert_eq!(cleaned[&Field::District], FieldValue::Int(10));
    assert_eq!(validation.plans.injuries, LineItemPlan::DeleteAll);
    assert_eq!(validation.plans.damages, LineItemPlan::DeleteAll);
    assert_eq!(validation.plans.areas_burnt, AreaBurntPlan::DeleteAll);
}

#[test]
fn test_fire_not_found_clears_reporting_year_without_maintainer_rights() {
    for (stage, status) in [
        (Stage::Submitted, ReportStatus::Submitted),
        (Stage::Authorised, ReportStatus::Authorised),
        (Stage::Reviewed, ReportStatus::Reviewed),
    ] {
        let mut instance: Incident = create_test_incident(status);
        instance.max_fire_level = Some(2);
        instance.area_limit = true;
        instance.area = Some(5.0);
        let form: Submission = submission(json!({
            "fire_not_found": true,
            "area": 7.5,
            "region": 2,
        }));

        let validation: Validation = validate(stage, &form, &instance, false);

        assert!(validation.is_valid(), "{stage}: {}", validation.errors);
        let cleaned = &validation.cleaned;
        for field in [Field::MaxFireLevel, Field::Area, Field::ReportingYear] {
            assert_eq!(cleaned[&field], FieldValue::Null, "{stage}: {field} should be cleared");
        }
        assert_eq!(cleaned[&Field::AreaLimit], FieldValue::Bool(false));
        assert_eq!(cleaned[&Field::Region], FieldValue::Int(1));
        assert_eq!(cleaned[&Field::Year], FieldValue::Int(2023));
        assert_eq!(validation.incident.reporting_year, None);
        assert_eq!(validation.plans.injuries, LineItemPlan::DeleteAll);
    }
}

#[test]
fn test_fire_not_found_skips_cause_requirements() {
    let instance: Incident = create_test_incident(ReportStatus::Submitted);
    let form: Submission = submission(json!({
        "fire_not_found": true,
        "cause": CAUSE_OTHER,
    }));

    let validation: Validation = validate(Stage::Submitted, &form, &instance, false);

    assert!(validation.is_valid(), "{}", validation.errors);
    assert!(is_fire_not_found(Stage::Submitted, &validation.incident, false));
}

#[test]
fn test_fire_not_found_is_ignored_where_not_editable() {
    let mut instance: Incident = create_test_incident(ReportStatus::Invalidated);
    instance.fire_not_found = true;
    instance.offence_no = Some(String::from("OFF-1"));
    let form: Submission = submission(json!({ "arson_squad_notified": true }));

    let validation: Validation = validate(Stage::Merged, &form, &instance, false);

    assert!(validation.is_valid(), "{}", validation.errors);
    assert_eq!(
        validation.cleaned[&Field::OffenceNo],
        FieldValue::Text(String::from("OFF-1"))
    );
    assert!(!is_fire_not_found(Stage::Merged, &instance, false));
}

#[test]
fn test_initial_area_unknown_clears_initial_area() {
    let instance: Incident = Incident::default();
    let form: Submission = submission(json!({
        "initial_area_unknown": true,
        "initial_area": 4.2,
    }));

    let validation: Validation = validate(Stage::Initial, &form, &instance, false);

    assert!(validation.is_valid(), "{}", validation.errors);
    assert_eq!(validation.cleaned[&Field::InitialArea], FieldValue::Null);
}

#[test]
fn test_initial_area_kept_when_known() {
    let instance: Incident = Incident::default();
    let form: Submission = submission(json!({
        "initial_area_unknown": "False",
        "initial_area": "4.2",
    }));

    let validation: Validation = validate(Stage::Initial, &form, &instance, false);

    assert_eq!(validation.cleaned[&Field::InitialArea], FieldValue::Decimal(4.2));
}

#[test]
fn test_job_code_is_checked() {
    let instance: Incident = create_test_incident(ReportStatus::Submitted);

    let valid: Validation = validate(
        Stage::Submitted,
        &submission(json!({ "job_code": "UOV" })),
        &instance,
        false,
    );
    assert!(valid.is_valid(), "{}", valid.errors);

    for code in ["uov", "UOVX", "123"] {
        let invalid: Validation = validate(
            Stage::Submitted,
            &submission(json!({ "job_code": code })),
            &instance,
            false,
        );
        assert_eq!(invalid.errors.for_field(Field::JobCode), vec![JOB_CODE_MESSAGE]);
    }
}

#[test]
fn test_reporting_year_before_year_is_rejected() {
    let instance: Incident = create_test_incident(ReportStatus::Submitted);
    let form: Submission = submission(json!({ "reporting_year": 2022 }));

    let validation: Validation = validate(Stage::Submitted, &form, &instance, true);

    assert_eq!(
        validation.errors.for_field(Field::ReportingYear),
        vec!["Cannot be before report financial year, 2023/2024."]
    );
}

#[test]
fn test_moving_detection_into_later_year_is_rejected() {
    let instance: Incident = create_test_incident(ReportStatus::Initial);
    let form: Submission = submission(json!({
        "fire_detected_date": "2025-08-01T10:00:00+08:00",
    }));

    let validation: Validation = validate(Stage::Initial, &form, &instance, false);

    assert_eq!(validation.cleaned[&Field::Year], FieldValue::Int(2025));
    assert_eq!(
        validation.errors.for_field(Field::ReportingYear),
        vec!["Cannot be before report financial year, 2025/2026."]
    );
}

#[test]
fn test_moving_detection_into_earlier_year_updates_year() {
    let instance: Incident = create_test_incident(ReportStatus::Initial);
    let form: Submission = submission(json!({
        "fire_detected_date": "2023-05-10T10:00:00+08:00",
    }));

    let validation: Validation = validate(Stage::Initial, &form, &instance, false);

    assert!(validation.is_valid(), "{}", validation.errors);
    assert_eq!(validation.incident.year, Some(2022));
    assert_eq!(validation.incident.reporting_year, Some(2023));
}

#[test]
fn test_each_violated_milestone_is_reported() {
    let instance: Incident = create_test_incident(ReportStatus::Submitted);
    let form: Submission = submission(json!({
        "dispatch_aerial": true,
        "dispatch_aerial_date": "2024-01-05T09:00:00+08:00",
        "fire_contained_date": "2024-01-05T12:00:00+08:00",
        "fire_controlled_date": "2024-01-05T11:00:00+08:00",
        "fire_safe_date": "2024-01-05T10:30:00+08:00",
    }));

    let validation: Validation = validate(Stage::Submitted, &form, &instance, false);

    assert!(validation.errors.has_field(Field::DispatchAerialDate));
    assert!(validation.errors.has_field(Field::FireControlledDate));
    assert!(validation.errors.has_field(Field::FireSafeDate));
    assert!(!validation.errors.has_field(Field::FireContainedDate));
    assert_eq!(validation.errors.len(), 3);
}

#[test]
fn test_dispatch_dates_follow_their_switches() {
    let mut instance: Incident = create_test_incident(ReportStatus::Submitted);
    instance.dispatch_pw = Some(DISPATCH_PW_YES);
    instance.dispatch_pw_date = Some(datetime!(2024-01-05 10:30 +8));
    instance.dispatch_aerial = Some(true);
    instance.dispatch_aerial_date = Some(datetime!(2024-01-05 10:45 +8));

    let form: Submission = submission(json!({
        "dispatch_pw": DISPATCH_PW_NO,
        "dispatch_aerial": false,
    }));

    let validation: Validation = validate(Stage::Submitted, &form, &instance, true);

    assert!(validation.is_valid(), "{}", validation.errors);
    assert_eq!(validation.cleaned[&Field::DispatchPwDate], FieldValue::Null);
    assert_eq!(validation.cleaned[&Field::DispatchAerialDate], FieldValue::Null);
}

#[test]
fn test_cause_escapes() {
    let instance: Incident = create_test_incident(ReportStatus::Submitted);

    let missing: Validation = validate(
        Stage::Submitted,
        &submission(json!({ "cause": CAUSE_OTHER, "prescribed_burn_id": "PB_1" })),
        &instance,
        false,
    );
    assert_eq!(missing.errors.for_field(Field::OtherCause), vec![REQUIRED_MESSAGE]);
    assert_eq!(missing.cleaned[&Field::PrescribedBurnId], FieldValue::Null);

    let escape: Validation = validate(
        Stage::Submitted,
        &submission(json!({
            "cause": CAUSE_ESCAPE,
            "prescribed_burn_id": "PB_1",
            "other_cause": "sparks",
        })),
        &instance,
        false,
    );
    assert!(escape.is_valid(), "{}", escape.errors);
    assert_eq!(escape.cleaned[&Field::OtherCause], FieldValue::Null);
    assert_eq!(
        escape.cleaned[&Field::PrescribedBurnId],
        FieldValue::Text(String::from("PB_1"))
    );
}

#[test]
fn test_field_officer_other_requires_details() {
    let instance: Incident = create_test_incident(ReportStatus::Submitted);

    let validation: Validation = validate(
        Stage::Submitted,
        &submission(json!({
            "field_officer": OFFICER_OTHER,
            "other_field_officer": "Pat Jones",
        })),
        &instance,
        false,
    );

    assert!(!validation.errors.has_field(Field::OtherFieldOfficer));
    assert!(validation.errors.has_field(Field::OtherFieldOfficerAgency));
    assert!(validation.errors.has_field(Field::OtherFieldOfficerPhone));
}

#[test]
fn test_monitored_only_clears_first_attack() {
    let instance: Incident = create_test_incident(ReportStatus::Submitted);

    let validation: Validation = validate(
        Stage::Submitted,
        &submission(json!({
            "fire_monitored_only": true,
            "first_attack": AGENCY_OTHER,
            "invalid_details": "Burnt out before arrival",
        })),
        &instance,
        false,
    );

    assert!(validation.is_valid(), "{}", validation.errors);
    assert_eq!(validation.cleaned[&Field::FirstAttack], FieldValue::Null);
    assert_eq!(validation.cleaned[&Field::OtherFirstAttack], FieldValue::Null);
    assert_eq!(
        validation.cleaned[&Field::InvalidDetails],
        FieldValue::Text(String::from("Burnt out before arrival"))
    );
}

#[test]
fn test_agency_other_requires_text() {
    let instance: Incident = create_test_incident(ReportStatus::Submitted);

    let validation: Validation = validate(
        Stage::Submitted,
        &submission(json!({
            "first_attack": AGENCY_OTHER,
            "final_control": AGENCY_DBCA,
            "other_final_control": "ignored",
        })),
        &instance,
        false,
    );

    assert_eq!(
        validation.errors.for_field(Field::OtherFirstAttack),
        vec![REQUIRED_MESSAGE]
    );
    assert_eq!(validation.cleaned[&Field::OtherFinalControl], FieldValue::Null);
}

#[test]
fn test_arson_squad_not_notified_clears_offence_number() {
    let mut instance: Incident = create_test_incident(ReportStatus::Submitted);
    instance.arson_squad_notified = Some(true);
    instance.offence_no = Some(String::from("OFF-1"));

    let validation: Validation = validate(
        Stage::Submitted,
        &submission(json!({ "arson_squad_notified": false })),
        &instance,
        false,
    );

    assert_eq!(validation.cleaned[&Field::OffenceNo], FieldValue::Null);
}

#[test]
fn test_area_limit_requires_area() {
    let instance: Incident = create_test_incident(ReportStatus::Submitted);

    let validation: Validation = validate(
        Stage::Submitted,
        &submission(json!({ "area_limit": true })),
        &instance,
        false,
    );

    assert_eq!(validation.errors.for_field(Field::Area), vec![REQUIRED_MESSAGE]);
}

#[test]
fn test_area_limit_keeps_single_ignition_bucket() {
    let mut instance: Incident = create_test_incident(ReportStatus::Submitted);
    instance.tenure = Some(TENURE_OTHER);
    instance.other_tenure = Some(IGNITION_POINT_CROWN);

    let validation: Validation = validate(
        Stage::Submitted,
        &submission(json!({ "area_limit": true, "area": 12.5 })),
        &instance,
        false,
    );

    assert!(validation.is_valid(), "{}", validation.errors);
    assert_eq!(
        validation.plans.areas_burnt,
        AreaBurntPlan::KeepOnly {
            tenure: TENURE_OTHER_CROWN,
            area: 12.5
        }
    );
}

#[test]
fn test_final_boundary_locks_area() {
    let mut instance: Incident = create_test_incident(ReportStatus::Authorised);
    instance.final_fire_boundary = true;
    instance.area = Some(80.0);

    let validation: Validation = validate(
        Stage::Authorised,
        &submission(json!({ "area_limit": true, "area": 3 })),
        &instance,
        false,
    );

    assert!(validation.is_valid(), "{}", validation.errors);
    assert_eq!(validation.cleaned[&Field::Area], FieldValue::Decimal(80.0));
    assert_eq!(validation.cleaned[&Field::AreaLimit], FieldValue::Bool(false));
    assert_eq!(validation.plans.areas_burnt, AreaBurntPlan::Untouched);
}

#[test]
fn test_persisted_tenure_is_locked() {
    let instance: Incident = create_test_incident(ReportStatus::Initial);

    let validation: Validation = validate(
        Stage::Initial,
        &submission(json!({ "tenure": TENURE_OTHER })),
        &instance,
        false,
    );

    assert_eq!(validation.cleaned[&Field::Tenure], FieldValue::Int(1));
    assert!(!validation.errors.has_field(Field::OtherTenure));
}

#[test]
fn test_invalid_values_are_reported_and_keep_instance_value() {
    let instance: Incident = create_test_incident(ReportStatus::Submitted);

    let validation: Validation = validate(
        Stage::Submitted,
        &submission(json!({
            "max_fire_level": 9,
            "fire_safe_date": "yesterday",
            "unknown_field": "x",
            "name": "not editable here",
        })),
        &instance,
        false,
    );

    assert!(validation.errors.has_field(Field::MaxFireLevel));
    assert!(validation.errors.has_field(Field::FireSafeDate));
    assert_eq!(validation.errors.len(), 2);
    assert_eq!(
        validation.cleaned[&Field::Name],
        FieldValue::Text(String::from("Mundaring Weir Rd"))
    );
}

#[test]
fn test_duplicate_injury_types_are_rejected() {
    let instance: Incident = create_test_incident(ReportStatus::Submitted);
    let mut form: Submission = submission(json!({}));
    form.injuries = Some(vec![
        SubmittedRow {
            item_type: Some(1),
            number: Some(2),
            ..SubmittedRow::default()
        },
        SubmittedRow {
            item_type: Some(1),
            number: Some(3),
            ..SubmittedRow::default()
        },
    ]);

    let validation: Validation = validate(Stage::Submitted, &form, &instance, false);

    assert!(!validation.is_valid());
    assert_eq!(validation.errors.line_item_rows(LineItemKind::Injury), vec![1]);
    assert_eq!(validation.plans.injuries, LineItemPlan::Unchanged);
}

#[test]
fn test_line_items_untouched_outside_owning_stages() {
    let mut instance: Incident = create_test_incident(ReportStatus::Invalidated);
    instance.fire_not_found = true;
    let validator: Validator = create_test_validator();
    let existing: ExistingLineItems = ExistingLineItems {
        injuries: vec![LineItem {
            id: Some(5),
            incident_id: 42,
            item_type: 1,
            number: 1,
        }],
        ..ExistingLineItems::default()
    };

    let validation: Validation = validator.validate(
        Stage::Merged,
        &submission(json!({})),
        &instance,
        &existing,
        false,
    );

    assert_eq!(validation.plans.injuries, LineItemPlan::Unchanged);
    assert_eq!(validation.plans.areas_burnt, AreaBurntPlan::Untouched);
}

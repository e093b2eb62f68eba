// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TENURE_DBCA, TENURE_OTHER, TENURE_PRIVATE_PROPERTY, create_test_incident,
    create_test_reference,
};
use crate::{AreaBurntPlan, LineItemPlan, plan_area_burnt, plan_cleanup, reconcile_line_items};
use bfrs_domain::{
    FieldErrors, IGNITION_POINT_PRIVATE, Incident, LineItem, LineItemKind, ReferenceData,
    ReportStatus, SubmittedRow,
};

fn row(id: Option<i64>, item_type: Option<i64>, number: Option<i64>) -> SubmittedRow {
    SubmittedRow {
        id,
        item_type,
        number,
        delete: false,
    }
}

fn stored(id: i64, item_type: i64, number: i64) -> LineItem {
    LineItem {
        id: Some(id),
        incident_id: 42,
        item_type,
        number,
    }
}

#[test]
fn test_unknown_collection_is_left_alone() {
    let reference: ReferenceData = create_test_reference();
    let rows: Vec<SubmittedRow> = vec![row(None, Some(1), Some(1)), row(None, Some(1), Some(2))];

    let plan: Result<LineItemPlan, FieldErrors> =
        reconcile_line_items(LineItemKind::Injury, &rows, true, &[], &reference);

    assert_eq!(plan.unwrap(), LineItemPlan::Unchanged);
}

#[test]
fn test_incomplete_rows_are_deleted_not_reported() {
    let reference: ReferenceData = create_test_reference();
    let existing: Vec<LineItem> = vec![stored(5, 1, 2), stored(6, 2, 1)];
    let rows: Vec<SubmittedRow> = vec![
        row(Some(5), Some(1), Some(0)),
        row(Some(6), None, Some(1)),
        row(None, Some(2), None),
    ];

    let plan: LineItemPlan =
        reconcile_line_items(LineItemKind::Damage, &rows, false, &existing, &reference).unwrap();

    assert_eq!(
        plan,
        LineItemPlan::Apply {
            delete_ids: vec![5, 6],
            upserts: vec![],
        }
    );
}

#[test]
fn test_explicit_delete_removes_stored_row() {
    let reference: ReferenceData = create_test_reference();
    let existing: Vec<LineItem> = vec![stored(5, 1, 2)];
    let rows: Vec<SubmittedRow> = vec![SubmittedRow {
        id: Some(5),
        item_type: Some(1),
        number: Some(2),
        delete: true,
    }];

    let plan: LineItemPlan =
        reconcile_line_items(LineItemKind::Injury, &rows, false, &existing, &reference).unwrap();

    assert_eq!(
        plan,
        LineItemPlan::Apply {
            delete_ids: vec![5],
            upserts: vec![],
        }
    );
}

#[test]
fn test_duplicates_are_reported_after_the_first() {
    let reference: ReferenceData = create_test_reference();
    let rows: Vec<SubmittedRow> = vec![
        row(None, Some(1), Some(1)),
        row(None, Some(2), Some(1)),
        row(None, Some(1), Some(4)),
        row(None, Some(1), Some(5)),
    ];

    let errors: FieldErrors =
        reconcile_line_items(LineItemKind::Injury, &rows, false, &[], &reference).unwrap_err();

    assert_eq!(errors.line_item_rows(LineItemKind::Injury), vec![2, 3]);
    assert!(
        errors
            .iter()
            .all(|e| e.message == "Duplicate: Injury type must be unique")
    );
}

#[test]
fn test_deleted_duplicates_do_not_count() {
    let reference: ReferenceData = create_test_reference();
    let rows: Vec<SubmittedRow> = vec![
        row(None, Some(1), Some(1)),
        SubmittedRow {
            id: None,
            item_type: Some(1),
            number: Some(3),
            delete: true,
        },
    ];

    let plan: LineItemPlan =
        reconcile_line_items(LineItemKind::Damage, &rows, false, &[], &reference).unwrap();

    assert_eq!(
        plan,
        LineItemPlan::Apply {
            delete_ids: vec![],
            upserts: vec![(1, 1)],
        }
    );
}

#[test]
fn test_unknown_type_is_reported() {
    let reference: ReferenceData = create_test_reference();
    let rows: Vec<SubmittedRow> = vec![row(None, Some(99), Some(1))];

    let errors: FieldErrors =
        reconcile_line_items(LineItemKind::Damage, &rows, false, &[], &reference).unwrap_err();

    assert_eq!(errors.line_item_rows(LineItemKind::Damage), vec![0]);
}

#[test]
fn test_retyped_row_releases_old_type() {
    let reference: ReferenceData = create_test_reference();
    let existing: Vec<LineItem> = vec![stored(5, 1, 2)];
    let rows: Vec<SubmittedRow> = vec![row(Some(5), Some(2), Some(2))];

    let plan: LineItemPlan =
        reconcile_line_items(LineItemKind::Injury, &rows, false, &existing, &reference).unwrap();

    assert_eq!(
        plan,
        LineItemPlan::Apply {
            delete_ids: vec![5],
            upserts: vec![(2, 2)],
        }
    );
}

#[test]
fn test_area_burnt_uses_private_property_for_private_ignition_point() {
    let reference: ReferenceData = create_test_reference();
    let mut incident: Incident = create_test_incident(ReportStatus::Submitted);
    incident.tenure = Some(TENURE_OTHER);
    incident.other_tenure = Some(IGNITION_POINT_PRIVATE);
    incident.area_limit = true;
    incident.area = Some(3.25);

    assert_eq!(
        plan_area_burnt(true, &incident, &reference),
        AreaBurntPlan::KeepOnly {
            tenure: TENURE_PRIVATE_PROPERTY,
            area: 3.25
        }
    );
}

#[test]
fn test_area_burnt_uses_declared_tenure() {
    let reference: ReferenceData = create_test_reference();
    let mut incident: Incident = create_test_incident(ReportStatus::Submitted);
    incident.area_limit = true;
    incident.area = Some(1.0);

    assert_eq!(
        plan_area_burnt(true, &incident, &reference),
        AreaBurntPlan::KeepOnly {
            tenure: TENURE_DBCA,
            area: 1.0
        }
    );
    assert_eq!(
        plan_area_burnt(false, &incident, &reference),
        AreaBurntPlan::Untouched
    );
}

#[test]
fn test_area_burnt_cleared_without_limit_or_boundary() {
    let reference: ReferenceData = create_test_reference();
    let mut incident: Incident = create_test_incident(ReportStatus::Submitted);

    assert_eq!(
        plan_area_burnt(true, &incident, &reference),
        AreaBurntPlan::DeleteAll
    );

    incident.final_fire_boundary = true;
    assert_eq!(
        plan_area_burnt(true, &incident, &reference),
        AreaBurntPlan::Untouched
    );
}

#[test]
fn test_cleanup_only_when_fire_not_found() {
    let mut incident: Incident = create_test_incident(ReportStatus::Submitted);
    assert_eq!(
        plan_cleanup(&incident),
        (LineItemPlan::Unchanged, LineItemPlan::Unchanged)
    );

    incident.fire_not_found = true;
    assert_eq!(
        plan_cleanup(&incident),
        (LineItemPlan::DeleteAll, LineItemPlan::DeleteAll)
    );
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::capabilities::{editable_fields, owns_line_items};
use crate::dependency::{DependencyTable, FieldView, Patch, Resolution, fire_not_found};
use crate::error::CoreError;
use crate::reconcile::{
    AreaBurntPlan, ExistingLineItems, LineItemPlan, plan_area_burnt, reconcile_line_items,
};
use crate::submission::Submission;
use bfrs_domain::{
    Field, FieldErrors, FieldSet, FieldValue, Incident, LineItemKind, Milestones, ReferenceData,
    Stage, SubmittedRow, financial_year, validate_job_code, validate_milestones,
    validate_reporting_year,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Message raised against a required field left empty.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

const MILESTONE_FIELDS: &[Field] = &[
    Field::FireDetectedDate,
    Field::DispatchPwDate,
    Field::DispatchAerialDate,
    Field::FireContainedDate,
    Field::FireControlledDate,
    Field::FireSafeDate,
];

/// The commit plans for an incident's line items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemPlans {
    pub injuries: LineItemPlan,
    pub damages: LineItemPlan,
    pub areas_burnt: AreaBurntPlan,
}

/// The result of validating one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// Every field's value after the patch is applied.
    pub cleaned: BTreeMap<Field, FieldValue>,
    /// Resolved values for the editable fields, plus any non-editable field
    /// a rule changed.
    pub patch: Patch,
    /// Every error raised. The save may proceed only when empty.
    pub errors: FieldErrors,
    /// Commit plans for the line items.
    pub plans: LineItemPlans,
    /// The incident with the patch applied.
    pub incident: Incident,
}

impl Validation {
    /// Returns whether the submission may be committed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The shared stage validator.
///
/// One validator serves every stage; the stage only selects the editable
/// field set.
#[derive(Debug, Clone)]
pub struct Validator {
    table: DependencyTable,
    reference: ReferenceData,
}

impl Validator {
    /// Creates a validator with the standard rule table.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DependencyCycle` if the rule table is cyclic.
    pub fn new(reference: ReferenceData) -> Result<Self, CoreError> {
        let table: DependencyTable = DependencyTable::standard(&reference)?;
        Ok(Self { table, reference })
    }

    /// Creates a validator with a custom rule table.
    #[must_use]
    pub const fn with_table(table: DependencyTable, reference: ReferenceData) -> Self {
        Self { table, reference }
    }

    #[must_use]
    pub const fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    #[must_use]
    pub const fn table(&self) -> &DependencyTable {
        &self.table
    }

    /// Validates a submission against `instance` under `stage`.
    ///
    /// The instance is never mutated; the returned `Validation` carries the
    /// patched copy.
    ///
    /// # Arguments
    ///
    /// * `stage` - The stage the save is performed under
    /// * `submission` - The raw submission
    /// * `instance` - The persisted incident (or the import-seeded draft)
    /// * `existing` - The incident's persisted line items
    /// * `can_maintain_data` - Whether the session may maintain authoritative data
    #[must_use]
    pub fn validate(
        &self,
        stage: Stage,
        submission: &Submission,
        instance: &Incident,
        existing: &ExistingLineItems,
        can_maintain_data: bool,
    ) -> Validation {
        let editable: FieldSet = editable_fields(stage, can_maintain_data);
        let (input, mut errors) = submission.parse(&editable);

        let patch: Patch = self.resolve_all(&editable, &input, instance, can_maintain_data, &mut errors);

        let mut incident: Incident = instance.clone();
        for (field, value) in &patch {
            if let Err(e) = incident.set_value(*field, value.clone()) {
                errors.report(*field, e.to_string());
            }
        }

        if editable.contains(&Field::JobCode)
            && let Some(job_code) = incident.job_code.as_deref()
            && let Err(e) = validate_job_code(job_code)
        {
            errors.push(e);
        }

        let detected_moved: bool = incident.fire_detected_date != instance.fire_detected_date;
        if detected_moved && let Some(detected) = incident.fire_detected_date {
            incident.year = Some(financial_year(detected));
        }

        if (editable.contains(&Field::ReportingYear) || incident.year != instance.year)
            && let (Some(year), Some(reporting_year)) = (incident.year, incident.reporting_year)
            && let Err(e) = validate_reporting_year(year, reporting_year)
        {
            errors.push(e);
        }

        if MILESTONE_FIELDS.iter().any(|f| editable.contains(f)) {
            errors.merge(validate_milestones(&Milestones {
                fire_detected_date: incident.fire_detected_date,
                dispatch_pw_date: incident.dispatch_pw_date,
                dispatch_aerial_date: incident.dispatch_aerial_date,
                fire_contained_date: incident.fire_contained_date,
                fire_controlled_date: incident.fire_controlled_date,
                fire_safe_date: incident.fire_safe_date,
            }));
        }

        let plans: LineItemPlans =
            self.plan_line_items(stage, &editable, submission, &incident, existing, &mut errors);

        let cleaned: BTreeMap<Field, FieldValue> = Field::ALL
            .iter()
            .map(|f| (*f, incident.value(*f)))
            .collect();

        debug!(
            stage = stage.as_str(),
            patched = patch.len(),
            errors = errors.len(),
            "Validated submission"
        );

        Validation {
            cleaned,
            patch,
            errors,
            plans,
            incident,
        }
    }

    /// Resolves every field in dependency order.
    ///
    /// A field that is not editable enters the patch only when a rule
    /// changed it.
    fn resolve_all(
        &self,
        editable: &FieldSet,
        input: &Patch,
        instance: &Incident,
        can_maintain_data: bool,
        errors: &mut FieldErrors,
    ) -> Patch {
        let mut resolved: Patch = Patch::new();

        for field in self.table.order() {
            let resolution: Resolution = {
                let view: FieldView<'_> = FieldView {
                    instance,
                    input,
                    editable,
                    resolved: &resolved,
                    can_maintain_data,
                };
                self.table.resolve(*field, &view)
            };
            if !editable.contains(field) {
                if resolution.value != instance.value(*field) {
                    resolved.insert(*field, resolution.value);
                }
                continue;
            }
            if resolution.required && resolution.value.is_null() && !errors.has_field(*field) {
                errors.report(*field, REQUIRED_MESSAGE);
            }
            resolved.insert(*field, resolution.value);
        }

        resolved
    }

    fn plan_line_items(
        &self,
        stage: Stage,
        editable: &FieldSet,
        submission: &Submission,
        incident: &Incident,
        existing: &ExistingLineItems,
        errors: &mut FieldErrors,
    ) -> LineItemPlans {
        let mut plans: LineItemPlans = LineItemPlans {
            areas_burnt: plan_area_burnt(editable.contains(&Field::Area), incident, &self.reference),
            ..LineItemPlans::default()
        };

        if !owns_line_items(stage) {
            return plans;
        }

        let not_found: bool = editable.contains(&Field::FireNotFound) && incident.fire_not_found;
        if not_found {
            debug!("Fire not found, removing injuries and damages");
            plans.injuries = LineItemPlan::DeleteAll;
            plans.damages = LineItemPlan::DeleteAll;
            return plans;
        }

        let mut reconcile = |kind: LineItemKind, rows: Option<&Vec<SubmittedRow>>, flag: Field| {
            let Some(rows) = rows.filter(|_| editable.contains(&flag)) else {
                return LineItemPlan::Unchanged;
            };
            match reconcile_line_items(
                kind,
                rows,
                kind.unknown_flag(incident),
                existing.of_kind(kind),
                &self.reference,
            ) {
                Ok(plan) => plan,
                Err(row_errors) => {
                    errors.merge(row_errors);
                    LineItemPlan::Unchanged
                }
            }
        };

        plans.injuries = reconcile(
            LineItemKind::Injury,
            submission.injuries.as_ref(),
            Field::InjuryUnknown,
        );
        plans.damages = reconcile(
            LineItemKind::Damage,
            submission.damages.as_ref(),
            Field::DamageUnknown,
        );

        plans
    }
}

/// Returns whether the short circuit would trigger for `incident` under
/// `stage`.
#[must_use]
pub fn is_fire_not_found(stage: Stage, incident: &Incident, can_maintain_data: bool) -> bool {
    let editable: FieldSet = editable_fields(stage, can_maintain_data);
    let input: Patch = Patch::new();
    let resolved: Patch = Patch::new();
    fire_not_found().holds(&FieldView {
        instance: incident,
        input: &input,
        editable: &editable,
        resolved: &resolved,
        can_maintain_data,
    })
}

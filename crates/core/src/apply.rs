// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, save_action};
use crate::error::CoreError;
use crate::import::{ImportedValues, PLANTATIONS_PROPERTY, finalize_import, import_initial_values};
use crate::reconcile::{AreaBurntPlan, ExistingLineItems, plan_cleanup};
use crate::state::{SaveContext, SaveOutcome, SaveResult};
use crate::submission::Submission;
use crate::validator::{LineItemPlans, Validation, Validator};
use bfrs_audit::{Action, AuditEvent, StateSnapshot};
use bfrs_domain::{
    Field, FieldErrors, FieldValue, Incident, ReportStatus, Stage, financial_year,
    validate_reporting_year,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, info};

/// Applies a command to an incident, producing what is to be committed.
///
/// Nothing is mutated; the caller commits the returned result atomically.
///
/// # Arguments
///
/// * `validator` - The stage validator
/// * `incident` - The persisted incident (ignored by `Create`)
/// * `existing` - The incident's persisted line items
/// * `command` - The command to apply
/// * `ctx` - The actor, capabilities and commit time
///
/// # Returns
///
/// * `Ok(SaveOutcome::Saved)` with the incident, line-item plans and audit event
/// * `Ok(SaveOutcome::Rejected)` with the cleaned values and field errors
/// * `Err(CoreError)` if the command is not allowed at all
///
/// # Errors
///
/// Returns an error if:
/// - The incident is archived or has not been persisted, for every command
///   but `Create`
/// - The incident's status does not match the stage
/// - The requested status transition is not allowed
/// - The import payload is malformed
pub fn apply(
    validator: &Validator,
    incident: &Incident,
    existing: &ExistingLineItems,
    command: Command,
    ctx: &SaveContext,
) -> Result<SaveOutcome, CoreError> {
    let action_name: &'static str = command.action_name();
    match command {
        Command::Create {
            payload,
            submission,
            submit,
        } => apply_create(validator, payload.as_ref(), &submission, submit, ctx),
        Command::Save {
            stage,
            submission,
            target_status,
        } => apply_save(
            validator,
            incident,
            existing,
            stage,
            &submission,
            target_status,
            ctx,
        ),
        Command::Archive => apply_archive(incident, ctx),
        Command::CleanupLineItems => {
            let id: i64 = persisted_id(incident)?;
            if incident.archive {
                return Err(CoreError::Archived(id));
            }
            let (injuries, damages) = plan_cleanup(incident);
            debug!(incident_id = id, ?injuries, "Planned line-item cleanup");
            Ok(SaveOutcome::Saved(Box::new(SaveResult {
                incident: incident.clone(),
                plans: LineItemPlans {
                    injuries,
                    damages,
                    areas_burnt: AreaBurntPlan::Untouched,
                },
                properties: Vec::new(),
                take_snapshot: false,
                audit_event: AuditEvent::new(
                    Some(id),
                    ctx.actor.clone(),
                    Action::new(String::from(action_name), None),
                    StateSnapshot::empty(),
                    StateSnapshot::empty(),
                ),
            })))
        }
    }
}

/// Creates a new incident from an optional import payload and the initial
/// report form.
///
/// # Errors
///
/// Returns an error if the payload is malformed.
pub fn apply_create(
    validator: &Validator,
    payload: Option<&Value>,
    submission: &Submission,
    submit: bool,
    ctx: &SaveContext,
) -> Result<SaveOutcome, CoreError> {
    let imported: Option<ImportedValues> = payload
        .map(|p| import_initial_values(p, validator.reference()))
        .transpose()?;
    let draft: Incident = match &imported {
        Some(values) => values.seed()?,
        None => Incident::default(),
    };

    let mut form: Submission = submission.clone();
    if let Some(values) = &imported {
        form.fields
            .retain(|name, _| !Field::from_str(name).is_ok_and(|f| values.overrides(f)));
    }

    let validation: Validation = validator.validate(
        Stage::Initial,
        &form,
        &draft,
        &ExistingLineItems::default(),
        ctx.can_maintain_data,
    );
    if !validation.is_valid() {
        return Ok(rejected(validation.cleaned, validation.errors));
    }

    let mut incident: Incident = validation.incident;
    if let Some(values) = &imported {
        finalize_import(&mut incident, values, ctx.actor.id, ctx.now);
    }

    incident.report_status = ReportStatus::Initial;
    incident.year = Some(financial_year(incident.fire_detected_date.unwrap_or(ctx.now)));
    incident.reporting_year = Some(financial_year(ctx.now));
    incident.creator = Some(ctx.actor.id);
    incident.modifier = Some(ctx.actor.id);
    incident.created = Some(ctx.now);
    incident.modified = Some(ctx.now);

    if let (Some(year), Some(reporting_year)) = (incident.year, incident.reporting_year)
        && let Err(e) = validate_reporting_year(year, reporting_year)
    {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.push(e);
        return Ok(rejected(cleaned_values(&incident), errors));
    }

    let mut details: String = String::from("Created incident");
    if submit {
        stamp_transition(&mut incident, ReportStatus::Submitted, ctx);
        details.push_str(" and submitted report");
    }

    let properties: Vec<(String, Value)> = imported
        .and_then(|values| values.plantations)
        .map(|p| vec![(String::from(PLANTATIONS_PROPERTY), p)])
        .unwrap_or_default();

    let audit_event: AuditEvent = AuditEvent::new(
        None,
        ctx.actor.clone(),
        Action::new(String::from("CreateIncident"), Some(details)),
        StateSnapshot::empty(),
        StateSnapshot::of_fields(&cleaned_values(&incident)),
    );

    info!(
        name = incident.name.as_deref().unwrap_or(""),
        submitted = submit,
        "Incident ready to create"
    );

    Ok(SaveOutcome::Saved(Box::new(SaveResult {
        take_snapshot: incident.report_status.takes_snapshot(),
        incident,
        plans: validation.plans,
        properties,
        audit_event,
    })))
}

/// Saves an incident under `stage`.
///
/// # Errors
///
/// Returns an error if the incident is archived or unsaved, if its status
/// does not match the stage, or if the requested transition is not allowed.
pub fn apply_save(
    validator: &Validator,
    instance: &Incident,
    existing: &ExistingLineItems,
    stage: Stage,
    submission: &Submission,
    target_status: Option<ReportStatus>,
    ctx: &SaveContext,
) -> Result<SaveOutcome, CoreError> {
    let id: i64 = persisted_id(instance)?;
    if instance.archive {
        return Err(CoreError::Archived(id));
    }
    if !stage.accepts(instance.report_status) {
        return Err(CoreError::StageMismatch {
            stage,
            status: instance.report_status,
        });
    }
    if let Some(target) = target_status
        && !instance.report_status.can_transition_to(target)
    {
        return Err(CoreError::InvalidTransition {
            from: instance.report_status,
            to: target,
        });
    }

    let validation: Validation =
        validator.validate(stage, submission, instance, existing, ctx.can_maintain_data);
    if !validation.is_valid() {
        debug!(
            incident_id = id,
            errors = validation.errors.len(),
            "Save rejected"
        );
        return Ok(rejected(validation.cleaned, validation.errors));
    }

    let mut incident: Incident = validation.incident;
    incident.modifier = Some(ctx.actor.id);
    incident.modified = Some(ctx.now);

    let mut details: String = format!("Saved {stage} report");
    if let Some(target) = target_status {
        stamp_transition(&mut incident, target, ctx);
        details = format!("{details}, moved from {} to {target}", instance.report_status);
    }

    let (before, after) = changed_fields(instance, &incident);
    let audit_event: AuditEvent = AuditEvent::new(
        Some(id),
        ctx.actor.clone(),
        Action::new(String::from(save_action(stage)), Some(details)),
        StateSnapshot::of_fields(&before),
        StateSnapshot::of_fields(&after),
    );

    info!(
        incident_id = id,
        stage = stage.as_str(),
        changed = after.len(),
        "Incident ready to save"
    );

    Ok(SaveOutcome::Saved(Box::new(SaveResult {
        take_snapshot: target_status.is_some_and(|t| t.takes_snapshot()),
        incident,
        plans: validation.plans,
        properties: Vec::new(),
        audit_event,
    })))
}

/// Archives an incident.
///
/// # Errors
///
/// Returns an error if the incident is unsaved or already archived.
pub fn apply_archive(incident: &Incident, ctx: &SaveContext) -> Result<SaveOutcome, CoreError> {
    let id: i64 = persisted_id(incident)?;
    if incident.archive {
        return Err(CoreError::Archived(id));
    }

    let mut archived: Incident = incident.clone();
    archived.archive = true;
    archived.modifier = Some(ctx.actor.id);
    archived.modified = Some(ctx.now);

    Ok(SaveOutcome::Saved(Box::new(SaveResult {
        incident: archived,
        plans: LineItemPlans::default(),
        properties: Vec::new(),
        take_snapshot: false,
        audit_event: AuditEvent::new(
            Some(id),
            ctx.actor.clone(),
            Action::new(String::from("ArchiveIncident"), None),
            StateSnapshot::new(String::from(r#"{"archive":false}"#)),
            StateSnapshot::new(String::from(r#"{"archive":true}"#)),
        ),
    })))
}

fn persisted_id(incident: &Incident) -> Result<i64, CoreError> {
    incident.id.ok_or(CoreError::NotPersisted)
}

/// Moves the incident to `target`, recording who made the move.
fn stamp_transition(incident: &mut Incident, target: ReportStatus, ctx: &SaveContext) {
    match target {
        ReportStatus::Submitted => {
            incident.init_authorised_by = Some(ctx.actor.id);
            incident.init_authorised_date = Some(ctx.now);
        }
        ReportStatus::Authorised => {
            incident.authorised_by = Some(ctx.actor.id);
            incident.authorised_date = Some(ctx.now);
        }
        ReportStatus::Reviewed => {
            incident.reviewed_by = Some(ctx.actor.id);
            incident.reviewed_date = Some(ctx.now);
        }
        ReportStatus::Initial | ReportStatus::Invalidated => {}
    }
    incident.report_status = target;
}

fn cleaned_values(incident: &Incident) -> BTreeMap<Field, FieldValue> {
    Field::ALL
        .iter()
        .map(|f| (*f, incident.value(*f)))
        .collect()
}

/// The catalogue fields whose value differs, before and after.
fn changed_fields(
    before: &Incident,
    after: &Incident,
) -> (BTreeMap<Field, FieldValue>, BTreeMap<Field, FieldValue>) {
    Field::ALL
        .iter()
        .filter_map(|f| {
            let old: FieldValue = before.value(*f);
            let new: FieldValue = after.value(*f);
            (old != new).then_some(((*f, old), (*f, new)))
        })
        .unzip()
}

const fn rejected(cleaned: BTreeMap<Field, FieldValue>, errors: FieldErrors) -> SaveOutcome {
    SaveOutcome::Rejected { cleaned, errors }
}

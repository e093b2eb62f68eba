// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API entry points.
//!
//! Every mutating entry point follows the same shape: load the reference
//! data and the stored incident, apply a command through the core, then
//! commit the accepted result in one transaction.

use crate::error::ApiError;
use crate::request_response::{
    AuditTrailResponse, CreateIncidentRequest, IncidentDetailResponse, IncidentSummary,
    ListIncidentsResponse, ListSnapshotsResponse, SaveIncidentRequest, SaveIncidentResponse,
};
use crate::session::Session;
use bfrs::{Command, ExistingLineItems, SaveOutcome, SaveResult, Validator, apply};
use bfrs_domain::{Incident, IncidentSnapshot, LineItemKind, ReportStatus, Stage};
use bfrs_persistence::{CommitResult, Persistence};
use serde_json::Value;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Creates a new incident, optionally seeded from an import payload.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `session` - The user creating the incident
/// * `request` - The payload and initial report form
/// * `now` - The commit time
///
/// # Returns
///
/// * `Ok(SaveIncidentResponse)` with the new incident's id
/// * `Err(ApiError)` if validation fails or the commit fails
///
/// # Errors
///
/// Returns an error if:
/// - The payload is not a JSON object
/// - The initial report form fails validation
/// - The database cannot be read or written
pub fn create_incident(
    persistence: &mut Persistence,
    session: &Session,
    request: CreateIncidentRequest,
    now: OffsetDateTime,
) -> Result<SaveIncidentResponse, ApiError> {
    let command: Command = Command::Create {
        payload: request.payload,
        submission: request.submission,
        submit: request.submit,
    };
    let response: SaveIncidentResponse = run_command(persistence, session, None, command, now)?;
    info!(
        incident_id = response.incident_id,
        status = %response.report_status,
        "Created incident"
    );
    Ok(response)
}

/// Validates a submitted form under a stage and saves it.
///
/// Nothing is written unless every rule passes. A rejected save returns
/// `ApiError::ValidationFailed` carrying the cleaned values and every
/// field error raised.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `session` - The user saving the incident
/// * `incident_id` - The incident to save
/// * `request` - The stage, requested status and submitted form
/// * `now` - The commit time
///
/// # Errors
///
/// Returns an error if:
/// - The incident does not exist or is archived
/// - The stage does not match the incident's status
/// - The requested status change is not allowed
/// - The form fails validation
/// - The database cannot be read or written
pub fn validate_and_save(
    persistence: &mut Persistence,
    session: &Session,
    incident_id: i64,
    request: SaveIncidentRequest,
    now: OffsetDateTime,
) -> Result<SaveIncidentResponse, ApiError> {
    let stage: Stage = request.stage;
    let command: Command = Command::Save {
        stage,
        submission: request.submission,
        target_status: request.target_status,
    };
    let response: SaveIncidentResponse =
        run_command(persistence, session, Some(incident_id), command, now)?;
    info!(
        incident_id,
        stage = %stage,
        status = %response.report_status,
        snapshot_id = ?response.snapshot_id,
        "Saved incident"
    );
    Ok(response)
}

/// Removes the injuries and damages of an incident whose fire was not found.
///
/// Incidents with a found fire are left untouched, but the request is
/// still recorded in the audit trail.
///
/// # Errors
///
/// Returns an error if the incident does not exist or is archived, or if
/// the database cannot be read or written.
pub fn cleanup_line_items(
    persistence: &mut Persistence,
    session: &Session,
    incident_id: i64,
    now: OffsetDateTime,
) -> Result<SaveIncidentResponse, ApiError> {
    let response: SaveIncidentResponse = run_command(
        persistence,
        session,
        Some(incident_id),
        Command::CleanupLineItems,
        now,
    )?;
    info!(incident_id, "Cleaned up line items");
    Ok(response)
}

/// Archives an incident. Incidents are never deleted.
///
/// # Errors
///
/// Returns an error if the incident does not exist or is already archived,
/// or if the database cannot be read or written.
pub fn archive_incident(
    persistence: &mut Persistence,
    session: &Session,
    incident_id: i64,
    now: OffsetDateTime,
) -> Result<SaveIncidentResponse, ApiError> {
    let response: SaveIncidentResponse =
        run_command(persistence, session, Some(incident_id), Command::Archive, now)?;
    info!(incident_id, "Archived incident");
    Ok(response)
}

/// Retrieves an incident with its line items and side records.
///
/// The response also names the stage the incident is edited under and
/// which fields the session's user may change there.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the incident does not exist.
pub fn get_incident(
    persistence: &mut Persistence,
    session: &Session,
    incident_id: i64,
) -> Result<IncidentDetailResponse, ApiError> {
    let incident: Incident = persistence.get_incident(incident_id)?;
    let stage: Stage = incident.report_status.editing_stage();
    let properties: BTreeMap<String, Value> = persistence
        .get_properties(incident_id)?
        .into_iter()
        .map(|property| (property.name, property.value))
        .collect();

    Ok(IncidentDetailResponse {
        stage,
        editable_fields: session.editable_fields(stage).into_iter().collect(),
        injuries: persistence.get_line_items(LineItemKind::Injury, incident_id)?,
        damages: persistence.get_line_items(LineItemKind::Damage, incident_id)?,
        areas_burnt: persistence.get_areas_burnt(incident_id)?,
        properties,
        incident,
    })
}

/// Lists incidents ordered by id.
///
/// # Errors
///
/// Returns an error if the database cannot be read.
pub fn list_incidents(
    persistence: &mut Persistence,
    include_archived: bool,
) -> Result<ListIncidentsResponse, ApiError> {
    let incidents: Vec<IncidentSummary> = persistence
        .list_incidents(include_archived)?
        .iter()
        .filter_map(|incident| incident.id.map(|id| IncidentSummary::of(id, incident)))
        .collect();
    debug!(count = incidents.len(), include_archived, "Listed incidents");
    Ok(ListIncidentsResponse { incidents })
}

/// Lists the snapshots of an incident, oldest first.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the incident does not exist.
pub fn list_snapshots(
    persistence: &mut Persistence,
    incident_id: i64,
) -> Result<ListSnapshotsResponse, ApiError> {
    // Distinguishes an unknown incident from one with no snapshots yet.
    persistence.get_incident(incident_id)?;
    let snapshots: Vec<IncidentSnapshot> = persistence.list_snapshots(incident_id)?;
    Ok(ListSnapshotsResponse {
        incident_id,
        snapshots,
    })
}

/// Retrieves one snapshot.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the snapshot does not exist.
pub fn get_snapshot(
    persistence: &mut Persistence,
    snapshot_id: i64,
) -> Result<IncidentSnapshot, ApiError> {
    Ok(persistence.get_snapshot(snapshot_id)?)
}

/// Retrieves the audit trail of an incident, oldest first.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the incident does not exist.
pub fn get_audit_trail(
    persistence: &mut Persistence,
    incident_id: i64,
) -> Result<AuditTrailResponse, ApiError> {
    persistence.get_incident(incident_id)?;
    Ok(AuditTrailResponse {
        incident_id,
        events: persistence.get_audit_events(incident_id)?,
    })
}

/// Applies `command` to the stored incident and commits the result.
///
/// A new incident is represented by `incident_id == None`.
fn run_command(
    persistence: &mut Persistence,
    session: &Session,
    incident_id: Option<i64>,
    command: Command,
    now: OffsetDateTime,
) -> Result<SaveIncidentResponse, ApiError> {
    let action: &'static str = command.action_name();
    let validator: Validator = Validator::new(persistence.load_reference_data()?)?;

    let (incident, existing): (Incident, ExistingLineItems) = match incident_id {
        Some(id) => (
            persistence.get_incident(id)?,
            persistence.get_existing_line_items(id)?,
        ),
        None => (Incident::default(), ExistingLineItems::default()),
    };

    let result: SaveResult = match apply(
        &validator,
        &incident,
        &existing,
        command,
        &session.save_context(now),
    )? {
        SaveOutcome::Saved(result) => *result,
        SaveOutcome::Rejected { cleaned, errors } => {
            debug!(action, errors = errors.len(), "Save rejected");
            return Err(ApiError::ValidationFailed { cleaned, errors });
        }
    };

    let report_status: ReportStatus = result.incident.report_status;
    let commit: CommitResult = persistence.commit_save(&result)?;

    Ok(SaveIncidentResponse {
        incident_id: commit.incident_id,
        event_id: commit.event_id,
        snapshot_id: commit.snapshot_id,
        report_status,
        message: format!("{action} committed for incident {}", commit.incident_id),
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use bfrs::Submission;
use bfrs_audit::AuditEvent;
use bfrs_domain::{
    AreaBurnt, Field, FieldErrors, FieldValue, Incident, IncidentSnapshot, LineItem, ReportStatus,
    Stage,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// API request to create a new incident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateIncidentRequest {
    /// The spatial support system payload seeding the incident, if any.
    pub payload: Option<Value>,
    /// The initial report form.
    pub submission: Submission,
    /// Submit the report straight away.
    pub submit: bool,
}

/// API request to save an incident under a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveIncidentRequest {
    /// The stage the save is performed under.
    pub stage: Stage,
    /// The requested status, if the save progresses the report.
    #[serde(default)]
    pub target_status: Option<ReportStatus>,
    /// The submitted form.
    #[serde(default)]
    pub submission: Submission,
}

/// API response for a committed save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveIncidentResponse {
    /// The incident's id.
    pub incident_id: i64,
    /// The audit event recorded for the save.
    pub event_id: i64,
    /// The snapshot taken by the save, if any.
    pub snapshot_id: Option<i64>,
    /// The incident's status after the save.
    pub report_status: ReportStatus,
    /// A success message.
    pub message: String,
}

/// API response describing a rejected save.
///
/// Carries every field's cleaned value so the form can be redisplayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailedResponse {
    /// The cleaned values, keyed by field name.
    pub cleaned: Map<String, Value>,
    /// The field-scoped errors.
    pub errors: FieldErrors,
}

impl ValidationFailedResponse {
    /// Builds the response from the cleaned values and errors of a rejection.
    #[must_use]
    pub fn new(cleaned: &BTreeMap<Field, FieldValue>, errors: &FieldErrors) -> Self {
        Self {
            cleaned: cleaned
                .iter()
                .map(|(field, value)| (field.as_str().to_string(), value.to_json()))
                .collect(),
            errors: errors.clone(),
        }
    }
}

/// API response with an incident and everything stored alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentDetailResponse {
    /// The incident.
    pub incident: Incident,
    /// The stage the incident is currently edited under.
    pub stage: Stage,
    /// The fields the session's user may edit under that stage.
    pub editable_fields: Vec<Field>,
    pub injuries: Vec<LineItem>,
    pub damages: Vec<LineItem>,
    pub areas_burnt: Vec<AreaBurnt>,
    /// Side records, by name.
    pub properties: BTreeMap<String, Value>,
}

/// A summary of one incident for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentSummary {
    pub incident_id: i64,
    pub name: Option<String>,
    pub report_status: ReportStatus,
    pub region: Option<i64>,
    pub district: Option<i64>,
    pub year: Option<i64>,
    pub archive: bool,
}

impl IncidentSummary {
    /// Summarises a stored incident.
    #[must_use]
    pub fn of(incident_id: i64, incident: &Incident) -> Self {
        Self {
            incident_id,
            name: incident.name.clone(),
            report_status: incident.report_status,
            region: incident.region,
            district: incident.district,
            year: incident.year,
            archive: incident.archive,
        }
    }
}

/// API response for listing incidents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListIncidentsResponse {
    pub incidents: Vec<IncidentSummary>,
}

/// API response for listing an incident's snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSnapshotsResponse {
    pub incident_id: i64,
    /// The snapshots, oldest first.
    pub snapshots: Vec<IncidentSnapshot>,
}

/// API response with an incident's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrailResponse {
    pub incident_id: i64,
    /// The recorded events, oldest first.
    pub events: Vec<AuditEvent>,
}

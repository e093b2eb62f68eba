// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for bushfire incident reporting.
//!
//! Entry points take a session, a persistence handle and a request, and
//! translate every lower-layer error into `ApiError`. Validation failures
//! come back as `ApiError::ValidationFailed` with the cleaned values, so a
//! caller can redisplay the form.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;
mod session;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    archive_incident, cleanup_line_items, create_incident, get_audit_trail, get_incident,
    get_snapshot, list_incidents, list_snapshots, validate_and_save,
};
pub use request_response::{
    AuditTrailResponse, CreateIncidentRequest, IncidentDetailResponse, IncidentSummary,
    ListIncidentsResponse, ListSnapshotsResponse, SaveIncidentRequest, SaveIncidentResponse,
    ValidationFailedResponse,
};
pub use session::Session;

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod field;
mod field_error;
mod incident;
mod line_items;
mod reference;
pub mod timestamp;
mod types;
mod validation;
mod value;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use field::{
    CAUSE_STATE_KNOWN, CAUSE_STATE_POSSIBLE, DISPATCH_PW_MONITORING, DISPATCH_PW_NO,
    DISPATCH_PW_YES, FIRE_LEVEL_CODES, Field, FieldKind, FieldSet, IGNITION_POINT_CROWN,
    IGNITION_POINT_PRIVATE,
};
pub use field_error::{ErrorTarget, FieldError, FieldErrors};
pub use incident::Incident;
pub use line_items::{
    AreaBurnt, IncidentProperty, IncidentSnapshot, LineItem, LineItemKind, SubmittedRow,
};
pub use reference::{
    AGENCY_OTHER, CAUSE_ESCAPE_DPAW_BURNING, CAUSE_OTHER, DistrictEntry, OFFICER_OTHER,
    ReferenceData, ReferenceEntry, ReferenceTables, TENURE_OTHER, TENURE_OTHER_CROWN,
    TENURE_PRIVATE_PROPERTY,
};
pub use types::{MultiPolygon, Point, ReportStatus, Stage};
pub use validation::{
    JOB_CODE_MESSAGE, Milestones, financial_year, validate_job_code, validate_milestones,
    validate_reporting_year,
};
pub use value::FieldValue;

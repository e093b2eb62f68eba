// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::field::Field;
use crate::field_error::{FieldError, FieldErrors};
use chrono::{Datelike, TimeZone, Utc};
use chrono_tz::Australia::Perth;
use time::OffsetDateTime;

/// Message raised against a job code with the wrong shape.
pub const JOB_CODE_MESSAGE: &str = "Must be alpha characters, length 3, and uppercase, eg. UOV";

/// Validates a job code.
///
/// A job code is exactly three uppercase letters. Letters outside ASCII are
/// accepted, so "ÅÄÖ" passes.
///
/// # Arguments
///
/// * `job_code` - The submitted job code
///
/// # Errors
///
/// Returns a `FieldError` on `job_code` if the code has the wrong shape.
pub fn validate_job_code(job_code: &str) -> Result<(), FieldError> {
    if job_code.chars().count() == 3
        && job_code.chars().all(|c| c.is_alphabetic() && c.is_uppercase())
    {
        Ok(())
    } else {
        Err(FieldError::field(Field::JobCode, JOB_CODE_MESSAGE))
    }
}

/// Validates that the reporting year is not before the year of occurrence.
///
/// # Arguments
///
/// * `year` - Financial year of occurrence
/// * `reporting_year` - Financial year the incident is reported in
///
/// # Errors
///
/// Returns a `FieldError` on `reporting_year` if it precedes `year`.
pub fn validate_reporting_year(year: i64, reporting_year: i64) -> Result<(), FieldError> {
    if reporting_year < year {
        return Err(FieldError::field(
            Field::ReportingYear,
            format!(
                "Cannot be before report financial year, {year}/{}.",
                year + 1
            ),
        ));
    }
    Ok(())
}

/// The milestone timestamps whose order is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Milestones {
    pub fire_detected_date: Option<OffsetDateTime>,
    pub dispatch_pw_date: Option<OffsetDateTime>,
    pub dispatch_aerial_date: Option<OffsetDateTime>,
    pub fire_contained_date: Option<OffsetDateTime>,
    pub fire_controlled_date: Option<OffsetDateTime>,
    pub fire_safe_date: Option<OffsetDateTime>,
}

/// Checks the milestone pairs and reports every violation.
///
/// Each pair is checked only when both ends are present. The error is
/// raised against the later milestone.
#[must_use]
pub fn validate_milestones(milestones: &Milestones) -> FieldErrors {
    let mut errors: FieldErrors = FieldErrors::new();

    let before = |later: Option<OffsetDateTime>, earlier: Option<OffsetDateTime>| {
        matches!((later, earlier), (Some(l), Some(e)) if l < e)
    };

    if before(milestones.dispatch_pw_date, milestones.fire_detected_date) {
        errors.report(
            Field::DispatchPwDate,
            "Datetime must not be before Fire Detected Datetime.",
        );
    }

    if before(milestones.dispatch_aerial_date, milestones.fire_detected_date) {
        errors.report(
            Field::DispatchAerialDate,
            "Datetime must not be before Fire Detected Datetime.",
        );
    }

    if before(milestones.fire_contained_date, milestones.fire_detected_date) {
        let detected: String = milestones
            .fire_detected_date
            .and_then(|d| crate::timestamp::format(d).ok())
            .unwrap_or_default();
        errors.report(
            Field::FireContainedDate,
            format!("Datetime must not be before Fire Detected Datetime - {detected}."),
        );
    }

    if before(milestones.fire_controlled_date, milestones.fire_contained_date) {
        errors.report(
            Field::FireControlledDate,
            "Datetime must not be before Fire Contained Datetime.",
        );
    }

    if before(milestones.fire_safe_date, milestones.fire_controlled_date) {
        errors.report(
            Field::FireSafeDate,
            "Datetime must not be before Fire Controlled Datetime.",
        );
    }

    errors
}

/// Returns the financial year containing `at`, in Western Australian time.
///
/// Financial years run July to June and are named by the calendar year they
/// start in.
#[must_use]
pub fn financial_year(at: OffsetDateTime) -> i64 {
    let local = Utc
        .timestamp_opt(at.unix_timestamp(), 0)
        .single()
        .map(|utc| utc.with_timezone(&Perth));
    match local {
        Some(local) => {
            let year: i64 = i64::from(local.year());
            if local.month() >= 7 { year } else { year - 1 }
        }
        None => {
            let year: i64 = i64::from(at.year());
            if u8::from(at.month()) >= 7 { year } else { year - 1 }
        }
    }
}

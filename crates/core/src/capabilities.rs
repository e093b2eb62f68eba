// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-stage editable field sets.

use bfrs_domain::{Field, FieldSet, Stage};

const INITIAL_FIELDS: &[Field] = &[
    Field::Name,
    Field::FireDetectedDate,
    Field::DutyOfficer,
    Field::DispatchPw,
    Field::DispatchPwDate,
    Field::FirePositionOverride,
    Field::FirePosition,
    Field::OtherInfo,
    Field::InvestigationReq,
    Field::ProbFireLevel,
    Field::InitialAreaUnknown,
    Field::InitialArea,
    Field::InitialControl,
    Field::OtherInitialControl,
    Field::Tenure,
    Field::OtherTenure,
    Field::MediaAlertReq,
    Field::ParkTrailImpacted,
];

const MERGED_FIELDS: &[Field] = &[
    Field::ArsonSquadNotified,
    Field::OffenceNo,
    Field::Cause,
    Field::CauseState,
    Field::OtherCause,
    Field::PrescribedBurnId,
];

const SUBMITTED_FIELDS: &[Field] = &[
    Field::DfesIncidentNo,
    Field::FieldOfficer,
    Field::OtherFieldOfficer,
    Field::OtherFieldOfficerAgency,
    Field::OtherFieldOfficerPhone,
    Field::FireMonitoredOnly,
    Field::JobCode,
    Field::DispatchAerial,
    Field::DispatchAerialDate,
    Field::FireContainedDate,
    Field::FireControlledDate,
    Field::FireSafeDate,
    Field::FirstAttack,
    Field::OtherFirstAttack,
    Field::FireNotFound,
    Field::FinalControl,
    Field::OtherFinalControl,
    Field::MaxFireLevel,
    Field::Area,
    Field::AreaLimit,
    Field::InvalidDetails,
    Field::DamageUnknown,
    Field::InjuryUnknown,
];

/// Fields opened up by the "may maintain authoritative data" capability.
const MAINTAINER_FIELDS: &[Field] = &[Field::Region, Field::District, Field::ReportingYear];

/// Dispatch fields maintainers may correct after the initial report.
const MAINTAINER_DISPATCH_FIELDS: &[Field] = &[Field::DispatchPw, Field::DispatchPwDate];

/// Returns the fields editable under `stage`.
///
/// # Arguments
///
/// * `stage` - The stage the save is performed under
/// * `can_maintain_data` - Whether the session may maintain authoritative data
#[must_use]
pub fn editable_fields(stage: Stage, can_maintain_data: bool) -> FieldSet {
    let mut fields: FieldSet = match stage {
        Stage::Initial => INITIAL_FIELDS.iter().copied().collect(),
        Stage::Merged => MERGED_FIELDS.iter().copied().collect(),
        Stage::Submitted | Stage::Authorised | Stage::Reviewed => MERGED_FIELDS
            .iter()
            .chain(SUBMITTED_FIELDS)
            .copied()
            .collect(),
    };

    if can_maintain_data {
        match stage {
            Stage::Initial => fields.extend(MAINTAINER_FIELDS),
            Stage::Submitted | Stage::Authorised | Stage::Reviewed => {
                fields.extend(MAINTAINER_FIELDS);
                fields.extend(MAINTAINER_DISPATCH_FIELDS);
            }
            Stage::Merged => {}
        }
    }

    fields
}

/// Returns whether saves under `stage` reconcile injury and damage rows.
#[must_use]
pub fn owns_line_items(stage: Stage) -> bool {
    let fields: FieldSet = editable_fields(stage, false);
    fields.contains(&Field::InjuryUnknown) || fields.contains(&Field::DamageUnknown)
}

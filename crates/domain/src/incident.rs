// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::field::Field;
use crate::types::{MultiPolygon, Point, ReportStatus};
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A bushfire incident report.
///
/// The aggregate root. Line items, side records and snapshots refer to an
/// incident by its `id`. Every attribute named in the field catalogue is
/// reachable through [`Incident::value`] and [`Incident::set_value`]; the
/// remaining attributes are system-managed.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Incident {
    /// The canonical identifier. `None` until persisted.
    pub id: Option<i64>,
    /// Lifecycle status.
    pub report_status: ReportStatus,
    /// Archived incidents are hidden but never deleted.
    pub archive: bool,

    pub region: Option<i64>,
    pub district: Option<i64>,
    pub name: Option<String>,
    /// Financial year of occurrence.
    pub year: Option<i64>,
    /// Financial year the incident is reported in.
    pub reporting_year: Option<i64>,
    #[serde(with = "crate::timestamp")]
    pub fire_detected_date: Option<OffsetDateTime>,
    pub duty_officer: Option<i64>,
    pub field_officer: Option<i64>,
    pub other_field_officer: Option<String>,
    pub other_field_officer_agency: Option<String>,
    pub other_field_officer_phone: Option<String>,
    pub dispatch_pw: Option<i64>,
    #[serde(with = "crate::timestamp")]
    pub dispatch_pw_date: Option<OffsetDateTime>,
    pub dispatch_aerial: Option<bool>,
    #[serde(with = "crate::timestamp")]
    pub dispatch_aerial_date: Option<OffsetDateTime>,
    pub fire_position_override: bool,
    pub fire_position: Option<String>,
    pub origin_point: Option<Point>,
    pub origin_point_mga: Option<String>,
    pub other_info: Option<String>,
    pub investigation_req: Option<bool>,
    pub prob_fire_level: Option<i64>,
    pub max_fire_level: Option<i64>,
    pub media_alert_req: Option<bool>,
    pub park_trail_impacted: Option<bool>,
    pub initial_area_unknown: bool,
    pub initial_area: Option<f64>,
    pub other_area: Option<f64>,
    pub initial_control: Option<i64>,
    pub other_initial_control: Option<String>,
    pub first_attack: Option<i64>,
    pub other_first_attack: Option<String>,
    pub final_control: Option<i64>,
    pub other_final_control: Option<String>,
    pub tenure: Option<i64>,
    pub other_tenure: Option<i64>,
    pub arson_squad_notified: Option<bool>,
    pub offence_no: Option<String>,
    pub cause: Option<i64>,
    pub cause_state: Option<i64>,
    pub other_cause: Option<String>,
    pub prescribed_burn_id: Option<String>,
    pub dfes_incident_no: Option<String>,
    pub fire_monitored_only: bool,
    pub invalid_details: Option<String>,
    pub job_code: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub fire_contained_date: Option<OffsetDateTime>,
    #[serde(with = "crate::timestamp")]
    pub fire_controlled_date: Option<OffsetDateTime>,
    #[serde(with = "crate::timestamp")]
    pub fire_safe_date: Option<OffsetDateTime>,
    pub fire_not_found: bool,
    pub area: Option<f64>,
    pub area_limit: bool,
    pub damage_unknown: bool,
    pub injury_unknown: bool,

    /// Identifier of the incident in the spatial support system.
    pub sss_id: Option<String>,
    /// The import payload, minus the parts stored elsewhere.
    pub sss_data: Option<serde_json::Value>,
    pub fire_boundary: Option<MultiPolygon>,
    /// Whether the fire boundary is the final, authoritative boundary.
    pub final_fire_boundary: bool,
    pub fb_validation_req: Option<bool>,
    pub fireboundary_uploaded_by: Option<i64>,
    #[serde(with = "crate::timestamp")]
    pub fireboundary_uploaded_date: Option<OffsetDateTime>,

    pub creator: Option<i64>,
    pub modifier: Option<i64>,
    #[serde(with = "crate::timestamp")]
    pub created: Option<OffsetDateTime>,
    #[serde(with = "crate::timestamp")]
    pub modified: Option<OffsetDateTime>,
    pub init_authorised_by: Option<i64>,
    #[serde(with = "crate::timestamp")]
    pub init_authorised_date: Option<OffsetDateTime>,
    pub authorised_by: Option<i64>,
    #[serde(with = "crate::timestamp")]
    pub authorised_date: Option<OffsetDateTime>,
    pub reviewed_by: Option<i64>,
    #[serde(with = "crate::timestamp")]
    pub reviewed_date: Option<OffsetDateTime>,
}

/// Conversion between a typed incident attribute and a [`FieldValue`].
trait Slot: Sized {
    fn to_value(&self) -> FieldValue;
    fn from_value(field: Field, value: FieldValue) -> Result<Self, DomainError>;
}

fn mismatch(field: Field, value: &FieldValue) -> DomainError {
    DomainError::InvalidFieldValue {
        field,
        reason: format!("{value:?} does not fit this field"),
    }
}

impl Slot for bool {
    fn to_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }

    fn from_value(field: Field, value: FieldValue) -> Result<Self, DomainError> {
        match value {
            FieldValue::Null => Ok(false),
            FieldValue::Bool(b) => Ok(b),
            other => Err(mismatch(field, &other)),
        }
    }
}

impl Slot for Option<bool> {
    fn to_value(&self) -> FieldValue {
        FieldValue::from(*self)
    }

    fn from_value(field: Field, value: FieldValue) -> Result<Self, DomainError> {
        match value {
            FieldValue::Null => Ok(None),
            FieldValue::Bool(b) => Ok(Some(b)),
            other => Err(mismatch(field, &other)),
        }
    }
}

impl Slot for Option<i64> {
    fn to_value(&self) -> FieldValue {
        FieldValue::from(*self)
    }

    fn from_value(field: Field, value: FieldValue) -> Result<Self, DomainError> {
        match value {
            FieldValue::Null => Ok(None),
            FieldValue::Int(i) => Ok(Some(i)),
            other => Err(mismatch(field, &other)),
        }
    }
}

impl Slot for Option<f64> {
    fn to_value(&self) -> FieldValue {
        FieldValue::from(*self)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_value(field: Field, value: FieldValue) -> Result<Self, DomainError> {
        match value {
            FieldValue::Null => Ok(None),
            FieldValue::Decimal(d) => Ok(Some(d)),
            FieldValue::Int(i) => Ok(Some(i as f64)),
            other => Err(mismatch(field, &other)),
        }
    }
}

impl Slot for Option<String> {
    fn to_value(&self) -> FieldValue {
        FieldValue::from(self.clone())
    }

    fn from_value(field: Field, value: FieldValue) -> Result<Self, DomainError> {
        match value {
            FieldValue::Null => Ok(None),
            FieldValue::Text(s) if s.is_empty() => Ok(None),
            FieldValue::Text(s) => Ok(Some(s)),
            other => Err(mismatch(field, &other)),
        }
    }
}

impl Slot for Option<OffsetDateTime> {
    fn to_value(&self) -> FieldValue {
        FieldValue::from(*self)
    }

    fn from_value(field: Field, value: FieldValue) -> Result<Self, DomainError> {
        match value {
            FieldValue::Null => Ok(None),
            FieldValue::DateTime(ts) => Ok(Some(ts)),
            other => Err(mismatch(field, &other)),
        }
    }
}

impl Slot for Option<Point> {
    fn to_value(&self) -> FieldValue {
        FieldValue::from(*self)
    }

    fn from_value(field: Field, value: FieldValue) -> Result<Self, DomainError> {
        match value {
            FieldValue::Null => Ok(None),
            FieldValue::Point(p) => Ok(Some(p)),
            other => Err(mismatch(field, &other)),
        }
    }
}

/// Generates the field accessors from a field-to-member table.
macro_rules! field_accessors {
    ($($variant:ident => $member:ident),+ $(,)?) => {
        impl Incident {
            /// Returns the current value of `field`.
            #[must_use]
            pub fn value(&self, field: Field) -> FieldValue {
                match field {
                    $(Field::$variant => self.$member.to_value(),)+
                }
            }

            /// Sets `field` to `value`.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::InvalidFieldValue` if the value's variant
            /// does not fit the field. A null clears optional fields and sets
            /// switches to `false`.
            pub fn set_value(&mut self, field: Field, value: FieldValue) -> Result<(), DomainError> {
                match field {
                    $(Field::$variant => self.$member = Slot::from_value(field, value)?,)+
                }
                Ok(())
            }
        }
    };
}

field_accessors! {
    Region => region,
    District => district,
    Name => name,
    Year => year,
    ReportingYear => reporting_year,
    FireDetectedDate => fire_detected_date,
    DutyOfficer => duty_officer,
    FieldOfficer => field_officer,
    OtherFieldOfficer => other_field_officer,
    OtherFieldOfficerAgency => other_field_officer_agency,
    OtherFieldOfficerPhone => other_field_officer_phone,
    DispatchPw => dispatch_pw,
    DispatchPwDate => dispatch_pw_date,
    DispatchAerial => dispatch_aerial,
    DispatchAerialDate => dispatch_aerial_date,
    FirePositionOverride => fire_position_override,
    FirePosition => fire_position,
    OriginPoint => origin_point,
    OriginPointMga => origin_point_mga,
    OtherInfo => other_info,
    InvestigationReq => investigation_req,
    ProbFireLevel => prob_fire_level,
    MaxFireLevel => max_fire_level,
    MediaAlertReq => media_alert_req,
    ParkTrailImpacted => park_trail_impacted,
    InitialAreaUnknown => initial_area_unknown,
    InitialArea => initial_area,
    OtherArea => other_area,
    InitialControl => initial_control,
    OtherInitialControl => other_initial_control,
    FirstAttack => first_attack,
    OtherFirstAttack => other_first_attack,
    FinalControl => final_control,
    OtherFinalControl => other_final_control,
    Tenure => tenure,
    OtherTenure => other_tenure,
    ArsonSquadNotified => arson_squad_notified,
    OffenceNo => offence_no,
    Cause => cause,
    CauseState => cause_state,
    OtherCause => other_cause,
    PrescribedBurnId => prescribed_burn_id,
    DfesIncidentNo => dfes_incident_no,
    FireMonitoredOnly => fire_monitored_only,
    InvalidDetails => invalid_details,
    JobCode => job_code,
    FireContainedDate => fire_contained_date,
    FireControlledDate => fire_controlled_date,
    FireSafeDate => fire_safe_date,
    FireNotFound => fire_not_found,
    Area => area,
    AreaLimit => area_limit,
    DamageUnknown => damage_unknown,
    InjuryUnknown => injury_unknown,
}

impl Incident {
    /// Returns whether the incident has been persisted.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Serializes the incident to its stored JSON document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDocument` if serialization fails.
    pub fn to_document(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(|e| DomainError::InvalidDocument(e.to_string()))
    }

    /// Restores an incident from its stored JSON document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDocument` if the document cannot be decoded.
    pub fn from_document(document: &str) -> Result<Self, DomainError> {
        serde_json::from_str(document).map_err(|e| DomainError::InvalidDocument(e.to_string()))
    }
}

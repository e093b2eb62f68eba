// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The incident field catalogue.
//!
//! Every user-visible incident attribute is named by a [`Field`]. The kind of
//! a field decides how raw submitted values are parsed and which
//! [`FieldValue`](crate::FieldValue) variants it can hold.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Fire level codes.
pub const FIRE_LEVEL_CODES: &[i64] = &[1, 2, 3];
/// Cause state: known.
pub const CAUSE_STATE_KNOWN: i64 = 1;
/// Cause state: possible.
pub const CAUSE_STATE_POSSIBLE: i64 = 2;
/// Parks and Wildlife dispatch: yes.
pub const DISPATCH_PW_YES: i64 = 1;
/// Parks and Wildlife dispatch: no.
pub const DISPATCH_PW_NO: i64 = 2;
/// Parks and Wildlife dispatch: monitoring only.
pub const DISPATCH_PW_MONITORING: i64 = 3;
/// Ignition point tenure: private property.
pub const IGNITION_POINT_PRIVATE: i64 = 1;
/// Ignition point tenure: other crown land.
pub const IGNITION_POINT_CROWN: i64 = 2;

/// How a field's raw value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-nullable boolean switch. A null input means `false`.
    Switch,
    /// Nullable yes/no answer.
    Flag,
    /// Identifier of a row in a reference table.
    Reference,
    /// One of a fixed set of integer codes.
    Code(&'static [i64]),
    /// A financial year (the calendar year in which it starts).
    Year,
    /// An area in hectares.
    Area,
    /// Free text.
    Text,
    /// A timezone-aware datetime.
    Timestamp,
    /// A point geometry.
    Point,
}

/// Generates the [`Field`] enum together with its name and kind tables.
macro_rules! fields {
    ($($variant:ident => $name:literal, $kind:expr;)+) => {
        /// A named incident attribute.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Field {
            $(
                #[doc = concat!("The `", $name, "` field.")]
                $variant,
            )+
        }

        impl Field {
            /// Every field in catalogue order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the field's wire name.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Returns how values of this field are parsed.
            #[must_use]
            pub const fn kind(&self) -> FieldKind {
                match self {
                    $(Self::$variant => $kind,)+
                }
            }
        }

        impl FromStr for Field {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(DomainError::UnknownField(s.to_string())),
                }
            }
        }
    };
}

fields! {
    Region => "region", FieldKind::Reference;
    District => "district", FieldKind::Reference;
    Name => "name", FieldKind::Text;
    Year => "year", FieldKind::Year;
    ReportingYear => "reporting_year", FieldKind::Year;
    FireDetectedDate => "fire_detected_date", FieldKind::Timestamp;
    DutyOfficer => "duty_officer", FieldKind::Reference;
    FieldOfficer => "field_officer", FieldKind::Reference;
    OtherFieldOfficer => "other_field_officer", FieldKind::Text;
    OtherFieldOfficerAgency => "other_field_officer_agency", FieldKind::Text;
    OtherFieldOfficerPhone => "other_field_officer_phone", FieldKind::Text;
    DispatchPw => "dispatch_pw", FieldKind::Code(&[DISPATCH_PW_YES, DISPATCH_PW_NO, DISPATCH_PW_MONITORING]);
    DispatchPwDate => "dispatch_pw_date", FieldKind::Timestamp;
    DispatchAerial => "dispatch_aerial", FieldKind::Flag;
    DispatchAerialDate => "dispatch_aerial_date", FieldKind::Timestamp;
    FirePositionOverride => "fire_position_override", FieldKind::Switch;
    FirePosition => "fire_position", FieldKind::Text;
    OriginPoint => "origin_point", FieldKind::Point;
    OriginPointMga => "origin_point_mga", FieldKind::Text;
    OtherInfo => "other_info", FieldKind::Text;
    InvestigationReq => "investigation_req", FieldKind::Flag;
    ProbFireLevel => "prob_fire_level", FieldKind::Code(FIRE_LEVEL_CODES);
    MaxFireLevel => "max_fire_level", FieldKind::Code(FIRE_LEVEL_CODES);
    MediaAlertReq => "media_alert_req", FieldKind::Flag;
    ParkTrailImpacted => "park_trail_impacted", FieldKind::Flag;
    InitialAreaUnknown => "initial_area_unknown", FieldKind::Switch;
    InitialArea => "initial_area", FieldKind::Area;
    OtherArea => "other_area", FieldKind::Area;
    InitialControl => "initial_control", FieldKind::Reference;
    OtherInitialControl => "other_initial_control", FieldKind::Text;
    FirstAttack => "first_attack", FieldKind::Reference;
    OtherFirstAttack => "other_first_attack", FieldKind::Text;
    FinalControl => "final_control", FieldKind::Reference;
    OtherFinalControl => "other_final_control", FieldKind::Text;
    Tenure => "tenure", FieldKind::Reference;
    OtherTenure => "other_tenure", FieldKind::Code(&[IGNITION_POINT_PRIVATE, IGNITION_POINT_CROWN]);
    ArsonSquadNotified => "arson_squad_notified", FieldKind::Flag;
    OffenceNo => "offence_no", FieldKind::Text;
    Cause => "cause", FieldKind::Reference;
    CauseState => "cause_state", FieldKind::Code(&[CAUSE_STATE_KNOWN, CAUSE_STATE_POSSIBLE]);
    OtherCause => "other_cause", FieldKind::Text;
    PrescribedBurnId => "prescribed_burn_id", FieldKind::Text;
    DfesIncidentNo => "dfes_incident_no", FieldKind::Text;
    FireMonitoredOnly => "fire_monitored_only", FieldKind::Switch;
    InvalidDetails => "invalid_details", FieldKind::Text;
    JobCode => "job_code", FieldKind::Text;
    FireContainedDate => "fire_contained_date", FieldKind::Timestamp;
    FireControlledDate => "fire_controlled_date", FieldKind::Timestamp;
    FireSafeDate => "fire_safe_date", FieldKind::Timestamp;
    FireNotFound => "fire_not_found", FieldKind::Switch;
    Area => "area", FieldKind::Area;
    AreaLimit => "area_limit", FieldKind::Switch;
    DamageUnknown => "damage_unknown", FieldKind::Switch;
    InjuryUnknown => "injury_unknown", FieldKind::Switch;
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered set of fields.
pub type FieldSet = BTreeSet<Field>;

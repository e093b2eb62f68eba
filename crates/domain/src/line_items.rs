// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::incident::Incident;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The two counted line-item collections of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineItemKind {
    /// Injuries and fatalities, counted per injury type.
    Injury,
    /// Damage, counted per damage type.
    Damage,
}

impl FromStr for LineItemKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "injury" | "Injury" => Ok(Self::Injury),
            "damage" | "Damage" => Ok(Self::Damage),
            _ => Err(DomainError::InvalidLineItemKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for LineItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LineItemKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Injury => "injury",
            Self::Damage => "damage",
        }
    }

    /// Returns the name of the type column errors are reported against.
    #[must_use]
    pub const fn type_column(&self) -> &'static str {
        match self {
            Self::Injury => "injury_type",
            Self::Damage => "damage_type",
        }
    }

    /// Returns the collection's "nothing to report" switch.
    #[must_use]
    pub const fn unknown_flag(&self, incident: &Incident) -> bool {
        match self {
            Self::Injury => incident.injury_unknown,
            Self::Damage => incident.damage_unknown,
        }
    }
}

/// A persisted injury or damage row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The canonical identifier. `None` until persisted.
    pub id: Option<i64>,
    /// The owning incident.
    pub incident_id: i64,
    /// The injury or damage type reference id. Unique per incident.
    pub item_type: i64,
    /// How many were recorded.
    pub number: i64,
}

/// A persisted area-burnt bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaBurnt {
    pub id: Option<i64>,
    pub incident_id: i64,
    /// Tenure reference id. Unique per incident.
    pub tenure: i64,
    /// Hectares burnt on this tenure.
    pub area: f64,
}

/// One submitted line-item row, before reconciliation.
///
/// A row missing its type or number is incomplete and is deleted (if it
/// exists) rather than reported as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmittedRow {
    /// Identifier of an existing row, if the row was loaded from storage.
    pub id: Option<i64>,
    #[serde(alias = "injury_type", alias = "damage_type")]
    pub item_type: Option<i64>,
    pub number: Option<i64>,
    /// Explicit delete request.
    #[serde(alias = "DELETE")]
    pub delete: bool,
}

impl SubmittedRow {
    /// Returns whether the row carries both a type and a non-zero number.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.item_type.is_some() && self.number.is_some_and(|n| n != 0)
    }
}

/// A named JSON side record attached to an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentProperty {
    pub id: Option<i64>,
    pub incident_id: i64,
    pub name: String,
    pub value: serde_json::Value,
}

impl IncidentProperty {
    /// Creates an unsaved side record.
    #[must_use]
    pub fn new(incident_id: i64, name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            id: None,
            incident_id,
            name: name.into(),
            value,
        }
    }
}

/// A read-only, point-in-time copy of an incident and its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentSnapshot {
    pub id: Option<i64>,
    pub incident_id: i64,
    /// Status the incident entered when the snapshot was taken.
    pub snapshot_status: crate::types::ReportStatus,
    #[serde(with = "crate::timestamp")]
    pub created: Option<OffsetDateTime>,
    pub incident: Incident,
    pub injuries: Vec<LineItem>,
    pub damages: Vec<LineItem>,
    pub areas_burnt: Vec<AreaBurnt>,
}

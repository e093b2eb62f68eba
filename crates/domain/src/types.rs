// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the reporting status of an incident.
///
/// Reports advance one way through the lifecycle. Any live report may be
/// invalidated, after which it is only editable through the merged stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReportStatus {
    /// Initial fire report. Created by import or manual entry.
    #[default]
    Initial,
    /// Notifications submitted.
    Submitted,
    /// Report authorised.
    Authorised,
    /// Report reviewed. Final state of the normal lifecycle.
    Reviewed,
    /// Report invalidated (duplicate or merged into another incident).
    Invalidated,
}

impl FromStr for ReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Initial" => Ok(Self::Initial),
            "Submitted" => Ok(Self::Submitted),
            "Authorised" => Ok(Self::Authorised),
            "Reviewed" => Ok(Self::Reviewed),
            "Invalidated" => Ok(Self::Invalidated),
            _ => Err(DomainError::InvalidReportStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ReportStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Submitted => "Submitted",
            Self::Authorised => "Authorised",
            Self::Reviewed => "Reviewed",
            Self::Invalidated => "Invalidated",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Initial → Submitted
    /// - Submitted → Authorised
    /// - Authorised → Reviewed
    /// - any status other than Invalidated → Invalidated
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Initial, Self::Submitted)
                | (Self::Submitted, Self::Authorised)
                | (Self::Authorised, Self::Reviewed)
                | (
                    Self::Initial | Self::Submitted | Self::Authorised | Self::Reviewed,
                    Self::Invalidated
                )
        )
    }

    /// Returns whether entering this status records a snapshot.
    #[must_use]
    pub const fn takes_snapshot(&self) -> bool {
        matches!(self, Self::Submitted | Self::Authorised | Self::Reviewed)
    }

    /// The stage a report in this status is edited under.
    #[must_use]
    pub const fn editing_stage(&self) -> Stage {
        match self {
            Self::Initial => Stage::Initial,
            Self::Submitted => Stage::Submitted,
            Self::Authorised => Stage::Authorised,
            Self::Reviewed => Stage::Reviewed,
            Self::Invalidated => Stage::Merged,
        }
    }
}

/// The editing stage a save is performed under.
///
/// A stage selects which fields are editable and which rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Initial fire report editing.
    Initial,
    /// Editing a submitted report.
    Submitted,
    /// Editing an authorised report.
    Authorised,
    /// Editing a reviewed report.
    Reviewed,
    /// Cause-only editing of a report merged into another incident.
    Merged,
}

impl FromStr for Stage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Initial" | "initial" => Ok(Self::Initial),
            "Submitted" | "submitted" => Ok(Self::Submitted),
            "Authorised" | "authorised" => Ok(Self::Authorised),
            "Reviewed" | "reviewed" => Ok(Self::Reviewed),
            "Merged" | "merged" => Ok(Self::Merged),
            _ => Err(DomainError::InvalidStage(s.to_string())),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Stage {
    /// Converts this stage to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Submitted => "Submitted",
            Self::Authorised => "Authorised",
            Self::Reviewed => "Reviewed",
            Self::Merged => "Merged",
        }
    }

    /// Returns whether a report in `status` may be saved under this stage.
    #[must_use]
    pub const fn accepts(&self, status: ReportStatus) -> bool {
        matches!(
            (self, status),
            (Self::Initial, ReportStatus::Initial)
                | (Self::Submitted, ReportStatus::Submitted)
                | (Self::Authorised, ReportStatus::Authorised)
                | (Self::Reviewed, ReportStatus::Reviewed)
                | (Self::Merged, ReportStatus::Invalidated)
        )
    }
}

/// A point geometry in longitude/latitude order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A multi-polygon geometry: polygons made of rings made of coordinate pairs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiPolygon(pub Vec<Vec<Vec<[f64; 2]>>>);

impl MultiPolygon {
    /// Returns the number of polygons.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the geometry has no polygons.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

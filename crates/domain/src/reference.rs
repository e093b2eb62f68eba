// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Tenure name used when the ignition-point tenure is not listed.
pub const TENURE_OTHER: &str = "Other";
/// Tenure bucket for fires igniting on private property.
pub const TENURE_PRIVATE_PROPERTY: &str = "Private Property";
/// Tenure bucket for fires igniting on other crown land.
pub const TENURE_OTHER_CROWN: &str = "Other Crown";
/// Cause name that requires free-text detail.
pub const CAUSE_OTHER: &str = "Other";
/// Cause name that requires a prescribed burn id.
pub const CAUSE_ESCAPE_DPAW_BURNING: &str = "Escape DPaW burning";
/// Agency name that requires free-text detail.
pub const AGENCY_OTHER: &str = "Other";
/// Officer username that requires name, agency and phone detail.
pub const OFFICER_OTHER: &str = "other";

/// A row in a reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: i64,
    pub name: String,
}

impl ReferenceEntry {
    /// Creates a reference entry.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A district and the region it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictEntry {
    pub id: i64,
    pub region_id: i64,
    pub name: String,
}

/// The raw contents of every reference table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub regions: Vec<ReferenceEntry>,
    pub districts: Vec<DistrictEntry>,
    pub tenures: Vec<ReferenceEntry>,
    pub causes: Vec<ReferenceEntry>,
    pub agencies: Vec<ReferenceEntry>,
    pub injury_types: Vec<ReferenceEntry>,
    pub damage_types: Vec<ReferenceEntry>,
    /// Officers, keyed by user id with their username as name.
    pub officers: Vec<ReferenceEntry>,
}

/// Loaded reference data with the well-known entries resolved to ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    tables: ReferenceTables,
    tenure_other: i64,
    tenure_private_property: i64,
    tenure_other_crown: i64,
    cause_other: i64,
    cause_escape_dpaw_burning: i64,
    agency_other: i64,
    officer_other: i64,
}

fn find(entries: &[ReferenceEntry], table: &'static str, name: &'static str) -> Result<i64, DomainError> {
    entries
        .iter()
        .find(|e| e.name == name)
        .map(|e| e.id)
        .ok_or(DomainError::MissingReferenceEntry { table, name })
}

impl ReferenceData {
    /// Resolves the well-known entries of `tables`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingReferenceEntry` if any well-known entry
    /// is absent.
    pub fn new(tables: ReferenceTables) -> Result<Self, DomainError> {
        Ok(Self {
            tenure_other: find(&tables.tenures, "tenures", TENURE_OTHER)?,
            tenure_private_property: find(&tables.tenures, "tenures", TENURE_PRIVATE_PROPERTY)?,
            tenure_other_crown: find(&tables.tenures, "tenures", TENURE_OTHER_CROWN)?,
            cause_other: find(&tables.causes, "causes", CAUSE_OTHER)?,
            cause_escape_dpaw_burning: find(&tables.causes, "causes", CAUSE_ESCAPE_DPAW_BURNING)?,
            agency_other: find(&tables.agencies, "agencies", AGENCY_OTHER)?,
            officer_other: find(&tables.officers, "officers", OFFICER_OTHER)?,
            tables,
        })
    }

    #[must_use]
    pub const fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    #[must_use]
    pub const fn tenure_other(&self) -> i64 {
        self.tenure_other
    }

    #[must_use]
    pub const fn tenure_private_property(&self) -> i64 {
        self.tenure_private_property
    }

    #[must_use]
    pub const fn tenure_other_crown(&self) -> i64 {
        self.tenure_other_crown
    }

    #[must_use]
    pub const fn cause_other(&self) -> i64 {
        self.cause_other
    }

    #[must_use]
    pub const fn cause_escape_dpaw_burning(&self) -> i64 {
        self.cause_escape_dpaw_burning
    }

    #[must_use]
    pub const fn agency_other(&self) -> i64 {
        self.agency_other
    }

    #[must_use]
    pub const fn officer_other(&self) -> i64 {
        self.officer_other
    }

    /// Finds the tenure whose name starts with `category`, ignoring case.
    ///
    /// Returns `None` unless exactly one tenure matches.
    #[must_use]
    pub fn tenure_by_prefix(&self, category: &str) -> Option<i64> {
        let prefix: String = category.trim().to_lowercase();
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self
            .tables
            .tenures
            .iter()
            .filter(|t| t.name.to_lowercase().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.id),
            _ => None,
        }
    }

    /// Returns whether a region with `id` exists.
    #[must_use]
    pub fn has_region(&self, id: i64) -> bool {
        self.tables.regions.iter().any(|r| r.id == id)
    }

    /// Returns whether a district with `id` exists.
    #[must_use]
    pub fn has_district(&self, id: i64) -> bool {
        self.tables.districts.iter().any(|d| d.id == id)
    }

    /// Returns whether an injury type with `id` exists.
    #[must_use]
    pub fn has_injury_type(&self, id: i64) -> bool {
        self.tables.injury_types.iter().any(|t| t.id == id)
    }

    /// Returns whether a damage type with `id` exists.
    #[must_use]
    pub fn has_damage_type(&self, id: i64) -> bool {
        self.tables.damage_types.iter().any(|t| t.id == id)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Line-item reconciliation.
//!
//! Turns submitted injury/damage rows and the area-burnt policy into commit
//! plans. Plans are pure data; the persistence layer applies them.

use bfrs_domain::{
    AreaBurnt, FieldError, FieldErrors, IGNITION_POINT_CROWN, IGNITION_POINT_PRIVATE, Incident,
    LineItem, LineItemKind, ReferenceData, SubmittedRow,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// The persisted line items of one incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExistingLineItems {
    pub injuries: Vec<LineItem>,
    pub damages: Vec<LineItem>,
    pub areas_burnt: Vec<AreaBurnt>,
}

impl ExistingLineItems {
    /// Returns the rows of `kind`.
    #[must_use]
    pub fn of_kind(&self, kind: LineItemKind) -> &[LineItem] {
        match kind {
            LineItemKind::Injury => &self.injuries,
            LineItemKind::Damage => &self.damages,
        }
    }
}

/// What to do with one injury or damage collection on commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineItemPlan {
    /// Leave the collection as it is.
    #[default]
    Unchanged,
    /// Delete every row of the collection.
    DeleteAll,
    /// Delete the listed rows, then upsert by type.
    Apply {
        /// Row ids to delete.
        delete_ids: Vec<i64>,
        /// `(type, number)` pairs to upsert, scoped to the incident.
        upserts: Vec<(i64, i64)>,
    },
}

/// What to do with the area-burnt buckets on commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum AreaBurntPlan {
    /// Leave the buckets as they are.
    #[default]
    Untouched,
    /// Delete every bucket.
    DeleteAll,
    /// Upsert one bucket and delete every other.
    KeepOnly {
        /// Tenure of the bucket to keep.
        tenure: i64,
        /// Final area of the bucket.
        area: f64,
    },
}

/// Reconciles the submitted rows of one collection.
///
/// # Arguments
///
/// * `kind` - Which collection the rows belong to
/// * `rows` - The submitted rows, in submission order
/// * `unknown` - The collection's "nothing to report" switch
/// * `existing` - The persisted rows of the collection
/// * `reference` - Reference data used to check row types
///
/// # Errors
///
/// Returns the row errors if any two kept rows share a type or a row names
/// an unknown type. Nothing is committed in that case.
pub fn reconcile_line_items(
    kind: LineItemKind,
    rows: &[SubmittedRow],
    unknown: bool,
    existing: &[LineItem],
    reference: &ReferenceData,
) -> Result<LineItemPlan, FieldErrors> {
    if unknown {
        debug!(kind = kind.as_str(), "Collection marked unknown, leaving rows untouched");
        return Ok(LineItemPlan::Unchanged);
    }

    let duplicate_message: &str = match kind {
        LineItemKind::Injury => "Duplicate: Injury type must be unique",
        LineItemKind::Damage => "Duplicate: Damage type must be unique",
    };

    let mut errors: FieldErrors = FieldErrors::new();
    let mut seen: BTreeSet<i64> = BTreeSet::new();
    let mut delete_ids: Vec<i64> = Vec::new();
    let mut upserts: Vec<(i64, i64)> = Vec::new();

    let stored = |id: Option<i64>| id.and_then(|id| existing.iter().find(|r| r.id == Some(id)));

    for (index, row) in rows.iter().enumerate() {
        if row.delete || !row.is_complete() {
            // Incomplete rows are removed if they exist and ignored otherwise.
            if let Some(id) = stored(row.id).and_then(|r| r.id) {
                delete_ids.push(id);
            }
            continue;
        }

        let (Some(item_type), Some(number)) = (row.item_type, row.number) else {
            continue;
        };

        let known: bool = match kind {
            LineItemKind::Injury => reference.has_injury_type(item_type),
            LineItemKind::Damage => reference.has_damage_type(item_type),
        };
        if !known {
            errors.push(FieldError::line_item(kind, index, "Select a valid choice."));
            continue;
        }

        if !seen.insert(item_type) {
            errors.push(FieldError::line_item(kind, index, duplicate_message));
            continue;
        }

        // A stored row that changed type gives up its old type.
        if let Some(previous) = stored(row.id)
            && previous.item_type != item_type
            && let Some(id) = previous.id
        {
            delete_ids.push(id);
        }

        upserts.push((item_type, number));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(LineItemPlan::Apply {
        delete_ids,
        upserts,
    })
}

/// Chooses the area-burnt plan for an incident after validation.
///
/// Only applies when area is editable. With `area_limit` set the single
/// bucket is the ignition-point tenure: private property, other crown, or
/// the declared tenure. Without it, and without a final boundary, every
/// bucket is removed.
#[must_use]
pub fn plan_area_burnt(
    area_editable: bool,
    incident: &Incident,
    reference: &ReferenceData,
) -> AreaBurntPlan {
    if !area_editable {
        return AreaBurntPlan::Untouched;
    }

    if incident.area_limit {
        let tenure: Option<i64> = match incident.other_tenure {
            Some(IGNITION_POINT_PRIVATE) => Some(reference.tenure_private_property()),
            Some(IGNITION_POINT_CROWN) => Some(reference.tenure_other_crown()),
            Some(_) => None,
            None => incident.tenure,
        };
        return tenure.map_or(AreaBurntPlan::Untouched, |tenure| AreaBurntPlan::KeepOnly {
            tenure,
            area: incident.area.unwrap_or_default(),
        });
    }

    if incident.final_fire_boundary {
        AreaBurntPlan::Untouched
    } else {
        AreaBurntPlan::DeleteAll
    }
}

/// Plans the removal of injury and damage rows for a fire that was not found.
#[must_use]
pub fn plan_cleanup(incident: &Incident) -> (LineItemPlan, LineItemPlan) {
    if incident.fire_not_found {
        (LineItemPlan::DeleteAll, LineItemPlan::DeleteAll)
    } else {
        (LineItemPlan::Unchanged, LineItemPlan::Unchanged)
    }
}

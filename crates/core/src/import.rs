// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Import adapter for spatial support system payloads.
//!
//! A payload seeds the initial values of a new incident. On commit the
//! authoritative fields are taken from the payload again, whatever the
//! form said.

use crate::dependency::Patch;
use crate::error::CoreError;
use bfrs_domain::{
    DomainError, Field, FieldValue, Incident, MultiPolygon, Point, ReferenceData,
};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Name of the side record holding the plantation data.
pub const PLANTATIONS_PROPERTY: &str = "plantations";

/// Fields whose value always comes from the payload when it supplies one.
const AUTHORITATIVE_FIELDS: &[Field] = &[Field::Tenure, Field::Region, Field::District];

/// Smallest area recorded for a fire the payload says has an area.
const MIN_AREA: f64 = 0.01;

/// Values derived from one import payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedValues {
    /// Initial values for catalogue fields.
    pub fields: Patch,
    pub fire_boundary: Option<MultiPolygon>,
    pub fb_validation_req: Option<bool>,
    pub sss_id: Option<String>,
    /// Plantation data, stored as a side record.
    pub plantations: Option<Value>,
    /// The payload with the side-record and boundary parts removed.
    pub sss_data: Map<String, Value>,
}

impl ImportedValues {
    /// Returns the imported value for `field`, if the payload supplied one.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// Returns whether the payload's value for `field` overrides the form.
    #[must_use]
    pub fn overrides(&self, field: Field) -> bool {
        AUTHORITATIVE_FIELDS.contains(&field) && self.fields.contains_key(&field)
    }

    /// Builds the draft incident the creation form starts from.
    ///
    /// # Errors
    ///
    /// Returns an error if an imported value does not fit its field.
    pub fn seed(&self) -> Result<Incident, CoreError> {
        let mut incident: Incident = Incident::default();
        for (field, value) in &self.fields {
            incident.set_value(*field, value.clone())?;
        }
        Ok(incident)
    }
}

/// Maps an import payload into initial field values.
///
/// Lookup misses are recovered locally: an unmatched tenure falls back to
/// "Other" and an unknown region or district is left unset.
///
/// # Arguments
///
/// * `payload` - The payload, a JSON object
/// * `reference` - Reference data used for the tenure, region and district lookups
///
/// # Errors
///
/// Returns `DomainError::InvalidDocument` if the payload is not an object.
pub fn import_initial_values(
    payload: &Value,
    reference: &ReferenceData,
) -> Result<ImportedValues, CoreError> {
    let Value::Object(map) = payload else {
        return Err(DomainError::InvalidDocument(String::from(
            "import payload must be a JSON object",
        ))
        .into());
    };
    let mut sss: Map<String, Value> = map.clone();
    let mut fields: Patch = Patch::new();

    if let Some(area) = sss.get("area") {
        if let Some(total) = area.get("total_area").and_then(as_area) {
            fields.insert(Field::InitialArea, FieldValue::Decimal(total));
        }
        if let Some(other) = area.get("other_area").and_then(as_area) {
            fields.insert(Field::OtherArea, FieldValue::Decimal(other));
        }
    }

    if let Some(Value::Array(coords)) = sss.get("origin_point") {
        match coords.as_slice() {
            [x, y] if x.is_number() && y.is_number() => {
                fields.insert(
                    Field::OriginPoint,
                    FieldValue::Point(Point::new(
                        x.as_f64().unwrap_or_default(),
                        y.as_f64().unwrap_or_default(),
                    )),
                );
            }
            _ => warn!("Ignoring malformed origin point in import payload"),
        }
    }

    for (key, field) in [
        ("origin_point_mga", Field::OriginPointMga),
        ("fire_position", Field::FirePosition),
    ] {
        if let Some(text) = sss.get(key).and_then(as_text) {
            fields.insert(field, FieldValue::Text(text));
        }
    }

    fields.insert(Field::Tenure, FieldValue::Int(import_tenure(&sss, reference)));

    if let (Some(region), Some(district)) = (
        sss.get("region_id").and_then(Value::as_i64),
        sss.get("district_id").and_then(Value::as_i64),
    ) {
        if reference.has_region(region) && reference.has_district(district) {
            fields.insert(Field::Region, FieldValue::Int(region));
            fields.insert(Field::District, FieldValue::Int(district));
        } else {
            warn!(region, district, "Unknown region or district in import payload");
        }
    }

    let fire_boundary: Option<MultiPolygon> = match sss.remove("fire_boundary") {
        Some(raw @ Value::Array(_)) => match serde_json::from_value::<MultiPolygon>(raw) {
            Ok(boundary) if !boundary.is_empty() => Some(boundary),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Ignoring malformed fire boundary in import payload");
                None
            }
        },
        Some(Value::Null) | None => None,
        Some(_) => {
            warn!("Ignoring malformed fire boundary in import payload");
            None
        }
    };

    let fb_validation_req: Option<bool> = sss.get("fb_validation_req").and_then(Value::as_bool);
    let sss_id: Option<String> = sss.get("sss_id").and_then(as_text);
    let plantations: Option<Value> = sss.remove(PLANTATIONS_PROPERTY).filter(|v| !v.is_null());

    info!(
        sss_id = sss_id.as_deref().unwrap_or(""),
        fields = fields.len(),
        has_boundary = fire_boundary.is_some(),
        "Imported initial values"
    );

    Ok(ImportedValues {
        fields,
        fire_boundary,
        fb_validation_req,
        sss_id,
        plantations,
        sss_data: sss,
    })
}

/// Re-derives the authoritative fields of a new incident from its import.
///
/// Tenure, region and district come from the payload regardless of the
/// submitted form. The areas are cleared when the initial area is unknown.
/// The fire position is only taken when the user did not override it.
///
/// # Arguments
///
/// * `incident` - The validated incident about to be created
/// * `imported` - The values derived from the payload
/// * `uploaded_by` - The user recorded as uploading the fire boundary
/// * `now` - The commit time
pub fn finalize_import(
    incident: &mut Incident,
    imported: &ImportedValues,
    uploaded_by: i64,
    now: OffsetDateTime,
) {
    let int = |field: Field| imported.get(field).and_then(FieldValue::as_int);
    let decimal = |field: Field| imported.get(field).and_then(FieldValue::as_decimal);
    let text = |field: Field| {
        imported
            .get(field)
            .and_then(FieldValue::as_text)
            .map(ToString::to_string)
    };

    incident.tenure = int(Field::Tenure);
    if let (Some(region), Some(district)) = (int(Field::Region), int(Field::District)) {
        incident.region = Some(region);
        incident.district = Some(district);
    }

    if incident.initial_area_unknown {
        incident.initial_area = None;
        incident.other_area = None;
    } else {
        if let Some(area) = decimal(Field::InitialArea) {
            incident.initial_area = Some(area);
        }
        if let Some(area) = decimal(Field::OtherArea) {
            incident.other_area = Some(area);
        }
    }

    if let Some(position) = text(Field::FirePosition)
        && !incident.fire_position_override
    {
        incident.fire_position = Some(position);
    }
    if let Some(FieldValue::Point(point)) = imported.get(Field::OriginPoint) {
        incident.origin_point = Some(*point);
    }
    if let Some(mga) = text(Field::OriginPointMga) {
        incident.origin_point_mga = Some(mga);
    }
    if let Some(sss_id) = &imported.sss_id {
        incident.sss_id = Some(sss_id.clone());
    }
    if let Some(boundary) = &imported.fire_boundary {
        incident.fire_boundary = Some(boundary.clone());
    }
    if let Some(required) = imported.fb_validation_req {
        incident.fb_validation_req = Some(required);
    }
    if incident.fire_boundary.is_some() {
        incident.fireboundary_uploaded_by = Some(uploaded_by);
        incident.fireboundary_uploaded_date = Some(now);
    }

    incident.sss_data = Some(Value::Object(imported.sss_data.clone()));
    debug!(tenure = ?incident.tenure, "Re-derived imported fields");
}

fn import_tenure(sss: &Map<String, Value>, reference: &ReferenceData) -> i64 {
    let category: Option<&str> = sss
        .get("tenure_ignition_point")
        .and_then(|t| t.get("category"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let Some(category) = category else {
        debug!("No ignition point tenure in import payload");
        return reference.tenure_other();
    };

    reference.tenure_by_prefix(category).unwrap_or_else(|| {
        warn!(category, "No single tenure matches import category, using Other");
        reference.tenure_other()
    })
}

/// Reads an imported area: rounded to two places, never below the minimum.
fn as_area(raw: &Value) -> Option<f64> {
    let area: f64 = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !area.is_finite() {
        return None;
    }
    let rounded: f64 = (area * 100.0).round() / 100.0;
    Some(if rounded > 0.0 { rounded } else { MIN_AREA })
}

fn as_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

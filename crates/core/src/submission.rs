// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dependency::Patch;
use bfrs_domain::{DomainError, Field, FieldErrors, FieldSet, FieldValue, SubmittedRow};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::debug;

/// A raw save request: field values plus optional line-item rows.
///
/// Field values are untyped JSON; they are parsed against the field
/// catalogue before any rule sees them. A collection left as `None` was not
/// part of the submission and is not reconciled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub fields: Map<String, Value>,
    pub injuries: Option<Vec<SubmittedRow>>,
    pub damages: Option<Vec<SubmittedRow>>,
}

impl Submission {
    /// Creates a submission from field values only.
    #[must_use]
    pub const fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            injuries: None,
            damages: None,
        }
    }

    /// Parses the editable fields of the submission.
    ///
    /// Unknown and non-editable names are ignored. A value that fails to
    /// parse is reported against its field and left out of the result, so
    /// the field keeps its persisted value while validating.
    #[must_use]
    pub fn parse(&self, editable: &FieldSet) -> (Patch, FieldErrors) {
        let mut input: Patch = Patch::new();
        let mut errors: FieldErrors = FieldErrors::new();

        for (name, raw) in &self.fields {
            let Ok(field) = Field::from_str(name) else {
                debug!(field = %name, "Ignoring unknown field");
                continue;
            };
            if !editable.contains(&field) {
                debug!(field = %name, "Ignoring non-editable field");
                continue;
            }
            match FieldValue::parse(field, raw) {
                Ok(value) => {
                    input.insert(field, value);
                }
                Err(DomainError::InvalidFieldValue { reason, .. }) => {
                    errors.report(field, reason);
                }
                Err(other) => {
                    errors.report(field, other.to_string());
                }
            }
        }

        (input, errors)
    }
}

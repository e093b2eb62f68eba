// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::field::Field;
use crate::line_items::LineItemKind;
use serde::{Deserialize, Serialize};

/// Where a validation error is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum ErrorTarget {
    /// An incident field.
    Field {
        /// The offending field.
        field: Field,
    },
    /// A column of a submitted line-item row.
    LineItem {
        /// The collection.
        kind: LineItemKind,
        /// Zero-based row index in the submission.
        row: usize,
    },
}

impl std::fmt::Display for ErrorTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field { field } => write!(f, "{field}"),
            Self::LineItem { kind, row } => write!(f, "{}[{row}].{}", kind.as_str(), kind.type_column()),
        }
    }
}

/// A single field-scoped validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(flatten)]
    pub target: ErrorTarget,
    pub message: String,
}

impl FieldError {
    /// Creates an error on an incident field.
    #[must_use]
    pub fn field(field: Field, message: impl Into<String>) -> Self {
        Self {
            target: ErrorTarget::Field { field },
            message: message.into(),
        }
    }

    /// Creates an error on the type column of a line-item row.
    #[must_use]
    pub fn line_item(kind: LineItemKind, row: usize, message: impl Into<String>) -> Self {
        Self {
            target: ErrorTarget::LineItem { kind, row },
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.target, self.message)
    }
}

/// An accumulated collection of field errors.
///
/// Validation never stops at the first error; every rule appends here and
/// the save proceeds only when the collection is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an error.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Appends an error on an incident field.
    pub fn report(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError::field(field, message));
    }

    /// Appends every error from `other`.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the errors in the order they were raised.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the messages reported against `field`.
    #[must_use]
    pub fn for_field(&self, field: Field) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.target == ErrorTarget::Field { field })
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Returns whether any error targets `field`.
    #[must_use]
    pub fn has_field(&self, field: Field) -> bool {
        !self.for_field(field).is_empty()
    }

    /// Returns the row indexes of line-item errors for `kind`.
    #[must_use]
    pub fn line_item_rows(&self, kind: LineItemKind) -> Vec<usize> {
        self.0
            .iter()
            .filter_map(|e| match e.target {
                ErrorTarget::LineItem { kind: k, row } if k == kind => Some(row),
                _ => None,
            })
            .collect()
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join("; "))
    }
}

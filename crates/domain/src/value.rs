// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::field::{Field, FieldKind};
use crate::timestamp;
use crate::types::Point;
use serde_json::Value;
use time::OffsetDateTime;

/// A typed field value.
///
/// Raw submissions are parsed into this form at the boundary; nothing
/// downstream inspects strings to decide what a value means.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer: reference ids, codes and years.
    Int(i64),
    /// A decimal quantity such as an area.
    Decimal(f64),
    /// Free text. Never empty; empty text parses to `Null`.
    Text(String),
    /// A timestamp.
    DateTime(OffsetDateTime),
    /// A point geometry.
    Point(Point),
}

impl FieldValue {
    /// Parses a raw JSON value for `field`.
    ///
    /// # Arguments
    ///
    /// * `field` - The field the value was submitted for
    /// * `raw` - The submitted value
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFieldValue` if the value does not fit the
    /// field's kind.
    pub fn parse(field: Field, raw: &Value) -> Result<Self, DomainError> {
        if is_blank(raw) {
            return Ok(match field.kind() {
                FieldKind::Switch => Self::Bool(false),
                _ => Self::Null,
            });
        }

        let invalid = |reason: &str| DomainError::InvalidFieldValue {
            field,
            reason: reason.to_string(),
        };

        match field.kind() {
            FieldKind::Switch | FieldKind::Flag => {
                parse_bool(raw).map(Self::Bool).ok_or_else(|| invalid("Enter a yes or no value."))
            }
            FieldKind::Reference => parse_int(raw)
                .map(Self::Int)
                .ok_or_else(|| invalid("Select a valid choice.")),
            FieldKind::Code(codes) => {
                let code: i64 = parse_int(raw).ok_or_else(|| invalid("Select a valid choice."))?;
                if code == 0 {
                    // the unselected choice
                    Ok(Self::Null)
                } else if codes.contains(&code) {
                    Ok(Self::Int(code))
                } else {
                    Err(invalid(&format!(
                        "Select a valid choice. {code} is not one of the available choices."
                    )))
                }
            }
            FieldKind::Year => {
                let year: i64 = parse_int(raw).ok_or_else(|| invalid("Enter a whole number."))?;
                if (1900..=2200).contains(&year) {
                    Ok(Self::Int(year))
                } else {
                    Err(invalid(&format!("Year must be between 1900 and 2200, got {year}")))
                }
            }
            FieldKind::Area => {
                let area: f64 = parse_decimal(raw).ok_or_else(|| invalid("Enter a number."))?;
                if !area.is_finite() {
                    Err(invalid("Enter a number."))
                } else if area < 0.0 {
                    Err(invalid("Ensure this value is greater than or equal to 0."))
                } else {
                    Ok(Self::Decimal(area))
                }
            }
            FieldKind::Text => match raw {
                Value::String(s) => Ok(Self::Text(s.trim().to_string())),
                Value::Number(n) => Ok(Self::Text(n.to_string())),
                Value::Bool(b) => Ok(Self::Text(b.to_string())),
                _ => Err(invalid("Enter text.")),
            },
            FieldKind::Timestamp => match raw {
                Value::String(s) => timestamp::parse(s.trim())
                    .map(Self::DateTime)
                    .map_err(|e| invalid(&format!("Enter a valid date/time: {e}"))),
                _ => Err(invalid("Enter a valid date/time.")),
            },
            FieldKind::Point => parse_point(raw)
                .map(Self::Point)
                .ok_or_else(|| invalid("Enter a coordinate pair.")),
        }
    }

    /// Renders this value as JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Decimal(d) => Value::from(*d),
            Self::Text(s) => Value::String(s.clone()),
            Self::DateTime(ts) => timestamp::format(*ts).map_or(Value::Null, Value::String),
            Self::Point(p) => Value::from(vec![p.x, p.y]),
        }
    }

    /// Returns whether the value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns whether the value counts as "set" in a condition.
    ///
    /// Null, `false`, zero and empty text are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Decimal(d) => d.abs() > f64::EPSILON,
            Self::Text(s) => !s.is_empty(),
            Self::DateTime(_) | Self::Point(_) => true,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the decimal payload, if any.
    #[must_use]
    pub const fn as_decimal(&self) -> Option<f64> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the timestamp payload, if any.
    #[must_use]
    pub const fn as_datetime(&self) -> Option<OffsetDateTime> {
        match self {
            Self::DateTime(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Returns the text payload, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<Option<bool>> for FieldValue {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Null, Self::Bool)
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Null, Self::Int)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Decimal)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

impl From<Option<OffsetDateTime>> for FieldValue {
    fn from(value: Option<OffsetDateTime>) -> Self {
        value.map_or(Self::Null, Self::DateTime)
    }
}

impl From<Option<Point>> for FieldValue {
    fn from(value: Option<Point>) -> Self {
        value.map_or(Self::Null, Self::Point)
    }
}

fn is_blank(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn parse_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim() {
            "true" | "True" | "1" | "on" => Some(true),
            "false" | "False" | "0" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn parse_int(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn parse_decimal(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn parse_point(raw: &Value) -> Option<Point> {
    match raw {
        Value::Array(items) if items.len() == 2 => {
            Some(Point::new(items[0].as_f64()?, items[1].as_f64()?))
        }
        Value::Object(map) => Some(Point::new(
            map.get("x").and_then(Value::as_f64)?,
            map.get("y").and_then(Value::as_f64)?,
        )),
        _ => None,
    }
}

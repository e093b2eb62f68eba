// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event queries
//! - `incidents`: Incident and side record queries
//! - `line_items`: Injury, damage and area-burnt queries
//! - `reference`: Reference table loading
//! - `snapshots`: Incident snapshot queries

pub mod audit;
pub mod incidents;
pub mod line_items;
pub mod reference;
pub mod snapshots;

pub use audit::get_audit_events;
pub use incidents::{count_incidents, get_incident, get_properties, list_incidents};
pub use line_items::{get_areas_burnt, get_existing_line_items, get_line_items};
pub use reference::{load_reference_data, load_reference_tables};
pub use snapshots::{get_snapshot, list_snapshots};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Mutations use Diesel DSL, with `last_insert_rowid()` reached through the
//! `PersistenceBackend` trait.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event persistence
//! - `incidents`: Incident rows
//! - `line_items`: Commit plans for injuries, damages and areas burnt
//! - `records`: Side records and snapshots
//! - `commit`: The atomic save (`commit_save`)

pub mod audit;
pub mod commit;
pub mod incidents;
pub mod line_items;
pub mod records;

pub use audit::persist_audit_event;
pub use commit::{CommitResult, commit_save};
pub use incidents::save_incident;
pub use line_items::{apply_area_burnt_plan, apply_line_item_plan};
pub use records::{persist_snapshot, upsert_property};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod capabilities;
mod command;
mod dependency;
mod error;
mod import;
mod reconcile;
mod state;
mod submission;
mod validator;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, apply_archive, apply_create, apply_save};
pub use capabilities::{editable_fields, owns_line_items};
pub use command::{Command, save_action};
pub use dependency::{
    Condition, DependencyTable, FieldView, Patch, Resolution, Rule, RuleAction, fire_not_found,
    standard_rules,
};
pub use error::CoreError;
pub use import::{ImportedValues, PLANTATIONS_PROPERTY, finalize_import, import_initial_values};
pub use reconcile::{
    AreaBurntPlan, ExistingLineItems, LineItemPlan, plan_area_burnt, plan_cleanup,
    reconcile_line_items,
};
pub use state::{SaveContext, SaveOutcome, SaveResult};
pub use submission::Submission;
pub use validator::{LineItemPlans, REQUIRED_MESSAGE, Validation, Validator, is_fire_not_found};

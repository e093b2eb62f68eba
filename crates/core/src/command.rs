// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::submission::Submission;
use bfrs_domain::{ReportStatus, Stage};
use serde_json::Value;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request changes to an incident.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a new incident in Initial status.
    Create {
        /// The import payload seeding the incident, if any.
        payload: Option<Value>,
        /// The initial report form.
        submission: Submission,
        /// Submit the report straight away.
        submit: bool,
    },
    /// Save an incident under a stage, optionally moving it to a new status.
    Save {
        /// The stage the save is performed under.
        stage: Stage,
        /// The submitted form.
        submission: Submission,
        /// The requested status, if the save progresses the report.
        target_status: Option<ReportStatus>,
    },
    /// Archive an incident. Incidents are never deleted.
    Archive,
    /// Remove injuries and damages from an incident whose fire was not found.
    CleanupLineItems,
}

impl Command {
    /// The audit action name of this command.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "CreateIncident",
            Self::Save { stage, .. } => save_action(*stage),
            Self::Archive => "ArchiveIncident",
            Self::CleanupLineItems => "CleanupLineItems",
        }
    }
}

/// The audit action name of a save under `stage`.
#[must_use]
pub const fn save_action(stage: Stage) -> &'static str {
    match stage {
        Stage::Initial => "SaveInitial",
        Stage::Submitted => "SaveSubmitted",
        Stage::Authorised => "SaveAuthorised",
        Stage::Reviewed => "SaveReviewed",
        Stage::Merged => "SaveMerged",
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The identity and capabilities of the user behind a request.

use bfrs::{SaveContext, editable_fields};
use bfrs_audit::Actor;
use bfrs_domain::{FieldSet, Stage};
use time::OffsetDateTime;

/// An authenticated user session.
///
/// Authentication itself happens outside this crate; a session only
/// carries who the user is and whether they may maintain authoritative
/// data such as region, district and reporting year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The user performing requests.
    pub actor: Actor,
    /// Whether the user may maintain authoritative data.
    pub can_maintain_data: bool,
}

impl Session {
    /// Creates a session for an interactive user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's id
    /// * `can_maintain_data` - Whether the user may maintain authoritative data
    #[must_use]
    pub fn user(user_id: i64, can_maintain_data: bool) -> Self {
        Self {
            actor: Actor::user(user_id),
            can_maintain_data,
        }
    }

    /// The user's id.
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.actor.id
    }

    /// Builds the save context for a request committed at `now`.
    #[must_use]
    pub fn save_context(&self, now: OffsetDateTime) -> SaveContext {
        SaveContext::new(self.actor.clone(), self.can_maintain_data, now)
    }

    /// The fields this user may edit under `stage`.
    #[must_use]
    pub fn editable_fields(&self, stage: Stage) -> FieldSet {
        editable_fields(stage, self.can_maintain_data)
    }
}

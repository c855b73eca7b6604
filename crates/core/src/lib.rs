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
mod assigner;
mod command;
mod error;
mod events;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use assigner::{AssignmentRunSummary, DeadheadRecord, RankingStrategy, auto_assign};
pub use command::{ApplyOutcome, Command};
pub use error::CoreError;
pub use events::{EventRequest, assignment_id};
pub use state::RosterState;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-chapters — Chapter inference and reorganization for Folio.
//
// Classifies page text into recipes, letters, journal entries, or generic
// sections; proposes a grouping; and applies an approved grouping by
// renumbering pages and materializing chapter records through a
// caller-supplied sink.

pub mod assemble;
pub mod classify;
pub mod dates;
pub mod persist;
pub mod planner;
pub mod renumber;
pub mod reorganize;

#[cfg(test)]
mod test_support;

pub use assemble::{ChapterBatch, ChapterFailure, assemble_chapters};
pub use classify::classify;
pub use persist::{PersistReport, ReorganizationSink};
pub use planner::ReorganizationPlanner;
pub use renumber::{RenumberPlan, plan_renumbering, renumber};
pub use reorganize::{ApplyOutcome, apply_reorganization, apply_reorganization_concurrently};

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Applying an approved reorganization.
//
// Order of operations:
//   1. validate the suggestion and compute new page numbers (nothing is
//      written if this fails);
//   2. write the page numbers;
//   3. drop the project's previous chapters;
//   4. assemble and save the new chapters, best effort.

use std::sync::Arc;

use folio_core::error::{FolioError, Result};
use folio_core::types::{Chapter, Page, PageAssignment, ProjectId, ReorganizationSuggestion};
use serde::Serialize;
use tracing::{info, instrument};

use crate::assemble::{ChapterFailure, assemble_chapters};
use crate::persist::{
    PersistReport, ReorganizationSink, persist_chapters, persist_chapters_concurrently,
};
use crate::renumber::plan_renumbering;

/// What applying a reorganization changed.
#[derive(Debug, Default, Serialize)]
pub struct ApplyOutcome {
    pub pages_updated: usize,
    pub chapters_created: usize,
    pub chapters: Vec<Chapter>,
    /// Chapters that could not be assembled or saved.
    pub failures: Vec<ChapterFailure>,
}

impl ApplyOutcome {
    fn from_parts(pages_updated: usize, mut failures: Vec<ChapterFailure>, report: PersistReport) -> Self {
        failures.extend(report.failures);
        Self {
            pages_updated,
            chapters_created: report.created.len(),
            chapters: report.created,
            failures,
        }
    }

    /// `Err(PartialPersistence)` when any chapter is missing.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(FolioError::PartialPersistence {
                succeeded: self.chapters_created,
                failed: self.failures.len(),
            })
        }
    }
}

/// Renumber pages and replace the project's chapters, saving one chapter
/// at a time.
///
/// # Errors
///
/// Structural problems with the suggestion ([`FolioError::UnknownPage`],
/// [`FolioError::DuplicatePage`]) and failures writing page numbers or
/// clearing old chapters are returned as errors. Individual chapter
/// failures are reported in [`ApplyOutcome::failures`] instead.
#[instrument(skip_all, fields(project_id = %project_id))]
pub fn apply_reorganization<S>(
    project_id: &ProjectId,
    suggestion: &ReorganizationSuggestion,
    project_pages: &[Page],
    sink: &S,
) -> Result<ApplyOutcome>
where
    S: ReorganizationSink + ?Sized,
{
    let plan = plan_renumbering(suggestion, project_pages)?;
    let all: Vec<PageAssignment> = plan.all().cloned().collect();

    let pages_updated = sink.replace_page_numbers(project_id, &all)?;
    let removed = sink.delete_chapters(project_id)?;

    let batch = assemble_chapters(project_id, suggestion, &plan.assignments);
    let report = persist_chapters(sink, batch.chapters);
    let outcome = ApplyOutcome::from_parts(pages_updated, batch.failures, report);

    info!(
        pages_updated,
        old_chapters_removed = removed,
        chapters_created = outcome.chapters_created,
        failures = outcome.failures.len(),
        "reorganization applied"
    );
    Ok(outcome)
}

/// Like [`apply_reorganization`], but saves chapters concurrently with at
/// most `limit` writes in flight. Page renumbering is still a single
/// ordered step that completes before any chapter is written.
#[instrument(skip_all, fields(project_id = %project_id, limit = limit))]
pub async fn apply_reorganization_concurrently<S>(
    project_id: &ProjectId,
    suggestion: &ReorganizationSuggestion,
    project_pages: &[Page],
    sink: Arc<S>,
    limit: usize,
) -> Result<ApplyOutcome>
where
    S: ReorganizationSink + Send + Sync + 'static,
{
    let plan = plan_renumbering(suggestion, project_pages)?;
    let all: Vec<PageAssignment> = plan.all().cloned().collect();

    let (pages_updated, removed) = {
        let sink = Arc::clone(&sink);
        let project = project_id.clone();
        tokio::task::spawn_blocking(move || -> Result<(usize, usize)> {
            let updated = sink.replace_page_numbers(&project, &all)?;
            let removed = sink.delete_chapters(&project)?;
            Ok((updated, removed))
        })
        .await
        .map_err(|e| FolioError::Storage(format!("renumber task failed: {e}")))??
    };

    let batch = assemble_chapters(project_id, suggestion, &plan.assignments);
    let report = persist_chapters_concurrently(sink, batch.chapters, limit).await;
    let outcome = ApplyOutcome::from_parts(pages_updated, batch.failures, report);

    info!(
        pages_updated,
        old_chapters_removed = removed,
        chapters_created = outcome.chapters_created,
        failures = outcome.failures.len(),
        "reorganization applied"
    );
    Ok(outcome)
}

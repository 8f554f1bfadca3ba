// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Best-effort chapter persistence.
//
// Chapters are independent rows, so a failed insert never stops the batch:
// every chapter is attempted and the caller gets back what was saved and
// what was not. The concurrent variant bounds the number of writes in
// flight with a semaphore and runs each (blocking) insert on tokio's
// blocking pool.

use std::sync::Arc;

use folio_core::error::{FolioError, Result};
use folio_core::types::{Chapter, PageAssignment, ProjectId};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::assemble::ChapterFailure;

/// Where an applied reorganization is written.
///
/// Implementations are synchronous, like `rusqlite`; the concurrent helpers
/// below move calls onto the blocking pool.
pub trait ReorganizationSink {
    /// Give pages their new numbers. Implementations should apply all
    /// assignments atomically. Returns the number of pages updated.
    fn replace_page_numbers(
        &self,
        project_id: &ProjectId,
        assignments: &[PageAssignment],
    ) -> Result<usize>;

    /// Remove all chapters of a project. Returns how many were removed.
    fn delete_chapters(&self, project_id: &ProjectId) -> Result<usize>;

    fn insert_chapter(&self, chapter: &Chapter) -> Result<()>;
}

/// Outcome of a chapter save batch.
#[derive(Debug, Default)]
pub struct PersistReport {
    /// Saved chapters, in their original order.
    pub created: Vec<Chapter>,
    pub failures: Vec<ChapterFailure>,
}

impl PersistReport {
    pub fn succeeded(&self) -> usize {
        self.created.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// `Err(PartialPersistence)` when any chapter failed.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(FolioError::PartialPersistence {
                succeeded: self.succeeded(),
                failed: self.failures.len(),
            })
        }
    }
}

/// Save each chapter in turn, continuing past failures.
#[instrument(skip_all, fields(chapters = chapters.len()))]
pub fn persist_chapters<S>(sink: &S, chapters: Vec<Chapter>) -> PersistReport
where
    S: ReorganizationSink + ?Sized,
{
    let mut report = PersistReport::default();
    for chapter in chapters {
        match sink.insert_chapter(&chapter) {
            Ok(()) => report.created.push(chapter),
            Err(error) => {
                warn!(title = %chapter.title, error = %error, "chapter not saved");
                report.failures.push(ChapterFailure {
                    title: chapter.title,
                    error,
                });
            }
        }
    }
    info!(
        saved = report.succeeded(),
        failed = report.failures.len(),
        "chapter batch persisted"
    );
    report
}

/// Save chapters with at most `limit` inserts in flight.
///
/// Results are collected in completion order and then restored to the
/// original chapter order.
#[instrument(skip_all, fields(chapters = chapters.len(), limit = limit))]
pub async fn persist_chapters_concurrently<S>(
    sink: Arc<S>,
    chapters: Vec<Chapter>,
    limit: usize,
) -> PersistReport
where
    S: ReorganizationSink + Send + Sync + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut tasks = JoinSet::new();

    for (index, chapter) in chapters.into_iter().enumerate() {
        let sink = Arc::clone(&sink);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let title = chapter.title.clone();
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return (index, title, Err(FolioError::Storage("write limiter closed".into())));
            };
            let written = tokio::task::spawn_blocking(move || {
                sink.insert_chapter(&chapter).map(|()| chapter)
            })
            .await;
            let outcome = match written {
                Ok(result) => result,
                Err(join_err) => Err(FolioError::Storage(format!("write task failed: {join_err}"))),
            };
            (index, title, outcome)
        });
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            // Task bodies do not panic; a join error here means the runtime
            // is shutting down and the chapter's fate is unknown.
            Err(join_err) => warn!(error = %join_err, "chapter task aborted"),
        }
    }
    outcomes.sort_by_key(|(index, _, _)| *index);

    let mut report = PersistReport::default();
    for (_, title, outcome) in outcomes {
        match outcome {
            Ok(chapter) => report.created.push(chapter),
            Err(error) => {
                warn!(title = %title, error = %error, "chapter not saved");
                report.failures.push(ChapterFailure { title, error });
            }
        }
    }

    debug!(
        saved = report.succeeded(),
        failed = report.failures.len(),
        "concurrent chapter batch persisted"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemorySink;
    use folio_core::types::{ChapterId, ChapterType};

    fn chapters(titles: &[&str]) -> Vec<Chapter> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| Chapter {
                id: ChapterId::new(),
                project_id: ProjectId::new("p"),
                title: title.to_string(),
                start_page_number: i as u32 + 1,
                end_page_number: Some(i as u32 + 1),
                chapter_type: ChapterType::Section,
                description: Some("1 item".into()),
                order: i as u32,
            })
            .collect()
    }

    #[test]
    fn one_failure_does_not_abort_batch() {
        let sink = MemorySink::rejecting(&["B"]);
        let report = persist_chapters(&sink, chapters(&["A", "B", "C"]));

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].title, "B");
        assert_eq!(sink.stored_titles(), vec!["A", "C"]);
        assert!(matches!(
            report.ensure_complete(),
            Err(FolioError::PartialPersistence { succeeded: 2, failed: 1 })
        ));
    }

    #[test]
    fn complete_batch_is_ok() {
        let sink = MemorySink::default();
        let report = persist_chapters(&sink, chapters(&["A", "B"]));
        assert!(report.is_complete());
        assert!(report.ensure_complete().is_ok());
    }

    #[tokio::test]
    async fn concurrent_save_keeps_order_and_counts() {
        let sink = Arc::new(MemorySink::rejecting(&["D"]));
        let input = chapters(&["A", "B", "C", "D", "E", "F"]);
        let report = persist_chapters_concurrently(Arc::clone(&sink), input, 2).await;

        let created: Vec<&str> = report.created.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(created, vec!["A", "B", "C", "E", "F"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].title, "D");
        assert_eq!(sink.stored_titles().len(), 5);
    }

    #[tokio::test]
    async fn zero_limit_still_makes_progress() {
        let sink = Arc::new(MemorySink::default());
        let report = persist_chapters_concurrently(sink, chapters(&["A", "B"]), 0).await;
        assert_eq!(report.succeeded(), 2);
    }
}

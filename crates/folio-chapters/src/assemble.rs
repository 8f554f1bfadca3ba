// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Chapter assembly — turns approved categories into chapter records.

use std::collections::HashMap;

use folio_core::error::FolioError;
use folio_core::types::{
    Category, Chapter, ChapterId, PageAssignment, PageId, ProjectId, ReorganizationSuggestion,
};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{debug, instrument, warn};

/// A chapter that could not be built or saved.
#[derive(Debug)]
pub struct ChapterFailure {
    /// Category (chapter title) the failure belongs to.
    pub title: String,
    pub error: FolioError,
}

impl Serialize for ChapterFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChapterFailure", 2)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

/// Result of assembling chapters from a suggestion.
#[derive(Debug, Default)]
pub struct ChapterBatch {
    pub chapters: Vec<Chapter>,
    pub failures: Vec<ChapterFailure>,
}

/// `"1 item"` / `"{n} items"`.
pub fn item_count_description(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

/// Build one chapter per non-empty category, in suggestion order.
///
/// Page boundaries come from `assignments` (the renumbered positions). A
/// category whose first or last page has no assignment is reported as a
/// [`FolioError::MissingBoundary`] failure; the remaining categories are
/// still assembled. Empty categories produce no chapter and do not consume
/// an `order` value.
#[instrument(skip_all, fields(project_id = %project_id, categories = suggestion.categories.len()))]
pub fn assemble_chapters(
    project_id: &ProjectId,
    suggestion: &ReorganizationSuggestion,
    assignments: &[PageAssignment],
) -> ChapterBatch {
    let numbers: HashMap<&PageId, u32> = assignments
        .iter()
        .map(|a| (&a.page_id, a.new_page_number))
        .collect();

    let mut batch = ChapterBatch::default();
    let mut order: u32 = 0;

    for category in &suggestion.categories {
        if category.pages.is_empty() {
            debug!(category = %category.name, "empty category, no chapter emitted");
            continue;
        }
        match boundaries(category, &numbers) {
            Some((start, end)) => {
                batch.chapters.push(Chapter {
                    id: ChapterId::new(),
                    project_id: project_id.clone(),
                    title: category.name.clone(),
                    start_page_number: start,
                    end_page_number: Some(end),
                    chapter_type: category.chapter_type,
                    description: Some(item_count_description(category.pages.len())),
                    order,
                });
                order += 1;
            }
            None => {
                warn!(category = %category.name, "chapter boundary page has no new number");
                batch.failures.push(ChapterFailure {
                    title: category.name.clone(),
                    error: FolioError::MissingBoundary {
                        category: category.name.clone(),
                    },
                });
            }
        }
    }

    debug!(
        chapters = batch.chapters.len(),
        failures = batch.failures.len(),
        "chapters assembled"
    );
    batch
}

fn boundaries(category: &Category, numbers: &HashMap<&PageId, u32>) -> Option<(u32, u32)> {
    let first = category.pages.first()?;
    let last = category.pages.last()?;
    Some((
        *numbers.get(&first.page_id)?,
        *numbers.get(&last.page_id)?,
    ))
}

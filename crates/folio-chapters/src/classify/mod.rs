// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page classification — one strategy per project type.
//
// Recipe, letter, and journal projects are grouped into named categories
// (a `ReorganizationSuggestion`). Every other project is split into evenly
// sized positional sections (`ChapterSuggestion`s). Pages a strategy cannot
// place (no title, no date) are left out of the result rather than reported
// as errors.

pub mod generic;
pub mod journal;
pub mod letter;
pub mod recipe;

use folio_core::config::ClassifierConfig;
use folio_core::types::{Classification, Page, PageRef, ProjectType};
use tracing::debug;

/// Classify `pages` with the strategy selected by `project_type`.
///
/// Pages are processed in the order given; callers wanting order-independent
/// output go through [`crate::planner::ReorganizationPlanner`], which sorts
/// and de-duplicates first.
pub fn classify(
    project_type: ProjectType,
    pages: &[&Page],
    config: &ClassifierConfig,
) -> Classification {
    let result = match project_type {
        ProjectType::Recipe => {
            Classification::Reorganization(recipe::categorize(pages, config.title_scan_lines))
        }
        ProjectType::Letter => Classification::Reorganization(letter::categorize(pages)),
        ProjectType::Journal => Classification::Reorganization(journal::categorize(pages)),
        ProjectType::Generic => Classification::Sections {
            suggestions: generic::sections(pages, config.generic_sections),
        },
    };

    debug!(
        project_type = project_type.as_str(),
        pages = pages.len(),
        empty = result.is_empty(),
        "pages classified"
    );
    result
}

/// Trimmed, non-empty lines of `text`.
pub(crate) fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

pub(crate) fn page_ref(page: &Page, title: impl Into<String>) -> PageRef {
    PageRef {
        page_id: page.id.clone(),
        current_page_number: page.page_number,
        title: title.into(),
    }
}

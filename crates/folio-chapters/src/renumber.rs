// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page renumbering for an approved reorganization.
//
// Numbers are handed out by a single ordered pass over the categories and
// their pages, so the result is always the contiguous run 1..=N. The counter
// lives only for the duration of one call.

use std::collections::{HashMap, HashSet};

use folio_core::error::{FolioError, Result};
use folio_core::types::{Page, PageAssignment, PageId, ReorganizationSuggestion};
use tracing::{debug, instrument};

/// Assign new page numbers in category order, then page order.
///
/// Returns one assignment per page reference, in assignment order.
pub fn renumber(suggestion: &ReorganizationSuggestion) -> Vec<PageAssignment> {
    let mut next: u32 = 1;
    let mut assignments = Vec::with_capacity(suggestion.page_count());
    for category in &suggestion.categories {
        for page in &category.pages {
            assignments.push(PageAssignment {
                page_id: page.page_id.clone(),
                new_page_number: next,
            });
            next += 1;
        }
    }
    assignments
}

/// Renumbering for a whole project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenumberPlan {
    /// Pages named by the suggestion, numbered `1..=N`.
    pub assignments: Vec<PageAssignment>,
    /// Project pages the suggestion left out, numbered after `N` in their
    /// previous order so the project stays contiguous.
    pub trailing: Vec<PageAssignment>,
}

impl RenumberPlan {
    /// Every assignment, suggestion pages first.
    pub fn all(&self) -> impl Iterator<Item = &PageAssignment> {
        self.assignments.iter().chain(self.trailing.iter())
    }

    pub fn len(&self) -> usize {
        self.assignments.len() + self.trailing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// New number for each page id.
    pub fn lookup(&self) -> HashMap<&PageId, u32> {
        self.all().map(|a| (&a.page_id, a.new_page_number)).collect()
    }
}

/// Validate an approved suggestion against the project's pages and renumber.
///
/// # Errors
///
/// - [`FolioError::UnknownPage`] if a category names a page the project does
///   not have.
/// - [`FolioError::DuplicatePage`] if a page is listed more than once.
#[instrument(skip_all, fields(categories = suggestion.categories.len(), project_pages = project_pages.len()))]
pub fn plan_renumbering(
    suggestion: &ReorganizationSuggestion,
    project_pages: &[Page],
) -> Result<RenumberPlan> {
    let known: HashSet<&PageId> = project_pages.iter().map(|p| &p.id).collect();
    let mut listed: HashSet<&PageId> = HashSet::new();

    for page in suggestion.categories.iter().flat_map(|c| c.pages.iter()) {
        if !known.contains(&page.page_id) {
            return Err(FolioError::UnknownPage(page.page_id.to_string()));
        }
        if !listed.insert(&page.page_id) {
            return Err(FolioError::DuplicatePage(page.page_id.to_string()));
        }
    }

    let assignments = renumber(suggestion);

    let mut rest: Vec<&Page> = project_pages
        .iter()
        .filter(|p| !listed.contains(&p.id))
        .collect();
    rest.sort_by_key(|p| p.page_number);
    let trailing = rest
        .into_iter()
        .zip(assignments.len() as u32 + 1..)
        .map(|(page, number)| PageAssignment {
            page_id: page.id.clone(),
            new_page_number: number,
        })
        .collect::<Vec<_>>();

    debug!(
        assigned = assignments.len(),
        trailing = trailing.len(),
        "renumbering planned"
    );
    Ok(RenumberPlan {
        assignments,
        trailing,
    })
}

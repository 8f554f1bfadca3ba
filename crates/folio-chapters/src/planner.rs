// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reorganization planning — deterministic wrapper around the classifier.

use std::collections::HashSet;

use folio_core::config::ClassifierConfig;
use folio_core::types::{Classification, Page, PageId, ProjectType};
use tracing::{info, instrument, warn};

use crate::classify::classify;

/// Produces chapter suggestions for a project's pages.
///
/// The result depends only on the set of pages, not on the order they were
/// fetched in, and never lists a page twice.
#[derive(Debug, Clone, Default)]
pub struct ReorganizationPlanner {
    config: ClassifierConfig,
}

impl ReorganizationPlanner {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Plan using a free-form project type tag (unknown or missing tags use
    /// the generic strategy).
    pub fn plan_tagged(&self, project_type: Option<&str>, pages: &[Page]) -> Classification {
        self.plan(ProjectType::parse(project_type), pages)
    }

    #[instrument(skip_all, fields(project_type = project_type.as_str(), pages = pages.len()))]
    pub fn plan(&self, project_type: ProjectType, pages: &[Page]) -> Classification {
        let ordered = normalize(pages);
        let mut result = classify(project_type, &ordered, &self.config);

        if let Classification::Reorganization(suggestion) = &mut result {
            let mut placed: HashSet<PageId> = HashSet::new();
            for category in &mut suggestion.categories {
                category.pages.retain(|p| {
                    let fresh = placed.insert(p.page_id.clone());
                    if !fresh {
                        warn!(page_id = %p.page_id, category = %category.name, "page already placed, dropping repeat");
                    }
                    fresh
                });
            }
            suggestion.categories.retain(|c| !c.pages.is_empty());

            info!(
                categories = suggestion.categories.len(),
                placed = placed.len(),
                left_out = ordered.len() - placed.len(),
                "reorganization suggested"
            );
        }

        result
    }
}

/// Unique pages (first occurrence wins) in ascending page-number order.
fn normalize(pages: &[Page]) -> Vec<&Page> {
    let mut seen: HashSet<&PageId> = HashSet::new();
    let mut ordered: Vec<&Page> = pages
        .iter()
        .filter(|p| {
            let fresh = seen.insert(&p.id);
            if !fresh {
                warn!(page_id = %p.id, "duplicate page in input, keeping first");
            }
            fresh
        })
        .collect();
    ordered.sort_by_key(|p| p.page_number);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::types::ReorganizationSuggestion;

    fn reorg(result: Classification) -> ReorganizationSuggestion {
        match result {
            Classification::Reorganization(s) => s,
            other => panic!("expected categories, got {other:?}"),
        }
    }

    fn recipes() -> Vec<Page> {
        vec![
            Page::new("a", 1).with_extracted_text("Chicken Soup\nSalt\nBoil water"),
            Page::new("b", 2).with_extracted_text("Chocolate Cake\nFlour\nBake"),
            Page::new("c", 3).with_extracted_text("Lentil Stew\nlentils"),
        ]
    }

    #[test]
    fn output_independent_of_input_order() {
        let planner = ReorganizationPlanner::default();
        let forward = recipes();
        let mut backward = recipes();
        backward.reverse();

        assert_eq!(
            planner.plan(ProjectType::Recipe, &forward),
            planner.plan(ProjectType::Recipe, &backward)
        );
    }

    #[test]
    fn pages_within_category_follow_page_number() {
        let mut pages = recipes();
        pages.reverse();
        let result = reorg(ReorganizationPlanner::default().plan(ProjectType::Recipe, &pages));
        let soups: Vec<&str> = result.categories[0]
            .pages
            .iter()
            .map(|p| p.page_id.as_str())
            .collect();
        assert_eq!(soups, vec!["a", "c"]);
    }

    #[test]
    fn planning_is_idempotent() {
        let planner = ReorganizationPlanner::default();
        let pages = recipes();
        let first = planner.plan(ProjectType::Recipe, &pages);
        let second = planner.plan(ProjectType::Recipe, &pages);
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_input_pages_are_listed_once() {
        let mut pages = recipes();
        pages.push(pages[0].clone());
        let result = reorg(ReorganizationPlanner::default().plan(ProjectType::Recipe, &pages));
        assert_eq!(result.page_count(), 3);
    }

    #[test]
    fn tagged_plan_falls_back_to_generic() {
        let pages: Vec<Page> = (1..=7).map(|i| Page::new(format!("p{i}"), i)).collect();
        let planner = ReorganizationPlanner::default();
        for tag in [Some("unknown"), None] {
            match planner.plan_tagged(tag, &pages) {
                Classification::Sections { suggestions } => {
                    let sizes: Vec<u32> = suggestions
                        .iter()
                        .map(|s| s.end_page.unwrap_or(s.start_page) - s.start_page + 1)
                        .collect();
                    assert_eq!(sizes, vec![3, 3, 1]);
                }
                other => panic!("expected sections, got {other:?}"),
            }
        }
    }

    #[test]
    fn tagged_plan_is_case_insensitive() {
        let result = ReorganizationPlanner::default().plan_tagged(Some("RECIPE"), &recipes());
        assert!(result.as_reorganization().is_some());
    }

    #[test]
    fn nothing_classifiable_gives_empty_suggestion() {
        let pages = vec![Page::new("x", 1).with_extracted_text("no date here")];
        let result = reorg(ReorganizationPlanner::default().plan(ProjectType::Journal, &pages));
        assert!(result.is_empty());
    }
}

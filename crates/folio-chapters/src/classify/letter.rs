// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Correspondence → one category per year.

use std::collections::BTreeMap;

use folio_core::types::{Category, ChapterType, Page, PageRef, ReorganizationSuggestion};
use tracing::trace;

use super::{content_lines, page_ref};
use crate::dates::find_month_day_year;

/// Group dated letters by year, oldest year first. Undated pages are left out.
pub fn categorize(pages: &[&Page]) -> ReorganizationSuggestion {
    let mut by_year: BTreeMap<i32, Vec<PageRef>> = BTreeMap::new();

    for page in pages {
        let text = page.effective_text();
        let Some(found) = find_month_day_year(text) else {
            trace!(page_id = %page.id, "no date on letter, page left out");
            continue;
        };
        let title = content_lines(text)
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Letter from {}", found.span));
        by_year.entry(found.year).or_default().push(page_ref(page, title));
    }

    ReorganizationSuggestion {
        categories: by_year
            .into_iter()
            .map(|(year, pages)| Category {
                name: format!("Letters from {year}"),
                chapter_type: ChapterType::Section,
                pages,
            })
            .collect(),
    }
}

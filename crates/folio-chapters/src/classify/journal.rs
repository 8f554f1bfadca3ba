// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Diary pages → one category per month.

use std::collections::HashMap;

use chrono::NaiveDate;
use folio_core::types::{Category, ChapterType, Page, ReorganizationSuggestion};
use tracing::trace;

use super::{content_lines, page_ref};
use crate::dates::find_long_date;

struct MonthGroup {
    earliest: NaiveDate,
    category: Category,
}

/// Group dated journal entries by month.
///
/// Groups are ordered by the earliest entry they contain; groups sharing an
/// earliest date keep their first-seen order.
pub fn categorize(pages: &[&Page]) -> ReorganizationSuggestion {
    let mut groups: Vec<MonthGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for page in pages {
        let text = page.effective_text();
        let Some(found) = find_long_date(text) else {
            trace!(page_id = %page.id, "no valid date on entry, page left out");
            continue;
        };
        let (Some(date), Some(label)) = (found.date, found.month_year()) else {
            continue;
        };
        let title = content_lines(text)
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| found.span.clone());

        let slot = *index.entry(label.clone()).or_insert_with(|| {
            groups.push(MonthGroup {
                earliest: date,
                category: Category::new(label, ChapterType::Section),
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.earliest = group.earliest.min(date);
        group.category.pages.push(page_ref(page, title));
    }

    // Stable sort keeps first-occurrence order for equal keys.
    groups.sort_by_key(|g| g.earliest);

    ReorganizationSuggestion {
        categories: groups.into_iter().map(|g| g.category).collect(),
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Positional sections for projects without a specialised strategy.

use folio_core::types::{ChapterSuggestion, ChapterType, Page};

/// Fixed confidence for position-only sections.
pub const GENERIC_CONFIDENCE: f32 = 0.5;

/// Split `pages` into runs of `ceil(N / target)` consecutive pages.
///
/// Start and end are 1-based positions in `pages`; the final section may be
/// shorter than the others.
pub fn sections(pages: &[&Page], target: usize) -> Vec<ChapterSuggestion> {
    if pages.is_empty() {
        return Vec::new();
    }
    let per_section = pages.len().div_ceil(target.max(1));

    pages
        .chunks(per_section)
        .enumerate()
        .map(|(i, chunk)| {
            let start = i * per_section + 1;
            let end = start + chunk.len() - 1;
            ChapterSuggestion {
                title: format!("Section {}", i + 1),
                start_page: start as u32,
                end_page: Some(end as u32),
                chapter_type: ChapterType::Section,
                confidence: GENERIC_CONFIDENCE,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: u32) -> Vec<Page> {
        (1..=n).map(|i| Page::new(format!("p{i}"), i)).collect()
    }

    fn ranges(suggestions: &[ChapterSuggestion]) -> Vec<(u32, Option<u32>)> {
        suggestions.iter().map(|s| (s.start_page, s.end_page)).collect()
    }

    #[test]
    fn seven_pages_make_three_sections() {
        let pages = numbered(7);
        let refs: Vec<&Page> = pages.iter().collect();
        let result = sections(&refs, 3);

        assert_eq!(ranges(&result), vec![(1, Some(3)), (4, Some(6)), (7, Some(7))]);
        let titles: Vec<&str> = result.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Section 1", "Section 2", "Section 3"]);
        assert!(result.iter().all(|s| s.confidence == GENERIC_CONFIDENCE));
        assert!(result.iter().all(|s| s.chapter_type == ChapterType::Section));
    }

    #[test]
    fn fewer_pages_than_target() {
        let pages = numbered(2);
        let refs: Vec<&Page> = pages.iter().collect();
        assert_eq!(ranges(&sections(&refs, 3)), vec![(1, Some(1)), (2, Some(2))]);
    }

    #[test]
    fn even_split() {
        let pages = numbered(9);
        let refs: Vec<&Page> = pages.iter().collect();
        assert_eq!(
            ranges(&sections(&refs, 3)),
            vec![(1, Some(3)), (4, Some(6)), (7, Some(9))]
        );
    }

    #[test]
    fn uneven_split_can_produce_fewer_sections() {
        // ceil(4/3) = 2 pages per section, so only two sections.
        let pages = numbered(4);
        let refs: Vec<&Page> = pages.iter().collect();
        assert_eq!(ranges(&sections(&refs, 3)), vec![(1, Some(2)), (3, Some(4))]);
    }

    #[test]
    fn no_pages_no_sections() {
        assert!(sections(&[], 3).is_empty());
    }
}

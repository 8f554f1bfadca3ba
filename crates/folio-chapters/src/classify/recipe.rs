// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recipe cards → cookbook sections.
//
// A page needs a title to be placed: the first of its leading lines that
// looks like a dish name rather than a section heading or metadata. The
// category comes from the first keyword group (in priority order) found
// anywhere on the page.

use folio_core::types::{Category, ChapterType, Page, ReorganizationSuggestion};
use tracing::trace;

use super::{content_lines, page_ref};

/// Cookbook sections, in the order they appear in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeCategory {
    Appetizers,
    SoupsAndStews,
    Salads,
    MainDishes,
    Desserts,
    Other,
}

impl RecipeCategory {
    /// Canonical output order; also the keyword matching priority.
    pub const ORDER: [RecipeCategory; 6] = [
        Self::Appetizers,
        Self::SoupsAndStews,
        Self::Salads,
        Self::MainDishes,
        Self::Desserts,
        Self::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Appetizers => "Appetizers",
            Self::SoupsAndStews => "Soups & Stews",
            Self::Salads => "Salads",
            Self::MainDishes => "Main Dishes",
            Self::Desserts => "Desserts",
            Self::Other => "Other Recipes",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Appetizers => &["appetizer", "dip", "snack", "starter"],
            Self::SoupsAndStews => &["soup", "stew", "chili", "broth"],
            Self::Salads => &["salad", "greens", "lettuce", "coleslaw"],
            Self::MainDishes => &[
                "chicken",
                "beef",
                "pork",
                "fish",
                "pasta",
                "casserole",
                "entree",
                "main dish",
                "dinner",
            ],
            Self::Desserts => &[
                "cake",
                "cookie",
                "pie",
                "dessert",
                "pudding",
                "brownie",
                "tart",
                "frosting",
                "icing",
                "chocolate chip",
            ],
            Self::Other => &[],
        }
    }

    /// Category for a page, by first keyword hit in priority order.
    pub fn for_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self::ORDER
            .into_iter()
            .find(|cat| cat.keywords().iter().any(|kw| lower.contains(kw)))
            .unwrap_or(Self::Other)
    }
}

const SECTION_HEADINGS: &[&str] = &["ingredients", "instructions", "directions"];
const METADATA_PREFIXES: &[&str] = &["servings:", "prep time:", "cook time:"];

/// Pick the recipe title from the first `scan_lines` content lines.
pub fn find_title(text: &str, scan_lines: usize) -> Option<&str> {
    content_lines(text).take(scan_lines).find(|line| is_title(line))
}

fn is_title(line: &str) -> bool {
    let len = line.chars().count();
    if len <= 3 || len >= 80 {
        return false;
    }
    let lower = line.to_lowercase();
    !SECTION_HEADINGS.contains(&lower.as_str())
        && !METADATA_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Group recipe pages into cookbook sections.
pub fn categorize(pages: &[&Page], scan_lines: usize) -> ReorganizationSuggestion {
    let mut buckets: Vec<Category> = RecipeCategory::ORDER
        .iter()
        .map(|cat| Category::new(cat.name(), ChapterType::Section))
        .collect();

    for page in pages {
        let text = page.effective_text();
        let Some(title) = find_title(text, scan_lines) else {
            trace!(page_id = %page.id, "no recipe title, page left out");
            continue;
        };
        let category = RecipeCategory::for_text(text);
        let slot = RecipeCategory::ORDER
            .iter()
            .position(|c| *c == category)
            .unwrap_or(RecipeCategory::ORDER.len() - 1);
        buckets[slot].pages.push(page_ref(page, title));
    }

    ReorganizationSuggestion {
        categories: buckets.into_iter().filter(|c| !c.pages.is_empty()).collect(),
    }
}

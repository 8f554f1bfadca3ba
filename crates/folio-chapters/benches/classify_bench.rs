// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for chapter inference in the folio-chapters crate.
// Covers the regex-heavy date strategies and the keyword-scanning recipe
// strategy on a synthetic 500-page project.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use folio_chapters::{ReorganizationPlanner, renumber};
use folio_core::types::{Classification, Page, ProjectType};

const PAGE_COUNT: u32 = 500;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Journal-style pages spread over several years, with a long body so the
/// date regex has to scan past ordinary prose on some pages.
fn journal_pages() -> Vec<Page> {
    (1..=PAGE_COUNT)
        .map(|i| {
            let month = MONTHS[(i as usize) % 12];
            let year = 1970 + i % 20;
            let body = "Went to the market and then walked home along the river. ".repeat(20);
            let text = if i % 2 == 0 {
                format!("Dear diary\n{body}\nSunday, {month} {}, {year}", i % 28 + 1)
            } else {
                format!("{month} {}, {year}\n{body}", i % 28 + 1)
            };
            Page::new(format!("page-{i}"), i).with_extracted_text(text)
        })
        .collect()
}

fn recipe_pages() -> Vec<Page> {
    const TITLES: [&str; 6] = [
        "Onion Dip",
        "Split Pea Soup",
        "Garden Salad",
        "Pot Roast Dinner",
        "Lemon Tart",
        "Pickled Beets",
    ];
    (1..=PAGE_COUNT)
        .map(|i| {
            let title = TITLES[(i as usize) % TITLES.len()];
            let text = format!(
                "{title}\nServings: 4\nIngredients\n2 cups flour\n1 tsp salt\nDirections\nMix and cook."
            );
            Page::new(format!("page-{i}"), i).with_extracted_text(text)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_journal_plan(c: &mut Criterion) {
    let pages = journal_pages();
    let planner = ReorganizationPlanner::default();
    c.bench_function("plan journal (500 pages)", |b| {
        b.iter(|| black_box(planner.plan(ProjectType::Journal, black_box(&pages))));
    });
}

fn bench_recipe_plan_and_renumber(c: &mut Criterion) {
    let pages = recipe_pages();
    let planner = ReorganizationPlanner::default();
    c.bench_function("plan + renumber recipes (500 pages)", |b| {
        b.iter(|| {
            if let Classification::Reorganization(suggestion) =
                planner.plan(ProjectType::Recipe, black_box(&pages))
            {
                black_box(renumber(&suggestion));
            }
        });
    });
}

criterion_group!(benches, bench_journal_plan, bench_recipe_plan_and_renumber);
criterion_main!(benches);

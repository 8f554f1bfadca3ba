// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Front and back matter of an exported book.

use chrono::{DateTime, Utc};
use folio_core::types::{Chapter, ProjectInfo};
use serde::Serialize;

/// Table-of-contents line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentsEntry {
    pub title: String,
    pub start_page: u32,
    pub end_page: Option<u32>,
}

/// Title page material.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: String,
    pub description: Option<String>,
    pub generated_at: DateTime<Utc>,
    /// Empty when the project has no chapters.
    pub contents: Vec<ContentsEntry>,
}

impl FrontMatter {
    pub fn new(project: &ProjectInfo, chapters: &[Chapter], generated_at: DateTime<Utc>) -> Self {
        Self {
            title: project.title.clone(),
            description: project
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            generated_at,
            contents: contents(chapters),
        }
    }
}

/// Closing material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackMatter {
    pub page_count: usize,
    pub total_words: usize,
    pub chapter_count: usize,
    pub colophon: String,
}

impl BackMatter {
    pub fn new(page_count: usize, total_words: usize, chapter_count: usize) -> Self {
        let pages = if page_count == 1 { "page" } else { "pages" };
        let words = if total_words == 1 { "word" } else { "words" };
        Self {
            page_count,
            total_words,
            chapter_count,
            colophon: format!("Assembled from {page_count} scanned {pages} ({total_words} {words})."),
        }
    }
}

fn contents(chapters: &[Chapter]) -> Vec<ContentsEntry> {
    let mut ordered: Vec<&Chapter> = chapters.iter().collect();
    ordered.sort_by_key(|c| c.order);
    ordered
        .into_iter()
        .map(|c| ContentsEntry {
            title: c.title.clone(),
            start_page: c.start_page_number,
            end_page: c.end_page_number,
        })
        .collect()
}

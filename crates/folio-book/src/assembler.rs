// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Book export payload assembly.
//
// Pure transform from a project's pages into the structure handed to the
// renderer. The only clock read is `generated_at`, and `assemble_at` takes
// it as an argument for reproducible output.

use chrono::{DateTime, Utc};
use folio_core::types::{Chapter, Page, ProjectId, ProjectInfo};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::matter::{BackMatter, FrontMatter};

/// Project identity as it appears in the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHeader {
    pub id: ProjectId,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub page_count: usize,
    /// Pages with non-empty final text.
    pub text_page_count: usize,
    pub total_words: usize,
    pub has_images: bool,
}

/// One page, normalized for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookExportPage {
    pub page_number: u32,
    pub photo_url: Option<String>,
    /// Trimmed; `None` when blank.
    pub edited_text: Option<String>,
    /// Trimmed; `None` when blank.
    pub extracted_text: Option<String>,
    pub final_text: String,
    pub word_count: usize,
    pub paragraphs: Vec<String>,
}

impl BookExportPage {
    fn from_page(page: &Page) -> Self {
        let edited_text = trimmed(page.edited_text.as_deref());
        let extracted_text = trimmed(page.extracted_text.as_deref());
        let final_text = edited_text
            .clone()
            .or_else(|| extracted_text.clone())
            .unwrap_or_default();

        Self {
            page_number: page.page_number,
            photo_url: page.photo_url.clone().filter(|u| !u.trim().is_empty()),
            word_count: final_text.split_whitespace().count(),
            paragraphs: paragraphs(&final_text),
            edited_text,
            extracted_text,
            final_text,
        }
    }

    fn has_text(&self) -> bool {
        !self.final_text.is_empty()
    }

    fn render(&self) -> String {
        if self.has_text() {
            format!("Page {}\n{}", self.page_number, self.final_text)
        } else {
            format!("Page {}", self.page_number)
        }
    }
}

/// Everything the renderer needs to lay out a book.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookExportPayload {
    pub project: ProjectHeader,
    pub summary: BookSummary,
    pub front_matter: FrontMatter,
    /// Ascending page number.
    pub pages: Vec<BookExportPage>,
    pub back_matter: BackMatter,
    pub combined_text: String,
}

/// Builds [`BookExportPayload`]s.
pub struct BookAssembler;

impl BookAssembler {
    /// Assemble using the current time for `generatedAt`.
    pub fn assemble(project: &ProjectInfo, pages: &[Page]) -> BookExportPayload {
        Self::assemble_at(project, pages, Utc::now())
    }

    pub fn assemble_at(
        project: &ProjectInfo,
        pages: &[Page],
        now: DateTime<Utc>,
    ) -> BookExportPayload {
        Self::build(project, pages, &[], now)
    }

    /// Assemble with a table of contents built from `chapters`.
    pub fn assemble_with_chapters(
        project: &ProjectInfo,
        pages: &[Page],
        chapters: &[Chapter],
        now: DateTime<Utc>,
    ) -> BookExportPayload {
        Self::build(project, pages, chapters, now)
    }

    #[instrument(skip_all, fields(project_id = %project.id, pages = pages.len(), chapters = chapters.len()))]
    fn build(
        project: &ProjectInfo,
        pages: &[Page],
        chapters: &[Chapter],
        now: DateTime<Utc>,
    ) -> BookExportPayload {
        let mut ordered: Vec<&Page> = pages.iter().collect();
        ordered.sort_by_key(|p| p.page_number);
        let pages: Vec<BookExportPage> =
            ordered.into_iter().map(BookExportPage::from_page).collect();

        let summary = BookSummary {
            page_count: pages.len(),
            text_page_count: pages.iter().filter(|p| p.has_text()).count(),
            total_words: pages.iter().map(|p| p.word_count).sum(),
            has_images: pages.iter().any(|p| p.photo_url.is_some()),
        };

        let combined_text = pages
            .iter()
            .map(BookExportPage::render)
            .collect::<Vec<_>>()
            .join("\n\n");

        let front_matter = FrontMatter::new(project, chapters, now);
        let back_matter = BackMatter::new(summary.page_count, summary.total_words, chapters.len());

        debug!(
            words = summary.total_words,
            text_pages = summary.text_page_count,
            "book payload assembled"
        );

        BookExportPayload {
            project: ProjectHeader {
                id: project.id.clone(),
                title: project.title.clone(),
                description: front_matter.description.clone(),
            },
            summary,
            front_matter,
            pages,
            back_matter,
            combined_text,
        }
    }
}

fn trimmed(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Split on blank lines (lines that are empty after trimming).
fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut current, &mut out);
        } else {
            current.push(line);
        }
    }
    flush(&mut current, &mut out);
    out
}

fn flush(current: &mut Vec<&str>, out: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let paragraph = current.join("\n").trim().to_string();
    if !paragraph.is_empty() {
        out.push(paragraph);
    }
    current.clear();
}

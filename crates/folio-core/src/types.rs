// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Folio: pages, categories, suggestions, and chapters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a scanned page, as assigned by the owning store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a book project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a materialized chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(pub Uuid);

impl ChapterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChapterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of document a project collects. Selects the categorization
/// strategy used when suggesting chapters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Recipe,
    Letter,
    Journal,
    #[default]
    Generic,
}

impl ProjectType {
    /// Parse a free-form project type tag.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Unknown or missing tags map to [`ProjectType::Generic`].
    pub fn parse(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("recipe") => Self::Recipe,
            Some("letter") => Self::Letter,
            Some("journal") => Self::Journal,
            _ => Self::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recipe => "recipe",
            Self::Letter => "letter",
            Self::Journal => "journal",
            Self::Generic => "generic",
        }
    }
}

/// Structural role of a chapter within the finished book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterType {
    Entry,
    Letter,
    Recipe,
    Chapter,
    Section,
}

impl ChapterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Letter => "letter",
            Self::Recipe => "recipe",
            Self::Chapter => "chapter",
            Self::Section => "section",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "entry" => Some(Self::Entry),
            "letter" => Some(Self::Letter),
            "recipe" => Some(Self::Recipe),
            "chapter" => Some(Self::Chapter),
            "section" => Some(Self::Section),
            _ => None,
        }
    }
}

/// A scanned page with its OCR output and any user edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    /// 1-based position within the project.
    pub page_number: u32,
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub edited_text: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Page {
    pub fn new(id: impl Into<String>, page_number: u32) -> Self {
        Self {
            id: PageId::new(id),
            page_number,
            extracted_text: None,
            edited_text: None,
            photo_url: None,
        }
    }

    pub fn with_extracted_text(mut self, text: impl Into<String>) -> Self {
        self.extracted_text = Some(text.into());
        self
    }

    pub fn with_edited_text(mut self, text: impl Into<String>) -> Self {
        self.edited_text = Some(text.into());
        self
    }

    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    /// Text used for all downstream processing: the user's edit when it has
    /// any content, else the OCR output, else the empty string.
    pub fn effective_text(&self) -> &str {
        non_blank(self.edited_text.as_deref())
            .or_else(|| non_blank(self.extracted_text.as_deref()))
            .unwrap_or("")
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Project metadata needed by the book exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_type: ProjectType,
}

/// Reference to a page inside a proposed category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    pub page_id: PageId,
    pub current_page_number: u32,
    pub title: String,
}

/// A proposed grouping of pages, prior to being committed as a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub chapter_type: ChapterType,
    pub pages: Vec<PageRef>,
}

impl Category {
    pub fn new(name: impl Into<String>, chapter_type: ChapterType) -> Self {
        Self {
            name: name.into(),
            chapter_type,
            pages: Vec::new(),
        }
    }
}

/// Ordered categories proposed for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorganizationSuggestion {
    pub categories: Vec<Category>,
}

impl ReorganizationSuggestion {
    /// Total number of page references across all categories.
    pub fn page_count(&self) -> usize {
        self.categories.iter().map(|c| c.pages.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Position-based chapter proposal used by the generic strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSuggestion {
    pub title: String,
    pub start_page: u32,
    pub end_page: Option<u32>,
    pub chapter_type: ChapterType,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
}

/// Outcome of classifying a project's pages.
///
/// Serialized untagged: callers discriminate on the presence of the
/// `categories` or `suggestions` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Classification {
    Reorganization(ReorganizationSuggestion),
    Sections { suggestions: Vec<ChapterSuggestion> },
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Reorganization(s) => s.is_empty(),
            Self::Sections { suggestions } => suggestions.is_empty(),
        }
    }

    pub fn as_reorganization(&self) -> Option<&ReorganizationSuggestion> {
        match self {
            Self::Reorganization(s) => Some(s),
            Self::Sections { .. } => None,
        }
    }
}

/// New position assigned to a page by the renumberer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAssignment {
    pub page_id: PageId,
    pub new_page_number: u32,
}

/// A materialized structural unit of the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub project_id: ProjectId,
    pub title: String,
    pub start_page_number: u32,
    pub end_page_number: Option<u32>,
    pub chapter_type: ChapterType,
    pub description: Option<String>,
    /// Zero-based position among the project's chapters.
    pub order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_type_parse_is_case_insensitive() {
        assert_eq!(ProjectType::parse(Some("Recipe")), ProjectType::Recipe);
        assert_eq!(ProjectType::parse(Some("  LETTER ")), ProjectType::Letter);
        assert_eq!(ProjectType::parse(Some("journal")), ProjectType::Journal);
    }

    #[test]
    fn unknown_project_type_is_generic() {
        assert_eq!(ProjectType::parse(Some("scrapbook")), ProjectType::Generic);
        assert_eq!(ProjectType::parse(Some("")), ProjectType::Generic);
        assert_eq!(ProjectType::parse(None), ProjectType::Generic);
    }

    #[test]
    fn effective_text_prefers_edits() {
        let page = Page::new("p1", 1)
            .with_extracted_text("ocr text")
            .with_edited_text("fixed text");
        assert_eq!(page.effective_text(), "fixed text");
    }

    #[test]
    fn effective_text_skips_blank_edits() {
        let page = Page::new("p1", 1)
            .with_extracted_text("ocr text")
            .with_edited_text("   \n");
        assert_eq!(page.effective_text(), "ocr text");

        let bare = Page::new("p2", 2);
        assert_eq!(bare.effective_text(), "");
    }

    #[test]
    fn classification_serializes_with_discriminating_key() {
        let reorg = Classification::Reorganization(ReorganizationSuggestion::default());
        let json = serde_json::to_value(&reorg).expect("serialize");
        assert!(json.get("categories").is_some());

        let sections = Classification::Sections {
            suggestions: vec![],
        };
        let json = serde_json::to_value(&sections).expect("serialize");
        assert!(json.get("suggestions").is_some());
    }

    #[test]
    fn classification_deserializes_by_shape() {
        let parsed: Classification =
            serde_json::from_str(r#"{"categories": []}"#).expect("parse");
        assert!(parsed.as_reorganization().is_some());

        let parsed: Classification =
            serde_json::from_str(r#"{"suggestions": []}"#).expect("parse");
        assert!(matches!(parsed, Classification::Sections { .. }));
    }

    #[test]
    fn chapter_type_round_trips_through_str() {
        for ty in [
            ChapterType::Entry,
            ChapterType::Letter,
            ChapterType::Recipe,
            ChapterType::Chapter,
            ChapterType::Section,
        ] {
            assert_eq!(ChapterType::from_str_opt(ty.as_str()), Some(ty));
        }
    }
}

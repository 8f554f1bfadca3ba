// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory sink shared by the unit tests in this crate.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use folio_core::error::{FolioError, Result};
use folio_core::types::{Chapter, PageAssignment, PageId, ProjectId};

use crate::persist::ReorganizationSink;

#[derive(Default)]
pub struct MemorySink {
    pub chapters: Mutex<Vec<Chapter>>,
    pub page_numbers: Mutex<HashMap<PageId, u32>>,
    /// Chapter titles whose insert should fail.
    pub reject: HashSet<String>,
}

impl MemorySink {
    pub fn rejecting(titles: &[&str]) -> Self {
        Self {
            reject: titles.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn stored_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self
            .chapters
            .lock()
            .expect("lock")
            .iter()
            .map(|c| c.title.clone())
            .collect();
        titles.sort();
        titles
    }
}

impl ReorganizationSink for MemorySink {
    fn replace_page_numbers(
        &self,
        _project_id: &ProjectId,
        assignments: &[PageAssignment],
    ) -> Result<usize> {
        let mut numbers = self.page_numbers.lock().expect("lock");
        for a in assignments {
            numbers.insert(a.page_id.clone(), a.new_page_number);
        }
        Ok(assignments.len())
    }

    fn delete_chapters(&self, project_id: &ProjectId) -> Result<usize> {
        let mut chapters = self.chapters.lock().expect("lock");
        let before = chapters.len();
        chapters.retain(|c| &c.project_id != project_id);
        Ok(before - chapters.len())
    }

    fn insert_chapter(&self, chapter: &Chapter) -> Result<()> {
        if self.reject.contains(&chapter.title) {
            return Err(FolioError::Storage(format!("rejected {}", chapter.title)));
        }
        self.chapters.lock().expect("lock").push(chapter.clone());
        Ok(())
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Folio.

use thiserror::Error;

/// Top-level error type for all Folio operations.
///
/// "No match" conditions during classification (a page without a date or a
/// title) are never errors; those pages are simply left out of the suggestion.
#[derive(Debug, Error)]
pub enum FolioError {
    // -- Reorganization input --
    #[error("suggestion references page {0}, which is not part of the project")]
    UnknownPage(String),

    #[error("page {0} appears more than once in the suggestion")]
    DuplicatePage(String),

    #[error("no page number assigned for a boundary page of category \"{category}\"")]
    MissingBoundary { category: String },

    #[error("chapter save incomplete: {succeeded} saved, {failed} failed")]
    PartialPersistence { succeeded: usize, failed: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // -- Storage / persistence --
    #[error("storage error: {0}")]
    Storage(String),

    #[error("project {0} not found")]
    ProjectNotFound(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_persistence_reports_counts() {
        let err = FolioError::PartialPersistence {
            succeeded: 3,
            failed: 1,
        };
        assert_eq!(err.to_string(), "chapter save incomplete: 3 saved, 1 failed");
    }

    #[test]
    fn missing_boundary_names_category() {
        let err = FolioError::MissingBoundary {
            category: "Desserts".into(),
        };
        assert!(err.to_string().contains("\"Desserts\""));
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for people assembling family books.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how the front end presents the message.

use crate::error::FolioError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Temporary trouble, trying again may work.
    Transient,
    /// The user must change something (pick other pages, fix a file).
    ActionRequired,
    /// Cannot be fixed by retrying.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether repeating the same operation could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `FolioError` into a `HumanError`.
pub fn humanize_error(err: &FolioError) -> HumanError {
    match err {
        // -- Reorganization --
        FolioError::UnknownPage(_) => HumanError {
            message: "The new page order mentions a page that isn't in this book.".into(),
            suggestion: "The page may have been deleted in the meantime. Ask for a fresh chapter suggestion and try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::DuplicatePage(_) => HumanError {
            message: "The same page was placed in two chapters.".into(),
            suggestion: "Each page can only belong to one chapter. Remove the extra copy and try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::MissingBoundary { category } => HumanError {
            message: format!("We couldn't work out where \"{category}\" starts or ends."),
            suggestion: "Check that the chapter still has pages in it, then apply the new order again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::PartialPersistence { succeeded, failed } => HumanError {
            message: format!("Only {succeeded} chapters were saved; {failed} could not be."),
            suggestion: "Your pages are in their new order. Try applying the chapters again to save the rest.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        FolioError::InvalidInput(detail) => HumanError {
            message: "Some of the information provided doesn't look right.".into(),
            suggestion: format!("Check the file and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Storage --
        FolioError::Storage(_) => HumanError {
            message: "The book's data storage had a problem.".into(),
            suggestion: "Try again in a moment. Your pages should still be there.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        FolioError::ProjectNotFound(id) => HumanError {
            message: "That book couldn't be found.".into(),
            suggestion: format!("Check the book name and try again. (Project: {id})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Folio doesn't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or copy the file somewhere else first.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        FolioError::Serialization(_) => HumanError {
            message: "The file isn't in the expected format.".into(),
            suggestion: "Make sure it is a JSON file produced by Folio, then try again.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

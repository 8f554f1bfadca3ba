// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-book — Book export assembly for Folio.
//
// Normalizes a project's pages into the payload consumed by the external
// HTML/PDF renderer: summary statistics, front and back matter, per-page
// records, and the combined text of the whole book.

pub mod assembler;
pub mod matter;

pub use assembler::{BookAssembler, BookExportPage, BookExportPayload, BookSummary, ProjectHeader};
pub use matter::{BackMatter, ContentsEntry, FrontMatter};

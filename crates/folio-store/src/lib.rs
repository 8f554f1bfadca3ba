// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-store — SQLite persistence for Folio projects.
//
// Stores projects, pages, and chapters, and implements the
// `ReorganizationSink` used when an approved reorganization is applied.

pub mod store;

pub use store::ProjectStore;

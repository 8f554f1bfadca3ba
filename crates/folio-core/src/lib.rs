// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-core — Page, suggestion, and chapter types plus the error,
// configuration, and user-facing message layers every Folio crate uses.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;

pub use config::{ClassifierConfig, FolioConfig};
pub use error::FolioError;
pub use types::*;

//! Core library for the mods-report command line application.
//!
//! The library turns an ATLauncher `instance.json` into an Excel report of the
//! installed mods. Responsibilities are kept narrow: input and output adapters
//! live under [`atlauncher::report::io`], the typed descriptor and row records
//! inside [`atlauncher::report::model`], the per-mod normalisation in
//! [`atlauncher::report::rows`], the worksheet planning in
//! [`atlauncher::report::layout`], and the end-to-end orchestration under
//! [`atlauncher::report::export`].

pub mod atlauncher;

pub use atlauncher::report::{ReportError, Result, error, export, io, layout, model, rows};

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Flashgrab Store
//!
//! Everything that touches disk for Flashgrab.
//!
//! This crate provides:
//!
//! - **Intermediate log**: numbered text staging file written page by page
//!   and parsed back into structured records
//! - **Sheet**: the spreadsheet emitter
//! - **ArtifactStore**: retention cap, expiry and deletion of spreadsheets
//! - **Settings**: user preferences with persistence
//! - **ExtractionService**: the one-call URL-to-spreadsheet entry point
//!
//! ## Usage
//!
//! ```ignore
//! use flashgrab_store::{ExtractionService, Settings};
//!
//! let settings = Settings::load_default().await?;
//! let service = ExtractionService::new(settings)?;
//!
//! let report = service.run_extraction("https://site.com/123-sample-page").await?;
//! println!("{} flashcards in {}", report.records, report.path.display());
//! ```

pub mod artifacts;
pub mod error;
pub mod expiry;
pub mod intermediate;
pub mod persistence;
pub mod service;
pub mod settings;
pub mod sheet;

pub use artifacts::{ARTIFACT_EXTENSION, ArtifactStore, DeleteOutcome};
pub use error::{ExtractionError, StoreError};
pub use expiry::{ExpiryHandle, schedule_expiry};
pub use intermediate::{LOG_BANNER, LogWriter, parse_log, read_log, split_options};
pub use persistence::{
    default_artifacts_dir, default_config_dir, default_settings_path, ensure_dir, load_json,
    load_json_or_default, save_json,
};
pub use service::{ExtractionReport, ExtractionService, SweepReport};
pub use settings::Settings;
pub use sheet::{rows_for, to_buffer, write_workbook};

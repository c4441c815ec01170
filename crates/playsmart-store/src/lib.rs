//! Flat-file persistence for pipeline runs.
//!
//! Each run leaves a raw JSON dump in the raw directory and a processed CSV in
//! the processed directory, both named after the run timestamp, plus a
//! `pipeline_summary.txt` that is rewritten every run. Readers pick the most
//! recent processed file; a missing directory or file is an empty state, not
//! an error.

pub mod error;
pub mod files;
pub mod naming;
pub mod report;

pub use error::StoreError;
pub use files::{load_latest, read_deals, save_processed, save_raw_batch};
pub use naming::{latest_processed_file, processed_file_name, raw_file_name, run_stamp};
pub use report::{render_summary_report, write_summary_report, SummaryContext, SUMMARY_FILE_NAME};

//! # scoby-store
//!
//! Persistence around the notebook core.
//!
//! The settings document maps each user to their teas and experiments and
//! is always read and written whole through a [`repo::SettingsRepository`].
//! [`service::NotebookService`] runs the load, migrate, edit, save cycle on
//! top of it, and [`writer::ExportWriter`] puts export rows and reports into
//! per-user files.

pub mod error;
pub mod json_file;
pub mod memory;
pub mod repo;
pub mod service;
pub mod writer;

mod test_support;

pub use error::{ExportError, StoreError};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use repo::SettingsRepository;
pub use service::{ExperimentListing, NewTea, NotebookService};
pub use writer::ExportWriter;

//! Canonical entity structs for the notebook.
//!
//! These describe the fully migrated shape. Every struct serializes with the
//! camelCase field names of the stored settings document so a canonical
//! experiment can be written straight back to the store. Legacy shapes never
//! reach these types; see [`crate::migrate`].

mod batch;
mod experiment;
mod settings;
mod tea;

pub use batch::{Batch, Samples};
pub use experiment::{
    DEFAULT_NUMBER_OF_SAMPLES, Experiment, MAX_NUMBER_OF_SAMPLES, ScobyWeight, TeaGroup,
};
pub use settings::UserSettings;
pub use tea::TeaSettings;

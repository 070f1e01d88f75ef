//! # scoby-core
//!
//! Domain model and pure logic of the Scoby lab notebook.
//!
//! Stored experiments are brought into one canonical shape by [`migrate`],
//! edited through [`samples`] and [`edit`], and flattened for output by
//! [`export`] and [`report`]. Nothing in this crate performs I/O; storage
//! lives in `scoby-store`.

pub mod aggregate;
pub mod edit;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod export;
pub mod migrate;
pub mod report;
pub mod samples;
pub mod timestamp;

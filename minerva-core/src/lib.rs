//! Minerva Inspector Core - Domain model shared by the handlers
//!
//! This crate provides:
//! - Attributes (typed observables) and their contexts
//! - Task results returned by inspectors
//! - Finished reports handed to emitters

pub mod attribute;
pub mod report;

pub use attribute::*;
pub use report::*;

/// Author name the handlers register under
pub const SOURCE_NAME: &str = "minerva";

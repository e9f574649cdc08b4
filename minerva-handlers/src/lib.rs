//! Minerva Inspector Handlers
//!
//! Callbacks registered with the alert pipeline host:
//! - **SearchInspector**: links IP, username and domain attributes to a
//!   Minerva log search and returns the Strix URL as a new attribute
//! - **ReportEmitter**: accepts finished reports
//!
//! Each call receives an [`Invocation`] carrying the invocation time and the
//! tracing span to log under.

pub mod inspector;
pub mod reporter;
pub mod search;
pub mod traits;

pub use inspector::*;
pub use reporter::*;
pub use search::*;
pub use traits::*;

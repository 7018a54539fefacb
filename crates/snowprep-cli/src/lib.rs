//! Library components of the `snowprep` binary.

pub mod logging;
pub mod pipeline;
pub mod report;
pub mod types;

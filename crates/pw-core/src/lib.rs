//! Shared types and the error taxonomy for the plotwave workspace.

pub mod error;
pub mod types;

pub use error::PlotError;
pub use types::ScratchSource;

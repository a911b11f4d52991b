// Utility functions
pub mod dates;
pub mod error;
pub mod json;

pub use error::*;

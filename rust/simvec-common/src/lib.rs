//! Core definitions (errors and result aliases), relied upon by all simvec-* crates.

pub mod error;
pub mod result;

pub use result::Result;

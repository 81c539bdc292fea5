//! Result export.

pub mod export;

//! Prelude module for historic_date crate.
//!
//! Re-exports the derive macros from derive_more used by the value types.

pub use derive_more::Display;

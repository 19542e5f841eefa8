//! Klon workspace - aggregate crate
//!
//! Virtual root package that re-exports the member crates for the
//! workspace-level end-to-end tests and for embedding the whole stack
//! with a single dependency.

pub use klon_api as api;
pub use klon_core as engine;
pub use klon_log as log;

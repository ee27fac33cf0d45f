//! Registry persistence module
//!
//! The registry is a single JSON document mirrored in memory and rewritten in
//! full on every mutation.

pub mod file_store;
pub mod registry;

pub use file_store::JsonFileStore;
pub use registry::UserRegistry;

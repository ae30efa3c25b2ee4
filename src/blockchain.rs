// Thin re-export module: implementation is in `blockchain/core.rs` to keep
// chain management and validation in separate files.

pub mod core;
pub use self::core::*;

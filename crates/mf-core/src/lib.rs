//! mf-core: stable foundation for modelforge.
//!
//! Contains:
//! - ids (stable compact IDs for model objects)
//! - error (shared error types)
//! - value (variable values: scalars and fixed-length vectors)
//! - path (parsed dotted variable paths)
//! - cost (injectable cost models + timing utilities)

pub mod cost;
pub mod error;
pub mod ids;
pub mod path;
pub mod value;

// Re-exports: nice ergonomics for downstream crates
pub use cost::{CostModel, NoCost, Recording, WallClock};
pub use error::{MfError, MfResult};
pub use ids::*;
pub use path::VarPath;
pub use value::Value;

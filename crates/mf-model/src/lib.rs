//! mf-model: hierarchical model layer for modelforge.
//!
//! Provides:
//! - Leaf components with declared parameters, outputs, and states
//! - Groups composing components and nested groups into a tree
//! - Connection declarations between dotted variable paths
//! - Problem setup (validation + freezing) and execution
//!
//! # Example
//!
//! ```
//! use mf_core::Value;
//! use mf_model::{Component, Group, Problem};
//!
//! let mut root = Group::new();
//! root.add("src", Component::source("x", Value::scalar(2.0)));
//! let mut sink = Component::inert();
//! sink.add_param("p0", Value::scalar(0.0));
//! root.add("sink", sink);
//! root.connect("src.x", "sink.p0");
//!
//! let mut system = Problem::new(root).setup().unwrap();
//! system.run().unwrap();
//! assert_eq!(system.value("sink.p0"), Some(&Value::scalar(2.0)));
//! ```

pub mod component;
pub mod error;
mod executor;
pub mod group;
pub mod problem;
pub mod system;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use component::{Component, Kernel, KernelIo, VarKind, Variable};
pub use error::ModelError;
pub use group::{Group, GroupKind, Node};
pub use problem::{ConstraintDecl, Driver, Problem};
pub use system::{RunSummary, System};

//! mf-synth: synthetic model construction for modelforge.
//!
//! Builds trees of fake components that stand in for expensive analyses:
//! leaf units with configurable parameter/output/state counts whose solves
//! charge a fixed simulated cost instead of computing anything real.
//! Intended for exercising the execution layer at controlled scales.
//!
//! Provides:
//! - `DynCompSpec`: leaf factory with `p<i>`/`o<i>`/`s<i>` variables
//! - `AbcdArrayComp`: array leaf computing `c = a*1.1`, `d = b*0.9`
//! - `add_dyn_chain`: a chain of identical leaves with adjacent connections
//! - `build_sequence`: generic sequence assembler over any child factory

pub mod array_comp;
pub mod chain;
pub mod dyn_comp;
pub mod sequence;

pub use array_comp::AbcdArrayComp;
pub use chain::add_dyn_chain;
pub use dyn_comp::DynCompSpec;
pub use sequence::{build_sequence, child_name};

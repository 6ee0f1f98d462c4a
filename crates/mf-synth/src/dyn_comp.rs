//! Dynamically-sized synthetic leaf components.

use std::sync::Arc;
use std::time::Duration;

use mf_core::{CostModel, MfResult, Value};
use mf_model::{Component, Kernel, KernelIo};

/// Kernel whose solves only charge simulated cost.
struct DynKernel {
    nl_delay: Duration,
    lin_delay: Duration,
    cost: Arc<dyn CostModel>,
}

impl Kernel for DynKernel {
    fn solve_nonlinear(&self, _io: &mut KernelIo<'_>) -> MfResult<()> {
        self.cost.charge(self.nl_delay);
        Ok(())
    }

    fn solve_linear(&self) -> MfResult<()> {
        self.cost.charge(self.lin_delay);
        Ok(())
    }
}

/// Specification for a synthetic leaf with counted variables.
///
/// Variables are named by position: params `p0..`, outputs `o0..`, states
/// `s0..`. Zero counts are legal and produce a component with no variables.
/// The solve delays model the cost of a real nonlinear/linear analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynCompSpec {
    pub nparams: usize,
    pub noutputs: usize,
    pub nstates: usize,
    pub nl_delay: Duration,
    pub lin_delay: Duration,
}

impl Default for DynCompSpec {
    fn default() -> Self {
        Self {
            nparams: 0,
            noutputs: 0,
            nstates: 0,
            nl_delay: Duration::from_millis(1),
            lin_delay: Duration::from_millis(1),
        }
    }
}

impl DynCompSpec {
    /// Spec with the given param/output counts, no states, default delays.
    pub fn new(nparams: usize, noutputs: usize) -> Self {
        Self {
            nparams,
            noutputs,
            ..Self::default()
        }
    }

    pub fn with_states(mut self, nstates: usize) -> Self {
        self.nstates = nstates;
        self
    }

    pub fn with_delays(mut self, nl_delay: Duration, lin_delay: Duration) -> Self {
        self.nl_delay = nl_delay;
        self.lin_delay = lin_delay;
        self
    }

    /// Build a component with scalar-zero variables.
    pub fn build(&self, cost: Arc<dyn CostModel>) -> Component {
        self.build_with(cost, Value::default)
    }

    /// Build a component, constructing each variable's value via `factory`.
    pub fn build_with(&self, cost: Arc<dyn CostModel>, factory: impl Fn() -> Value) -> Component {
        let mut comp = Component::new(DynKernel {
            nl_delay: self.nl_delay,
            lin_delay: self.lin_delay,
            cost,
        });
        for i in 0..self.nparams {
            comp.add_param(format!("p{}", i), factory());
        }
        for i in 0..self.noutputs {
            comp.add_output(format!("o{}", i), factory());
        }
        for i in 0..self.nstates {
            comp.add_state(format!("s{}", i), factory());
        }
        comp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::{NoCost, Recording};
    use mf_model::{Group, Problem};

    #[test]
    fn variables_follow_the_naming_scheme() {
        let comp = DynCompSpec::new(2, 3)
            .with_states(1)
            .build(Arc::new(NoCost));

        let names: Vec<_> = comp.vars().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["p0", "p1", "o0", "o1", "o2", "s0"]);
        assert_eq!(comp.nparams(), 2);
        assert_eq!(comp.noutputs(), 3);
        assert_eq!(comp.nstates(), 1);
    }

    #[test]
    fn zero_counts_build_an_empty_component() {
        let comp = DynCompSpec::new(0, 0).build(Arc::new(NoCost));
        assert!(comp.vars().is_empty());

        // An empty component still sets up and solves.
        let mut root = Group::new();
        root.add("C0", comp);
        let mut system = Problem::new(root).setup().unwrap();
        system.run().unwrap();
    }

    #[test]
    fn value_factory_controls_variable_shape() {
        let comp = DynCompSpec::new(1, 1).build_with(Arc::new(NoCost), || Value::zeros(7));
        assert!(comp.vars().iter().all(|v| v.value.len() == 7));
    }

    #[test]
    fn solves_charge_the_cost_model() {
        let rec = Arc::new(Recording::new());
        let cost: Arc<dyn CostModel> = rec.clone();
        let comp = DynCompSpec::new(1, 1)
            .with_delays(Duration::from_millis(4), Duration::from_millis(6))
            .build(cost);

        let mut root = Group::new();
        root.add("C0", comp);
        let mut system = Problem::new(root).setup().unwrap();

        system.run().unwrap();
        assert_eq!(rec.total(), Duration::from_millis(4));

        system.run_linear().unwrap();
        assert_eq!(rec.total(), Duration::from_millis(10));
        assert_eq!(rec.count(), 2);
    }
}

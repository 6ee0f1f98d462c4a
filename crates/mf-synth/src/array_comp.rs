//! Array-valued synthetic component with a fixed two-in/two-out interface.

use std::sync::Arc;
use std::time::Duration;

use mf_core::{CostModel, MfResult, Value};
use mf_model::{Component, Kernel, KernelIo};

struct AbcdKernel {
    nl_delay: Duration,
    lin_delay: Duration,
    cost: Arc<dyn CostModel>,
}

impl Kernel for AbcdKernel {
    fn solve_nonlinear(&self, io: &mut KernelIo<'_>) -> MfResult<()> {
        self.cost.charge(self.nl_delay);
        // params are [a, b], outputs are [c, d] by declaration order
        io.outputs[0] = io.params[0].scaled(1.1);
        io.outputs[1] = io.params[1].scaled(0.9);
        io.outputs[0].check_finite("c")?;
        io.outputs[1].check_finite("d")?;
        Ok(())
    }

    fn solve_linear(&self) -> MfResult<()> {
        self.cost.charge(self.lin_delay);
        Ok(())
    }
}

/// A chainable array component: params `a`, `b` and outputs `c`, `d`, all
/// vectors of the same size, with `c = a * 1.1` and `d = b * 0.9`.
///
/// Chains of these are the standard synthetic workload: connect `c -> a`
/// and `d -> b` between consecutive units and values flow end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbcdArrayComp {
    pub size: usize,
    pub nl_delay: Duration,
    pub lin_delay: Duration,
}

impl AbcdArrayComp {
    /// Component over vectors of `size`, with default 10ms delays.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            nl_delay: Duration::from_millis(10),
            lin_delay: Duration::from_millis(10),
        }
    }

    pub fn with_delays(mut self, nl_delay: Duration, lin_delay: Duration) -> Self {
        self.nl_delay = nl_delay;
        self.lin_delay = lin_delay;
        self
    }

    pub fn build(&self, cost: Arc<dyn CostModel>) -> Component {
        let mut comp = Component::new(AbcdKernel {
            nl_delay: self.nl_delay,
            lin_delay: self.lin_delay,
            cost,
        });
        comp.add_param("a", Value::zeros(self.size));
        comp.add_param("b", Value::zeros(self.size));
        comp.add_output("c", Value::zeros(self.size));
        comp.add_output("d", Value::zeros(self.size));
        comp
    }
}

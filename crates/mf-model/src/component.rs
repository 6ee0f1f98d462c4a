//! Leaf components: declared variables plus a solve kernel.

use std::fmt;
use std::sync::Arc;

use mf_core::{MfResult, Value};

/// Role of a variable within its component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// Input parameter, fed by a connection or left at its initial value.
    Param,
    /// Computed output, the only legal connection source.
    Output,
    /// Internal state carried across solves.
    State,
}

/// A named, typed variable with its current value.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub kind: VarKind,
    pub value: Value,
}

/// The variables a kernel sees during a nonlinear solve.
///
/// Slices are ordered by declaration: `params[i]` is the i-th declared
/// parameter, and likewise for outputs and states.
pub struct KernelIo<'a> {
    pub params: &'a [Value],
    pub outputs: &'a mut [Value],
    pub states: &'a mut [Value],
}

/// Computational behavior of a leaf component.
///
/// Kernels are deterministic functions of their inputs, suitable for
/// parallel evaluation across branches of the model tree.
pub trait Kernel: Send + Sync {
    /// Evaluate the component, writing outputs (and states) from params.
    fn solve_nonlinear(&self, io: &mut KernelIo<'_>) -> MfResult<()>;

    /// Apply the component's linear operator.
    ///
    /// Default is a no-op; synthetic kernels override this to charge their
    /// simulated linear-solve cost.
    fn solve_linear(&self) -> MfResult<()> {
        Ok(())
    }
}

/// Kernel that leaves all variables untouched. Backs source components,
/// whose outputs keep the values they were declared with.
struct InertKernel;

impl Kernel for InertKernel {
    fn solve_nonlinear(&self, _io: &mut KernelIo<'_>) -> MfResult<()> {
        Ok(())
    }
}

/// A leaf node: an ordered set of variables and a kernel.
///
/// Variables are recorded in declaration order without validation; name
/// uniqueness within the component is checked at setup.
#[derive(Clone)]
pub struct Component {
    kernel: Arc<dyn Kernel>,
    vars: Vec<Variable>,
}

impl Component {
    /// Create a component with the given kernel and no variables.
    pub fn new(kernel: impl Kernel + 'static) -> Self {
        Self {
            kernel: Arc::new(kernel),
            vars: Vec::new(),
        }
    }

    /// Create a component whose kernel does nothing.
    pub fn inert() -> Self {
        Self::new(InertKernel)
    }

    /// An independent-variable source: a single output holding `value`.
    pub fn source(name: impl Into<String>, value: Value) -> Self {
        let mut comp = Self::inert();
        comp.add_output(name, value);
        comp
    }

    /// Declare an input parameter.
    pub fn add_param(&mut self, name: impl Into<String>, value: Value) {
        self.vars.push(Variable {
            name: name.into(),
            kind: VarKind::Param,
            value,
        });
    }

    /// Declare an output.
    pub fn add_output(&mut self, name: impl Into<String>, value: Value) {
        self.vars.push(Variable {
            name: name.into(),
            kind: VarKind::Output,
            value,
        });
    }

    /// Declare an internal state variable.
    pub fn add_state(&mut self, name: impl Into<String>, value: Value) {
        self.vars.push(Variable {
            name: name.into(),
            kind: VarKind::State,
            value,
        });
    }

    /// All declared variables in declaration order.
    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    pub fn nparams(&self) -> usize {
        self.count(VarKind::Param)
    }

    pub fn noutputs(&self) -> usize {
        self.count(VarKind::Output)
    }

    pub fn nstates(&self) -> usize {
        self.count(VarKind::State)
    }

    fn count(&self, kind: VarKind) -> usize {
        self.vars.iter().filter(|v| v.kind == kind).count()
    }

    pub(crate) fn kernel(&self) -> Arc<dyn Kernel> {
        Arc::clone(&self.kernel)
    }

    pub(crate) fn into_parts(self) -> (Arc<dyn Kernel>, Vec<Variable>) {
        (self.kernel, self.vars)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("nparams", &self.nparams())
            .field("noutputs", &self.noutputs())
            .field("nstates", &self.nstates())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_counts() {
        let mut comp = Component::inert();
        comp.add_param("p0", Value::default());
        comp.add_param("p1", Value::default());
        comp.add_output("o0", Value::default());
        comp.add_state("s0", Value::default());

        assert_eq!(comp.nparams(), 2);
        assert_eq!(comp.noutputs(), 1);
        assert_eq!(comp.nstates(), 1);
        assert_eq!(comp.vars().len(), 4);
    }

    #[test]
    fn zero_variable_component_is_legal() {
        let comp = Component::inert();
        assert_eq!(comp.vars().len(), 0);
        assert_eq!(comp.nparams(), 0);
        assert_eq!(comp.noutputs(), 0);
        assert_eq!(comp.nstates(), 0);
    }

    #[test]
    fn source_declares_one_output() {
        let comp = Component::source("x", Value::ones(4));
        assert_eq!(comp.noutputs(), 1);
        assert_eq!(comp.vars()[0].name, "x");
        assert_eq!(comp.vars()[0].kind, VarKind::Output);
        assert_eq!(comp.vars()[0].value.len(), 4);
    }
}

//! Frozen, validated systems.
//!
//! `System::compile` walks a model tree once: it checks names, flattens
//! components and variables into contiguous tables, resolves every
//! connection and driver path, and builds the execution plan. After that
//! the structure is immutable; only variable values change during runs.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use mf_core::cost::Timer;
use mf_core::{ConnId, MfResult, UnitId, Value, VarId, VarPath};

use crate::component::{Component, Kernel, VarKind};
use crate::error::ModelError;
use crate::executor::{self, ExecPlan, PlanNode, PlanStep, SolveMode};
use crate::group::{Group, GroupKind, Node};
use crate::problem::{ConstraintDecl, Driver};
use crate::validate;

/// Runtime table entry for one leaf component.
pub(crate) struct UnitRt {
    pub path: String,
    pub kernel: Arc<dyn Kernel>,
    pub param_ids: Vec<VarId>,
    pub output_ids: Vec<VarId>,
    pub state_ids: Vec<VarId>,
}

/// A connection with both endpoints resolved to variable ids.
pub(crate) struct ResolvedConn {
    pub src: VarId,
    pub dst: VarId,
    pub src_path: String,
    pub dst_path: String,
}

/// Driver declarations, all paths validated against the frozen system.
#[derive(Debug, Default)]
pub struct ResolvedDriver {
    desvars: Vec<String>,
    objectives: Vec<String>,
    constraints: Vec<ConstraintDecl>,
}

impl ResolvedDriver {
    pub fn desvars(&self) -> impl Iterator<Item = &str> {
        self.desvars.iter().map(String::as_str)
    }

    pub fn objectives(&self) -> impl Iterator<Item = &str> {
        self.objectives.iter().map(String::as_str)
    }

    pub fn constraints(&self) -> impl Iterator<Item = &ConstraintDecl> {
        self.constraints.iter()
    }
}

/// Timing and counts for one execution pass.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub elapsed: Duration,
    pub components: usize,
    pub connections: usize,
}

/// A validated, executable model.
pub struct System {
    units: Vec<UnitRt>,
    kinds: Vec<VarKind>,
    values: Vec<Value>,
    conns: Vec<ResolvedConn>,
    plan: ExecPlan,
    lookup: HashMap<String, VarId>,
    driver: ResolvedDriver,
}

impl System {
    pub(crate) fn compile(root: Group, driver: Driver) -> MfResult<Self> {
        let mut cx = Compiler::default();
        let (plan, _) = cx.group(&VarPath::root(), root)?;
        let driver = cx.driver(driver)?;

        debug!(
            units = cx.units.len(),
            vars = cx.values.len(),
            conns = cx.conns.len(),
            "model setup complete"
        );

        Ok(System {
            units: cx.units,
            kinds: cx.kinds,
            values: cx.values,
            conns: cx.conns,
            plan,
            lookup: cx.lookup,
            driver,
        })
    }

    /// Execute one nonlinear pass: connections scatter values downstream
    /// and every component's kernel solves once.
    pub fn run(&mut self) -> MfResult<RunSummary> {
        self.solve(SolveMode::Nonlinear, "run")
    }

    /// Execute one linear pass (no value movement).
    pub fn run_linear(&mut self) -> MfResult<RunSummary> {
        self.solve(SolveMode::Linear, "run_linear")
    }

    fn solve(&mut self, mode: SolveMode, label: &'static str) -> MfResult<RunSummary> {
        let timer = Timer::start(label);
        let start = Instant::now();
        executor::execute(&self.plan, &self.units, &self.conns, &mut self.values, 0, mode)?;
        let elapsed = start.elapsed();
        timer.stop_and_print();

        debug!(label, elapsed_s = elapsed.as_secs_f64(), "pass complete");

        Ok(RunSummary {
            elapsed,
            components: self.units.len(),
            connections: self.conns.len(),
        })
    }

    /// Current value of a variable by full dotted path.
    pub fn value(&self, path: &str) -> Option<&Value> {
        self.lookup
            .get(path)
            .map(|&id| &self.values[id.index() as usize])
    }

    pub fn component_count(&self) -> usize {
        self.units.len()
    }

    pub fn variable_count(&self) -> usize {
        self.values.len()
    }

    pub fn connection_count(&self) -> usize {
        self.conns.len()
    }

    /// Full dotted paths of all components in execution order.
    pub fn component_paths(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|u| u.path.as_str())
    }

    /// Resolved connections as `(source, destination)` full paths.
    pub fn list_connections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.conns
            .iter()
            .map(|c| (c.src_path.as_str(), c.dst_path.as_str()))
    }

    pub fn driver(&self) -> &ResolvedDriver {
        &self.driver
    }
}

#[derive(Default)]
struct Compiler {
    units: Vec<UnitRt>,
    kinds: Vec<VarKind>,
    values: Vec<Value>,
    conns: Vec<ResolvedConn>,
    lookup: HashMap<String, VarId>,
}

impl Compiler {
    fn group(&mut self, path: &VarPath, group: Group) -> MfResult<(ExecPlan, Range<usize>)> {
        let label = if path.is_root() {
            "root".to_string()
        } else {
            path.to_string()
        };
        validate::check_child_names(&label, &group)?;

        let start = self.values.len();
        let kind = group.kind();
        let Group {
            children, conns, ..
        } = group;

        let mut steps: Vec<PlanStep> = Vec::with_capacity(children.len());
        let mut child_steps: HashMap<String, usize> = HashMap::with_capacity(children.len());

        for child in children {
            let cpath = path.child(&child.name);
            let step_idx = steps.len();
            let (node, range) = match child.node {
                Node::Leaf(comp) => {
                    let (unit, range) = self.component(&cpath, comp)?;
                    (PlanNode::Unit(unit), range)
                }
                Node::Composite(g) => {
                    let (plan, range) = self.group(&cpath, g)?;
                    (PlanNode::Nested(Box::new(plan)), range)
                }
            };
            steps.push(PlanStep {
                conns: Vec::new(),
                range,
                node,
            });
            child_steps.insert(child.name, step_idx);
        }

        for (src, dst) in conns {
            let (conn_idx, dst_head) = self.conn(path, &src, &dst)?;
            let step_idx = child_steps
                .get(&dst_head)
                .ok_or_else(|| ModelError::UnknownPath { path: dst.clone() })?;
            steps[*step_idx].conns.push(conn_idx);
        }

        let plan = match kind {
            GroupKind::Sequential => ExecPlan::Seq(steps),
            GroupKind::Parallel => ExecPlan::Par(steps),
        };
        Ok((plan, start..self.values.len()))
    }

    fn component(&mut self, path: &VarPath, comp: Component) -> MfResult<(UnitId, Range<usize>)> {
        validate::check_var_names(&path.to_string(), comp.vars())?;

        let start = self.values.len();
        let unit = UnitId::from_index(self.units.len() as u32);
        let (kernel, vars) = comp.into_parts();

        let mut param_ids = Vec::new();
        let mut output_ids = Vec::new();
        let mut state_ids = Vec::new();
        for var in vars {
            let id = VarId::from_index(self.values.len() as u32);
            self.lookup.insert(path.child(&var.name).to_string(), id);
            match var.kind {
                VarKind::Param => param_ids.push(id),
                VarKind::Output => output_ids.push(id),
                VarKind::State => state_ids.push(id),
            }
            self.kinds.push(var.kind);
            self.values.push(var.value);
        }

        self.units.push(UnitRt {
            path: path.to_string(),
            kernel,
            param_ids,
            output_ids,
            state_ids,
        });
        Ok((unit, start..self.values.len()))
    }

    /// Resolve one declared connection. Returns the table id and the
    /// first segment of the destination (the child it scatters into).
    fn conn(&mut self, base: &VarPath, src: &str, dst: &str) -> MfResult<(ConnId, String)> {
        let src_rel = VarPath::parse(src).map_err(|_| ModelError::BadPath {
            path: src.to_string(),
        })?;
        let dst_rel = VarPath::parse(dst).map_err(|_| ModelError::BadPath {
            path: dst.to_string(),
        })?;

        let src_full = base.join(&src_rel).to_string();
        let dst_full = base.join(&dst_rel).to_string();
        let src_id = self.resolve(&src_full)?;
        let dst_id = self.resolve(&dst_full)?;

        validate::check_conn_kinds(
            &src_full,
            self.kinds[src_id.index() as usize],
            &dst_full,
            self.kinds[dst_id.index() as usize],
        )?;
        validate::check_conn_lens(
            &src_full,
            &dst_full,
            self.values[src_id.index() as usize].len(),
            self.values[dst_id.index() as usize].len(),
        )?;

        let idx = ConnId::from_index(self.conns.len() as u32);
        self.conns.push(ResolvedConn {
            src: src_id,
            dst: dst_id,
            src_path: src_full,
            dst_path: dst_full,
        });

        // dst_rel parsed non-empty, so head exists
        let head = dst_rel.head().expect("non-empty path").to_string();
        Ok((idx, head))
    }

    fn resolve(&self, full: &str) -> MfResult<VarId> {
        self.lookup.get(full).copied().ok_or_else(|| {
            ModelError::UnknownPath {
                path: full.to_string(),
            }
            .into()
        })
    }

    fn driver(&self, driver: Driver) -> MfResult<ResolvedDriver> {
        let Driver {
            desvars,
            objectives,
            constraints,
        } = driver;

        for path in desvars.iter().chain(objectives.iter()) {
            self.check_driver_output(path)?;
        }
        for decl in &constraints {
            self.check_driver_output(&decl.path)?;
        }

        Ok(ResolvedDriver {
            desvars,
            objectives,
            constraints,
        })
    }

    fn check_driver_output(&self, path: &str) -> MfResult<()> {
        VarPath::parse(path).map_err(|_| ModelError::BadPath {
            path: path.to_string(),
        })?;
        let id = self.resolve(path)?;
        if self.kinds[id.index() as usize] != VarKind::Output {
            return Err(ModelError::DriverTargetNotOutput {
                path: path.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use mf_core::MfError;

    fn passthrough_pair() -> Group {
        let mut root = Group::new();
        root.add("src", Component::source("x", Value::scalar(3.0)));
        let mut sink = Component::inert();
        sink.add_param("p0", Value::scalar(0.0));
        root.add("sink", sink);
        root.connect("src.x", "sink.p0");
        root
    }

    #[test]
    fn compile_counts() {
        let system = Problem::new(passthrough_pair()).setup().unwrap();
        assert_eq!(system.component_count(), 2);
        assert_eq!(system.variable_count(), 2);
        assert_eq!(system.connection_count(), 1);
        let paths: Vec<_> = system.component_paths().collect();
        assert_eq!(paths, ["src", "sink"]);
    }

    #[test]
    fn run_moves_values_downstream() {
        let mut system = Problem::new(passthrough_pair()).setup().unwrap();
        assert_eq!(system.value("sink.p0"), Some(&Value::scalar(0.0)));
        system.run().unwrap();
        assert_eq!(system.value("sink.p0"), Some(&Value::scalar(3.0)));
    }

    #[test]
    fn duplicate_children_fail_setup() {
        let mut root = Group::new();
        root.add("C0", Component::inert());
        root.add("C0", Component::inert());
        let err = Problem::new(root).setup();
        assert!(matches!(err, Err(MfError::Invariant { .. })));
    }

    #[test]
    fn unknown_connection_endpoint_fails_setup() {
        let mut root = Group::new();
        root.add("src", Component::source("x", Value::scalar(1.0)));
        root.connect("src.x", "ghost.p0");
        assert!(Problem::new(root).setup().is_err());
    }

    #[test]
    fn backwards_connection_fails_setup() {
        let mut root = passthrough_pair();
        root.connect("sink.p0", "src.x");
        assert!(Problem::new(root).setup().is_err());
    }

    #[test]
    fn length_mismatch_fails_setup() {
        let mut root = Group::new();
        root.add("src", Component::source("x", Value::ones(4)));
        let mut sink = Component::inert();
        sink.add_param("p0", Value::zeros(3));
        root.add("sink", sink);
        root.connect("src.x", "sink.p0");
        assert!(Problem::new(root).setup().is_err());
    }

    #[test]
    fn driver_paths_validated() {
        let mut problem = Problem::new(passthrough_pair());
        problem.driver.add_objective("src.x");
        assert!(problem.setup().is_ok());

        let mut problem = Problem::new(passthrough_pair());
        problem.driver.add_objective("sink.p0");
        assert!(problem.setup().is_err());

        let mut problem = Problem::new(passthrough_pair());
        problem.driver.add_desvar("nowhere.x");
        assert!(problem.setup().is_err());
    }
}

//! Plan-driven execution over the frozen variable table.
//!
//! Variables are numbered depth-first in insertion order, so every subtree
//! owns a contiguous id range. Sequential groups run their children in
//! order over the shared slice; parallel groups split the slice at child
//! boundaries and hand each branch its own disjoint `&mut` view.

use std::ops::Range;

use mf_core::{ConnId, MfResult, UnitId, Value, VarId};

use crate::component::KernelIo;
use crate::system::{ResolvedConn, UnitRt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SolveMode {
    Nonlinear,
    Linear,
}

/// One child of a group in the execution plan.
pub(crate) struct PlanStep {
    /// Connections (ids into the system's table) applied before this
    /// child runs. Assigned by the group the connection was declared on.
    pub conns: Vec<ConnId>,
    /// Variable positions covered by this child's subtree.
    pub range: Range<usize>,
    pub node: PlanNode,
}

pub(crate) enum PlanNode {
    Unit(UnitId),
    Nested(Box<ExecPlan>),
}

pub(crate) enum ExecPlan {
    Seq(Vec<PlanStep>),
    Par(Vec<PlanStep>),
}

pub(crate) fn execute(
    plan: &ExecPlan,
    units: &[UnitRt],
    conns: &[ResolvedConn],
    values: &mut [Value],
    base: usize,
    mode: SolveMode,
) -> MfResult<()> {
    match plan {
        ExecPlan::Seq(steps) => {
            for step in steps {
                if mode == SolveMode::Nonlinear {
                    apply_conns(&step.conns, conns, values, base);
                }
                exec_step(step, units, conns, values, base, mode)?;
            }
            Ok(())
        }
        ExecPlan::Par(steps) => {
            // Parallel siblings exchange pre-iteration values: every
            // declared connection is applied before any branch starts.
            if mode == SolveMode::Nonlinear {
                for step in steps {
                    apply_conns(&step.conns, conns, values, base);
                }
            }

            let mut results: Vec<MfResult<()>> = steps.iter().map(|_| Ok(())).collect();
            rayon::scope(|s| {
                let mut rest = values;
                let mut cursor = base;
                for (step, slot) in steps.iter().zip(results.iter_mut()) {
                    let gap = step.range.start - cursor;
                    let len = step.range.end - step.range.start;
                    let tail = std::mem::take(&mut rest);
                    let (_, tail) = tail.split_at_mut(gap);
                    let (branch, tail) = tail.split_at_mut(len);
                    rest = tail;
                    cursor = step.range.end;
                    s.spawn(move |_| {
                        *slot = exec_step(step, units, conns, branch, step.range.start, mode);
                    });
                }
            });
            results.into_iter().collect()
        }
    }
}

fn exec_step(
    step: &PlanStep,
    units: &[UnitRt],
    conns: &[ResolvedConn],
    values: &mut [Value],
    base: usize,
    mode: SolveMode,
) -> MfResult<()> {
    match &step.node {
        PlanNode::Unit(u) => exec_unit(&units[u.index() as usize], values, base, mode),
        PlanNode::Nested(plan) => execute(plan, units, conns, values, base, mode),
    }
}

fn exec_unit(unit: &UnitRt, values: &mut [Value], base: usize, mode: SolveMode) -> MfResult<()> {
    match mode {
        SolveMode::Linear => unit.kernel.solve_linear(),
        SolveMode::Nonlinear => {
            // Gather/scatter keeps the kernel's view of its variables
            // separate from the shared table, so borrows stay simple.
            let params: Vec<Value> = gather(&unit.param_ids, values, base);
            let mut outputs: Vec<Value> = gather(&unit.output_ids, values, base);
            let mut states: Vec<Value> = gather(&unit.state_ids, values, base);

            let mut io = KernelIo {
                params: &params,
                outputs: &mut outputs,
                states: &mut states,
            };
            unit.kernel.solve_nonlinear(&mut io)?;

            scatter(outputs, &unit.output_ids, values, base);
            scatter(states, &unit.state_ids, values, base);
            Ok(())
        }
    }
}

fn at(id: VarId, base: usize) -> usize {
    id.index() as usize - base
}

fn gather(ids: &[VarId], values: &[Value], base: usize) -> Vec<Value> {
    ids.iter().map(|&i| values[at(i, base)].clone()).collect()
}

fn scatter(vals: Vec<Value>, ids: &[VarId], values: &mut [Value], base: usize) {
    for (v, &i) in vals.into_iter().zip(ids.iter()) {
        values[at(i, base)] = v;
    }
}

fn apply_conns(ids: &[ConnId], conns: &[ResolvedConn], values: &mut [Value], base: usize) {
    for &i in ids {
        let conn = &conns[i.index() as usize];
        let v = values[at(conn.src, base)].clone();
        values[at(conn.dst, base)] = v;
    }
}

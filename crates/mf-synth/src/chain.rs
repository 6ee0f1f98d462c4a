//! Chains of identical synthetic leaves.

use std::sync::Arc;

use mf_core::{CostModel, VarPath};
use mf_model::Group;

use crate::dyn_comp::DynCompSpec;

/// Add `ncomps` identical leaves to `parent` and wire them into a chain.
///
/// Children are named `C0..C<ncomps-1>`; each gets `nvars/2` params and
/// `nvars/2` outputs. For every child after the first, `nconns` adjacent
/// connections are declared: `C<i-1>.o<j> -> C<i>.p<j>` for `j < nconns`.
/// The first child has no predecessor and gets none.
pub fn add_dyn_chain(
    parent: &mut Group,
    ncomps: usize,
    nvars: usize,
    nconns: usize,
    cost: &Arc<dyn CostModel>,
) {
    let spec = DynCompSpec::new(nvars / 2, nvars / 2);
    for i in 0..ncomps {
        let name = format!("C{}", i);
        parent.add(&name, spec.build(Arc::clone(cost)));

        if i > 0 {
            let prev = VarPath::single(format!("C{}", i - 1));
            let this = VarPath::single(&name);
            for j in 0..nconns {
                parent.connect(
                    prev.child(format!("o{}", j)).to_string(),
                    this.child(format!("p{}", j)).to_string(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::NoCost;

    fn cost() -> Arc<dyn CostModel> {
        Arc::new(NoCost)
    }

    #[test]
    fn chain_of_n_has_n_children() {
        for n in [0, 1, 2, 7] {
            let mut parent = Group::new();
            add_dyn_chain(&mut parent, n, 4, 2, &cost());
            assert_eq!(parent.len(), n);

            let names: Vec<_> = parent.children().map(|(name, _)| name.to_string()).collect();
            let expected: Vec<_> = (0..n).map(|i| format!("C{}", i)).collect();
            assert_eq!(names, expected);
        }
    }

    #[test]
    fn empty_chain_declares_nothing() {
        let mut parent = Group::new();
        add_dyn_chain(&mut parent, 0, 4, 2, &cost());
        assert!(parent.is_empty());
        assert!(parent.connections().is_empty());
    }

    #[test]
    fn adjacent_connections_only() {
        let mut parent = Group::new();
        add_dyn_chain(&mut parent, 4, 6, 3, &cost());

        // (n-1) * nconns connections
        assert_eq!(parent.connections().len(), 9);
        for (i, chunk) in parent.connections().chunks(3).enumerate() {
            for (j, (src, dst)) in chunk.iter().enumerate() {
                assert_eq!(src, &format!("C{}.o{}", i, j));
                assert_eq!(dst, &format!("C{}.p{}", i + 1, j));
            }
        }
    }

    #[test]
    fn single_component_chain_has_no_connections() {
        let mut parent = Group::new();
        add_dyn_chain(&mut parent, 1, 4, 2, &cost());
        assert_eq!(parent.len(), 1);
        assert!(parent.connections().is_empty());
    }
}

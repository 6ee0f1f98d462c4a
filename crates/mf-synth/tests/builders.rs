//! Integration tests for the synthetic model builders.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use mf_core::{CostModel, NoCost, Recording, Value};
use mf_model::{Component, Group, Node, Problem};
use mf_synth::{AbcdArrayComp, DynCompSpec, add_dyn_chain, build_sequence};

fn no_cost() -> Arc<dyn CostModel> {
    Arc::new(NoCost)
}

/// A leaf with one param `in` and one output `out`.
fn io_leaf() -> Node {
    let mut comp = Component::inert();
    comp.add_param("in", Value::default());
    comp.add_output("out", Value::default());
    comp.into()
}

#[test]
fn sequence_end_to_end() {
    // Three children, one pair: exactly the documented usage.
    let (parent, created) = build_sequence(io_leaf, 3, &[("out", "in")], None).unwrap();
    assert!(created);

    let system = Problem::new(parent).setup().unwrap();
    assert_eq!(system.component_count(), 3);
    let conns: Vec<_> = system.list_connections().collect();
    assert_eq!(conns, [("C0.out", "C1.in"), ("C1.out", "C2.in")]);
}

#[test]
fn chain_sets_up_and_runs() {
    let mut parent = Group::new();
    add_dyn_chain(&mut parent, 5, 4, 2, &no_cost());

    let mut system = Problem::new(parent).setup().unwrap();
    let summary = system.run().unwrap();
    assert_eq!(summary.components, 5);
    assert_eq!(summary.connections, 8); // (5-1) * 2
}

#[test]
fn chain_charges_cost_per_component() {
    let rec = Arc::new(Recording::new());
    let cost: Arc<dyn CostModel> = rec.clone();

    let mut parent = Group::new();
    let spec = DynCompSpec::new(2, 2).with_delays(
        Duration::from_millis(3),
        Duration::from_millis(5),
    );
    for i in 0..6 {
        parent.add(format!("C{}", i), spec.build(Arc::clone(&cost)));
    }

    let mut system = Problem::new(parent).setup().unwrap();
    system.run().unwrap();
    assert_eq!(rec.count(), 6);
    assert_eq!(rec.total(), Duration::from_millis(18));

    system.run_linear().unwrap();
    assert_eq!(rec.count(), 12);
    assert_eq!(rec.total(), Duration::from_millis(48));
}

#[test]
fn abcd_chain_propagates_scaled_values() {
    let (parent, _) = build_sequence(
        || AbcdArrayComp::new(3).with_delays(Duration::ZERO, Duration::ZERO).build(no_cost()).into(),
        3,
        &[("c", "a"), ("d", "b")],
        None,
    )
    .unwrap();

    let mut root = Group::new();
    root.add("P", Component::source("x", Value::ones(3)));
    root.add("chain", parent);
    root.connect("P.x", "chain.C0.a");
    root.connect("P.x", "chain.C0.b");

    let mut system = Problem::new(root).setup().unwrap();
    system.run().unwrap();

    // c compounds 1.1 per stage off the shared source, d compounds 0.9.
    let c = system.value("chain.C2.c").unwrap();
    let d = system.value("chain.C2.d").unwrap();
    let expect_c = 1.0f64 * 1.1 * 1.1 * 1.1;
    let expect_d = 1.0f64 * 0.9 * 0.9 * 0.9;
    assert!((c.first().unwrap() - expect_c).abs() < 1e-12);
    assert!((d.first().unwrap() - expect_d).abs() < 1e-12);
}

proptest! {
    #[test]
    fn sequence_child_and_connection_counts(n in 0usize..12, npairs in 0usize..4) {
        let pairs: Vec<(String, String)> = (0..npairs)
            .map(|j| (format!("o{}", j), format!("p{}", j)))
            .collect();
        let pair_refs: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(u, v)| (u.as_str(), v.as_str()))
            .collect();

        let spec = DynCompSpec::new(npairs, npairs);
        let (parent, created) = build_sequence(
            || spec.build(Arc::new(NoCost)).into(),
            n,
            &pair_refs,
            None,
        )
        .unwrap();

        prop_assert!(created);
        prop_assert_eq!(parent.len(), n);
        let expected_conns = n.saturating_sub(1) * npairs;
        prop_assert_eq!(parent.connections().len(), expected_conns);

        // Every connection links child i-1 to child i; no skips.
        for (k, (src, dst)) in parent.connections().iter().enumerate() {
            let i = k / npairs.max(1) + 1;
            let src_child = src.split('.').next().unwrap();
            let dst_child = dst.split('.').next().unwrap();
            let expected_src = format!("C{}", i - 1);
            let expected_dst = format!("C{}", i);
            prop_assert_eq!(src_child, expected_src.as_str());
            prop_assert_eq!(dst_child, expected_dst.as_str());
        }
    }

    #[test]
    fn chain_counts_match_for_all_sizes(n in 0usize..10, nconns in 0usize..3) {
        let mut parent = Group::new();
        add_dyn_chain(&mut parent, n, 2 * nconns, nconns, &(Arc::new(NoCost) as Arc<dyn CostModel>));

        prop_assert_eq!(parent.len(), n);
        prop_assert_eq!(
            parent.connections().len(),
            n.saturating_sub(1) * nconns
        );

        // Built chains always pass setup.
        prop_assert!(Problem::new(parent).setup().is_ok());
    }
}

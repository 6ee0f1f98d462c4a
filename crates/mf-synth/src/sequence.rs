//! Generic sequence assembler over an arbitrary child factory.

use mf_core::{MfResult, VarPath};
use mf_model::{Group, Node};

/// Positional child name, dispatched on the leaf/composite tag.
pub fn child_name(node: &Node, i: usize) -> String {
    match node {
        Node::Composite(_) => format!("G{}", i),
        Node::Leaf(_) => format!("C{}", i),
    }
}

/// Create `num_children` children via `factory`, add them to `parent` under
/// positional names, and wire `conns` pairs between consecutive children.
///
/// Each `(u, v)` in `conns` declares `prev.u -> this.v` for every adjacent
/// pair; connections never skip a position. When `parent` is `None` a
/// default sequential group is created. Returns the populated parent and
/// whether it was created by this call.
///
/// Malformed connection names fail before any child is created; a panicking
/// factory propagates, leaving no partial result behind.
pub fn build_sequence<F>(
    mut factory: F,
    num_children: usize,
    conns: &[(&str, &str)],
    parent: Option<Group>,
) -> MfResult<(Group, bool)>
where
    F: FnMut() -> Node,
{
    let parsed: Vec<(VarPath, VarPath)> = conns
        .iter()
        .map(|&(u, v)| Ok((VarPath::parse(u)?, VarPath::parse(v)?)))
        .collect::<MfResult<_>>()?;

    let created = parent.is_none();
    let mut parent = parent.unwrap_or_default();

    let mut prev_name: Option<String> = None;
    for i in 0..num_children {
        let child = factory();
        let cname = child_name(&child, i);
        parent.add(&cname, child);

        if let Some(prev) = &prev_name {
            let prev_path = VarPath::single(prev);
            let this_path = VarPath::single(&cname);
            for (u, v) in &parsed {
                parent.connect(
                    prev_path.join(u).to_string(),
                    this_path.join(v).to_string(),
                );
            }
        }
        prev_name = Some(cname);
    }

    Ok((parent, created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_model::Component;
    use mf_core::Value;

    fn leaf() -> Node {
        let mut comp = Component::inert();
        comp.add_param("in", Value::default());
        comp.add_output("out", Value::default());
        comp.into()
    }

    #[test]
    fn names_dispatch_on_tag() {
        assert_eq!(child_name(&leaf(), 3), "C3");
        assert_eq!(child_name(&Group::new().into(), 3), "G3");
    }

    #[test]
    fn three_children_two_connections() {
        let (parent, created) =
            build_sequence(leaf, 3, &[("out", "in")], None).unwrap();

        assert!(created);
        assert_eq!(parent.len(), 3);
        let names: Vec<_> = parent.children().map(|(n, _)| n).collect();
        assert_eq!(names, ["C0", "C1", "C2"]);
        assert_eq!(
            parent.connections(),
            [
                ("C0.out".to_string(), "C1.in".to_string()),
                ("C1.out".to_string(), "C2.in".to_string()),
            ]
        );
    }

    #[test]
    fn zero_children_yields_empty_parent() {
        let (parent, created) = build_sequence(leaf, 0, &[("out", "in")], None).unwrap();
        assert!(created);
        assert!(parent.is_empty());
        assert!(parent.connections().is_empty());
    }

    #[test]
    fn caller_supplied_parent_is_flagged() {
        let (parent, created) =
            build_sequence(leaf, 2, &[("out", "in")], Some(Group::parallel())).unwrap();
        assert!(!created);
        assert_eq!(parent.kind(), mf_model::GroupKind::Parallel);
        assert_eq!(parent.len(), 2);
    }

    #[test]
    fn composite_children_get_composite_names() {
        let (parent, _) = build_sequence(|| Group::new().into(), 3, &[], None).unwrap();
        let names: Vec<_> = parent.children().map(|(n, _)| n).collect();
        assert_eq!(names, ["G0", "G1", "G2"]);
    }

    #[test]
    fn mixed_tags_never_collide() {
        let mut i = 0;
        let (parent, _) = build_sequence(
            move || {
                i += 1;
                if i % 2 == 0 {
                    Group::new().into()
                } else {
                    leaf()
                }
            },
            6,
            &[],
            None,
        )
        .unwrap();

        let mut names: Vec<_> = parent.children().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, ["C0", "G1", "C2", "G3", "C4", "G5"]);
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn bad_connection_names_fail_before_building() {
        let mut calls = 0;
        let result = build_sequence(
            || {
                calls += 1;
                leaf()
            },
            3,
            &[("out", "")],
            None,
        );
        assert!(result.is_err());
        assert_eq!(calls, 0);
    }
}

//! Groups: named composites forming the model tree.

use crate::component::Component;

/// Execution discipline for a group's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Children run one after another in insertion order.
    Sequential,
    /// Children run concurrently; values exchanged between siblings are
    /// whatever they held when the group started.
    Parallel,
}

/// A child of the tree: either a leaf component or a nested group.
#[derive(Debug)]
pub enum Node {
    Leaf(Component),
    Composite(Group),
}

impl Node {
    pub fn is_composite(&self) -> bool {
        matches!(self, Node::Composite(_))
    }

    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Node::Leaf(c) => Some(c),
            Node::Composite(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Composite(g) => Some(g),
            Node::Leaf(_) => None,
        }
    }
}

impl From<Component> for Node {
    fn from(c: Component) -> Self {
        Node::Leaf(c)
    }
}

impl From<Group> for Node {
    fn from(g: Group) -> Self {
        Node::Composite(g)
    }
}

#[derive(Debug)]
pub(crate) struct Child {
    pub name: String,
    pub node: Node,
}

/// A named composite owning an ordered list of children and the
/// connections declared between them.
///
/// `add` and `connect` record without checking: duplicate child names and
/// malformed or unresolvable connection endpoints surface at setup, not
/// here. Ownership is strictly tree-shaped because `add` moves the child
/// into the group.
#[derive(Debug, Default)]
pub struct Group {
    kind: GroupKind,
    pub(crate) children: Vec<Child>,
    pub(crate) conns: Vec<(String, String)>,
}

impl Default for GroupKind {
    fn default() -> Self {
        GroupKind::Sequential
    }
}

impl Group {
    /// A sequential group.
    pub fn new() -> Self {
        Self::default()
    }

    /// A parallel group.
    pub fn parallel() -> Self {
        Self {
            kind: GroupKind::Parallel,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Append a child under `name`, taking ownership of it.
    pub fn add(&mut self, name: impl Into<String>, child: impl Into<Node>) {
        self.children.push(Child {
            name: name.into(),
            node: child.into(),
        });
    }

    /// Declare a connection from an output path to a param path, both
    /// relative to this group. Endpoints are resolved at setup.
    pub fn connect(&mut self, src: impl Into<String>, dst: impl Into<String>) {
        self.conns.push((src.into(), dst.into()));
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Direct children as `(name, node)` pairs, in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|c| (c.name.as_str(), &c.node))
    }

    /// Look up a direct child by name (first match on duplicates).
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.node)
    }

    /// Connections declared on this group, in declaration order.
    pub fn connections(&self) -> &[(String, String)] {
        &self.conns
    }
}

use std::fmt::{self, Display};

/// Handle to a node stored in a [`Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Branch,
    Leaf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node<L> {
    pub label: L,
    pub kind: NodeKind,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// An append-only arena tree.
///
/// Trees can be grown top-down through the branch cursor ([`Tree::add_branch`],
/// [`Tree::add_leaf`], [`Tree::end_children`]) or bottom-up with
/// [`Tree::add_node`], which adopts already-built children.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree<L> {
    nodes: Vec<Node<L>>,
    root: Option<NodeId>,
    current: Option<NodeId>,
}

impl<L> Default for Tree<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> Tree<L> {
    pub fn new() -> Self {
        Self {
            nodes: vec![],
            root: None,
            current: None,
        }
    }

    fn push(&mut self, label: L, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            label,
            kind,
            children: vec![],
            parent,
        });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None if self.root.is_none() => self.root = Some(id),
            None => (),
        }
        id
    }

    /// Appends a branch under the current branch and makes it current.
    pub fn add_branch(&mut self, label: L) -> NodeId {
        let id = self.push(label, NodeKind::Branch, self.current);
        self.current = Some(id);
        id
    }

    /// Appends a leaf under the current branch.
    pub fn add_leaf(&mut self, label: L) -> NodeId {
        self.push(label, NodeKind::Leaf, self.current)
    }

    /// Moves the cursor back up to the parent of the current branch.
    pub fn end_children(&mut self) {
        self.current = self.current.and_then(|id| self.nodes[id.0].parent);
    }

    /// Appends a node owning `children`, which must not have a parent yet.
    /// The most recently added parentless node becomes the root.
    pub fn add_node(&mut self, label: L, kind: NodeKind, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        for child in &children {
            debug_assert!(self.nodes[child.0].parent.is_none());
            self.nodes[child.0].parent = Some(id);
        }
        self.nodes.push(Node {
            label,
            kind,
            children,
            parent: None,
        });
        self.root = Some(id);
        id
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node<L> {
        &self.nodes[id.0]
    }

    pub fn label(&self, id: NodeId) -> &L {
        &self.nodes[id.0].label
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<L: Display> Tree<L> {
    /// Renders the tree one node per line, indented with one `-` per depth.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut stack = self.root.map(|root| (root, 0)).into_iter().collect::<Vec<_>>();
        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            out.push_str(&"-".repeat(depth));
            match node.kind {
                NodeKind::Branch => out.push_str(&format!("<{}>\n", node.label)),
                NodeKind::Leaf => out.push_str(&format!("[{}]\n", node.label)),
            }
            stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }
        out
    }
}

impl<L: Display> Display for Tree<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

use std::borrow::Borrow;
use std::hash::Hash;

use crate::graph::{Graph, LabelId, NodeId};

/// Slot value for graph vertices that have no tree node.
const UNREACHED: u32 = u32::MAX;

/// One vertex of a BFS tree.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode {
    pub(crate) node_id: NodeId,
    /// Index of the parent tree node. None only for the root.
    pub(crate) parent: Option<usize>,
    /// Label of the graph edge `parent → self` chosen at discovery.
    pub(crate) label: Option<LabelId>,
    pub(crate) depth: u32,
    pub(crate) children: Vec<usize>,
}

/// Minimum-path tree produced by [`crate::build_tree`].
///
/// Arena of nodes in discovery order (root at index 0, depths
/// non-decreasing), each with an explicit parent index and child list.
/// `slots` maps every graph `NodeId` to its tree index for O(1)
/// membership tests. The tree borrows the graph it was built from and
/// resolves vertices and labels through it.
///
/// There is no way to mutate a tree after construction, so the
/// single-root / single-parent shape always holds.
#[derive(Debug, Clone)]
pub struct BfsTree<'g, V, E> {
    graph: &'g Graph<V, E>,
    nodes: Vec<TreeNode>,
    slots: Vec<u32>,
}

impl<'g, V, E> BfsTree<'g, V, E>
where
    V: Eq + Hash + Clone,
    E: Eq + Hash + Clone,
{
    pub(crate) fn with_root(graph: &'g Graph<V, E>, root: NodeId) -> Self {
        let mut slots = vec![UNREACHED; graph.node_count()];
        slots[root as usize] = 0;
        Self {
            graph,
            nodes: vec![TreeNode {
                node_id: root,
                parent: None,
                label: None,
                depth: 0,
                children: Vec::new(),
            }],
            slots,
        }
    }

    /// Add `child` below the tree node at index `parent`, returning the new index.
    pub(crate) fn attach(&mut self, parent: usize, child: NodeId, label: LabelId) -> usize {
        debug_assert!(!self.is_reached(child), "vertex {} attached twice", child);
        let index = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(TreeNode {
            node_id: child,
            parent: Some(parent),
            label: Some(label),
            depth,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(index);
        self.slots[child as usize] = index as u32;
        index
    }

    pub(crate) fn is_reached(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    pub(crate) fn slot(&self, id: NodeId) -> Option<usize> {
        match self.slots.get(id as usize) {
            Some(&s) if s != UNREACHED => Some(s as usize),
            _ => None,
        }
    }

    pub(crate) fn index_of<Q>(&self, vertex: &Q) -> Option<usize>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slot(self.graph.node_id(vertex)?)
    }

    pub(crate) fn node(&self, index: usize) -> &TreeNode {
        &self.nodes[index]
    }

    pub(crate) fn vertex_of(&self, index: usize) -> &'g V {
        self.graph.vertex_at(self.nodes[index].node_id)
    }

    /// The graph this tree was built from.
    pub fn graph(&self) -> &'g Graph<V, E> {
        self.graph
    }

    pub fn root(&self) -> &'g V {
        self.vertex_of(0)
    }

    pub fn root_id(&self) -> NodeId {
        self.nodes[0].node_id
    }

    /// Number of vertices in the tree, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains<Q>(&self, vertex: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index_of(vertex).is_some()
    }

    /// Whether the vertex with this graph id is in the tree.
    pub fn contains_id(&self, id: NodeId) -> bool {
        self.is_reached(id)
    }

    /// BFS depth (hop count from the root) of a vertex, if reached.
    pub fn depth<Q>(&self, vertex: &Q) -> Option<u32>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index_of(vertex).map(|i| self.nodes[i].depth)
    }

    /// The vertex this one was discovered from. None for the root and for
    /// vertices outside the tree.
    pub fn parent<Q>(&self, vertex: &Q) -> Option<&'g V>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let parent = self.nodes[self.index_of(vertex)?].parent?;
        Some(self.vertex_of(parent))
    }

    /// Label of the tree edge from the parent into this vertex.
    pub fn parent_label<Q>(&self, vertex: &Q) -> Option<&'g E>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let label = self.nodes[self.index_of(vertex)?].label?;
        self.graph.label_name(label)
    }

    /// Tree children of a vertex, in discovery order.
    pub fn children<Q>(&self, vertex: &Q) -> impl Iterator<Item = &'g V> + '_
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let children = self
            .index_of(vertex)
            .map(|i| self.nodes[i].children.as_slice())
            .unwrap_or(&[]);
        children.iter().map(move |&c| self.vertex_of(c))
    }

    /// Tree vertices in discovery order (non-decreasing depth).
    pub fn vertices(&self) -> impl Iterator<Item = &'g V> + '_ {
        (0..self.nodes.len()).map(move |i| self.vertex_of(i))
    }

    /// Depth of the deepest vertex (0 for a root-only tree).
    pub fn max_depth(&self) -> u32 {
        self.nodes.last().map_or(0, |n| n.depth)
    }
}

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Dense vertex index, assigned in insertion order.
pub type NodeId = u32;

/// Interned edge-label index (avoids storing a duplicate label per edge).
pub type LabelId = u32;

/// A directed edge in the adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: NodeId,
    pub label: LabelId,
}

/// An edge for bulk loading, keyed by vertex values rather than ids.
#[derive(Debug, Clone)]
pub struct EdgeRecord<V, E> {
    pub from: V,
    pub to: V,
    pub label: E,
}

/// In-memory directed, labeled multigraph: adjacency lists + vertex and
/// label interning.
///
/// Edges are stored bidirectionally: `outgoing[a]` contains edges from a,
/// `incoming[b]` contains edges into b. Both keep insertion order, so
/// neighbor enumeration is deterministic.
///
/// Parallel edges between the same ordered pair are kept. [`Graph::label`]
/// reports the label of the first one inserted.
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    vertices: Vec<V>,
    vertex_index: HashMap<V, NodeId>,
    outgoing: Vec<Vec<Edge>>,
    incoming: Vec<Vec<Edge>>,
    labels: Vec<E>,
    label_index: HashMap<E, LabelId>,
    edge_count: usize,
}

impl<V, E> Graph<V, E>
where
    V: Eq + Hash + Clone,
    E: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            vertex_index: HashMap::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            labels: Vec::new(),
            label_index: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Pre-allocate for a known number of vertices and distinct labels.
    pub fn with_capacity(node_count: usize, label_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(node_count),
            vertex_index: HashMap::with_capacity(node_count),
            outgoing: Vec::with_capacity(node_count),
            incoming: Vec::with_capacity(node_count),
            labels: Vec::with_capacity(label_count),
            label_index: HashMap::with_capacity(label_count),
            edge_count: 0,
        }
    }

    /// Intern an edge label, returning its compact ID.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct labels are interned.
    pub fn intern_label(&mut self, label: E) -> LabelId {
        if let Some(&id) = self.label_index.get(&label) {
            return id;
        }
        assert!(
            self.labels.len() < LabelId::MAX as usize,
            "edge label count exceeded maximum ({})",
            LabelId::MAX
        );
        let id = self.labels.len() as LabelId;
        self.labels.push(label.clone());
        self.label_index.insert(label, id);
        id
    }

    /// Resolve a LabelId back to its label. Returns None for unknown IDs.
    pub fn label_name(&self, id: LabelId) -> Option<&E> {
        self.labels.get(id as usize)
    }

    /// Insert a vertex, returning its id. Re-inserting an existing vertex
    /// returns the id it already has.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` vertices are inserted.
    pub fn insert_vertex(&mut self, vertex: V) -> NodeId {
        if let Some(&id) = self.vertex_index.get(&vertex) {
            return id;
        }
        assert!(
            self.vertices.len() < NodeId::MAX as usize,
            "vertex count exceeded maximum ({})",
            NodeId::MAX
        );
        let id = self.vertices.len() as NodeId;
        self.vertices.push(vertex.clone());
        self.vertex_index.insert(vertex, id);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Add a directed edge between two existing vertex ids. Also inserts
    /// into the incoming adjacency list.
    ///
    /// # Panics
    /// Panics if either id was not issued by this graph.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, label: LabelId) {
        self.outgoing[from as usize].push(Edge { target: to, label });
        self.incoming[to as usize].push(Edge { target: from, label });
        self.edge_count += 1;
    }

    /// Add a directed edge `from → to`, inserting either endpoint if absent.
    pub fn insert_directed(&mut self, from: V, to: V, label: E) {
        let from = self.insert_vertex(from);
        let to = self.insert_vertex(to);
        let label = self.intern_label(label);
        self.add_edge(from, to, label);
    }

    /// Add the pair of directed edges `a → b` and `b → a`, both carrying `label`.
    pub fn insert_undirected(&mut self, a: V, b: V, label: E) {
        let a = self.insert_vertex(a);
        let b = self.insert_vertex(b);
        let label = self.intern_label(label);
        self.add_edge(a, b, label);
        self.add_edge(b, a, label);
    }

    /// Bulk load from edge records.
    pub fn load_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = EdgeRecord<V, E>>,
    {
        for EdgeRecord { from, to, label } in edges {
            self.insert_directed(from, to, label);
        }
    }

    /// Look up the id of a vertex.
    pub fn node_id<Q>(&self, vertex: &Q) -> Option<NodeId>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.vertex_index.get(vertex).copied()
    }

    /// Get the vertex stored under an id.
    pub fn vertex(&self, id: NodeId) -> Option<&V> {
        self.vertices.get(id as usize)
    }

    pub(crate) fn vertex_at(&self, id: NodeId) -> &V {
        &self.vertices[id as usize]
    }

    pub fn has_vertex<Q>(&self, vertex: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.vertex_index.contains_key(vertex)
    }

    /// All vertices, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.iter()
    }

    /// Get outgoing edges for a node.
    pub fn neighbors_out(&self, id: NodeId) -> &[Edge] {
        self.outgoing.get(id as usize).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Get incoming edges for a node.
    pub fn neighbors_in(&self, id: NodeId) -> &[Edge] {
        self.incoming.get(id as usize).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Out-neighbors of a vertex, one entry per edge. Empty if the vertex is absent.
    pub fn out_neighbors<Q>(&self, vertex: &Q) -> impl Iterator<Item = &V>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let edges = self.node_id(vertex).map(|id| self.neighbors_out(id)).unwrap_or(&[]);
        edges.iter().map(move |e| self.vertex_at(e.target))
    }

    /// In-neighbors of a vertex, one entry per edge. Empty if the vertex is absent.
    pub fn in_neighbors<Q>(&self, vertex: &Q) -> impl Iterator<Item = &V>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let edges = self.node_id(vertex).map(|id| self.neighbors_in(id)).unwrap_or(&[]);
        edges.iter().map(move |e| self.vertex_at(e.target))
    }

    pub fn out_degree<Q>(&self, vertex: &Q) -> usize
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.node_id(vertex).map_or(0, |id| self.neighbors_out(id).len())
    }

    pub fn in_degree<Q>(&self, vertex: &Q) -> usize
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.node_id(vertex).map_or(0, |id| self.neighbors_in(id).len())
    }

    /// Label of the first `from → to` edge, if any.
    pub fn label<Q>(&self, from: &Q, to: &Q) -> Option<&E>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let from = self.node_id(from)?;
        let to = self.node_id(to)?;
        self.neighbors_out(from)
            .iter()
            .find(|e| e.target == to)
            .and_then(|e| self.label_name(e.label))
    }

    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Approximate memory usage in bytes. Heap data owned by `V` and `E`
    /// (e.g. string contents) is not counted.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let vertex_mem = self.vertices.len() * (2 * size_of::<V>() + size_of::<NodeId>() + 2 * size_of::<Vec<Edge>>());
        let label_mem = self.labels.len() * (2 * size_of::<E>() + size_of::<LabelId>());
        let edge_mem = self.edge_count * 2 * size_of::<Edge>();

        vertex_mem + label_mem + edge_mem
    }
}

impl<V, E> Default for Graph<V, E>
where
    V: Eq + Hash + Clone,
    E: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

use std::borrow::Borrow;
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use crate::error::{Result, TraversalError};
use crate::graph::{Graph, NodeId};
use crate::tree::BfsTree;

/// A single step on a path back to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep<'g, V, E> {
    pub vertex: &'g V,
    /// Label of the tree edge linking this vertex to the next step.
    /// None for the root, which ends the path.
    pub label: Option<&'g E>,
}

/// Build the minimum-path tree rooted at `source`.
///
/// Breadth-first over out-edges. Each vertex joins the tree the first time
/// it is seen, below the vertex it was seen from, and the tree edge copies
/// that graph edge's label. The queue is processed in non-decreasing depth
/// order, so first discovery is always at minimum hop count.
///
/// Returns `UnknownVertex` if `source` is not in the graph.
pub fn build_tree<'g, V, E, Q>(graph: &'g Graph<V, E>, source: &Q) -> Result<BfsTree<'g, V, E>>
where
    V: Eq + Hash + Clone + Borrow<Q>,
    E: Eq + Hash + Clone,
    Q: Hash + Eq + ?Sized,
{
    let root = graph.node_id(source).ok_or(TraversalError::UnknownVertex)?;
    build_tree_from(graph, root)
}

/// [`build_tree`] for a root already resolved to its graph id.
pub fn build_tree_from<V, E>(graph: &Graph<V, E>, root: NodeId) -> Result<BfsTree<'_, V, E>>
where
    V: Eq + Hash + Clone,
    E: Eq + Hash + Clone,
{
    if graph.vertex(root).is_none() {
        return Err(TraversalError::UnknownVertex);
    }

    // The tree's slot table doubles as the visited set; the queue holds tree indices.
    let mut tree = BfsTree::with_root(graph, root);
    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(0);

    while let Some(current) = queue.pop_front() {
        let current_id = tree.node(current).node_id;
        for edge in graph.neighbors_out(current_id) {
            if !tree.is_reached(edge.target) {
                let child = tree.attach(current, edge.target, edge.label);
                queue.push_back(child);
            }
        }
    }

    tracing::debug!(
        root,
        reached = tree.len(),
        max_depth = tree.max_depth(),
        "built bfs tree"
    );

    Ok(tree)
}

/// Walk parent links from `target` up to the root.
///
/// The path starts at `target` and ends at the root, so its length is one
/// more than the hop distance; `[root]` for the root itself. Empty if
/// `target` is not in the tree.
pub fn path_to_root<'g, V, E, Q>(tree: &BfsTree<'g, V, E>, target: &Q) -> Vec<&'g V>
where
    V: Eq + Hash + Clone + Borrow<Q>,
    E: Eq + Hash + Clone,
    Q: Hash + Eq + ?Sized,
{
    let Some(mut index) = tree.index_of(target) else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity(tree.node(index).depth as usize + 1);
    loop {
        path.push(tree.vertex_of(index));
        match tree.node(index).parent {
            Some(parent) => {
                debug_assert_eq!(tree.node(parent).depth + 1, tree.node(index).depth);
                index = parent;
            }
            None => break,
        }
    }
    path
}

/// Like [`path_to_root`], but each step also carries the label of the edge
/// joining it to the next step.
pub fn path_steps<'g, V, E, Q>(tree: &BfsTree<'g, V, E>, target: &Q) -> Vec<PathStep<'g, V, E>>
where
    V: Eq + Hash + Clone + Borrow<Q>,
    E: Eq + Hash + Clone,
    Q: Hash + Eq + ?Sized,
{
    let Some(mut index) = tree.index_of(target) else {
        return Vec::new();
    };

    let graph = tree.graph();
    let mut steps = Vec::with_capacity(tree.node(index).depth as usize + 1);
    loop {
        let node = tree.node(index);
        steps.push(PathStep {
            vertex: tree.vertex_of(index),
            label: node.label.and_then(|l| graph.label_name(l)),
        });
        match node.parent {
            Some(parent) => index = parent,
            None => break,
        }
    }
    steps
}

/// Vertices of `graph` that are not in `tree`.
///
/// Meant for the graph the tree was built from; for any other graph the
/// vertices are compared by value.
pub fn unreached<'a, V, E>(graph: &'a Graph<V, E>, tree: &BfsTree<'_, V, E>) -> HashSet<&'a V>
where
    V: Eq + Hash + Clone,
    E: Eq + Hash + Clone,
{
    let capacity = graph.node_count().saturating_sub(tree.len());

    if std::ptr::eq(graph, tree.graph()) {
        let mut missing = HashSet::with_capacity(capacity);
        for id in 0..graph.node_count() as NodeId {
            if !tree.contains_id(id) {
                missing.insert(graph.vertex_at(id));
            }
        }
        return missing;
    }

    graph.vertices().filter(|v| !tree.contains(*v)).collect()
}

/// Average hop distance from `root` over every vertex of the tree, root
/// included (at depth 0) in the denominator.
///
/// `root` must be the tree's root.
pub fn average_separation<V, E, Q>(tree: &BfsTree<'_, V, E>, root: &Q) -> Result<f64>
where
    V: Eq + Hash + Clone + Borrow<Q>,
    E: Eq + Hash + Clone,
    Q: Hash + Eq + ?Sized,
{
    if tree.is_empty() {
        return Err(TraversalError::EmptyTree);
    }
    if !tree.graph().has_vertex(root) {
        return Err(TraversalError::UnknownVertex);
    }
    if tree.index_of(root) != Some(0) {
        return Err(TraversalError::NotTreeRoot);
    }
    tree.average_separation()
}

impl<V, E> BfsTree<'_, V, E>
where
    V: Eq + Hash + Clone,
    E: Eq + Hash + Clone,
{
    /// Average separation from this tree's own root.
    pub fn average_separation(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(TraversalError::EmptyTree);
        }
        let total = total_depth(self, 0);
        tracing::trace!(total, vertices = self.len(), "summed tree depths");
        Ok(total as f64 / self.len() as f64)
    }
}

/// Sum of depths below `start`, measured from `start` (which counts as 0).
///
/// Explicit work stack: a path-shaped component can be as deep as the graph
/// is large.
fn total_depth<V, E>(tree: &BfsTree<'_, V, E>, start: usize) -> u64
where
    V: Eq + Hash + Clone,
    E: Eq + Hash + Clone,
{
    let mut total = 0u64;
    let mut stack: Vec<(usize, u64)> = vec![(start, 0)];

    while let Some((index, depth)) = stack.pop() {
        total += depth;
        stack.extend(tree.node(index).children.iter().map(|&c| (c, depth + 1)));
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEVIN: &str = "Kevin Bacon";
    const DARTMOUTH: &str = "Dartmouth (Earl thereof)";

    /// The seven-person universe: a connected five and a detached pair.
    fn bacon_universe() -> Graph<&'static str, char> {
        let mut g = Graph::new();
        for v in [KEVIN, DARTMOUTH, "Alice", "Charlie", "Bob", "Nobody", "Nobody's Friend"] {
            g.insert_vertex(v);
        }
        g.insert_undirected(KEVIN, "Alice", 'A');
        g.insert_undirected(KEVIN, "Bob", 'A');
        g.insert_undirected("Bob", "Alice", 'A');
        g.insert_undirected("Bob", "Charlie", 'C');
        g.insert_undirected("Alice", "Charlie", 'D');
        g.insert_undirected(DARTMOUTH, "Charlie", 'B');
        g.insert_undirected("Nobody", "Nobody's Friend", 'B');
        g
    }

    fn make_chain(n: u64) -> Graph<u64, &'static str> {
        let mut g = Graph::new();
        for i in 0..n.saturating_sub(1) {
            g.insert_directed(i, i + 1, "NEXT");
        }
        g
    }

    fn make_star(leaves: u64) -> Graph<u64, &'static str> {
        let mut g = Graph::new();
        for i in 1..=leaves {
            g.insert_directed(0, i, "HAS");
        }
        g
    }

    fn make_cycle(n: u64) -> Graph<u64, &'static str> {
        let mut g = Graph::new();
        for i in 0..n {
            g.insert_directed(i, (i + 1) % n, "NEXT");
        }
        g
    }

    /// 0→1, 0→2, 1→3, 2→3, 3→4, 5→0 plus an isolated 6.
    fn make_diamond() -> Graph<u64, &'static str> {
        let mut g = Graph::new();
        for (a, b) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (5, 0)] {
            g.insert_directed(a, b, "E");
        }
        g.insert_vertex(6);
        g
    }

    /// Hop distances by repeated edge relaxation, independent of the BFS queue.
    fn distance_oracle(g: &Graph<u64, &'static str>, source: u64) -> HashMap<u64, usize> {
        let mut dist = HashMap::from([(source, 0usize)]);
        loop {
            let mut changed = false;
            for u in g.vertices().copied().collect::<Vec<_>>() {
                let Some(&du) = dist.get(&u) else { continue };
                for &v in g.out_neighbors(&u) {
                    if dist.get(&v).map_or(true, |&dv| du + 1 < dv) {
                        dist.insert(v, du + 1);
                        changed = true;
                    }
                }
            }
            if !changed {
                return dist;
            }
        }
    }

    fn assert_matches_oracle(g: &Graph<u64, &'static str>, source: u64) {
        let tree = build_tree(g, &source).unwrap();
        let oracle = distance_oracle(g, source);
        assert_eq!(tree.len(), oracle.len());
        for v in g.vertices() {
            let path = path_to_root(&tree, v);
            match oracle.get(v) {
                Some(&d) => {
                    assert_eq!(path.len() - 1, d, "distance to {} from {}", v, source);
                    assert_eq!(tree.depth(v), Some(d as u32));
                }
                None => assert!(path.is_empty(), "{} should be unreachable from {}", v, source),
            }
        }
    }

    // --- Worked example ---

    #[test]
    fn test_bacon_depths() {
        let g = bacon_universe();
        let tree = build_tree(&g, KEVIN).unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.depth(KEVIN), Some(0));
        assert_eq!(tree.depth("Alice"), Some(1));
        assert_eq!(tree.depth("Bob"), Some(1));
        assert_eq!(tree.depth("Charlie"), Some(2));
        assert_eq!(tree.depth(DARTMOUTH), Some(3));
        assert!(!tree.contains("Nobody"));
        assert!(!tree.contains("Nobody's Friend"));
    }

    #[test]
    fn test_bacon_path_to_dartmouth() {
        let g = bacon_universe();
        let tree = build_tree(&g, KEVIN).unwrap();
        let path = path_to_root(&tree, DARTMOUTH);
        // Alice's edge to Charlie is iterated first: she was inserted before Bob.
        assert_eq!(path, vec![&DARTMOUTH, &"Charlie", &"Alice", &KEVIN]);
    }

    #[test]
    fn test_bacon_unreachable_path_empty() {
        let g = bacon_universe();
        let tree = build_tree(&g, KEVIN).unwrap();
        assert!(path_to_root(&tree, "Nobody").is_empty());
        assert!(path_steps(&tree, "Nobody").is_empty());
    }

    #[test]
    fn test_bacon_unreached() {
        let g = bacon_universe();
        let tree = build_tree(&g, KEVIN).unwrap();
        let missing = unreached(&g, &tree);
        assert_eq!(missing, HashSet::from([&"Nobody", &"Nobody's Friend"]));
    }

    #[test]
    fn test_bacon_average_separation() {
        let g = bacon_universe();
        let tree = build_tree(&g, KEVIN).unwrap();
        let avg = average_separation(&tree, KEVIN).unwrap();
        assert!((avg - 7.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bacon_path_steps_labels() {
        let g = bacon_universe();
        let tree = build_tree(&g, KEVIN).unwrap();
        let steps = path_steps(&tree, DARTMOUTH);
        let rendered: Vec<(&str, Option<char>)> =
            steps.iter().map(|s| (*s.vertex, s.label.copied())).collect();
        assert_eq!(
            rendered,
            vec![
                (DARTMOUTH, Some('B')),
                ("Charlie", Some('D')),
                ("Alice", Some('A')),
                (KEVIN, None),
            ]
        );
    }

    // --- Tree construction ---

    #[test]
    fn test_build_tree_unknown_source() {
        let g = make_chain(3);
        assert_eq!(build_tree(&g, &999).unwrap_err(), TraversalError::UnknownVertex);
        assert_eq!(build_tree_from(&g, 999).unwrap_err(), TraversalError::UnknownVertex);
    }

    #[test]
    fn test_build_tree_isolated_source() {
        let g = make_diamond();
        let tree = build_tree(&g, &6).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(*tree.root(), 6);
        assert_eq!(tree.max_depth(), 0);
    }

    #[test]
    fn test_build_tree_sink_source() {
        // Outgoing edges only: the end of a chain reaches nothing.
        let g = make_chain(4);
        let tree = build_tree(&g, &3).unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_build_tree_chain() {
        let g = make_chain(6);
        let tree = build_tree(&g, &0).unwrap();
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.depth(&5), Some(5));
        assert_eq!(tree.max_depth(), 5);
    }

    #[test]
    fn test_build_tree_star() {
        let g = make_star(100);
        let tree = build_tree(&g, &0).unwrap();
        assert_eq!(tree.len(), 101);
        assert!(g.vertices().filter(|&&v| v != 0).all(|v| tree.depth(v) == Some(1)));
        assert_eq!(tree.children(&0).count(), 100);
    }

    #[test]
    fn test_build_tree_cycle_no_infinite_loop() {
        let g = make_cycle(5);
        let tree = build_tree(&g, &2).unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.depth(&1), Some(4));
    }

    #[test]
    fn test_build_tree_self_loop() {
        let mut g: Graph<u64, &str> = Graph::new();
        g.insert_directed(0, 0, "SELF");
        let tree = build_tree(&g, &0).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.parent(&0), None);
    }

    #[test]
    fn test_build_tree_parallel_edges() {
        let mut g: Graph<u64, &str> = Graph::new();
        g.insert_directed(0, 1, "Footloose");
        g.insert_directed(0, 1, "Tremors");
        g.insert_directed(0, 1, "Apollo 13");
        let tree = build_tree(&g, &0).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.parent_label(&1), Some(&"Footloose"));
    }

    #[test]
    fn test_single_parent_per_vertex() {
        let g = bacon_universe();
        let tree = build_tree(&g, KEVIN).unwrap();
        let roots: Vec<_> = tree.vertices().filter(|v| tree.parent(*v).is_none()).collect();
        assert_eq!(roots, vec![&KEVIN]);
        for v in tree.vertices().filter(|v| **v != KEVIN) {
            let parent = tree.parent(v).unwrap();
            assert_eq!(tree.depth(parent).unwrap() + 1, tree.depth(v).unwrap());
            // Every tree edge is a graph edge.
            assert!(g.out_neighbors(parent).any(|n| n == v));
            assert!(tree.children(parent).any(|c| c == v));
        }
    }

    #[test]
    fn test_vertices_in_depth_order() {
        let g = make_diamond();
        let tree = build_tree(&g, &0).unwrap();
        let depths: Vec<u32> = tree.vertices().map(|v| tree.depth(v).unwrap()).collect();
        assert!(depths.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(tree.root_id(), g.node_id(&0).unwrap());
    }

    #[test]
    fn test_distances_match_oracle() {
        let g = make_diamond();
        for source in 0..=6 {
            assert_matches_oracle(&g, source);
        }
        let cycle = make_cycle(7);
        for source in 0..7 {
            assert_matches_oracle(&cycle, source);
        }
        assert_matches_oracle(&make_chain(8), 3);
        assert_matches_oracle(&make_star(10), 4);
    }

    #[test]
    fn test_build_tree_is_deterministic() {
        let g = bacon_universe();
        let first = build_tree(&g, KEVIN).unwrap();
        let second = build_tree(&g, KEVIN).unwrap();
        for v in g.vertices() {
            assert_eq!(first.depth(v), second.depth(v));
            assert_eq!(first.parent(v), second.parent(v));
        }
    }

    // --- Path reconstruction ---

    #[test]
    fn test_path_to_root_of_root() {
        let g = make_chain(4);
        let tree = build_tree(&g, &1).unwrap();
        assert_eq!(path_to_root(&tree, &1), vec![&1]);
        let steps = path_steps(&tree, &1);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].label, None);
    }

    #[test]
    fn test_path_to_root_chain() {
        let g = make_chain(6);
        let tree = build_tree(&g, &0).unwrap();
        assert_eq!(path_to_root(&tree, &5), vec![&5, &4, &3, &2, &1, &0]);
    }

    #[test]
    fn test_path_to_root_vertex_not_in_graph() {
        let g = make_chain(3);
        let tree = build_tree(&g, &0).unwrap();
        assert!(path_to_root(&tree, &42).is_empty());
    }

    #[test]
    fn test_path_empty_iff_unreachable() {
        let g = make_diamond();
        let tree = build_tree(&g, &1).unwrap();
        let oracle = distance_oracle(&g, 1);
        for v in g.vertices() {
            assert_eq!(path_to_root(&tree, v).is_empty(), !oracle.contains_key(v));
        }
    }

    // --- Reachability ---

    #[test]
    fn test_unreached_partitions_vertices() {
        let g = make_diamond();
        for source in 0..=6 {
            let tree = build_tree(&g, &source).unwrap();
            let missing = unreached(&g, &tree);
            let reached: HashSet<&u64> = tree.vertices().collect();
            assert!(missing.is_disjoint(&reached));
            let all: HashSet<&u64> = g.vertices().collect();
            assert_eq!(missing.union(&reached).copied().collect::<HashSet<_>>(), all);
        }
    }

    #[test]
    fn test_unreached_against_other_graph() {
        let g = make_chain(3);
        let tree = build_tree(&g, &1).unwrap();
        let wider = make_chain(5);
        let missing = unreached(&wider, &tree);
        assert_eq!(missing, HashSet::from([&0, &3, &4]));
    }

    #[test]
    fn test_unreached_everything_reached() {
        let g = make_cycle(4);
        let tree = build_tree(&g, &0).unwrap();
        assert!(unreached(&g, &tree).is_empty());
    }

    // --- Separation ---

    #[test]
    fn test_average_separation_root_only() {
        let g = make_diamond();
        let tree = build_tree(&g, &6).unwrap();
        assert_eq!(average_separation(&tree, &6).unwrap(), 0.0);
    }

    #[test]
    fn test_average_separation_star() {
        let g = make_star(4);
        let tree = build_tree(&g, &0).unwrap();
        assert!((tree.average_separation().unwrap() - 4.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_separation_wrong_root() {
        let g = make_chain(4);
        let tree = build_tree(&g, &0).unwrap();
        assert_eq!(average_separation(&tree, &2).unwrap_err(), TraversalError::NotTreeRoot);
        assert_eq!(average_separation(&tree, &99).unwrap_err(), TraversalError::UnknownVertex);
    }

    #[test]
    fn test_average_separation_deep_chain() {
        // Deep enough that recursive summation would risk the stack.
        let n = 200_000u64;
        let g = make_chain(n);
        let tree = build_tree(&g, &0).unwrap();
        let expected = (n - 1) as f64 / 2.0;
        assert!((average_separation(&tree, &0).unwrap() - expected).abs() < 1e-9);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_graph_and_tree_are_send_sync() {
        assert_send_sync::<Graph<String, String>>();
        assert_send_sync::<BfsTree<'static, String, String>>();
    }

    #[test]
    fn test_parallel_traversals_share_one_graph() {
        let g = bacon_universe();
        let roots = [KEVIN, "Alice", DARTMOUTH, "Nobody"];

        let results: Vec<(usize, f64)> = std::thread::scope(|s| {
            let handles: Vec<_> = roots
                .iter()
                .map(|root| {
                    let g = &g;
                    s.spawn(move || {
                        let tree = build_tree(g, *root).unwrap();
                        (tree.len(), tree.average_separation().unwrap())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (root, (len, avg)) in roots.iter().zip(&results) {
            let tree = build_tree(&g, *root).unwrap();
            assert_eq!(*len, tree.len());
            assert_eq!(*avg, tree.average_separation().unwrap());
        }
        assert_eq!(results[0].0, 5);
        assert!((results[0].1 - 1.4).abs() < 1e-12);
        assert_eq!(results[3], (2, 0.5));
    }
}

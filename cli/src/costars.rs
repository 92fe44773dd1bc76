use std::collections::{HashMap, HashSet};
use std::time::Instant;

use bacon_core::{Graph, NodeId};

use crate::load::{ActorId, Dataset};

/// Actors as vertices, one directed edge per ordered costar pair per shared
/// movie, labelled with the movie title.
pub type CostarGraph = Graph<String, String>;

/// Build the costar graph from a loaded dataset.
///
/// Every actor becomes a vertex, including actors with no movies. Cast rows
/// pointing at unknown movies or actors are skipped with a warning.
pub fn build_costar_graph(dataset: &Dataset) -> CostarGraph {
    let start = Instant::now();
    let mut graph = Graph::with_capacity(dataset.actors.len(), dataset.movies.len());

    let ids: HashMap<ActorId, NodeId> = dataset
        .actors
        .iter()
        .map(|(&actor_id, name)| (actor_id, graph.insert_vertex(name.clone())))
        .collect();

    let mut skipped = 0usize;
    for (&movie_id, cast) in &dataset.casts {
        let Some(title) = dataset.movies.get(&movie_id) else {
            tracing::warn!(movie_id, "cast listed for unknown movie, skipping");
            skipped += 1;
            continue;
        };

        let members: Vec<NodeId> = cast
            .iter()
            .filter_map(|actor_id| {
                let id = ids.get(actor_id).copied();
                if id.is_none() {
                    tracing::warn!(movie_id, actor_id, "unknown actor in cast, skipping");
                }
                id
            })
            .collect();

        if members.len() < 2 {
            continue;
        }

        let label = graph.intern_label(title.clone());
        for &a in &members {
            for &b in &members {
                // Two actor ids sharing a name collapse to one vertex.
                if a != b {
                    graph.add_edge(a, b, label);
                }
            }
        }
    }

    tracing::info!(
        actors = graph.node_count(),
        edges = graph.edge_count(),
        movies = graph.label_count(),
        skipped,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "built costar graph"
    );

    graph
}

/// Number of distinct actors who share at least one movie with `id`.
///
/// Parallel edges (several shared movies) count once.
pub fn costar_count(graph: &CostarGraph, id: NodeId) -> usize {
    let edges = graph.neighbors_in(id);
    if edges.len() < 2 {
        return edges.len();
    }
    edges.iter().map(|e| e.target).collect::<HashSet<_>>().len()
}

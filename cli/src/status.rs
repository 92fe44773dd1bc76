use serde::Serialize;

use crate::universe::Universe;

/// Snapshot of the loaded graph and the current universe.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub center: String,
    pub reached: usize,
    pub unreached: usize,
    pub actor_count: usize,
    /// Movies that link at least two actors.
    pub movie_count: usize,
    pub edge_count: usize,
    pub costars: usize,
    pub average_separation: f64,
    pub max_depth: u32,
    pub memory_bytes: usize,
}

impl Status {
    pub fn collect(universe: &Universe<'_>) -> Self {
        let graph = universe.graph();
        let reached = universe.tree().len();
        Self {
            center: universe.center().to_string(),
            reached,
            unreached: graph.node_count() - reached,
            actor_count: graph.node_count(),
            movie_count: graph.label_count(),
            edge_count: graph.edge_count(),
            costars: universe.costars(),
            average_separation: universe.average_separation(),
            max_depth: universe.tree().max_depth(),
            memory_bytes: graph.memory_usage(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("center:             {}", self.center),
            format!("reached:            {}/{}", self.reached, self.actor_count),
            format!("unreached:          {}", self.unreached),
            format!("movies:             {}", self.movie_count),
            format!("costar edges:       {}", self.edge_count),
            format!("costars of center:  {}", self.costars),
            format!("average separation: {:.6}", self.average_separation),
            format!("max separation:     {}", self.max_depth),
            format!("graph memory:       ~{:.1}MB", self.memory_bytes as f64 / 1_048_576.0),
        ]
    }
}

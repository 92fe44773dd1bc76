use bacon_core::{build_tree, path_steps, unreached, BfsTree};
use serde::Serialize;

use crate::costars::{costar_count, CostarGraph};
use crate::error::{CliError, Result};

/// One actor at the center of the acting universe: the BFS tree rooted at
/// them plus the metrics derived from it.
pub struct Universe<'g> {
    center: String,
    tree: BfsTree<'g, String, String>,
    costars: usize,
    average_separation: f64,
}

/// How an actor connects back to the center, hop by hop.
#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    pub actor: String,
    pub center: String,
    /// Hop count to the center; None when unreachable.
    pub number: Option<usize>,
    pub hops: Vec<Hop>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hop {
    pub actor: String,
    pub movie: String,
    pub costar: String,
}

impl<'g> Universe<'g> {
    pub fn new(graph: &'g CostarGraph, center: &str) -> Result<Self> {
        let Some(center_id) = graph.node_id(center) else {
            return Err(CliError::UnknownActor(center.to_string()));
        };

        let tree = build_tree(graph, center)?;
        let average_separation = tree.average_separation()?;
        let costars = costar_count(graph, center_id);

        tracing::info!(
            center,
            reached = tree.len(),
            actors = graph.node_count(),
            average_separation,
            "new universe center"
        );

        Ok(Self {
            center: center.to_string(),
            tree,
            costars,
            average_separation,
        })
    }

    pub fn center(&self) -> &str {
        &self.center
    }

    pub fn tree(&self) -> &BfsTree<'g, String, String> {
        &self.tree
    }

    pub fn graph(&self) -> &'g CostarGraph {
        self.tree.graph()
    }

    pub fn costars(&self) -> usize {
        self.costars
    }

    pub fn average_separation(&self) -> f64 {
        self.average_separation
    }

    pub fn summary(&self) -> String {
        format!(
            "{} is now the center of the acting universe, connected to {}/{} actors, with average separation {:.6}",
            self.center,
            self.tree.len(),
            self.graph().node_count(),
            self.average_separation
        )
    }

    /// Path from `actor` back to the center. `UnknownActor` if the actor is
    /// not in the graph at all.
    pub fn path_report(&self, actor: &str) -> Result<PathReport> {
        if !self.graph().has_vertex(actor) {
            return Err(CliError::UnknownActor(actor.to_string()));
        }

        let steps = path_steps(&self.tree, actor);
        let hops = steps
            .windows(2)
            .map(|pair| Hop {
                actor: pair[0].vertex.clone(),
                movie: pair[0].label.cloned().unwrap_or_default(),
                costar: pair[1].vertex.clone(),
            })
            .collect();

        Ok(PathReport {
            actor: actor.to_string(),
            center: self.center.clone(),
            number: steps.len().checked_sub(1),
            hops,
        })
    }

    /// Actors the center cannot reach, sorted by name.
    pub fn unconnected(&self) -> Vec<&'g str> {
        let mut names: Vec<&str> = unreached(self.graph(), &self.tree)
            .into_iter()
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}

impl PathReport {
    pub fn lines(&self) -> Vec<String> {
        let Some(number) = self.number else {
            return vec![format!("{} is not reachable from {}!", self.actor, self.center)];
        };

        let mut lines = Vec::with_capacity(self.hops.len() + 1);
        lines.push(format!("{}'s number is {}", self.actor, number));
        lines.extend(
            self.hops
                .iter()
                .map(|h| format!("{} appeared in [{}] with {}", h.actor, h.movie, h.costar)),
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costars::build_costar_graph;
    use crate::load::sample_dataset;

    #[test]
    fn test_new_universe_metrics() {
        let graph = build_costar_graph(&sample_dataset());
        let universe = Universe::new(&graph, "Kevin Bacon").unwrap();
        assert_eq!(universe.center(), "Kevin Bacon");
        assert_eq!(universe.tree().len(), 5);
        assert_eq!(universe.costars(), 2);
        assert!((universe.average_separation() - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_center() {
        let graph = build_costar_graph(&sample_dataset());
        let err = Universe::new(&graph, "Nic Cage").err().unwrap();
        assert!(matches!(err, CliError::UnknownActor(name) if name == "Nic Cage"));
    }

    #[test]
    fn test_summary() {
        let graph = build_costar_graph(&sample_dataset());
        let universe = Universe::new(&graph, "Kevin Bacon").unwrap();
        assert_eq!(
            universe.summary(),
            "Kevin Bacon is now the center of the acting universe, connected to 5/8 actors, \
             with average separation 1.400000"
        );
    }

    #[test]
    fn test_path_report_lines() {
        let graph = build_costar_graph(&sample_dataset());
        let universe = Universe::new(&graph, "Kevin Bacon").unwrap();
        let report = universe.path_report("Dartmouth (Earl thereof)").unwrap();
        assert_eq!(report.number, Some(3));
        assert_eq!(
            report.lines(),
            vec![
                "Dartmouth (Earl thereof)'s number is 3",
                "Dartmouth (Earl thereof) appeared in [The Earl] with Charlie",
                "Charlie appeared in [Apollo 13] with Alice",
                "Alice appeared in [Footloose] with Kevin Bacon",
            ]
        );
    }

    #[test]
    fn test_path_report_center() {
        let graph = build_costar_graph(&sample_dataset());
        let universe = Universe::new(&graph, "Kevin Bacon").unwrap();
        let report = universe.path_report("Kevin Bacon").unwrap();
        assert_eq!(report.number, Some(0));
        assert_eq!(report.lines(), vec!["Kevin Bacon's number is 0"]);
    }

    #[test]
    fn test_path_report_unreachable() {
        let graph = build_costar_graph(&sample_dataset());
        let universe = Universe::new(&graph, "Kevin Bacon").unwrap();
        let report = universe.path_report("Nobody").unwrap();
        assert_eq!(report.number, None);
        assert!(report.hops.is_empty());
        assert_eq!(report.lines(), vec!["Nobody is not reachable from Kevin Bacon!"]);
        assert!(universe.path_report("Nic Cage").is_err());
    }

    #[test]
    fn test_unconnected_sorted() {
        let graph = build_costar_graph(&sample_dataset());
        let universe = Universe::new(&graph, "Kevin Bacon").unwrap();
        assert_eq!(universe.unconnected(), vec!["Loner", "Nobody", "Nobody's Friend"]);

        let lonely = Universe::new(&graph, "Loner").unwrap();
        assert_eq!(lonely.tree().len(), 1);
        assert_eq!(lonely.unconnected().len(), 7);
        assert_eq!(lonely.average_separation(), 0.0);
    }
}

use std::io::Write;

use bacon_core::{average_separation, build_tree, path_to_root, unreached, Graph};

use crate::error::Result;

const KEVIN: &str = "Kevin Bacon";
const DARTMOUTH: &str = "Dartmouth (Earl thereof)";

/// Seven actors: five linked around Kevin Bacon, plus a pair nobody else
/// has worked with.
pub fn sample_graph() -> Graph<&'static str, char> {
    let mut g = Graph::new();
    for actor in [KEVIN, DARTMOUTH, "Alice", "Charlie", "Bob", "Nobody", "Nobody's Friend"] {
        g.insert_vertex(actor);
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

/// Walk the sample graph through every tree operation and print the results.
pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let graph = sample_graph();
    let tree = build_tree(&graph, KEVIN)?;

    writeln!(out, "Minimum path tree:")?;
    for actor in tree.vertices() {
        match (tree.parent(actor), tree.parent_label(actor)) {
            (Some(parent), Some(label)) => writeln!(out, "  {parent} -[{label}]-> {actor}")?,
            _ => writeln!(out, "  {actor} (root)")?,
        }
    }

    writeln!(out, "Path from Dartmouth to Kevin Bacon:")?;
    writeln!(out, "{}", render(&path_to_root(&tree, DARTMOUTH)))?;

    writeln!(out, "Path from Nobody to Kevin Bacon:")?;
    writeln!(out, "{}", render(&path_to_root(&tree, "Nobody")))?;

    writeln!(
        out,
        "{} is connected to {}/{} actors, with average separation {:.6}",
        KEVIN,
        tree.len(),
        graph.node_count(),
        average_separation(&tree, KEVIN)?
    )?;

    let mut missing: Vec<&str> = unreached(&graph, &tree).into_iter().copied().collect();
    missing.sort_unstable();
    writeln!(out, "The following actors can't be reached from {}: {}", KEVIN, missing.join(", "))?;

    Ok(())
}

fn render(path: &[&&str]) -> String {
    let names: Vec<&str> = path.iter().map(|v| **v).collect();
    format!("[{}]", names.join(", "))
}

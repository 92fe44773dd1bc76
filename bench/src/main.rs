use bacon_core::{build_tree_from, path_to_root, unreached, Graph};
use std::time::{Duration, Instant};

/// Vertices are synthetic actor numbers; labels are movie (or link type) numbers.
type BenchGraph = Graph<u64, u32>;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: bacon-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run every generator (default)");
        println!("  lsystem     Ternary tree (deep paths, no cycles)");
        println!("  scalefree   Preferential attachment (a few very connected actors)");
        println!("  smallworld  Ring lattice with random shortcuts");
        println!("  barbell     Two dense clusters joined by a thin chain");
        println!("  costar      Movies as casts of 2-8 actors, every pair linked");
        println!();
        println!("Default node_count: 1000000");
        return;
    }

    let node_count = node_count.clamp(16, u64::from(u32::MAX));

    println!("bacon-bench");
    println!("===========");
    println!();

    let generators: Vec<(&str, fn(u64) -> BenchGraph)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free", gen_scale_free)],
        "smallworld" => vec![("Small-world", gen_small_world)],
        "barbell" => vec![("Barbell", gen_barbell)],
        "costar" => vec![("Costar casts", gen_costar)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(u64) -> BenchGraph),
            ("Scale-free", gen_scale_free),
            ("Small-world", gen_small_world),
            ("Barbell", gen_barbell),
            ("Costar casts", gen_costar),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: fn(u64) -> BenchGraph, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} actors", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    println!(
        "Generated in {:.2}s: {} actors, {} edges, {} labels, ~{:.0}MB",
        t.elapsed().as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.label_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
    println!();

    let t = Instant::now();
    let tree = match build_tree_from(&graph, 0) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("build_tree failed: {}", e);
            return;
        }
    };
    println!(
        "{:<20} {:>8.1}ms  reached {}/{}, max depth {}",
        "build_tree",
        ms(t.elapsed()),
        tree.len(),
        graph.node_count(),
        tree.max_depth()
    );

    // BFS discovery order puts a deepest vertex last.
    if let Some(&far) = tree.vertices().last() {
        let t = Instant::now();
        let path = path_to_root(&tree, &far);
        println!(
            "{:<20} {:>8.1}ms  {} -> 0 in {} hops",
            "path_to_root",
            ms(t.elapsed()),
            far,
            path.len().saturating_sub(1)
        );
    }

    let t = Instant::now();
    let missing = unreached(&graph, &tree);
    println!("{:<20} {:>8.1}ms  {} actors", "unreached", ms(t.elapsed()), missing.len());

    let t = Instant::now();
    match tree.average_separation() {
        Ok(avg) => println!("{:<20} {:>8.1}ms  {:.4}", "average_separation", ms(t.elapsed()), avg),
        Err(e) => println!("{:<20} failed: {}", "average_separation", e),
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, every link undirected
// ---------------------------------------------------------------------------

/// LCG; fast and reproducible across runs.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

const LINK_TYPES: u32 = 5;

fn graph_with_actors(node_count: u64, labels: usize) -> BenchGraph {
    let mut graph = Graph::with_capacity(node_count as usize, labels);
    for actor in 0..node_count {
        graph.insert_vertex(actor);
    }
    graph
}

fn random_label(graph: &mut BenchGraph, rng: &mut FastRng) -> u32 {
    graph.intern_label(rng.next(u64::from(LINK_TYPES)) as u32)
}

/// Both directions, same label. Vertex `n` has node id `n` because every
/// generator inserts actors in order.
fn link(graph: &mut BenchGraph, a: u64, b: u64, label: u32) {
    graph.add_edge(a as u32, b as u32, label);
    graph.add_edge(b as u32, a as u32, label);
}

/// Every actor has three children: log-depth paths, exponential width.
fn gen_lsystem(node_count: u64) -> BenchGraph {
    let mut graph = graph_with_actors(node_count, LINK_TYPES as usize);
    let mut rng = FastRng::new(42);

    let branching = 3u64;
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let label = random_label(&mut graph, &mut rng);
                link(&mut graph, parent, next_id, label);
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Preferential attachment by sampling a random endpoint of an existing edge.
fn gen_scale_free(node_count: u64) -> BenchGraph {
    let edges_per_node = 10u64;
    let mut graph = graph_with_actors(node_count, LINK_TYPES as usize);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    let seed = 5u64;
    for i in 0..seed {
        for j in (i + 1)..seed {
            let label = random_label(&mut graph, &mut rng);
            link(&mut graph, i, j, label);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for actor in seed..node_count {
        for _ in 0..edges_per_node.min(actor) {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != actor {
                let label = random_label(&mut graph, &mut rng);
                link(&mut graph, actor, target, label);
                endpoints.push(actor);
                endpoints.push(target);
            }
        }
    }

    graph
}

/// Each actor linked to the next `k` around a ring; 5% of links rewired to a
/// random actor.
fn gen_small_world(node_count: u64) -> BenchGraph {
    let k = 10u64;
    let p = 0.05f64;
    let mut graph = graph_with_actors(node_count, LINK_TYPES as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let mut target = (i + j) % node_count;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                if rewired != i {
                    target = rewired;
                }
            }
            let label = random_label(&mut graph, &mut rng);
            link(&mut graph, i, target, label);
        }
    }

    graph
}

/// Two random clusters of ~20 links per actor, joined by a ten-actor chain.
/// Actor 0 sits in the first cluster, so every path to the second crosses
/// the chain.
fn gen_barbell(node_count: u64) -> BenchGraph {
    let bridge_len = 10u64;
    let cluster = (node_count - bridge_len) / 2;
    let mut graph = graph_with_actors(cluster * 2 + bridge_len, LINK_TYPES as usize + 1);
    let mut rng = FastRng::new(99999);
    let bridge_label = graph.intern_label(LINK_TYPES);

    let b_start = cluster + bridge_len;
    for start in [0, b_start] {
        for i in 0..cluster {
            for _ in 0..20u64.min(cluster - 1) {
                let target = rng.next(cluster);
                if target != i {
                    let label = random_label(&mut graph, &mut rng);
                    link(&mut graph, start + i, start + target, label);
                }
            }
        }
    }

    for id in cluster - 1..b_start {
        link(&mut graph, id, id + 1, bridge_label);
    }

    graph
}

/// Casts of 2 to 8 actors, each movie its own label. Half of every cast is
/// drawn from earlier casts so popular actors keep getting work.
fn gen_costar(node_count: u64) -> BenchGraph {
    let mut graph = graph_with_actors(node_count, (node_count / 3) as usize);
    let mut rng = FastRng::new(31337);
    let mut credits: Vec<u64> = vec![0];
    let mut next_new: u64 = 1;
    let mut movie: u32 = 0;

    while next_new < node_count {
        let size = 2 + rng.next(7);
        let mut cast: Vec<u64> = Vec::with_capacity(size as usize);
        for slot in 0..size {
            let actor = if slot % 2 == 0 || next_new >= node_count {
                credits[rng.next(credits.len() as u64) as usize]
            } else {
                next_new += 1;
                next_new - 1
            };
            if !cast.contains(&actor) {
                cast.push(actor);
            }
        }

        let label = graph.intern_label(movie);
        movie += 1;
        for (i, &a) in cast.iter().enumerate() {
            for &b in &cast[i + 1..] {
                link(&mut graph, a, b, label);
            }
        }
        credits.extend_from_slice(&cast);
    }

    graph
}

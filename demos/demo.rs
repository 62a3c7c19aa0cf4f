//! Build a map, query a path across it and print the result.
//!
//! Run: cargo run --bin sightline-demo [MAP_FILE | SEED]
//!
//! A numeric argument seeds a random block map (default seed 42); anything
//! else is read as an ASCII map of `.` and `#`. Set `RUST_LOG=debug` to see
//! rebuild and search logs.

use rand::SeedableRng;
use sightline_demos::{HEIGHT, WIDTH, first_free, last_free, render_path, scatter_blocks};
use sightline_graph::VisGraph;

fn load(arg: Option<&str>) -> Result<VisGraph, Box<dyn std::error::Error>> {
    match arg {
        Some(path) if path.parse::<u64>().is_err() => {
            let text = std::fs::read_to_string(path)?;
            Ok(VisGraph::from_ascii(&text)?)
        }
        seed => {
            let seed = seed.and_then(|s| s.parse().ok()).unwrap_or(42);
            log::info!("generating random map with seed {seed}");
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let mut graph = VisGraph::new(WIDTH, HEIGHT);
            scatter_blocks(&mut graph, &mut rng, 40);
            Ok(graph)
        }
    }
}

fn run(arg: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut graph = load(arg)?;
    graph.build_matrix();
    println!(
        "{}x{} map, {} obstacle(s), {} waypoint(s)",
        graph.width(),
        graph.height(),
        graph.obstacles().len(),
        graph.num_waypoints()
    );

    let (Some(start), Some(finish)) = (first_free(&graph), last_free(&graph)) else {
        println!("map has no free cells");
        return Ok(());
    };

    match graph.get_path(start, finish)? {
        Some(path) => {
            let hops: Vec<String> = path.iter().map(|p| p.to_string()).collect();
            println!("path: {}", hops.join(" -> "));
            println!("{}", render_path(&graph, &path));
        }
        None => {
            println!("no path from {start} to {finish}");
            println!("{}", graph.grid());
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let arg = std::env::args().nth(1);
    if let Err(e) = run(arg.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

use noisegraph::render::write_png;
use noisegraph::{ColorGradient, NoiseGraph, NoiseMapBuilder, PlaneMapBuilder};

// Blend of Perlin and Voronoi, written by hand. Node ids are positions in
// `nodes`.
const GRAPH: &str = r#"(
    nodes: [
        (name: Some("base"), module: Perlin((frequency: 2.0, octave_count: 4, seed: 7))),
        (module: Voronoi((frequency: 3.0, enable_distance: true, seed: 7))),
        (module: Perlin((frequency: 0.5, seed: 8))),
        (name: Some("out"), module: Blend, sources: [Some(0), Some(1), Some(2)]),
    ],
)"#;

fn main() {
    let path = std::env::args().nth(1);
    let text = match &path {
        Some(path) => std::fs::read_to_string(path).unwrap(),
        None => GRAPH.to_string(),
    };
    let graph = NoiseGraph::from_ron(&text).unwrap();
    let root = graph.find("out").or_else(|| graph.ids().last()).unwrap();
    graph.validate(root).unwrap();

    let map = PlaneMapBuilder::new(256, 256)
        .unwrap()
        .with_bounds(0.0, 2.0, 0.0, 2.0)
        .unwrap()
        .with_seamless(true)
        .build(&graph.handle(root))
        .unwrap();
    write_png(&map, &ColorGradient::grayscale(), "graph_from_ron.png").unwrap();
    println!("Saved graph_from_ron.png ({} nodes)", graph.len());
}

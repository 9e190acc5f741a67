use noisegraph::modifiers::{Cache, Clamp, ScaleBias, Select, Terrace, Turbulence};
use noisegraph::render::write_png;
use noisegraph::{
    Billow, ColorGradient, Module, NodeId, NoiseGraph, NoiseMapBuilder, Perlin, PlaneMapBuilder,
    RidgedMulti, SphereMapBuilder,
};

// Mountains, rolling hills and flat lowlands, picked by a low-frequency
// terrain-type map and roughened with turbulence.
fn build_terrain(seed: i32) -> (NoiseGraph, NodeId) {
    let mut g = NoiseGraph::new();

    let ridges = g.add_named("mountains", RidgedMulti::new(seed).with_frequency(1.5));
    let mountains = g
        .add_with_sources(ScaleBias::new(0.75, 0.25), &[ridges])
        .unwrap();

    let billow = g.add(Billow::new(seed + 1).with_frequency(2.0).with_persistence(0.35));
    let hills = g
        .add_with_sources(ScaleBias::new(0.25, -0.25), &[billow])
        .unwrap();
    let mut steps = Terrace::new();
    steps.make_control_points(6).unwrap();
    let terraced = g.add_with_sources(steps, &[hills]).unwrap();

    let plains = g.add(Perlin::new(seed + 2).with_frequency(0.5));
    let lowlands = g
        .add_with_sources(ScaleBias::new(0.125, -0.6), &[plains])
        .unwrap();

    let kind = g.add_named("terrain type", Perlin::new(seed + 3).with_frequency(0.4));
    let kind = g.add_with_sources(Cache::new(), &[kind]).unwrap();

    let highlands = g
        .add_with_sources(
            Select::new(0.0, 1000.0).unwrap().with_edge_falloff(0.2),
            &[terraced, mountains, kind],
        )
        .unwrap();
    let land = g
        .add_with_sources(
            Select::new(-0.4, 1000.0).unwrap().with_edge_falloff(0.1),
            &[lowlands, highlands, kind],
        )
        .unwrap();

    let rough = g
        .add_with_sources(Turbulence::new(seed + 4).with_frequency(4.0).with_power(0.06), &[land])
        .unwrap();
    let root = g
        .add_with_sources(Clamp::new(-1.0, 1.0).unwrap(), &[rough])
        .unwrap();
    g.set_name(root, "terrain").unwrap();
    (g, root)
}

fn main() {
    let (graph, root) = build_terrain(2025);
    graph.validate(root).unwrap();
    let terrain = graph.handle(root);
    let gradient = ColorGradient::terrain();

    let plane = PlaneMapBuilder::new(512, 512)
        .unwrap()
        .with_bounds(0.0, 6.0, 0.0, 6.0)
        .unwrap();
    let map = plane
        .build_with_progress(&terrain, &mut |row| {
            if row % 128 == 0 {
                println!("plane row {row}");
            }
        })
        .unwrap();
    write_png(&map, &gradient, "terrain_final.png").unwrap();
    println!("Saved final terrain image to terrain_final.png");

    let globe = SphereMapBuilder::new(512, 256).unwrap();
    let map = globe.build(&terrain).unwrap();
    write_png(&map, &gradient, "terrain_globe.png").unwrap();
    println!("Saved globe image to terrain_globe.png");

    std::fs::write("terrain_graph.ron", graph.to_ron().unwrap()).unwrap();
    println!("Saved graph description to terrain_graph.ron");
}

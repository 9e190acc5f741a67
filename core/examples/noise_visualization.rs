use noisegraph::{
    Billow, Checkerboard, Cylinders, DistanceFunction, NoiseGenerator, NoiseMapBuilder, Perlin,
    PlaneMapBuilder, RidgedMulti, Spheres, Voronoi,
};
use std::path::Path;

// Sample one generator over [-2, 2]² and save it as a grayscale PNG.
fn save_generator(generator: &dyn NoiseGenerator, size: usize, filename: &str) {
    let builder = PlaneMapBuilder::new(size, size)
        .unwrap()
        .with_bounds(-2.0, 2.0, -2.0, 2.0)
        .unwrap();
    let map = builder.build(generator).unwrap();
    let (min, max) = map.min_max().unwrap();
    map.to_gray_image().save(Path::new(filename)).unwrap();
    println!("Saved {} (range {:.3}..{:.3})", filename, min, max);
}

fn main() {
    let size = 256;
    save_generator(&Perlin::new(42), size, "perlin.png");
    save_generator(&Billow::new(42), size, "billow.png");
    save_generator(&RidgedMulti::new(42), size, "ridged_multi.png");
    save_generator(&Voronoi::new(42).with_frequency(2.0), size, "voronoi.png");
    save_generator(
        &Voronoi::new(42)
            .with_frequency(2.0)
            .with_distance(true)
            .with_distance_function(DistanceFunction::Manhattan),
        size,
        "voronoi_manhattan.png",
    );
    save_generator(&Checkerboard, size, "checkerboard.png");
    save_generator(&Cylinders::new(2.0), size, "cylinders.png");
    save_generator(&Spheres::new(2.0), size, "spheres.png");
}

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use noisegraph::modifiers::{Cache, Select, Terrace, Turbulence};
use noisegraph::{
    Billow, Constant, Module, NoiseError, NoiseGenerator, NoiseGraph, Perlin, RidgedMulti,
    Voronoi,
};

// Perlin that counts how often it is sampled.
struct Counting {
    inner: Perlin,
    calls: Arc<AtomicUsize>,
}

impl NoiseGenerator for Counting {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get3(x, y, z)
    }

    fn get6(&self, x: f64, y: f64, z: f64, w: f64, u: f64, v: f64) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get6(x, y, z, w, u, v)
    }
}

fn counting(graph: &mut NoiseGraph, seed: i32) -> (noisegraph::NodeId, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let id = graph.add(Module::custom(Counting {
        inner: Perlin::new(seed),
        calls: Arc::clone(&calls),
    }));
    (id, calls)
}

#[test]
fn cache_evaluates_child_once_per_point() {
    let mut g = NoiseGraph::new();
    let (leaf, calls) = counting(&mut g, 3);
    let cache = g.add_with_sources(Cache::new(), &[leaf]).unwrap();

    let first = g.get3(cache, 0.25, 0.5, 0.75);
    for _ in 0..5 {
        assert_eq!(g.get3(cache, 0.25, 0.5, 0.75), first);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    g.get3(cache, 1.25, 0.5, 0.75);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // Back to the first point: only one value is remembered.
    assert_eq!(g.get3(cache, 0.25, 0.5, 0.75), first);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    // 6D points never match 3D ones.
    g.get6(cache, 0.25, 0.5, 0.75, 0.0, 0.0, 0.0);
    g.get6(cache, 0.25, 0.5, 0.75, 0.0, 0.0, 0.0);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn cache_forgets_after_source_change() {
    let mut g = NoiseGraph::new();
    let (a, a_calls) = counting(&mut g, 1);
    let (b, b_calls) = counting(&mut g, 2);
    let cache = g.add_with_sources(Cache::new(), &[a]).unwrap();

    let from_a = g.get3(cache, 0.3, 0.3, 0.3);
    g.set_source(cache, 0, b).unwrap();
    let from_b = g.get3(cache, 0.3, 0.3, 0.3);

    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    assert_eq!(from_b, Perlin::new(2).get3(0.3, 0.3, 0.3));
    assert_ne!(from_a, from_b);
}

#[test]
fn blend_extremes_pick_a_source() {
    let mut g = NoiseGraph::new();
    let p = g.add(Perlin::new(10));
    let b = g.add(Billow::new(11));
    let low = g.add(Constant::new(-1.0));
    let high = g.add(Constant::new(1.0));
    let to_p = g.add_with_sources(Module::Blend, &[p, b, low]).unwrap();
    let to_b = g.add_with_sources(Module::Blend, &[p, b, high]).unwrap();

    for i in 0..50 {
        let (x, y, z) = (i as f64 * 0.37, i as f64 * -0.11, 0.5 + i as f64 * 0.07);
        assert_eq!(g.get3(to_p, x, y, z), g.get3(p, x, y, z));
        assert_eq!(g.get3(to_b, x, y, z), g.get3(b, x, y, z));
    }
}

#[test]
fn select_falloff_regions() {
    let mut g = NoiseGraph::new();
    let s0 = g.add(Perlin::new(1));
    let s1 = g.add(RidgedMulti::new(2));
    let control = g.add(Constant::new(0.0));
    let select = Select::new(0.5, 0.8).unwrap().with_edge_falloff(0.1);
    let sel = g.add_with_sources(select, &[s0, s1, control]).unwrap();
    let (x, y, z) = (0.41, 1.7, -2.2);

    let mut at = |value: f64| {
        if let Some(Module::Constant(c)) = g.module_mut(control) {
            c.value = value;
        }
        g.get3(sel, x, y, z)
    };
    let below = at(0.3);
    let inside = at(0.65);
    let edge = at(0.4);
    let blended = at(0.5);

    let v0 = Perlin::new(1).get3(x, y, z);
    let v1 = RidgedMulti::new(2).get3(x, y, z);
    assert_eq!(below, v0);
    assert_eq!(inside, v1);
    assert!((edge - v0).abs() < 1e-9);
    // Halfway through the lower edge both sources weigh the same.
    assert!((blended - (v0 + v1) / 2.0).abs() < 1e-9);
}

#[test]
fn terrace_is_exact_at_control_points() {
    let mut terrace = Terrace::new();
    terrace.make_control_points(5).unwrap();
    let points = terrace.control_points().to_vec();

    let mut g = NoiseGraph::new();
    let c = g.add(Constant::new(0.0));
    let t = g.add_with_sources(terrace, &[c]).unwrap();
    for p in points {
        if let Some(Module::Constant(k)) = g.module_mut(c) {
            k.value = p;
        }
        assert_eq!(g.get3(t, 0.0, 0.0, 0.0), p);
    }
}

#[test]
#[should_panic(expected = "missing source")]
fn unwired_node_fails_fast() {
    let mut g = NoiseGraph::new();
    let p = g.add(Perlin::default());
    let d = g.add_with_sources(Module::Displace, &[p]).unwrap();
    g.get3(d, 0.1, 0.2, 0.3);
}

#[test]
fn wiring_errors_are_reported() {
    let mut g = NoiseGraph::new();
    let a = g.add(Module::Invert);
    let b = g.add_with_sources(Module::Abs, &[a]).unwrap();
    assert!(matches!(g.set_source(a, 0, b), Err(NoiseError::Cycle { .. })));
    assert!(matches!(
        g.add_with_sources(Module::Abs, &[a, b]),
        Err(NoiseError::SourceIndexOutOfRange { .. })
    ));
}

#[test]
fn graph_matches_direct_generators() {
    let mut g = NoiseGraph::new();
    let turbulence = Turbulence::new(4).with_power(0.125);
    let v = g.add(Voronoi::new(9).with_frequency(2.0));
    let t = g.add_with_sources(turbulence.clone(), &[v]).unwrap();
    let (x, y, z) = (0.7, -0.2, 3.1);
    let [tx, ty, tz] = turbulence.apply([x, y, z]);
    assert_eq!(g.get3(t, x, y, z), Voronoi::new(9).with_frequency(2.0).get3(tx, ty, tz));
}

#[test]
fn sampling_from_several_threads() {
    let mut g = NoiseGraph::new();
    let base = g.add(Perlin::new(21));
    let ridges = g.add(RidgedMulti::new(22));
    let sum = g.add_with_sources(Module::Add, &[base, ridges]).unwrap();
    let cache = g.add_with_sources(Cache::new(), &[sum]).unwrap();

    let points: Vec<[f64; 3]> = (0..64)
        .map(|i| [i as f64 * 0.13, (i % 7) as f64 * 0.29, (i % 5) as f64 * -0.41])
        .collect();
    let expected: Vec<f64> = points.iter().map(|&[x, y, z]| g.get3(sum, x, y, z)).collect();

    let graph = &g;
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for (p, &want) in points.iter().zip(&expected) {
                    assert_eq!(graph.get3(cache, p[0], p[1], p[2]), want);
                }
            });
        }
    });
}

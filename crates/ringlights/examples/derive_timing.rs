//! Derivation timing probe for the shipped polytopes.
//!
//! Purpose
//! - Reproducible data point for "how long does a shape switch cost?": one
//!   full derivation plus one frame per shape.
//! - Prints the derived counts next to the timings so a regression in either
//!   shows up in the same line.

use std::time::Instant;

use ringlights::api::{build_frame, default_initial_orientation, Shape, TopologyCfg};

fn main() {
    let cfg = TopologyCfg::default();
    let m = default_initial_orientation();
    for shape in Shape::ALL {
        let start = Instant::now();
        let d = shape.derive(&cfg).expect("shipped shapes derive");
        let derive_ms = start.elapsed().as_secs_f64() * 1e3;

        let states = vec![false; d.ring_count()];
        let start = Instant::now();
        let frame = build_frame(&d, &m, &states, 16);
        let frame_ms = start.elapsed().as_secs_f64() * 1e3;
        let points: usize = frame.rings.iter().map(|r| r.points.len()).sum();

        println!(
            "shape={} vertices={} edges={} rings={} bundles={} points={points}",
            d.name(),
            d.vertex_count(),
            d.edges().len(),
            d.ring_count(),
            d.bundle_count()
        );
        println!("derive_time_ms={derive_ms:.3} frame_time_ms={frame_ms:.3}");
    }
}

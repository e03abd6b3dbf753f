use std::time::Instant;

use crate::simulation::engine::{step, step_parallel};
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::states::{Body, NVec2};

/// Deterministic ring-ish cloud of `n` bodies, no rand needed
pub fn make_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec2::new((i_f * 0.37).sin() * 1.0e11, (i_f * 0.13).cos() * 1.0e11);
            let v = NVec2::new(-(i_f * 0.13).cos() * 1.0e4, (i_f * 0.37).sin() * 1.0e4);
            if i == 0 {
                Body::star(2.0e30, NVec2::zeros(), NVec2::zeros())
            } else {
                Body::planet(6.0e24, x, v)
            }
        })
        .collect()
}

/// Time one force phase, sequential vs rayon, for growing `n`
pub fn bench_gravity() {
    let ns = [100, 200, 400, 800, 1600, 3200];
    let gravity = NewtonianGravity::default();

    for n in ns {
        let bodies = make_bodies(n);
        let mut out = vec![NVec2::zeros(); n];

        // Warm up
        gravity.forces_into(&bodies, &mut out);
        gravity.forces_into_parallel(&bodies, &mut out);

        let t0 = Instant::now();
        gravity.forces_into(&bodies, &mut out);
        let dt_seq = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        gravity.forces_into_parallel(&bodies, &mut out);
        let dt_par = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, sequential = {:8.6} s, parallel = {:8.6} s", dt_seq, dt_par);
    }
}

/// Full steps per `n`, CSV to paste into a spreadsheet
pub fn bench_step_curve() {
    let gravity = NewtonianGravity::default();
    let dt = 1000.0;

    println!("N,sequential_ms,parallel_ms");

    for n in (200..=3200).step_by(200) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 5 } else { 1 };
        let template = make_bodies(n);

        let mut seq = template.clone();
        let t0 = Instant::now();
        for _ in 0..steps {
            step(&mut seq, &gravity, dt);
        }
        let ms_seq = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut par = template;
        let t1 = Instant::now();
        for _ in 0..steps {
            step_parallel(&mut par, &gravity, dt);
        }
        let ms_par = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_seq, ms_par);
    }
}

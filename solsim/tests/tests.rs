use solsim::simulation::states::{Body, BodyKind, System, NVec2};
use solsim::simulation::forces::NewtonianGravity;
use solsim::simulation::integrator::advance;
use solsim::simulation::engine::{step, Simulation, Engine};
use solsim::simulation::scenario::Scenario;
use solsim::configuration::config::ScenarioConfig;
use solsim::persistence::snapshot::{read_bodies, write_bodies};
use solsim::persistence::trajectory::{read_trajectory, TrajectoryLog};
use solsim::analysis::series::two_body_series;

/// Two bodies of mass `m` at (0, 0) and (dist, 0), at rest
pub fn resting_pair(dist: f64, m: f64) -> Vec<Body> {
    vec![
        Body::star(m, NVec2::new(0.0, 0.0), NVec2::zeros()),
        Body::star(m, NVec2::new(dist, 0.0), NVec2::zeros()),
    ]
}

/// Three non-collinear bodies with distinct masses and velocities
pub fn triangle() -> Vec<Body> {
    vec![
        Body::star(2.0e30, NVec2::new(0.0, 0.0), NVec2::new(0.0, -10.0)),
        Body::planet(6.0e24, NVec2::new(1.5e11, 0.0), NVec2::new(0.0, 3.0e4)),
        Body::planet(6.4e23, NVec2::new(-2.0e11, 1.0e10), NVec2::new(1.0e3, -2.4e4)),
    ]
}

pub fn gravity() -> NewtonianGravity {
    NewtonianGravity::default()
}

// ==================================================================================
// Force tests
// ==================================================================================

#[test]
fn lone_body_has_zero_force() {
    let bodies = vec![Body::planet(5.0e24, NVec2::new(3.0, 4.0), NVec2::zeros())];
    assert_eq!(gravity().compute_force(0, &bodies), NVec2::zeros());
}

#[test]
fn coincident_bodies_zero_out_despite_third_body() {
    let bodies = vec![
        Body::star(1.0e3, NVec2::new(2.0, 2.0), NVec2::zeros()),
        Body::planet(1.0e3, NVec2::new(2.0, 2.0), NVec2::zeros()),
        Body::planet(1.0e6, NVec2::new(10.0, -3.0), NVec2::zeros()),
    ];
    let g = gravity();
    assert_eq!(g.compute_force(0, &bodies), NVec2::zeros());
    assert_eq!(g.compute_force(1, &bodies), NVec2::zeros());
}

#[test]
fn newton_third_law_for_unequal_masses() {
    let bodies = vec![
        Body::star(7.0e29, NVec2::new(-3.0e10, 1.0e10), NVec2::zeros()),
        Body::planet(2.0e24, NVec2::new(4.0e10, -5.0e10), NVec2::zeros()),
    ];
    let g = gravity();
    let f_ab = g.compute_force(0, &bodies);
    let f_ba = g.compute_force(1, &bodies);

    let net = f_ab + f_ba;
    assert!(net.norm() <= 1e-12 * f_ab.norm(), "Forces not opposite: {:?} vs {:?}", f_ab, f_ba);
    assert!((f_ab.norm() - f_ba.norm()).abs() <= 1e-12 * f_ab.norm());
}

#[test]
fn force_points_toward_other_body() {
    let bodies = resting_pair(2.0, 1.0e3);
    let f = gravity().compute_force(0, &bodies);
    let dx = bodies[1].x - bodies[0].x;
    assert!(f.dot(&dx) > 0.0, "Force is not toward second body");
}

#[test]
fn inverse_square_law() {
    let near = resting_pair(1.0, 1.0e3);
    let far = resting_pair(2.0, 1.0e3);
    let ratio = gravity().compute_force(0, &near).norm() / gravity().compute_force(0, &far).norm();
    assert!((ratio - 4.0).abs() < 1e-12, "Expected 4x, got {}", ratio);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn massless_body_ignores_any_force() {
    let mut b = Body::planet(0.0, NVec2::new(1.0, 1.0), NVec2::new(-2.0, 0.5));
    b.f = NVec2::new(1.0e20, 3.0e20);
    advance(&mut b, 60.0);
    assert_eq!(b.v, NVec2::new(-2.0, 0.5));
}

#[test]
fn massless_body_keeps_velocity_through_a_step() {
    let mut bodies = triangle();
    bodies[2].m = 0.0;
    let v0 = bodies[2].v;
    step(&mut bodies, &gravity(), 3600.0);
    assert_eq!(bodies[2].v, v0);
}

#[test]
fn equal_masses_accelerate_toward_each_other() {
    let mut bodies = resting_pair(1.0, 1000.0);
    step(&mut bodies, &gravity(), 1.0);

    let (a, b) = (&bodies[0], &bodies[1]);
    assert!(a.v.x > 0.0);
    assert!(b.v.x < 0.0);
    assert_eq!(a.v.x.abs(), b.v.x.abs());
    assert_eq!(a.v.y, 0.0);
    assert_eq!(b.v.y, 0.0);
}

#[test]
fn integrator_reproduces_averaged_update() {
    // a = G m / r^2 with G m = 1 => a = 1 along x for body 0
    let mut bodies = resting_pair(1.0, 1.0);
    bodies[0].v = NVec2::new(0.0, 2.0);
    let g = NewtonianGravity::new(1.0);
    step(&mut bodies, &g, 0.5);

    // x = x1 + dt (v + v + a dt) / 2 + a dt^2 / 2
    assert_eq!(bodies[0].x, NVec2::new(0.125 + 0.125, 1.0));
    assert_eq!(bodies[0].v, NVec2::new(0.5, 2.0));
}

// ==================================================================================
// Stepper tests
// ==================================================================================

#[test]
fn step_is_independent_of_collection_order() {
    let forward = triangle();
    let mut reversed: Vec<Body> = forward.iter().rev().cloned().collect();
    let mut forward = forward;

    let g = gravity();
    step(&mut forward, &g, 3600.0);
    step(&mut reversed, &g, 3600.0);

    for (i, b) in forward.iter().enumerate() {
        let r = &reversed[forward.len() - 1 - i];
        assert_eq!(b.x, r.x, "position of body {i} differs");
        assert_eq!(b.v, r.v, "velocity of body {i} differs");
    }
}

#[test]
fn center_of_mass_velocity_is_conserved() {
    let mut bodies = resting_pair(1.0, 1000.0);
    bodies[0].v = NVec2::new(0.0, 1.0e-4);
    bodies[1].v = NVec2::new(0.0, -1.0e-4);

    let mut sim = Simulation::new(Engine::default(), gravity(), System::new(bodies));
    let v0 = sim.system.center_of_mass_velocity();
    for _ in 0..1000 {
        sim.step(1.0);
    }
    let drift = (sim.system.center_of_mass_velocity() - v0).norm();
    assert!(drift < 1e-15, "Centre of mass drifted by {}", drift);
    assert_eq!(sim.system.t, 1000.0);
}

#[test]
fn parallel_force_phase_gives_identical_trajectory() {
    let mut seq = Simulation::new(Engine { parallel: false }, gravity(), System::new(triangle()));
    let mut par = Simulation::new(Engine { parallel: true }, gravity(), System::new(triangle()));
    for _ in 0..100 {
        seq.step(3600.0);
        par.step(3600.0);
    }
    assert_eq!(seq.system.bodies, par.system.bodies);
}

// ==================================================================================
// Persistence tests
// ==================================================================================

#[test]
fn snapshot_round_trip() {
    let mut bodies = triangle();
    bodies[1].color = "green".to_string();
    bodies[2].radius = 12;
    step(&mut bodies, &gravity(), 3600.0);

    let mut buf = Vec::new();
    write_bodies(&mut buf, &bodies).unwrap();
    let parsed = read_bodies(buf.as_slice()).unwrap();

    assert_eq!(parsed.len(), bodies.len());
    for (a, b) in bodies.iter().zip(&parsed) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.radius, b.radius);
        assert_eq!(a.color, b.color);
        assert_eq!(a.m, b.m);
        assert_eq!(a.x, b.x);
        assert_eq!(a.v, b.v);
    }
}

#[test]
fn logged_run_yields_plot_series() {
    let yaml = "
parameters:
  dt: 1.0
  steps: 10
  log_every: 5
files:
  initial: unused.txt
";
    let cfg = ScenarioConfig::from_reader(yaml.as_bytes()).unwrap();
    let mut sc = Scenario::from_bodies(cfg, resting_pair(1.0, 1000.0));

    let mut log = TrajectoryLog::new(Vec::new(), &sc.system().bodies).unwrap();
    sc.run_with(&mut log).unwrap();
    assert_eq!(log.records(), 2);
    let bytes = log.finish().unwrap();

    let traj = read_trajectory(bytes.as_slice()).unwrap();
    assert_eq!(traj.legend[0].kind, BodyKind::Star);
    let series = two_body_series(&traj).unwrap();
    assert_eq!(series.t, vec![5.0, 10.0]);
    // the pair is falling together
    assert!(series.r[1] < series.r[0]);
    assert!(series.r[0] < 1.0);
    assert!(series.v[1] > series.v[0]);
}

#[test]
fn scenario_run_writes_files() {
    let dir = std::env::temp_dir().join(format!("solsim-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("pair.txt"),
        "# pair\nStar 10 red 1000 0 0 0 0\nplanet 3 blue 1000 1 0 0 0\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("pair.yaml"),
        "parameters:\n  dt: 1.0\n  steps: 3\nfiles:\n  initial: pair.txt\n  stats: stats.txt\n  snapshot: final.txt\n",
    )
    .unwrap();

    let cfg = ScenarioConfig::load(&dir.join("pair.yaml")).unwrap();
    let mut sc = Scenario::build_scenario(cfg).unwrap();
    sc.run().unwrap();

    let stats = std::fs::read_to_string(dir.join("stats.txt")).unwrap();
    assert!(stats.starts_with("Star 10 red\nPlanet 3 blue\n#End of the header\n\n1\n"));
    let traj = read_trajectory(stats.as_bytes()).unwrap();
    assert_eq!(traj.frames.len(), 3);

    let final_bodies = read_bodies(std::fs::read_to_string(dir.join("final.txt")).unwrap().as_bytes()).unwrap();
    assert_eq!(final_bodies[1].kind, BodyKind::Planet);
    assert_eq!(final_bodies[0].x, sc.system().bodies[0].x);

    std::fs::remove_dir_all(&dir).ok();
}

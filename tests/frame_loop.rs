//! End-to-end frame loop tests.
//!
//! These drive the population and the compositor together the way the
//! window does, without a GPU.

use swirlfx::{
    fade_alpha, AppConfig, Canvas, Compositor, FrameBuffer, Params, Particle, Population, Rgba,
    Simulation, Style, Vec2, MAX_FRAME_DT,
};

fn quiet_params() -> Params {
    Params {
        emitter_center: Vec2::new(50.0, 50.0),
        emitter_radius: 10.0,
        velocity_radius: 0.0,
        lifetime: 2.0,
        rotate: 0.0,
        force: 0.0,
        spin: 0.0,
        friction: 0.0,
        history: 0.9,
        birth_rate: 0.0,
    }
}

// ============================================================================
// Lifetime
// ============================================================================

#[test]
fn test_particle_dies_when_age_reaches_lifetime() {
    // 1/16 s is exact in binary, so 32 steps sum to exactly 2.0.
    const STEP: f32 = 0.0625;
    let params = quiet_params();
    let mut population = Population::with_seed(1);
    population.push(Particle {
        alive: true,
        position: params.emitter_center,
        lifetime: 2.0,
        ..Particle::default()
    });

    for _ in 0..31 {
        let report = population.tick(STEP, &params);
        assert_eq!(report.live, 1);
    }
    assert!(population.particles()[0].alive);
    assert_eq!(population.particles()[0].age, 1.9375);

    let report = population.tick(STEP, &params);
    assert_eq!(report.live, 0);
    assert_eq!(population.len(), 1, "dead particles wait for the next reap");
    assert!(!population.particles()[0].alive);
    assert_eq!(population.particles()[0].age, 2.0);

    let report = population.tick(STEP, &params);
    assert_eq!(report.reaped, 1);
    assert!(population.is_empty());
}

#[test]
fn test_lifetime_is_snapshotted_at_spawn() {
    let mut params = quiet_params();
    params.birth_rate = 10.0;
    let mut population = Population::with_seed(2);
    population.tick(0.1, &params);
    assert_eq!(population.len(), 1);

    params.lifetime = 50.0;
    population.tick(0.0, &params);
    assert_eq!(population.particles()[0].lifetime, 2.0);
}

// ============================================================================
// Births
// ============================================================================

#[test]
fn test_births_at_unit_step() {
    let mut params = quiet_params();
    params.birth_rate = 5.0;
    let mut population = Population::with_seed(3);

    assert_eq!(population.spawn_for(1.0, &params), 5);
    assert!(population.birth_accumulator().abs() < 1e-6);
}

#[test]
fn test_tick_clamps_large_steps() {
    let mut params = quiet_params();
    params.birth_rate = 30.0;
    let mut population = Population::with_seed(4);

    let report = population.tick(5.0, &params);
    assert_eq!(report.dt, MAX_FRAME_DT);
    assert_eq!(report.spawned, 3);
}

#[test]
fn test_spawned_particles_start_in_emitter() {
    let mut params = quiet_params();
    params.birth_rate = 30.0;
    params.velocity_radius = 0.0;
    let mut population = Population::with_seed(5);

    for _ in 0..20 {
        population.tick(0.1, &params);
    }
    assert!(!population.is_empty());
    for particle in population.iter() {
        let offset = particle.position - params.emitter_center;
        assert!(offset.length() <= params.emitter_radius + 1e-3);
    }
}

// ============================================================================
// Trails
// ============================================================================

#[test]
fn test_fade_alpha_from_history() {
    assert_eq!(fade_alpha(0.9), 25);
    assert_eq!(fade_alpha(0.0), 255);
    assert_eq!(fade_alpha(1.0), 0);
    assert_eq!(fade_alpha(5.0), 0);
    assert_eq!(fade_alpha(-10.0), 255);
}

#[test]
fn test_zero_history_replaces_trails_with_fade_color() {
    let mut compositor = Compositor::new(16, 16, Style::default());
    compositor.fade(0.0);
    assert!(compositor.buffer().pixels().iter().all(|p| *p == Rgba::WHITE));
}

#[test]
fn test_full_history_keeps_trails() {
    let mut compositor = Compositor::new(16, 16, Style::default());
    compositor.fade(1.0);
    assert!(compositor.buffer().pixels().iter().all(|p| *p == Rgba::BLACK));
}

#[test]
fn test_trails_decay_towards_fade_color() {
    let params = quiet_params();
    let mut compositor = Compositor::new(100, 100, Style { particle_scale: 4.0, ..Style::default() });
    let mut population = Population::with_seed(6);
    population.push(Particle {
        alive: true,
        position: params.emitter_center,
        age: 1.0,
        lifetime: 2.0,
        ..Particle::default()
    });

    compositor.present(&population, &params);
    let center = compositor.buffer().pixel(50, 50).unwrap();
    assert_ne!(center, Rgba::BLACK);

    population.clear();
    let mut previous = center;
    for _ in 0..5 {
        compositor.present(&population, &params);
        let current = compositor.buffer().pixel(50, 50).unwrap();
        let gap = |c: Rgba| (1.0 - c.r) + (1.0 - c.g) + (1.0 - c.b);
        assert!(gap(current) < gap(previous));
        previous = current;
    }
}

#[test]
fn test_clear_restores_background() {
    let mut sim = Simulation::new(AppConfig {
        params: Params { birth_rate: 30.0, lifetime: 1.0, ..Params::default() },
        width: 80,
        height: 60,
        seed: Some(7),
        ..AppConfig::default()
    });
    for _ in 0..20 {
        sim.frame(1.0 / 30.0);
    }
    assert!(sim.buffer().pixels().iter().any(|p| *p != Rgba::BLACK));

    sim.clear_screen();
    assert!(sim.buffer().pixels().iter().all(|p| *p == Rgba::BLACK));
    assert!(!sim.population().is_empty(), "clearing keeps particles");
}

#[test]
fn test_same_seed_same_frames() {
    let config = AppConfig {
        params: Params { birth_rate: 20.0, lifetime: 3.0, spin: 90.0, ..Params::default() },
        width: 64,
        height: 64,
        seed: Some(99),
        ..AppConfig::default()
    };
    let mut a = Simulation::new(config.clone());
    let mut b = Simulation::new(config);
    for _ in 0..40 {
        a.frame(1.0 / 60.0);
        b.frame(1.0 / 60.0);
    }
    assert_eq!(a.population().particles(), b.population().particles());
    assert_eq!(a.buffer().pixels(), b.buffer().pixels());
}

#[test]
fn test_frame_buffer_as_canvas() {
    let mut buffer = FrameBuffer::new(8, 8, Rgba::BLACK);
    buffer.fill_disk(Vec2::new(4.0, 4.0), 2.0, Rgba::WHITE);
    assert_eq!(buffer.pixel(4, 4), Some(Rgba::WHITE));
    assert_eq!(buffer.pixel(0, 0), Some(Rgba::BLACK));

    buffer.clear(Rgba::BLACK);
    assert_eq!(buffer.pixel(4, 4), Some(Rgba::BLACK));
}

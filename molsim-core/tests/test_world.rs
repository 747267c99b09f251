//! World-level behaviour: containment, resize, size factor, statistics

use glam::Vec2;
use molsim_core::tests::test_helpers::{
    approx_eq_f32, quiet_world, seeded_rng, size_factor_for_radius, spawn_all, vec_approx_eq,
};
use molsim_core::{Bounds, IntegrationMode, Preset, Stats, World, FORCE_CAP, SPEED_CAP};

fn assert_contained(world: &World) {
    let bounds = world.bounds();
    for p in world.particles() {
        let lo = bounds.min() + Vec2::splat(p.radius);
        let hi = bounds.max() - Vec2::splat(p.radius);
        assert!(
            p.pos.x >= lo.x - 1e-3 && p.pos.x <= hi.x + 1e-3,
            "x out of bounds: {:?}",
            p.pos
        );
        assert!(
            p.pos.y >= lo.y - 1e-3 && p.pos.y <= hi.y + 1e-3,
            "y out of bounds: {:?}",
            p.pos
        );
    }
}

#[test]
fn test_empty_world_step_is_all_zero() {
    let mut world = World::new(Bounds::from_size(300.0, 300.0));
    let stats = world.step(1.0 / 60.0);
    assert_eq!(stats, Stats::default());
    assert_eq!(stats.temperature, 0.0);
    assert_eq!(stats.total_energy, 0.0);
    assert_eq!(stats.pressure, 0.0);
}

#[test]
fn test_gravity_pulls_down() {
    let mut world = quiet_world(400.0);
    world.set_gravity(10.0);
    spawn_all(&mut world, &[(Vec2::new(200.0, 300.0), Vec2::ZERO)]);

    world.step(0.1);

    let p = &world.particles()[0];
    assert!(approx_eq_f32(p.vel.y, -1.0, 1e-5));
    assert!(approx_eq_f32(p.pos.y, 300.0 - 0.05, 1e-4));
    assert_eq!(p.force, Vec2::new(0.0, -10.0));
}

#[test]
fn test_caps_hold_every_step() {
    let mut world = World::new(Bounds::from_size(480.0, 360.0));
    world.set_gravity(10.0);
    world.set_epsilon(10.0);
    world.set_sigma(3.0);
    let mut rng = seeded_rng(11);
    Preset::Solid.populate(&mut world, &mut rng);

    for _ in 0..200 {
        world.tick();
        for p in world.particles() {
            assert!(p.speed() <= SPEED_CAP + 1e-2);
            assert!(p.force.length() <= FORCE_CAP + 1.0);
        }
        assert_contained(&world);
    }
}

#[test]
fn test_gas_stays_inside_bounds() {
    let mut world = World::new(Bounds::new(Vec2::new(-50.0, 30.0), Vec2::new(300.0, 200.0)));
    world.set_gravity(5.0);
    let mut rng = seeded_rng(5);
    Preset::Gas.populate(&mut world, &mut rng);
    assert!(world.particle_count() > 0);

    for _ in 0..500 {
        world.tick();
        assert_contained(&world);
    }
}

#[test]
fn test_wall_reflects_velocity() {
    let mut world = quiet_world(100.0);
    // radius 1.8; heading straight into the right wall
    spawn_all(&mut world, &[(Vec2::new(97.0, 50.0), Vec2::new(120.0, 0.0))]);

    world.step(1.0 / 60.0);

    let p = &world.particles()[0];
    assert!(p.vel.x < 0.0);
    assert!(p.pos.x <= 100.0 - p.radius + 1e-4);
}

#[test]
fn test_resize_keeps_center_at_center() {
    let mut world = quiet_world(200.0);
    spawn_all(&mut world, &[(Vec2::new(100.0, 100.0), Vec2::ZERO)]);

    world.resize(Vec2::ZERO, Vec2::new(400.0, 400.0));

    let p = &world.particles()[0];
    assert!(vec_approx_eq(p.pos, Vec2::new(200.0, 200.0), 1e-4));
    assert_eq!(world.bounds(), Bounds::from_size(400.0, 400.0));
}

#[test]
fn test_resize_remaps_fraction_and_scales_velocity() {
    let mut world = quiet_world(200.0);
    spawn_all(&mut world, &[(Vec2::new(50.0, 150.0), Vec2::new(10.0, -4.0))]);

    world.resize(Vec2::new(100.0, 50.0), Vec2::new(400.0, 100.0));

    let p = &world.particles()[0];
    // fraction (0.25, 0.75) of the new box
    assert!(vec_approx_eq(p.pos, Vec2::new(200.0, 125.0), 1e-3));
    assert!(vec_approx_eq(p.vel, Vec2::new(20.0, -2.0), 1e-4));
    // radius tracks the new width: 400 * 0.03 * 0.6
    assert!(approx_eq_f32(p.radius, 7.2, 1e-4));
}

#[test]
fn test_resize_reclamps_into_new_bounds() {
    let mut world = quiet_world(200.0);
    // radius 3.6 in the old box; resting on the floor
    spawn_all(&mut world, &[(Vec2::new(100.0, 3.6), Vec2::ZERO)]);

    // wider box grows the radius to 18 while the flatter box maps the
    // center to y = 1.8, so it must be pushed back up off the floor
    world.resize(Vec2::ZERO, Vec2::new(1000.0, 100.0));

    let p = &world.particles()[0];
    assert!(approx_eq_f32(p.radius, 18.0, 1e-3));
    assert!(approx_eq_f32(p.pos.x, 500.0, 1e-3));
    assert!(approx_eq_f32(p.pos.y, 18.0, 1e-3));
}

#[test]
fn test_resize_caps_scaled_velocity() {
    let mut world = quiet_world(100.0);
    spawn_all(&mut world, &[(Vec2::new(50.0, 50.0), Vec2::new(400.0, 0.0))]);

    world.resize(Vec2::ZERO, Vec2::new(1000.0, 1000.0));

    assert!(world.particles()[0].speed() <= SPEED_CAP + 1e-3);
}

#[test]
fn test_size_factor_rescales_existing_molecules_only() {
    let mut world = quiet_world(500.0);
    spawn_all(
        &mut world,
        &[
            (Vec2::new(100.0, 100.0), Vec2::ZERO),
            (Vec2::new(300.0, 100.0), Vec2::ZERO),
        ],
    );

    world.set_size_factor(1.0);
    for p in world.particles() {
        assert!(approx_eq_f32(p.radius, 15.0, 1e-4));
    }
    assert_eq!(world.particles()[0].pos, Vec2::new(100.0, 100.0));

    world.set_size_factor(0.01);
    assert!(approx_eq_f32(world.params().size_factor(), 0.2, 1e-6));
    for p in world.particles() {
        assert!(approx_eq_f32(p.radius, 3.0, 1e-4));
    }
}

#[test]
fn test_size_factor_helper_gives_requested_radius() {
    let mut world = quiet_world(500.0);
    world.set_size_factor(size_factor_for_radius(500.0, 10.0));
    assert!(approx_eq_f32(world.molecule_radius(), 10.0, 1e-4));
}

#[test]
fn test_statistics_match_velocities() {
    let mut world = quiet_world(500.0);
    spawn_all(
        &mut world,
        &[
            (Vec2::new(100.0, 250.0), Vec2::new(30.0, 40.0)),
            (Vec2::new(400.0, 250.0), Vec2::new(-6.0, 8.0)),
        ],
    );

    let stats = world.step(1.0 / 60.0);

    // no forces: velocities unchanged
    assert!(approx_eq_f32(stats.total_energy, 0.5 * 2500.0 + 0.5 * 100.0, 1e-2));
    assert!(approx_eq_f32(stats.temperature, stats.total_energy / 2.0, 1e-3));
    assert!(approx_eq_f32(stats.pressure, 70.0 + 14.0, 1e-3));
    assert_eq!(stats.particle_count, 2);
}

#[test]
fn test_integration_modes_differ() {
    let run = |mode: IntegrationMode| {
        let mut world = quiet_world(500.0);
        world.set_gravity(10.0);
        world.set_integration_mode(mode);
        spawn_all(&mut world, &[(Vec2::new(250.0, 400.0), Vec2::ZERO)]);
        world.step(0.5);
        world.particles()[0].pos.y
    };
    let verlet = run(IntegrationMode::Verlet);
    let euler = run(IntegrationMode::SemiImplicitEuler);
    assert!(approx_eq_f32(verlet, 400.0 - 1.25, 1e-3));
    assert!(approx_eq_f32(euler, 400.0 - 2.5, 1e-3));
}

#[test]
fn test_toggling_integration_mode_changes_next_step() {
    let mut world = quiet_world(500.0);
    world.set_gravity(10.0);
    spawn_all(&mut world, &[(Vec2::new(250.0, 400.0), Vec2::ZERO)]);
    assert_eq!(world.params().integration_mode, IntegrationMode::Verlet);

    world.toggle_integration_mode();
    assert_eq!(
        world.params().integration_mode,
        IntegrationMode::SemiImplicitEuler
    );
    world.step(0.5);
    assert!(approx_eq_f32(world.particles()[0].pos.y, 400.0 - 2.5, 1e-3));

    world.toggle_integration_mode();
    assert_eq!(world.params().integration_mode, IntegrationMode::Verlet);
}

#[test]
fn test_toggling_intermolecular_forces() {
    let mut world = quiet_world(500.0);
    spawn_all(
        &mut world,
        &[
            (Vec2::new(200.0, 250.0), Vec2::ZERO),
            (Vec2::new(350.0, 250.0), Vec2::ZERO),
        ],
    );

    world.step(1.0 / 60.0);
    assert_eq!(world.particles()[0].force, Vec2::ZERO);
    assert_eq!(world.particles()[0].vel, Vec2::ZERO);

    world.toggle_intermolecular_forces();
    assert!(world.params().intermolecular_forces);
    world.step(1.0 / 60.0);
    let p = world.particles();
    // 1.5 sigma apart: attractive
    assert!(p[0].force.x > 0.0);
    assert!(p[1].force.x < 0.0);
    assert!(vec_approx_eq(p[0].force + p[1].force, Vec2::ZERO, 1e-3));

    world.toggle_intermolecular_forces();
    world.step(1.0 / 60.0);
    assert_eq!(world.particles()[0].force, Vec2::ZERO);
}

#[test]
fn test_force_arrows_follow_visibility() {
    let mut world = quiet_world(500.0);
    world.set_gravity(1.0);
    spawn_all(&mut world, &[(Vec2::new(250.0, 250.0), Vec2::ZERO)]);

    world.step(1.0 / 60.0);
    assert!(world.particles()[0].arrow().is_some());

    world.toggle_forces_visible();
    assert!(world.particles()[0].arrow().is_none());
    world.step(1.0 / 60.0);
    assert!(world.particles()[0].arrow().is_none());
}

#[test]
fn test_clear_all_removes_everything() {
    let mut world = quiet_world(500.0);
    let ids = spawn_all(
        &mut world,
        &[
            (Vec2::new(100.0, 100.0), Vec2::ZERO),
            (Vec2::new(200.0, 100.0), Vec2::ZERO),
        ],
    );
    world.bond(ids[0], ids[1]);

    world.clear_all();

    assert_eq!(world.particle_count(), 0);
    assert!(world.bonds().is_empty());
    assert!(world.bond_lines().is_empty());
    assert_eq!(world.step(1.0 / 60.0), Stats::default());
}

#[test]
fn test_spawn_at_rejects_points_near_edges() {
    let mut world = quiet_world(200.0);
    let mut rng = seeded_rng(3);
    assert!(world.spawn_at(Vec2::new(1.0, 100.0), &mut rng).is_none());
    assert!(world.spawn_at(Vec2::new(100.0, 250.0), &mut rng).is_none());

    let id = world.spawn_at(Vec2::new(100.0, 100.0), &mut rng).unwrap();
    let p = world.particle(id).unwrap();
    assert!(approx_eq_f32(p.speed(), 300.0, 1e-2));
}

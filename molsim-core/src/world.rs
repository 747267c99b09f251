use crate::bonds::BondRegistry;
use crate::collision;
use crate::forces;
use crate::integrator::IntegrationMode;
use crate::params::{Params, LENGTH_SCALE, RADIUS_RATIO, SPRING_CONSTANT, SPRING_REST_LENGTH};
use crate::particle::{Particle, ParticleId};
use crate::stats::Stats;
use glam::Vec2;
use log::{debug, trace, warn};
use rand::Rng;
use std::f32::consts::PI;

/// Smallest radius a molecule can be given, however small the world.
const MIN_RADIUS: f32 = 0.1;
/// Speed of a molecule spawned by a click on empty space.
pub const SPAWN_SPEED: f32 = 300.0;

/// Axis-aligned rectangle the particles live in: lower-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    pub fn min(&self) -> Vec2 {
        self.pos
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// True when a circle of `radius` centered at `point` fits inside.
    pub fn fits(&self, point: Vec2, radius: f32) -> bool {
        let lo = self.min() + Vec2::splat(radius);
        let hi = self.max() - Vec2::splat(radius);
        point.cmpge(lo).all() && point.cmple(hi).all()
    }

    /// Position of `point` as a fraction of the extent along each axis.
    ///
    /// A degenerate axis maps to the middle.
    pub fn fraction_of(&self, point: Vec2) -> Vec2 {
        let rel = point - self.pos;
        Vec2::new(
            if self.size.x > 0.0 { rel.x / self.size.x } else { 0.5 },
            if self.size.y > 0.0 { rel.y / self.size.y } else { 0.5 },
        )
    }

    pub fn at_fraction(&self, fraction: Vec2) -> Vec2 {
        self.pos + fraction * self.size
    }

    fn is_valid(&self) -> bool {
        self.pos.is_finite() && self.size.is_finite() && self.size.cmpge(Vec2::ZERO).all()
    }
}

/// Result of a [`World::select_or_bond`] gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// No particle under the point; any pending selection was dropped.
    Missed,
    /// First particle of a pair is now pending.
    Selected(ParticleId),
    /// The pending particle was picked again and deselected.
    Deselected(ParticleId),
    Bonded(ParticleId, ParticleId),
    Unbonded(ParticleId, ParticleId),
}

/// The molecule collection, its bonds, and the parameters driving each step.
///
/// Particles are kept in spawn order, which is also ascending id order: the
/// all-pairs loop relies on that order for `i < j` and bonds look endpoints
/// up by binary search.
#[derive(Debug)]
pub struct World {
    particles: Vec<Particle>,
    bonds: BondRegistry,
    params: Params,
    bounds: Bounds,
    next_id: u64,
    pending: Option<ParticleId>,
}

impl World {
    pub fn new(bounds: Bounds) -> Self {
        Self::with_params(bounds, Params::default())
    }

    pub fn with_params(bounds: Bounds, params: Params) -> Self {
        Self {
            particles: Vec::new(),
            bonds: BondRegistry::new(),
            params,
            bounds,
            next_id: 0,
            pending: None,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.index_of(id).map(|idx| &self.particles[idx])
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn bonds(&self) -> &BondRegistry {
        &self.bonds
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn pending_selection(&self) -> Option<ParticleId> {
        self.pending
    }

    /// Radius every molecule currently gets: world width × ratio × size factor.
    pub fn molecule_radius(&self) -> f32 {
        radius_for_width(self.bounds.size.x, self.params.size_factor())
    }

    fn index_of(&self, id: ParticleId) -> Option<usize> {
        self.particles.binary_search_by_key(&id, |p| p.id).ok()
    }

    // --- commands ---------------------------------------------------------

    /// Add a molecule at `center` moving with `velocity`.
    pub fn spawn(&mut self, center: Vec2, velocity: Vec2) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        let mut particle = Particle::new(id, center, velocity, self.molecule_radius());
        particle.update_arrow(self.params.forces_visible);
        debug!("spawned {:?} at ({:.1}, {:.1})", id, center.x, center.y);
        self.particles.push(particle);
        id
    }

    /// Spawn at `point` in a random direction, but only if the molecule fits
    /// entirely inside the world there.
    pub fn spawn_at<R: Rng + ?Sized>(&mut self, point: Vec2, rng: &mut R) -> Option<ParticleId> {
        if !self.bounds.fits(point, self.molecule_radius()) {
            return None;
        }
        let angle = rng.gen_range(-PI..PI);
        let velocity = Vec2::from_angle(angle) * SPAWN_SPEED;
        Some(self.spawn(point, velocity))
    }

    /// Nearest molecule to `point`, regardless of distance.
    pub fn nearest(&self, point: Vec2) -> Option<ParticleId> {
        self.particles
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(point)
                    .total_cmp(&b.pos.distance_squared(point))
            })
            .map(|p| p.id)
    }

    /// Nearest molecule whose center is within two radii of `point`.
    pub fn pick(&self, point: Vec2) -> Option<ParticleId> {
        self.particles
            .iter()
            .filter(|p| p.pos.distance(point) <= p.radius * 2.0)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(point)
                    .total_cmp(&b.pos.distance_squared(point))
            })
            .map(|p| p.id)
    }

    /// Two-click bond gesture: the first hit selects, the second toggles a
    /// bond between the two selections.
    pub fn select_or_bond(&mut self, point: Vec2) -> SelectOutcome {
        let Some(hit) = self.pick(point) else {
            self.pending = None;
            return SelectOutcome::Missed;
        };

        match self.pending.take() {
            None => {
                self.pending = Some(hit);
                SelectOutcome::Selected(hit)
            }
            Some(first) if first == hit => SelectOutcome::Deselected(hit),
            Some(first) => {
                if self.bonds.remove(hit, first) {
                    debug!("unbonded {:?} and {:?}", first, hit);
                    SelectOutcome::Unbonded(first, hit)
                } else {
                    self.bonds.add(hit, first);
                    debug!("bonded {:?} and {:?}", first, hit);
                    SelectOutcome::Bonded(first, hit)
                }
            }
        }
    }

    /// Bond two molecules directly. Returns whether a new bond was created.
    pub fn bond(&mut self, a: ParticleId, b: ParticleId) -> bool {
        if self.index_of(a).is_none() || self.index_of(b).is_none() {
            return false;
        }
        self.bonds.add(a, b)
    }

    pub fn unbond(&mut self, a: ParticleId, b: ParticleId) -> bool {
        self.bonds.remove(a, b)
    }

    /// Remove every molecule and bond.
    pub fn clear_all(&mut self) {
        debug!(
            "clearing {} particles and {} bonds",
            self.particles.len(),
            self.bonds.len()
        );
        self.particles.clear();
        self.bonds.clear();
        self.pending = None;
    }

    // --- parameters -------------------------------------------------------

    pub fn set_gravity(&mut self, value: f32) {
        self.params.set_gravity(value);
    }

    pub fn set_epsilon(&mut self, value: f32) {
        self.params.set_epsilon(value);
    }

    pub fn set_sigma(&mut self, value: f32) {
        self.params.set_sigma(value);
    }

    pub fn set_delta(&mut self, value: f32) {
        self.params.set_delta(value);
    }

    pub(crate) fn set_speed_factor(&mut self, value: f32) {
        self.params.set_speed_factor(value);
    }

    pub fn set_intermolecular_forces(&mut self, enabled: bool) {
        self.params.intermolecular_forces = enabled;
    }

    pub fn toggle_intermolecular_forces(&mut self) {
        self.params.intermolecular_forces = !self.params.intermolecular_forces;
    }

    /// Show or hide force arrows, refreshing every arrow immediately.
    pub fn set_forces_visible(&mut self, visible: bool) {
        self.params.forces_visible = visible;
        for p in &mut self.particles {
            p.update_arrow(visible);
        }
    }

    pub fn toggle_forces_visible(&mut self) {
        self.set_forces_visible(!self.params.forces_visible);
    }

    pub fn set_integration_mode(&mut self, mode: IntegrationMode) {
        self.params.integration_mode = mode;
    }

    pub fn toggle_integration_mode(&mut self) {
        self.params.integration_mode = self.params.integration_mode.toggled();
    }

    /// Change the molecule size factor and apply the new radius to every molecule.
    pub fn set_size_factor(&mut self, factor: f32) {
        self.params.set_size_factor(factor);
        let radius = self.molecule_radius();
        for p in &mut self.particles {
            p.rescale(radius);
        }
    }

    // --- simulation -------------------------------------------------------

    /// Run one step with the configured timestep.
    pub fn tick(&mut self) -> Stats {
        self.step(self.params.delta())
    }

    /// Advance every molecule by `dt` and return the resulting statistics.
    pub fn step(&mut self, dt: f32) -> Stats {
        let gravity = forces::gravity(self.params.gravity());
        for p in &mut self.particles {
            p.reset_force();
            p.add_force(gravity);
        }

        self.apply_springs();

        let epsilon = self.params.epsilon();
        let sigma = self.params.sigma();
        let lj_enabled = self.params.intermolecular_forces;
        let visible = self.params.forces_visible;
        let mode = self.params.integration_mode;
        let bounds = self.bounds;

        let mut stats = Stats::default();
        for i in 0..self.particles.len() {
            let (head, tail) = self.particles.split_at_mut(i + 1);
            let pi = &mut head[i];

            for pj in tail.iter_mut() {
                if collision::overlaps(pi, pj) && collision::resolve(pi, pj) {
                    pi.update_color();
                    pj.update_color();
                }
                if lj_enabled {
                    let f = forces::lennard_jones(pi.pos, pj.pos, epsilon, sigma, LENGTH_SCALE);
                    pi.add_force(f);
                    pj.add_force(-f);
                }
            }

            pi.update_arrow(visible);
            pi.integrate_with(dt, mode);
            bounce_off_walls(pi, &bounds);
            stats.accumulate(pi);
        }

        let stats = stats.finish();
        trace!(
            "step dt={:.4} n={} energy={:.2} temperature={:.2} pressure={:.2}",
            dt,
            stats.particle_count,
            stats.total_energy,
            stats.temperature,
            stats.pressure
        );
        stats
    }

    fn apply_springs(&mut self) {
        for bond in self.bonds.iter() {
            // bonds whose endpoints are gone contribute nothing
            let (Some(ia), Some(ib)) = (self.index_of(bond.a), self.index_of(bond.b)) else {
                continue;
            };
            let f = forces::spring(
                self.particles[ia].pos,
                self.particles[ib].pos,
                SPRING_REST_LENGTH,
                SPRING_CONSTANT,
            );
            if let Some(f) = f {
                self.particles[ia].add_force(f);
                self.particles[ib].add_force(-f);
            }
        }
    }

    /// Endpoints of every bond whose molecules both exist, for line drawing.
    pub fn bond_lines(&self) -> Vec<(Vec2, Vec2)> {
        self.bonds
            .iter()
            .filter_map(|bond| Some((self.particle(bond.a)?.pos, self.particle(bond.b)?.pos)))
            .collect()
    }

    /// Move the world to new bounds, remapping every molecule affinely.
    ///
    /// Positions keep their fraction of the old extent, velocities scale
    /// with the per-axis size ratio, and radii follow the new width.
    pub fn resize(&mut self, new_pos: Vec2, new_size: Vec2) {
        let new_bounds = Bounds::new(new_pos, new_size);
        if !new_bounds.is_valid() {
            warn!("ignoring resize to invalid bounds {:?}", new_bounds);
            return;
        }
        let old = self.bounds;
        let ratio = Vec2::new(
            if old.size.x > 0.0 { new_size.x / old.size.x } else { 1.0 },
            if old.size.y > 0.0 { new_size.y / old.size.y } else { 1.0 },
        );
        let radius = radius_for_width(new_size.x, self.params.size_factor());

        for p in &mut self.particles {
            p.pos = new_bounds.at_fraction(old.fraction_of(p.pos));
            p.vel *= ratio;
            p.clamp_speed();
            p.update_color();
            p.rescale(radius);
            clamp_into(p, &new_bounds);
        }

        debug!(
            "resized world from {:?} to {:?} ({} particles)",
            old.size,
            new_size,
            self.particles.len()
        );
        self.bounds = new_bounds;
    }
}

fn radius_for_width(width: f32, size_factor: f32) -> f32 {
    (width * RADIUS_RATIO * size_factor).max(MIN_RADIUS)
}

/// Reflect velocity off any wall the molecule touches, then clamp it inside.
fn bounce_off_walls(p: &mut Particle, bounds: &Bounds) {
    let lo = bounds.min() + Vec2::splat(p.radius);
    let hi = bounds.max() - Vec2::splat(p.radius);

    if p.pos.x <= lo.x {
        p.vel.x = p.vel.x.abs();
    } else if p.pos.x >= hi.x {
        p.vel.x = -p.vel.x.abs();
    }
    if p.pos.y <= lo.y {
        p.vel.y = p.vel.y.abs();
    } else if p.pos.y >= hi.y {
        p.vel.y = -p.vel.y.abs();
    }

    clamp_into(p, bounds);
}

/// Hard-clamp a molecule so its whole disc lies inside `bounds`.
///
/// A molecule wider than the world is centered on that axis.
fn clamp_into(p: &mut Particle, bounds: &Bounds) {
    let lo = bounds.min() + Vec2::splat(p.radius);
    let hi = bounds.max() - Vec2::splat(p.radius);
    let center = bounds.center();

    p.pos.x = if lo.x <= hi.x { p.pos.x.clamp(lo.x, hi.x) } else { center.x };
    p.pos.y = if lo.y <= hi.y { p.pos.y.clamp(lo.y, hi.y) } else { center.y };
}

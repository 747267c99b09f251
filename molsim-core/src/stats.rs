use crate::particle::Particle;

/// Aggregate quantities reported to the display once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    /// Sum of `0.5 * |v|^2` over all particles (unit mass).
    pub total_energy: f32,
    /// Mean kinetic energy per particle, 0 for an empty world.
    pub temperature: f32,
    /// Sum of `|vx| + |vy|` over all particles.
    pub pressure: f32,
    pub particle_count: usize,
}

impl Stats {
    pub fn from_particles(particles: &[Particle]) -> Self {
        let mut stats = Self::default();
        for p in particles {
            stats.accumulate(p);
        }
        stats.finish()
    }

    pub(crate) fn accumulate(&mut self, particle: &Particle) {
        self.total_energy += particle.kinetic_energy();
        self.pressure += particle.vel.x.abs() + particle.vel.y.abs();
        self.particle_count += 1;
    }

    pub(crate) fn finish(mut self) -> Self {
        self.temperature = if self.particle_count == 0 {
            0.0
        } else {
            self.total_energy / self.particle_count as f32
        };
        self
    }
}

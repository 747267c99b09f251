//! Start/stop/speed entry points and the fixed-interval tick clock.
//!
//! Everything runs on the caller's thread. The front end reports elapsed wall
//! time and the clock hands back how many whole ticks are due.

use crate::stats::Stats;
use crate::world::World;
use log::info;
use std::time::Duration;

/// Upper bound on ticks run by a single `advance`, so a long stall does not
/// turn into a burst of catch-up steps.
pub const MAX_TICKS_PER_ADVANCE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Accumulates elapsed time and releases it in fixed intervals.
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    accumulated: Duration,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Add `elapsed` and return how many whole intervals are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulated += elapsed;
        let mut due = 0;
        while self.accumulated >= self.interval && due < MAX_TICKS_PER_ADVANCE {
            self.accumulated -= self.interval;
            due += 1;
        }
        if due == MAX_TICKS_PER_ADVANCE {
            self.accumulated = Duration::ZERO;
        }
        due
    }
}

/// A [`World`] plus the Running/Stopped state machine that schedules its ticks.
///
/// Particle and bond state survive stop/start.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    state: RunState,
    clock: TickClock,
    last_stats: Stats,
    ticks: u64,
}

impl Simulation {
    pub fn new(world: World) -> Self {
        let interval = Duration::from_secs_f32(world.params().tick_interval());
        let last_stats = Stats::from_particles(world.particles());
        Self {
            world,
            state: RunState::Stopped,
            clock: TickClock::new(interval),
            last_stats,
            ticks: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for commands and setters, applied between ticks.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn tick_interval(&self) -> Duration {
        self.clock.interval()
    }

    pub fn last_stats(&self) -> Stats {
        self.last_stats
    }

    /// Ticks executed since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn start(&mut self) {
        if self.state == RunState::Running {
            return;
        }
        self.state = RunState::Running;
        self.clock.reset();
        info!(
            "simulation started ({} particles, interval {:?})",
            self.world.particle_count(),
            self.clock.interval()
        );
    }

    pub fn stop(&mut self) {
        if self.state == RunState::Stopped {
            return;
        }
        self.state = RunState::Stopped;
        self.clock.reset();
        info!("simulation stopped after {} ticks", self.ticks);
    }

    pub fn toggle(&mut self) {
        match self.state {
            RunState::Running => self.stop(),
            RunState::Stopped => self.start(),
        }
    }

    /// Set the speed factor (clamped) and re-derive the tick interval.
    ///
    /// The timestep used by each tick is unchanged; only the tick rate moves.
    pub fn set_speed(&mut self, factor: f32) {
        self.world.set_speed_factor(factor);
        let interval = Duration::from_secs_f32(self.world.params().tick_interval());
        self.clock.set_interval(interval);
    }

    /// Run exactly one tick, regardless of state.
    pub fn tick(&mut self) -> Stats {
        self.last_stats = self.world.tick();
        self.ticks += 1;
        self.last_stats
    }

    /// Feed elapsed wall time and return how many ticks are due, without
    /// running them. Always 0 while stopped.
    ///
    /// For callers that run the due ticks one by one with [`Simulation::tick`].
    pub fn poll(&mut self, elapsed: Duration) -> u32 {
        if self.state != RunState::Running {
            return 0;
        }
        self.clock.advance(elapsed)
    }

    /// Feed elapsed wall time; runs whatever ticks are due while running.
    ///
    /// Returns the number of ticks executed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.poll(elapsed);
        for _ in 0..due {
            self.tick();
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_releases_whole_intervals() {
        let mut clock = TickClock::new(Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_millis(25)), 2);
        assert_eq!(clock.advance(Duration::from_millis(4)), 0);
        assert_eq!(clock.advance(Duration::from_millis(1)), 1);
    }

    #[test]
    fn clock_caps_catch_up() {
        let mut clock = TickClock::new(Duration::from_millis(1));
        assert_eq!(clock.advance(Duration::from_secs(5)), MAX_TICKS_PER_ADVANCE);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }
}

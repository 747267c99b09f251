//! Drives a [`Simulation`] the way the interactive front end would: either
//! as fast as possible or paced by the wall clock, printing the statistics
//! panel as plain text.

use log::info;
use molsim_core::{Simulation, Stats};
use std::thread;
use std::time::{Duration, Instant};

pub struct RunOptions {
    pub ticks: u64,
    pub report_every: u64,
    pub realtime: bool,
}

pub fn run_simulation(mut sim: Simulation, options: &RunOptions) {
    let world = sim.world();
    info!(
        "running {} ticks with {} particles and {} bonds",
        options.ticks,
        world.particle_count(),
        world.bonds().len()
    );

    println!("{:>8} {:>14} {:>14} {:>14}", "tick", "energy", "temperature", "pressure");
    let started = Instant::now();

    if options.realtime {
        run_paced(&mut sim, options);
    } else {
        while sim.ticks() < options.ticks {
            let stats = sim.tick();
            report(sim.ticks(), &stats, options.report_every);
        }
    }

    let stats = sim.last_stats();
    println!();
    println!("particles   = {}", stats.particle_count);
    println!("bonds       = {}", sim.world().bonds().len());
    println!("energy      = {:.2}", stats.total_energy);
    println!("temperature = {:.2}", stats.temperature);
    println!("pressure    = {:.2}", stats.pressure);
    info!("finished {} ticks in {:?}", sim.ticks(), started.elapsed());
}

fn run_paced(sim: &mut Simulation, options: &RunOptions) {
    sim.start();
    let mut last = Instant::now();
    while sim.ticks() < options.ticks {
        thread::sleep(sim.tick_interval().min(Duration::from_millis(50)));
        let now = Instant::now();
        let due = sim.poll(now - last);
        last = now;

        // ticks due past the requested count are dropped
        let remaining = options.ticks - sim.ticks();
        for _ in 0..u64::from(due).min(remaining) {
            let stats = sim.tick();
            report(sim.ticks(), &stats, options.report_every);
        }
    }
    sim.stop();
}

fn report(tick: u64, stats: &Stats, every: u64) {
    if every == 0 || tick % every != 0 {
        return;
    }
    println!(
        "{:>8} {:>14.2} {:>14.2} {:>14.2}",
        tick, stats.total_energy, stats.temperature, stats.pressure
    );
}

//! Headless demo drive
//!
//! Runs the simulation for a few hundred frames against a recording canvas
//! and logs population statistics. Useful for eyeballing the lifecycle
//! (spawns, merges, firework triggers) without a graphics backend; real
//! hosts implement `Canvas` over their draw surface and call
//! `Simulation::frame` from their render loop.

use bubblesim::{RecordingCanvas, SimConfig, Simulation};

fn main() {
    env_logger::init();

    let config = SimConfig::default();
    log::info!(
        "starting {}x{} simulation, soft cap {}",
        config.width,
        config.height,
        config.max_bubbles
    );

    let mut sim = Simulation::new(&config);
    let mut canvas = RecordingCanvas::new();
    let dt = 1.0 / 60.0;

    // One celebration up front, another mid-run, as a host converting two
    // files would produce
    sim.celebrate();

    for frame in 0..600 {
        if frame == 300 {
            sim.celebrate();
        }

        canvas.clear();
        sim.step(&mut canvas, dt);

        if frame % 60 == 0 {
            log::info!(
                "frame {frame}: {} bubbles ({} large), {} effects, {} fireworks, {} draw calls",
                sim.bubble_count(),
                sim.large_bubble_count(),
                sim.effect_count(),
                sim.firework_count(),
                canvas.len()
            );
        }
    }

    log::info!("done: {} bubbles left", sim.bubble_count());
}

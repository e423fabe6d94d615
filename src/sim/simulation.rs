//! Top-level simulation context
//!
//! One `Simulation` is created at startup, lives for the whole process, and
//! is handed to the frame loop. It owns both managers and the monotonic
//! frame clock; there are no process-wide singletons.

use std::time::Instant;

use crate::canvas::Canvas;
use crate::config::SimConfig;
use crate::consts;

use super::firework::FireworkManager;
use super::manager::BubbleManager;

/// Owns the bubble and firework systems plus the frame clock
#[derive(Debug)]
pub struct Simulation {
    bubbles: BubbleManager,
    fireworks: FireworkManager,
    celebration_bubbles: usize,
    last_frame: Option<Instant>,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            bubbles: BubbleManager::new(config),
            fireworks: FireworkManager::new(config),
            celebration_bubbles: config.celebration_bubbles,
            last_frame: None,
        }
    }

    /// Fixed seeds for both systems; tests use this to pin behavior
    pub fn with_seed(config: &SimConfig, seed: u64) -> Self {
        Self {
            bubbles: BubbleManager::with_seed(config, seed),
            fireworks: FireworkManager::with_seed(config, seed.wrapping_add(1)),
            celebration_bubbles: config.celebration_bubbles,
            last_frame: None,
        }
    }

    /// Self-clocked frame: measures elapsed time since the previous call on
    /// the monotonic clock, clamps it, and steps
    pub fn frame(&mut self, canvas: &mut dyn Canvas) {
        let now = Instant::now();
        let dt = match self.last_frame {
            Some(previous) => (now - previous).as_secs_f32().min(consts::MAX_FRAME_DT),
            None => 1.0 / 60.0,
        };
        self.last_frame = Some(now);
        self.step(canvas, dt);
    }

    /// Caller-clocked frame: advance both systems by `dt` and render
    ///
    /// Advance-then-render holds across the whole frame; nothing detected
    /// dead here is ever drawn.
    pub fn step(&mut self, canvas: &mut dyn Canvas, dt: f32) {
        self.bubbles.advance(dt, &mut self.fireworks);
        self.bubbles.render(canvas);
        self.fireworks.advance_and_render(canvas, dt);
    }

    /// Celebratory burst hook, called by the host when a conversion lands
    pub fn celebrate(&mut self) {
        for _ in 0..self.celebration_bubbles {
            self.bubbles.add_bubble();
        }
        log::info!(
            "celebration: +{} bubbles, population {}",
            self.celebration_bubbles,
            self.bubbles.len()
        );
    }

    pub fn add_bubble(&mut self) {
        self.bubbles.add_bubble();
    }

    pub fn add_bubble_at(&mut self, x: f32, y: f32) {
        self.bubbles.add_bubble_at(x, y);
    }

    pub fn set_max_bubbles(&mut self, max_bubbles: usize) {
        self.bubbles.set_max_bubbles(max_bubbles);
    }

    pub fn bubble_count(&self) -> usize {
        self.bubbles.len()
    }

    pub fn large_bubble_count(&self) -> usize {
        self.bubbles.large_count()
    }

    pub fn effect_count(&self) -> usize {
        self.bubbles.effect_count()
    }

    pub fn firework_count(&self) -> usize {
        self.fireworks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    #[test]
    fn celebrate_adds_the_configured_burst() {
        let config = SimConfig::default();
        let mut sim = Simulation::with_seed(&config, 5);
        sim.celebrate();
        assert_eq!(sim.bubble_count(), config.celebration_bubbles);
    }

    #[test]
    fn celebrate_respects_the_hard_cap() {
        let config = SimConfig::default();
        let mut sim = Simulation::with_seed(&config, 5);
        sim.set_max_bubbles(2);
        sim.celebrate();
        assert_eq!(sim.bubble_count(), 4);
    }

    #[test]
    fn step_renders_the_population() {
        let config = SimConfig::default();
        let mut sim = Simulation::with_seed(&config, 5);
        sim.celebrate();

        let mut canvas = RecordingCanvas::new();
        sim.step(&mut canvas, 1.0 / 60.0);
        assert!(!canvas.is_empty());
        // Replenishment may have added one on top of the celebration
        assert!(sim.bubble_count() >= config.celebration_bubbles);
    }

    #[test]
    fn frame_is_usable_without_external_clock() {
        let config = SimConfig::default();
        let mut sim = Simulation::with_seed(&config, 5);
        sim.celebrate();

        let mut canvas = RecordingCanvas::new();
        sim.frame(&mut canvas);
        sim.frame(&mut canvas);
        assert!(sim.bubble_count() >= config.celebration_bubbles);
        assert!(sim.bubble_count() <= config.celebration_bubbles + 2);
    }

    #[test]
    fn long_run_stays_bounded() {
        let config = SimConfig::default();
        let mut sim = Simulation::with_seed(&config, 99);
        sim.celebrate();

        let mut canvas = RecordingCanvas::new();
        for _ in 0..2000 {
            canvas.clear();
            sim.step(&mut canvas, 1.0 / 60.0);
            assert!(sim.bubble_count() <= 2 * config.max_bubbles);
        }
    }
}

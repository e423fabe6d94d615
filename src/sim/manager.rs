//! Bubble population owner and per-frame orchestration
//!
//! `BubbleManager` holds the authoritative bubble list plus the contact
//! effects, and drives the coupling to the firework system: when the count
//! of large bubbles rises, it asks for a burst near the first large bubble
//! in iteration order.
//!
//! Per-frame order matters and is fixed:
//! 1. advance every bubble
//! 2. all-pairs collision resolution (each unordered pair once)
//! 3. remove merge casualties by index, descending, then sweep the aged-out
//! 4. advance and prune effects
//! 5. probabilistic replenishment below the soft cap
//! 6. large-count rise detection and firework trigger
//!
//! Rendering happens after all of that, effects first, bubbles on top.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bubble::{Bubble, CollisionOutcome};
use super::effect::CollisionEffect;
use super::firework::FireworkManager;
use crate::canvas::Canvas;
use crate::config::SimConfig;
use crate::consts;

/// Owns the bubble population and the contact-effect list
#[derive(Debug)]
pub struct BubbleManager {
    bubbles: Vec<Bubble>,
    effects: Vec<CollisionEffect>,
    rng: Pcg32,
    max_bubbles: usize,
    prev_large_count: usize,
    width: f32,
    height: f32,
}

impl BubbleManager {
    pub fn new(config: &SimConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Fixed seed; tests use this to pin the random sequence
    pub fn with_seed(config: &SimConfig, seed: u64) -> Self {
        Self {
            bubbles: Vec::new(),
            effects: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            max_bubbles: config.max_bubbles,
            prev_large_count: 0,
            width: config.width,
            height: config.height,
        }
    }

    /// Add a randomized bubble; silently ignored once the population sits at
    /// twice the soft cap
    pub fn add_bubble(&mut self) {
        if self.bubbles.len() >= 2 * self.max_bubbles {
            return;
        }
        let bubble = Bubble::spawn(&mut self.rng, self.width, self.height);
        log::trace!(
            "bubble spawned at ({:.0}, {:.0}), population {}",
            bubble.position.x,
            bubble.position.y,
            self.bubbles.len() + 1
        );
        self.bubbles.push(bubble);
    }

    /// Add a randomized bubble at an explicit point, same cap as `add_bubble`
    pub fn add_bubble_at(&mut self, x: f32, y: f32) {
        if self.bubbles.len() >= 2 * self.max_bubbles {
            return;
        }
        let bubble = Bubble::spawn_at(&mut self.rng, Vec2::new(x, y));
        self.bubbles.push(bubble);
    }

    pub fn set_max_bubbles(&mut self, max_bubbles: usize) {
        self.max_bubbles = max_bubbles;
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Bubbles currently past the large-radius threshold
    pub fn large_count(&self) -> usize {
        self.bubbles.iter().filter(|b| b.is_large()).count()
    }

    /// Advance the whole population by one frame
    pub fn advance(&mut self, dt: f32, fireworks: &mut FireworkManager) {
        for bubble in self.bubbles.iter_mut() {
            bubble.advance(dt, self.width, self.height);
        }

        // All-pairs resolution; each unordered pair tested exactly once.
        // Merge casualties are recorded by index for the removal pass.
        let mut merged: Vec<usize> = Vec::new();
        for i in 0..self.bubbles.len() {
            let (head, tail) = self.bubbles.split_at_mut(i + 1);
            let first = &mut head[i];
            for (offset, second) in tail.iter_mut().enumerate() {
                if first.collide_with(second, &mut self.effects) == Some(CollisionOutcome::Merged) {
                    let casualty = if first.pending_removal { i } else { i + 1 + offset };
                    merged.push(casualty);
                }
            }
        }

        // Descending order keeps earlier indices valid; the retain sweep
        // then covers deaths by natural aging
        merged.sort_unstable();
        for &index in merged.iter().rev() {
            let bubble = self.bubbles.remove(index);
            log::trace!(
                "bubble absorbed at ({:.0}, {:.0})",
                bubble.position.x,
                bubble.position.y
            );
        }
        self.bubbles.retain(|b| !b.is_dead());

        for effect in self.effects.iter_mut() {
            effect.advance(dt);
        }
        self.effects.retain(|e| !e.is_dead());

        // Independent trial every frame, so time-to-spawn is geometric
        if self.bubbles.len() < self.max_bubbles
            && self.rng.random::<f32>() < consts::SPAWN_CHANCE
        {
            self.add_bubble();
        }

        let large = self.large_count();
        if large > self.prev_large_count {
            if let Some(anchor) = self.bubbles.iter().find(|b| b.is_large()) {
                let burst = consts::TRIGGER_PER_LARGE * (large - self.prev_large_count);
                log::debug!(
                    "large bubbles rose {} -> {large}, bursting near ({:.0}, {:.0})",
                    self.prev_large_count,
                    anchor.position.x,
                    anchor.position.y
                );
                fireworks.trigger(burst, anchor.position);
            }
        }
        self.prev_large_count = large;
    }

    /// Draw the just-advanced state: effects underneath, bubbles on top
    pub fn render(&self, canvas: &mut dyn Canvas) {
        for effect in &self.effects {
            effect.render(canvas);
        }
        for bubble in &self.bubbles {
            bubble.render(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Rgba, RecordingCanvas};

    fn manager() -> (BubbleManager, FireworkManager) {
        let config = SimConfig::default();
        (
            BubbleManager::with_seed(&config, 11),
            FireworkManager::with_seed(&config, 12),
        )
    }

    fn bubble(x: f32, y: f32, radius: f32) -> Bubble {
        Bubble {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            radius,
            color: Rgba::WHITE,
            age: 0.0,
            max_age: 100.0,
            oscillation_phase: 0.0,
            oscillation_speed: 3.0,
            pending_removal: false,
        }
    }

    #[test]
    fn add_bubble_stops_at_twice_the_cap() {
        let (mut bubbles, _) = manager();
        bubbles.set_max_bubbles(3);
        for _ in 0..20 {
            bubbles.add_bubble();
        }
        assert_eq!(bubbles.len(), 6);
    }

    #[test]
    fn add_bubble_at_places_bubble() {
        let (mut bubbles, _) = manager();
        bubbles.add_bubble_at(123.0, 45.0);
        assert_eq!(bubbles.len(), 1);
        assert_eq!(bubbles.bubbles[0].position, Vec2::new(123.0, 45.0));
    }

    #[test]
    fn merge_removes_smaller_in_same_frame() {
        let (mut bubbles, mut fireworks) = manager();
        bubbles.set_max_bubbles(0); // no replenishment noise
        bubbles.bubbles.push(bubble(200.0, 200.0, 20.0));
        bubbles.bubbles.push(bubble(210.0, 200.0, 5.0));

        bubbles.advance(0.001, &mut fireworks);

        assert_eq!(bubbles.len(), 1);
        assert_eq!(bubbles.bubbles[0].radius, 21.5);
        assert_eq!(bubbles.effect_count(), 1);
    }

    #[test]
    fn aged_out_bubbles_are_swept() {
        let (mut bubbles, mut fireworks) = manager();
        bubbles.set_max_bubbles(0);
        let mut old = bubble(100.0, 100.0, 5.0);
        old.max_age = 1.0;
        old.age = 0.9999;
        bubbles.bubbles.push(old);

        bubbles.advance(0.01, &mut fireworks);
        assert!(bubbles.is_empty());
    }

    #[test]
    fn trigger_fires_on_rise_not_on_plateau() {
        let (mut bubbles, mut fireworks) = manager();
        bubbles.set_max_bubbles(0);
        bubbles.bubbles.push(bubble(300.0, 200.0, 13.0));

        bubbles.advance(0.001, &mut fireworks);
        assert_eq!(fireworks.len(), consts::TRIGGER_PER_LARGE);

        // Count stays elevated: no new launches beyond the in-flight set
        let in_flight = fireworks.len();
        bubbles.advance(0.001, &mut fireworks);
        assert_eq!(fireworks.len(), in_flight);
    }

    #[test]
    fn trigger_scales_with_the_increase() {
        let (mut bubbles, mut fireworks) = manager();
        bubbles.set_max_bubbles(0);
        bubbles.bubbles.push(bubble(100.0, 100.0, 14.0));
        bubbles.bubbles.push(bubble(600.0, 300.0, 16.0));

        bubbles.advance(0.001, &mut fireworks);
        assert_eq!(fireworks.len(), 2 * consts::TRIGGER_PER_LARGE);
    }

    #[test]
    fn trigger_anchor_is_first_large_in_iteration_order() {
        let (mut bubbles, mut fireworks) = manager();
        bubbles.set_max_bubbles(0);
        bubbles.bubbles.push(bubble(50.0, 50.0, 5.0));
        bubbles.bubbles.push(bubble(400.0, 123.0, 13.0));
        bubbles.bubbles.push(bubble(700.0, 300.0, 18.0));

        bubbles.advance(0.001, &mut fireworks);

        // Launch positions cluster around the first large bubble's x, not
        // the second's
        for firework in fireworks.iter() {
            assert!((firework.position.x - 400.0).abs() <= 150.0 + consts::TARGET_JITTER_X + 1.0);
        }
    }

    #[test]
    fn large_count_drop_then_rise_fires_again() {
        let (mut bubbles, mut fireworks) = manager();
        bubbles.set_max_bubbles(0);
        let mut short_lived = bubble(300.0, 200.0, 13.0);
        short_lived.max_age = 0.05;
        bubbles.bubbles.push(short_lived);

        bubbles.advance(0.001, &mut fireworks);
        assert_eq!(fireworks.len(), consts::TRIGGER_PER_LARGE);

        // Large bubble ages out: count falls back to zero
        bubbles.advance(0.1, &mut fireworks);
        assert!(bubbles.is_empty());

        let in_flight = fireworks.len();
        bubbles.bubbles.push(bubble(500.0, 100.0, 15.0));
        bubbles.advance(0.001, &mut fireworks);
        assert_eq!(fireworks.len(), in_flight + consts::TRIGGER_PER_LARGE);
    }

    #[test]
    fn replenishment_is_capped_at_soft_limit() {
        let config = SimConfig::default();
        let mut bubbles = BubbleManager::with_seed(&config, 21);
        let mut fireworks = FireworkManager::with_seed(&config, 22);
        bubbles.set_max_bubbles(2);

        // Plenty of frames; the population must never pass the soft cap
        // through replenishment alone
        for _ in 0..500 {
            bubbles.advance(0.016, &mut fireworks);
            assert!(bubbles.len() <= 2);
        }
        assert!(bubbles.len() > 0, "replenishment never fired in 500 trials");
    }

    #[test]
    fn render_draws_effects_before_bubbles() {
        let (mut bubbles, mut fireworks) = manager();
        bubbles.set_max_bubbles(0);
        bubbles.bubbles.push(bubble(200.0, 200.0, 10.0));
        bubbles.bubbles.push(bubble(212.0, 200.0, 11.0));

        bubbles.advance(0.001, &mut fireworks);
        assert_eq!(bubbles.effect_count(), 1);

        let mut canvas = RecordingCanvas::new();
        bubbles.render(&mut canvas);
        // Effect ring is the first stroke in the stream
        assert!(matches!(
            canvas.calls[0],
            crate::canvas::DrawCall::StrokeCircle { .. }
        ));
    }

    #[test]
    fn dead_bubbles_are_not_rendered() {
        let (mut bubbles, mut fireworks) = manager();
        bubbles.set_max_bubbles(0);
        bubbles.bubbles.push(bubble(200.0, 200.0, 20.0));
        bubbles.bubbles.push(bubble(205.0, 200.0, 5.0));

        bubbles.advance(0.001, &mut fireworks);
        let mut canvas = RecordingCanvas::new();
        bubbles.render(&mut canvas);

        let discs = canvas
            .calls
            .iter()
            .filter(|c| matches!(c, crate::canvas::DrawCall::FillCircle { .. }))
            .count();
        // One surviving bubble: body disc + highlight + merge-effect glow
        assert_eq!(discs, 3);
    }
}

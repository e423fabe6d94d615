//! Contact effects
//!
//! A short-lived expanding ring left behind at a collision point. Owned by
//! the bubble manager, independent of either bubble once created.

use glam::Vec2;

use crate::canvas::{Canvas, Rgba};
use crate::consts;

/// Expanding ring plus fading inner glow at a contact point
#[derive(Debug, Clone)]
pub struct CollisionEffect {
    pub position: Vec2,
    pub radius: f32,
    pub color: Rgba,
    pub age: f32,
    pub max_age: f32,
}

impl CollisionEffect {
    pub fn new(position: Vec2, radius: f32, color: Rgba) -> Self {
        Self {
            position,
            radius,
            color,
            age: 0.0,
            max_age: consts::EFFECT_LIFE,
        }
    }

    /// Grow the ring multiplicatively and age toward expiry
    pub fn advance(&mut self, dt: f32) {
        self.radius *= 1.0 + consts::EFFECT_GROWTH * dt;
        self.age += dt;
    }

    pub fn is_dead(&self) -> bool {
        self.age >= self.max_age
    }

    /// Linear fade to zero over the lifetime
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        let alpha = self.color.a * self.alpha();
        canvas.stroke_circle(self.position, self.radius, 2.0, self.color.with_alpha(alpha));
        canvas.fill_circle(
            self.position,
            self.radius * 0.5,
            self.color.with_alpha(alpha * 0.3),
        );
    }
}

//! Soft circular bubbles
//!
//! A bubble is a damped ballistic body with an oscillating visual radius and
//! a bounded lifetime. Pairwise resolution has two outcomes: a sufficiently
//! larger bubble absorbs the smaller one, otherwise the pair separates and
//! exchanges velocity. The physical radius only ever grows (absorption); the
//! end-of-life fade runs through alpha, never through the radius.

use glam::Vec2;
use rand::Rng;

use super::effect::CollisionEffect;
use crate::canvas::{Canvas, Rgba};
use crate::consts;

/// How a resolved overlap played out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// The larger bubble absorbed the smaller one
    Merged,
    /// The pair separated and swapped velocities
    Bounced,
}

/// A single bubble, owned by the manager's population
#[derive(Debug, Clone)]
pub struct Bubble {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Rgba,
    pub age: f32,
    pub max_age: f32,
    pub oscillation_phase: f32,
    pub oscillation_speed: f32,
    /// Set when absorbed; consumed by the manager's prune pass
    pub pending_removal: bool,
}

impl Bubble {
    /// New bubble at an explicit position with randomized motion and look
    pub fn spawn_at(rng: &mut impl Rng, position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::new(
                rng.random_range(-40.0..=40.0),
                rng.random_range(-30.0..=30.0),
            ),
            radius: rng.random_range(consts::BUBBLE_MIN_RADIUS..=consts::BUBBLE_MAX_RADIUS),
            color: Rgba::new(
                rng.random_range(0.4..=0.9),
                rng.random_range(0.4..=0.9),
                rng.random_range(0.4..=0.9),
                0.9,
            ),
            age: 0.0,
            max_age: rng.random_range(consts::BUBBLE_LIFE_MIN..=consts::BUBBLE_LIFE_MAX),
            oscillation_phase: rng.random_range(0.0..std::f32::consts::TAU),
            oscillation_speed: rng.random_range(2.0..=6.0),
            pending_removal: false,
        }
    }

    /// New bubble at a random position inside the given bounds
    pub fn spawn(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        let position = Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height));
        Self::spawn_at(rng, position)
    }

    /// Advance one frame: integrate, pull down, damp, bounce off the four
    /// walls, and age
    pub fn advance(&mut self, dt: f32, width: f32, height: f32) {
        self.position += self.velocity * dt;
        self.velocity.y += consts::BUBBLE_GRAVITY * dt;
        self.velocity *= 1.0 - consts::BUBBLE_DAMPING * dt;

        let r = self.radius;
        if self.position.x < r {
            self.position.x = r;
            if self.velocity.x < 0.0 {
                self.velocity.x = -self.velocity.x * consts::WALL_RESTITUTION;
            }
        } else if self.position.x > width - r {
            self.position.x = width - r;
            if self.velocity.x > 0.0 {
                self.velocity.x = -self.velocity.x * consts::WALL_RESTITUTION;
            }
        }
        if self.position.y < r {
            self.position.y = r;
            if self.velocity.y < 0.0 {
                self.velocity.y = -self.velocity.y * consts::WALL_RESTITUTION;
            }
        } else if self.position.y > height - r {
            self.position.y = height - r;
            if self.velocity.y > 0.0 {
                self.velocity.y = -self.velocity.y * consts::WALL_RESTITUTION;
            }
        }

        self.oscillation_phase += self.oscillation_speed * dt;
        self.age += dt;
    }

    /// Dead once absorbed or past its lifetime
    pub fn is_dead(&self) -> bool {
        self.pending_removal || self.age >= self.max_age
    }

    pub fn is_large(&self) -> bool {
        self.radius > consts::LARGE_BUBBLE_RADIUS
    }

    /// Radius as drawn, wobbling ±10% around the physical radius
    pub fn visual_radius(&self) -> f32 {
        self.radius * (1.0 + 0.1 * self.oscillation_phase.sin())
    }

    /// Alpha multiplier; ramps linearly to zero over the final fifth of the
    /// lifetime
    pub fn fade(&self) -> f32 {
        let progress = self.age / self.max_age;
        if progress <= 1.0 - consts::BUBBLE_FADE_PORTION {
            1.0
        } else {
            ((1.0 - progress) / consts::BUBBLE_FADE_PORTION).clamp(0.0, 1.0)
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        let r = self.visual_radius();
        let alpha = self.color.a * self.fade();

        canvas.fill_circle(self.position, r, self.color.with_alpha(alpha));

        // Specular highlight, upper-left
        let highlight = self.position + Vec2::new(-r, -r) * 0.35;
        canvas.fill_circle(highlight, r * 0.25, Rgba::WHITE.with_alpha(alpha * 0.6));

        if self.radius > consts::RING_DETAIL_RADIUS {
            canvas.stroke_circle(self.position, r * 0.8, 1.0, Rgba::WHITE.with_alpha(alpha * 0.3));
            if self.radius > consts::BIG_MERGE_RADIUS {
                canvas.stroke_circle(
                    self.position,
                    r * 0.6,
                    1.0,
                    Rgba::WHITE.with_alpha(alpha * 0.2),
                );
            }
        }
    }

    /// Resolve an overlap between two bubbles
    ///
    /// Returns `None` when the pair does not interact: no overlap, exactly
    /// coincident centers (degenerate normal), or either side already marked
    /// for removal this frame. A marked bubble takes part in no further
    /// collision, so absorption stays one-directional per pair per frame
    /// regardless of iteration order.
    pub fn collide_with(
        &mut self,
        other: &mut Bubble,
        effects: &mut Vec<CollisionEffect>,
    ) -> Option<CollisionOutcome> {
        if self.pending_removal || other.pending_removal {
            return None;
        }

        let delta = other.position - self.position;
        let distance = delta.length();
        let min_distance = self.radius + other.radius;
        if distance == 0.0 || distance >= min_distance {
            return None;
        }

        let midpoint = (self.position + other.position) * 0.5;
        let self_is_larger = self.radius >= other.radius;
        let (large_r, small_r) = if self_is_larger {
            (self.radius, other.radius)
        } else {
            (other.radius, self.radius)
        };

        if large_r > small_r * consts::MERGE_RATIO {
            let grown = large_r + small_r * consts::ABSORB_GAIN;
            if self_is_larger {
                self.radius = grown;
                other.pending_removal = true;
            } else {
                other.radius = grown;
                self.pending_removal = true;
            }
            let color = if grown > consts::BIG_MERGE_RADIUS {
                Rgba::new(1.0, 0.85, 0.3, 0.8)
            } else {
                Rgba::new(0.4, 0.9, 1.0, 0.8)
            };
            effects.push(CollisionEffect::new(midpoint, min_distance * 0.5, color));
            Some(CollisionOutcome::Merged)
        } else {
            let normal = delta / distance;
            let push = normal * ((min_distance - distance) * 0.5);
            self.position -= push;
            other.position += push;
            std::mem::swap(&mut self.velocity, &mut other.velocity);
            effects.push(CollisionEffect::new(
                midpoint,
                min_distance * 0.5,
                Rgba::WHITE.with_alpha(0.6),
            ));
            Some(CollisionOutcome::Bounced)
        }
    }
}

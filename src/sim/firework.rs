//! Fireworks: launch-and-burst particles
//!
//! A firework is a two-phase entity. It ascends as a single projectile,
//! then detonates into a fan of sparks that fall, shrink, and fade. The
//! phase is a tagged state: the spark list only exists once exploded, so an
//! ascending firework cannot carry stale particles and an exploded one
//! cannot keep integrating its ascent.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::canvas::{Canvas, Rgba};
use crate::config::SimConfig;
use crate::consts;

/// Launch colors, one picked per firework
const LAUNCH_COLORS: [Rgba; 6] = [
    Rgba::new(1.0, 0.3, 0.3, 1.0),
    Rgba::new(1.0, 0.6, 0.2, 1.0),
    Rgba::new(1.0, 0.9, 0.3, 1.0),
    Rgba::new(0.3, 1.0, 0.5, 1.0),
    Rgba::new(0.4, 0.6, 1.0, 1.0),
    Rgba::new(0.8, 0.4, 1.0, 1.0),
];

/// A single spark produced by a burst
#[derive(Debug, Clone)]
pub struct FireworkParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Rgba,
    pub age: f32,
    pub max_age: f32,
    /// Monotonically shrinking draw size
    pub size: f32,
}

impl FireworkParticle {
    /// Ballistic step: integrate, pull down, shrink, age
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.velocity.y += consts::SPARK_GRAVITY * dt;
        self.size *= 1.0 - consts::SPARK_SHRINK * dt;
        self.age += dt;
    }

    pub fn is_dead(&self) -> bool {
        self.age >= self.max_age
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        let progress = self.age / self.max_age;
        let flicker = 0.75 + 0.25 * (progress * 10.0).sin();
        let alpha = self.color.a * (1.0 - progress) * flicker;

        canvas.fill_circle(self.position, self.size, self.color.with_alpha(alpha));

        let tail = self.position - self.velocity.normalize_or_zero() * (self.size * 3.0);
        canvas.line_segment(
            tail,
            self.position,
            self.size * 0.5,
            self.color.with_alpha(alpha * 0.5),
        );
    }
}

/// Lifecycle phase of a firework
///
/// The spark list lives in the `Exploded` payload; ascent fields freeze the
/// moment the transition happens.
#[derive(Debug, Clone)]
pub enum FireworkPhase {
    /// Climbing toward apex as a single projectile
    Ascending,
    /// Burst; only the sparks still evolve
    Exploded { particles: Vec<FireworkParticle> },
}

/// A launch-and-burst projectile
#[derive(Debug, Clone)]
pub struct Firework {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Rgba,
    pub age: f32,
    pub max_age: f32,
    pub phase: FireworkPhase,
}

impl Firework {
    pub fn new(launch: Vec2, velocity: Vec2, color: Rgba) -> Self {
        Self {
            position: launch,
            velocity,
            color,
            age: 0.0,
            max_age: consts::FIREWORK_LIFE,
            phase: FireworkPhase::Ascending,
        }
    }

    /// Advance one frame
    ///
    /// Ascending: integrate, decelerate the climb, and detonate at apex
    /// (vertical velocity no longer upward) or once the fuse fraction of the
    /// lifetime has burned, whichever comes first. Exploded: advance and
    /// prune sparks.
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng) {
        self.age += dt;
        match &mut self.phase {
            FireworkPhase::Ascending => {
                self.position += self.velocity * dt;
                self.velocity.y += consts::FIREWORK_DECEL * dt;
                let apex = self.velocity.y >= 0.0;
                let fuse_burned = self.age > consts::FIREWORK_FUSE * self.max_age;
                if apex || fuse_burned {
                    self.explode(rng);
                }
            }
            FireworkPhase::Exploded { particles } => {
                for particle in particles.iter_mut() {
                    particle.advance(dt);
                }
                particles.retain(|p| !p.is_dead());
            }
        }
    }

    /// Burst into a fan of sparks jitter-tinted from the launch color
    fn explode(&mut self, rng: &mut impl Rng) {
        let count = rng.random_range(consts::BURST_MIN..=consts::BURST_MAX);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(consts::SPARK_MIN_SPEED..=consts::SPARK_MAX_SPEED);
            let tint = rng.random_range(0.7..=1.0);
            particles.push(FireworkParticle {
                position: self.position,
                velocity: Vec2::from_angle(angle) * speed,
                color: self.color.scaled(tint).with_alpha(consts::SPARK_ALPHA),
                age: 0.0,
                max_age: consts::SPARK_LIFE,
                size: rng.random_range(1.5..=3.0),
            });
        }
        self.phase = FireworkPhase::Exploded { particles };
    }

    pub fn has_exploded(&self) -> bool {
        matches!(self.phase, FireworkPhase::Exploded { .. })
    }

    /// Dead only once exploded with every spark expired; an ascending
    /// firework always detonates before it can die
    pub fn is_dead(&self) -> bool {
        match &self.phase {
            FireworkPhase::Ascending => false,
            FireworkPhase::Exploded { particles } => particles.is_empty(),
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        match &self.phase {
            FireworkPhase::Ascending => {
                canvas.fill_circle(self.position, 2.5, self.color);
                let tail = self.position - self.velocity.normalize_or_zero() * 12.0;
                canvas.line_segment(tail, self.position, 1.5, self.color.with_alpha(0.5));
            }
            FireworkPhase::Exploded { particles } => {
                for particle in particles {
                    particle.render(canvas);
                }
            }
        }
    }
}

/// Owns every active firework; one caller per frame
#[derive(Debug)]
pub struct FireworkManager {
    fireworks: Vec<Firework>,
    rng: Pcg32,
    width: f32,
    height: f32,
}

impl FireworkManager {
    pub fn new(config: &SimConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Fixed seed; tests use this to pin the random sequence
    pub fn with_seed(config: &SimConfig, seed: u64) -> Self {
        Self {
            fireworks: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            width: config.width,
            height: config.height,
        }
    }

    /// Launch `count` fireworks aimed near `target`
    ///
    /// Each gets its own jittered target point, a launch position on the
    /// bottom edge, and a velocity scaled to arrive just inside the fuse
    /// window, so every launch is guaranteed to burst.
    pub fn trigger(&mut self, count: usize, target: Vec2) {
        for _ in 0..count {
            let aim = Vec2::new(
                (target.x
                    + self
                        .rng
                        .random_range(-consts::TARGET_JITTER_X..=consts::TARGET_JITTER_X))
                .clamp(0.0, self.width),
                (target.y
                    + self
                        .rng
                        .random_range(-consts::TARGET_JITTER_Y..=consts::TARGET_JITTER_Y))
                .clamp(0.0, self.height - 40.0),
            );
            let launch_x = (aim.x + self.rng.random_range(-150.0..=150.0)).clamp(0.0, self.width);
            let launch = Vec2::new(launch_x, self.height);
            let velocity = (aim - launch) / consts::FIREWORK_RISE_TIME;
            let color = LAUNCH_COLORS[self.rng.random_range(0..LAUNCH_COLORS.len())];
            self.fireworks.push(Firework::new(launch, velocity, color));
        }
        log::debug!(
            "launched {count} fireworks toward ({:.0}, {:.0}), {} in flight",
            target.x,
            target.y,
            self.fireworks.len()
        );
    }

    /// Advance every firework, drop the dead, render the survivors
    pub fn advance_and_render(&mut self, canvas: &mut dyn Canvas, dt: f32) {
        for firework in self.fireworks.iter_mut() {
            firework.advance(dt, &mut self.rng);
        }
        self.fireworks.retain(|f| !f.is_dead());
        for firework in &self.fireworks {
            firework.render(canvas);
        }
    }

    pub fn len(&self) -> usize {
        self.fireworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fireworks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Firework> {
        self.fireworks.iter()
    }
}

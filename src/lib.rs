//! Ambient bubble simulation with emergent firework bursts
//!
//! Core modules:
//! - `sim`: the simulation itself (bubbles, collision effects, fireworks,
//!   and the managers that own them)
//! - `canvas`: the draw-surface capability the host supplies
//! - `config`: tunable parameters loaded from JSON
//!
//! The simulation is single-threaded and cooperative: the host calls
//! [`Simulation::frame`] once per rendered frame, and all mutation plus all
//! draw calls happen synchronously inside that call. Every operation is
//! total over its input domain; nothing in here returns an error.
//!
//! [`Simulation::frame`]: sim::Simulation::frame

pub mod canvas;
pub mod config;
pub mod sim;

pub use canvas::{Canvas, DrawCall, RecordingCanvas, Rgba};
pub use config::SimConfig;
pub use sim::{
    Bubble, BubbleManager, CollisionEffect, CollisionOutcome, Firework, FireworkManager,
    FireworkParticle, FireworkPhase, Simulation,
};

/// Simulation tuning constants
pub mod consts {
    /// Logical canvas size used for wall bounds
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Longest frame delta the integrators will accept
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Downward acceleration on bubbles (+y is down), pixels/s²
    pub const BUBBLE_GRAVITY: f32 = 20.0;
    /// Isotropic velocity damping factor, 1/s
    pub const BUBBLE_DAMPING: f32 = 0.1;
    /// Velocity kept after a wall bounce
    pub const WALL_RESTITUTION: f32 = 0.8;

    /// Size ratio above which the larger bubble absorbs the smaller
    pub const MERGE_RATIO: f32 = 1.2;
    /// Fraction of the absorbed radius added to the absorber
    pub const ABSORB_GAIN: f32 = 0.3;
    /// Radius above which a bubble counts as "large" for firework triggers
    pub const LARGE_BUBBLE_RADIUS: f32 = 12.0;
    /// Radius above which a merge flashes the warm effect color
    pub const BIG_MERGE_RADIUS: f32 = 15.0;
    /// Radius above which bubbles get decorative rings
    pub const RING_DETAIL_RADIUS: f32 = 10.0;

    /// New-bubble radius range
    pub const BUBBLE_MIN_RADIUS: f32 = 4.0;
    pub const BUBBLE_MAX_RADIUS: f32 = 10.0;
    /// New-bubble lifetime range, seconds
    pub const BUBBLE_LIFE_MIN: f32 = 8.0;
    pub const BUBBLE_LIFE_MAX: f32 = 16.0;
    /// Final fraction of a bubble's lifetime spent fading out
    pub const BUBBLE_FADE_PORTION: f32 = 0.2;

    /// Contact-effect lifetime, seconds
    pub const EFFECT_LIFE: f32 = 0.5;
    /// Contact-effect multiplicative radius growth, 1/s
    pub const EFFECT_GROWTH: f32 = 2.0;

    /// Firework lifetime ceiling, seconds
    pub const FIREWORK_LIFE: f32 = 3.0;
    /// Fraction of the lifetime after which an ascending firework detonates
    /// even if it has not reached apex
    pub const FIREWORK_FUSE: f32 = 0.3;
    /// Nominal seconds from launch to the aimed target point
    pub const FIREWORK_RISE_TIME: f32 = 0.85;
    /// Vertical deceleration while ascending, pixels/s²
    pub const FIREWORK_DECEL: f32 = 30.0;
    /// Jitter applied around the burst target, pixels
    pub const TARGET_JITTER_X: f32 = 100.0;
    pub const TARGET_JITTER_Y: f32 = 50.0;

    /// Spark lifetime, seconds
    pub const SPARK_LIFE: f32 = 1.5;
    /// Downward acceleration on sparks, pixels/s²
    pub const SPARK_GRAVITY: f32 = 50.0;
    /// Spark multiplicative shrink rate, 1/s
    pub const SPARK_SHRINK: f32 = 0.5;
    /// Spark launch speed range, pixels/s
    pub const SPARK_MIN_SPEED: f32 = 50.0;
    pub const SPARK_MAX_SPEED: f32 = 200.0;
    /// Spark alpha at birth
    pub const SPARK_ALPHA: f32 = 0.8;
    /// Sparks per burst
    pub const BURST_MIN: usize = 80;
    pub const BURST_MAX: usize = 130;

    /// Default soft population cap (the hard cap is twice this)
    pub const DEFAULT_MAX_BUBBLES: usize = 35;
    /// Per-frame replenishment probability while below the soft cap
    pub const SPAWN_CHANCE: f32 = 0.1;
    /// Bubbles added per celebration
    pub const CELEBRATION_BUBBLES: usize = 8;
    /// Fireworks launched per newly-large bubble
    pub const TRIGGER_PER_LARGE: usize = 2;
}

//! Draw-surface capability boundary
//!
//! The simulation never talks to a concrete graphics backend. It emits draw
//! calls through the [`Canvas`] trait and the host decides what a filled
//! circle actually is. [`RecordingCanvas`] captures the call stream in
//! order, which is all the demo binary and the tests need.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color, channels in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a replacement alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Color channels scaled by `factor`; alpha untouched
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }
}

/// Drawing primitives the simulation renders with
///
/// One implementation per host surface; draw order is back to front.
pub trait Canvas {
    /// Filled disc
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Hollow circle outline of the given stroke thickness
    fn stroke_circle(&mut self, center: Vec2, radius: f32, thickness: f32, color: Rgba);
    /// Line segment of the given thickness
    fn line_segment(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Rgba);
}

/// One captured draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        thickness: f32,
        color: Rgba,
    },
    LineSegment {
        from: Vec2,
        to: Vec2,
        thickness: f32,
        color: Rgba,
    },
}

/// Canvas that records the draw-call stream instead of rasterizing it
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded calls, ready for the next frame
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.calls.push(DrawCall::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, thickness: f32, color: Rgba) {
        self.calls.push(DrawCall::StrokeCircle {
            center,
            radius,
            thickness,
            color,
        });
    }

    fn line_segment(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Rgba) {
        self.calls.push(DrawCall::LineSegment {
            from,
            to,
            thickness,
            color,
        });
    }
}

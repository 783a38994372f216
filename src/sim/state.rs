//! Simulation state and core types
//!
//! Everything the frame step mutates lives in `SimState`. The read-only views
//! at the bottom are what renderers and debugging tools get to see.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// The fixed rectangle balls and walls are confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub top: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Arena {
    /// Arena anchored at the origin, as sized from the viewport
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            right: width,
            bottom: height,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Strictly inside: a point on the edge is already out
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.left && p.x < self.right && p.y > self.top && p.y < self.bottom
    }

    /// Clamp each axis to the arena.
    ///
    /// Comparisons only: NaN components pass through untouched, where
    /// `Vec2::clamp` would snap them to the minimum.
    pub fn clamp(&self, mut p: Vec2) -> Vec2 {
        if p.x < self.left {
            p.x = self.left;
        }
        if p.x > self.right {
            p.x = self.right;
        }
        if p.y < self.top {
            p.y = self.top;
        }
        if p.y > self.bottom {
            p.y = self.bottom;
        }
        p
    }
}

/// A moving ball. Radius is shared and lives on `SimState`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }
}

/// A wall grown outward from the point where its drag started
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Set once both endpoints have left the arena; never cleared
    pub complete: bool,
    /// Drag start
    pub origin: Vec2,
    /// Unit drag direction (NaN for a zero-length drag)
    pub direction: Vec2,
    /// Endpoint growing along `-direction`
    pub left: Vec2,
    /// Endpoint growing along `+direction`
    pub right: Vec2,
}

impl Wall {
    /// A fresh wall with both endpoints at `origin`
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self {
            complete: false,
            origin,
            direction,
            left: origin,
            right: origin,
        }
    }
}

/// Pointer gesture in progress
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging { start: Vec2, current: Vec2 },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub arena: Arena,
    /// Radius shared by every ball
    pub ball_radius: f32,
    /// Wall endpoint travel per frame
    pub wall_speed: f32,
    /// Fixed population, created once
    pub balls: Vec<Ball>,
    /// Append-only, in creation order
    pub walls: Vec<Wall>,
    pub gesture: Gesture,
    /// Number of completed frame steps
    pub frame: u64,
}

impl SimState {
    /// Empty world: no balls, no walls, idle pointer
    pub fn new(arena: Arena, settings: &Settings) -> Self {
        Self {
            arena,
            ball_radius: settings.ball_radius,
            wall_speed: settings.wall_speed,
            balls: Vec::new(),
            walls: Vec::new(),
            gesture: Gesture::Idle,
            frame: 0,
        }
    }

    /// Spawn `count` balls fully inside the arena with velocity components
    /// drawn from `[-speed/2, speed/2)`
    pub fn populate<R: Rng>(&mut self, count: usize, speed: f32, rng: &mut R) {
        let r = self.ball_radius;
        let arena = self.arena;

        self.balls.reserve(count);
        for _ in 0..count {
            let pos = Vec2::new(
                spawn_coord(rng, arena.left + r, arena.right - r),
                spawn_coord(rng, arena.top + r, arena.bottom - r),
            );
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * speed,
                (rng.random::<f32>() - 0.5) * speed,
            );
            self.balls.push(Ball::new(pos, vel));
        }
    }

    /// Number of walls that have stopped growing
    pub fn completed_walls(&self) -> usize {
        self.walls.iter().filter(|w| w.complete).count()
    }
}

/// Uniform in `[lo, hi]`, or the midpoint when the arena is too small
fn spawn_coord<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if lo < hi {
        rng.random_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}

// ============================================================================
// READ-ONLY VIEWS
// ============================================================================

/// What a renderer needs to draw one ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub position: Vec2,
    pub radius: f32,
}

/// What a renderer needs to draw one wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WallView {
    pub left: Vec2,
    pub right: Vec2,
    pub complete: bool,
}

/// Drag guide line while a gesture is active
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuideView {
    pub start: Vec2,
    pub current: Vec2,
}

/// Serializable point-in-time copy of the simulation, for debugging
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub arena: Arena,
    pub balls: Vec<BallView>,
    pub walls: Vec<WallView>,
    pub guide: Option<GuideView>,
}

impl Snapshot {
    pub fn capture(state: &SimState) -> Self {
        Self {
            frame: state.frame,
            arena: state.arena,
            balls: state
                .balls
                .iter()
                .map(|b| BallView {
                    position: b.pos,
                    radius: state.ball_radius,
                })
                .collect(),
            walls: state
                .walls
                .iter()
                .map(|w| WallView {
                    left: w.left,
                    right: w.right,
                    complete: w.complete,
                })
                .collect(),
            guide: match state.gesture {
                Gesture::Idle => None,
                Gesture::Dragging { start, current } => Some(GuideView { start, current }),
            },
        }
    }

    /// Pretty JSON; non-finite coordinates become `null`
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

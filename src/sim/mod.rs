//! Simulation module
//!
//! All behavior lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One `advance()` per display frame, no delta time
//! - Seeded RNG only
//! - Stable iteration order (walls in creation order)

pub mod collision;
pub mod growth;
pub mod input;
pub mod motion;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{CollisionResult, ball_line_collision, reflect_velocity, resolve_ball_walls};
pub use input::PointerEvent;
pub use state::{
    Arena, Ball, BallView, Gesture, GuideView, SimState, Snapshot, Wall, WallView,
};
pub use tick::{Simulation, tick};

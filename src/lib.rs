//! Wallball - bouncing balls in a box, fenced in by walls you draw
//!
//! Core modules:
//! - `sim`: Frame-synchronous simulation (motion, wall growth, collisions)
//! - `renderer`: WebGPU rendering of the simulation snapshot
//! - `platform`: Frame driver handle shared by the browser and native loops
//! - `settings`: Startup configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::{FrameHandle, run_frames};
pub use settings::Settings;
pub use sim::{Arena, Simulation};

/// Simulation defaults, read once at startup
pub mod consts {
    /// Number of balls spawned at startup
    pub const BALL_COUNT: usize = 100;
    /// Spread of the initial per-axis velocity (pixels/frame)
    pub const INITIAL_SPEED: f32 = 5.0;
    /// Radius shared by every ball
    pub const BALL_RADIUS: f32 = 10.0;
    /// Distance each wall endpoint travels per frame
    pub const WALL_SPEED: f32 = 7.0;

    /// Arena size used when no viewport is available (native/headless)
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;
}

//! Per-frame simulation step
//!
//! One call advances the world by one display frame: walls grow, balls move
//! and bounce off the arena, then balls are pushed out of any wall they
//! overlap. The step never fails and never blocks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::resolve_ball_walls;
use super::growth::grow_walls;
use super::input::{self, PointerEvent};
use super::motion::integrate_balls;
use super::state::{Arena, BallView, Gesture, GuideView, SimState, Snapshot, WallView};
use crate::settings::Settings;

/// Advance the state by one frame
pub fn tick(state: &mut SimState) {
    grow_walls(&mut state.walls, &state.arena, state.wall_speed);

    integrate_balls(&mut state.balls, &state.arena, state.ball_radius);

    for ball in &mut state.balls {
        resolve_ball_walls(ball, &state.walls, state.ball_radius);
    }

    state.frame += 1;
}

/// Owns the simulation state and is the only thing allowed to mutate it.
///
/// Renderers and debugging tools read through the view methods.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: SimState,
}

impl Simulation {
    /// Build a populated world. Balls come from `settings.seed`, or seed 0.
    pub fn new(arena: Arena, settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or(0);
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut state = SimState::new(arena, settings);
        state.populate(settings.ball_count, settings.initial_speed, &mut rng);

        log::info!(
            "Simulation created: {} balls in {}x{} arena (seed {})",
            state.balls.len(),
            arena.width(),
            arena.height(),
            seed
        );

        Self { state }
    }

    /// Wrap an existing state (no balls are added)
    pub fn from_state(state: SimState) -> Self {
        Self { state }
    }

    /// Run one frame
    pub fn advance(&mut self) {
        tick(&mut self.state);
    }

    pub fn pointer_down(&mut self, p: Vec2) {
        input::pointer_down(&mut self.state, p);
    }

    pub fn pointer_move(&mut self, p: Vec2) {
        input::pointer_move(&mut self.state, p);
    }

    /// Returns the index of the new wall, if a drag was in progress
    pub fn pointer_up(&mut self, p: Vec2) -> Option<usize> {
        input::pointer_up(&mut self.state, p)
    }

    pub fn handle(&mut self, event: PointerEvent) -> Option<usize> {
        input::apply_pointer(&mut self.state, event)
    }

    // === Read-only inspection ===

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn arena(&self) -> Arena {
        self.state.arena
    }

    pub fn frame(&self) -> u64 {
        self.state.frame
    }

    pub fn balls(&self) -> impl Iterator<Item = BallView> + '_ {
        let radius = self.state.ball_radius;
        self.state.balls.iter().map(move |b| BallView {
            position: b.pos,
            radius,
        })
    }

    pub fn walls(&self) -> impl Iterator<Item = WallView> + '_ {
        self.state.walls.iter().map(|w| WallView {
            left: w.left,
            right: w.right,
            complete: w.complete,
        })
    }

    /// Drag guide, if a gesture is in progress
    pub fn guide(&self) -> Option<GuideView> {
        match self.state.gesture {
            Gesture::Idle => None,
            Gesture::Dragging { start, current } => Some(GuideView { start, current }),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}

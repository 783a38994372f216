//! Frame driver plumbing
//!
//! The simulation never schedules itself. A driver (requestAnimationFrame on
//! the web, a plain loop natively) calls `Simulation::advance` once per frame
//! for as long as its `FrameHandle` says to keep running.

use std::cell::Cell;
use std::rc::Rc;

use crate::sim::Simulation;

/// Start/stop switch shared between a frame loop and whoever controls it.
///
/// Clones share the same flag. Single-threaded by construction.
#[derive(Debug, Clone, Default)]
pub struct FrameHandle {
    running: Rc<Cell<bool>>,
}

impl FrameHandle {
    /// A handle that starts out stopped
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        if !self.running.replace(true) {
            log::info!("Frame loop started");
        }
    }

    pub fn stop(&self) {
        if self.running.replace(false) {
            log::info!("Frame loop stopped");
        }
    }

    /// Flip between running and stopped; returns the new state
    pub fn toggle(&self) -> bool {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.is_running()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Headless driver: advance up to `max_frames` times, checking the handle
/// before each frame. Returns how many frames ran.
pub fn run_frames(sim: &mut Simulation, handle: &FrameHandle, max_frames: u64) -> u64 {
    let mut frames = 0;
    while frames < max_frames && handle.is_running() {
        sim.advance();
        frames += 1;
    }
    frames
}

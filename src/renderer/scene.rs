//! Turns a simulation into one triangle list per frame
//!
//! Draw order: arena border, balls, drag guide, walls.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::Simulation;

/// Triangles per ball
pub const CIRCLE_SEGMENTS: u32 = 24;
/// Stroke width for border, guide and walls (arena pixels)
pub const LINE_WIDTH: f32 = 1.0;

/// Build the vertex list for the current state of `sim`
pub fn build_scene(sim: &Simulation) -> Vec<Vertex> {
    let arena = sim.arena();
    let mut vertices = Vec::new();

    // Border sits one pixel inside the arena
    vertices.extend(shapes::rect_outline(
        Vec2::new(arena.left + 1.0, arena.top + 1.0),
        Vec2::new(arena.right - 1.0, arena.bottom - 1.0),
        LINE_WIDTH,
        colors::ARENA_BORDER,
    ));

    for ball in sim.balls() {
        if ball.position.is_finite() {
            vertices.extend(shapes::circle(
                ball.position,
                ball.radius,
                colors::BALL,
                CIRCLE_SEGMENTS,
            ));
        }
    }

    if let Some(guide) = sim.guide() {
        vertices.extend(shapes::line(
            guide.start,
            guide.current,
            LINE_WIDTH,
            colors::DRAG_GUIDE,
        ));
    }

    // Growing and complete walls look the same
    for wall in sim.walls() {
        if wall.left.is_finite() && wall.right.is_finite() {
            vertices.extend(shapes::line(wall.left, wall.right, LINE_WIDTH, colors::WALL));
        }
    }

    vertices
}

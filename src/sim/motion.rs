//! Ball motion and arena boundary reflection
//!
//! Velocity is in pixels per frame; there is no delta-time scaling.

use super::state::{Arena, Ball};

/// Move a ball by its velocity, then push it back inside any edge it crossed
/// and flip the matching velocity component.
///
/// Returns true if any edge was hit.
pub fn integrate_ball(ball: &mut Ball, arena: &Arena, radius: f32) -> bool {
    ball.pos += ball.vel;

    let mut bounced = false;

    // Each edge is checked independently so corners resolve in one frame
    let penetration = arena.left - (ball.pos.x - radius);
    if penetration > 0.0 {
        ball.pos.x += penetration;
        ball.vel.x = -ball.vel.x;
        bounced = true;
    }
    let penetration = (ball.pos.x + radius) - arena.right;
    if penetration > 0.0 {
        ball.pos.x -= penetration;
        ball.vel.x = -ball.vel.x;
        bounced = true;
    }
    let penetration = arena.top - (ball.pos.y - radius);
    if penetration > 0.0 {
        ball.pos.y += penetration;
        ball.vel.y = -ball.vel.y;
        bounced = true;
    }
    let penetration = (ball.pos.y + radius) - arena.bottom;
    if penetration > 0.0 {
        ball.pos.y -= penetration;
        ball.vel.y = -ball.vel.y;
        bounced = true;
    }

    bounced
}

/// Integrate every ball
pub fn integrate_balls(balls: &mut [Ball], arena: &Arena, radius: f32) {
    for ball in balls {
        integrate_ball(ball, arena, radius);
    }
}

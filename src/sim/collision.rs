//! Collision detection and response between balls and walls
//!
//! A wall collides along the whole infinite line through its origin, not just
//! the segment grown so far. Growing walls collide too.

use glam::Vec2;

use super::state::{Ball, Wall};
use super::vector::{rotate_degrees, sign};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal of the wall line
    pub normal: Vec2,
    /// Signed distance from the ball center to the line, measured along `normal`
    /// from the ball toward the wall origin
    pub distance: f32,
    /// How far the ball overlaps the line (radius - |distance|)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            distance: 0.0,
            penetration: 0.0,
        }
    }
}

/// Check a ball against the infinite supporting line of a wall.
///
/// A wall with a non-finite direction yields a NaN distance and never hits.
pub fn ball_line_collision(ball_pos: Vec2, ball_radius: f32, wall: &Wall) -> CollisionResult {
    let normal = rotate_degrees(wall.direction, 90.0);
    let distance = normal.dot(wall.origin - ball_pos);

    if distance.abs() < ball_radius {
        CollisionResult {
            hit: true,
            normal,
            distance,
            penetration: ball_radius - distance.abs(),
        }
    } else {
        CollisionResult::miss()
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Push a ball out to exactly `radius` from the line and mirror its velocity.
///
/// A ball whose center lies exactly on the line has no defined side
/// (`sign(0)` is NaN) and its position becomes NaN.
pub fn resolve_collision(ball: &mut Ball, hit: &CollisionResult) {
    ball.pos += hit.normal * (sign(hit.distance) * -hit.penetration);
    ball.vel = reflect_velocity(ball.vel, hit.normal);
}

/// Resolve one ball against every wall in insertion order.
///
/// Corrections are applied one after another with no reconciliation, so a
/// ball pinched between two walls ends up wherever the last wall puts it.
/// Returns the number of walls hit.
pub fn resolve_ball_walls(ball: &mut Ball, walls: &[Wall], radius: f32) -> usize {
    let mut hits = 0;
    for wall in walls {
        let result = ball_line_collision(ball.pos, radius, wall);
        if result.hit {
            resolve_collision(ball, &result);
            hits += 1;
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn vertical_wall(x: f32) -> Wall {
        Wall::new(Vec2::new(x, 0.0), Vec2::Y)
    }

    #[test]
    fn test_line_collision_hit() {
        let result = ball_line_collision(Vec2::new(45.0, 50.0), 10.0, &vertical_wall(50.0));
        assert!(result.hit);
        assert!((result.normal - Vec2::new(-1.0, 0.0)).length() < EPS);
        assert!((result.distance + 5.0).abs() < EPS);
        assert!((result.penetration - 5.0).abs() < EPS);
    }

    #[test]
    fn test_line_collision_miss() {
        let result = ball_line_collision(Vec2::new(30.0, 50.0), 10.0, &vertical_wall(50.0));
        assert!(!result.hit);

        let result = ball_line_collision(Vec2::new(75.0, 50.0), 10.0, &vertical_wall(50.0));
        assert!(!result.hit);
    }

    #[test]
    fn test_line_is_infinite() {
        // Wall segment has not grown at all, ball is far along the line
        let wall = vertical_wall(50.0);
        let result = ball_line_collision(Vec2::new(55.0, 900.0), 10.0, &wall);
        assert!(result.hit);
    }

    #[test]
    fn test_wall_reflection_scenario() {
        let mut ball = Ball::new(Vec2::new(45.0, 50.0), Vec2::new(2.0, 0.0));
        let hits = resolve_ball_walls(&mut ball, &[vertical_wall(50.0)], 10.0);
        assert_eq!(hits, 1);
        assert!((ball.pos - Vec2::new(40.0, 50.0)).length() < EPS);
        assert!((ball.vel - Vec2::new(-2.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_push_out_from_other_side() {
        let mut ball = Ball::new(Vec2::new(53.0, 20.0), Vec2::new(-1.0, 3.0));
        resolve_ball_walls(&mut ball, &[vertical_wall(50.0)], 10.0);
        assert!((ball.pos - Vec2::new(60.0, 20.0)).length() < EPS);
        // Tangential component preserved
        assert!((ball.vel - Vec2::new(1.0, 3.0)).length() < EPS);
    }

    #[test]
    fn test_reflect_velocity() {
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_reflection_preserves_speed_diagonal() {
        let wall = Wall::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0).normalize());
        let mut ball = Ball::new(Vec2::new(20.0, 25.0), Vec2::new(3.0, -1.5));
        let speed = ball.vel.length();
        assert_eq!(resolve_ball_walls(&mut ball, &[wall], 10.0), 1);
        assert!((ball.vel.length() - speed).abs() < EPS);

        // Ball ends exactly one radius from the line
        let after = ball_line_collision(ball.pos, 10.0 + 1.0, &wall);
        assert!((after.distance.abs() - 10.0).abs() < EPS);
    }

    #[test]
    fn test_nan_wall_never_hits() {
        let wall = Wall::new(Vec2::new(50.0, 50.0), Vec2::new(f32::NAN, f32::NAN));
        let mut ball = Ball::new(Vec2::new(50.0, 50.0), Vec2::new(1.0, 1.0));
        assert_eq!(resolve_ball_walls(&mut ball, &[wall], 10.0), 0);
        assert_eq!(ball.pos, Vec2::new(50.0, 50.0));
        assert_eq!(ball.vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_center_on_line_goes_nan() {
        let mut ball = Ball::new(Vec2::new(50.0, 10.0), Vec2::new(1.0, 0.0));
        let hit = CollisionResult {
            hit: true,
            normal: Vec2::new(-1.0, 0.0),
            distance: 0.0,
            penetration: 10.0,
        };
        resolve_collision(&mut ball, &hit);
        assert!(ball.pos.x.is_nan());
    }

    #[test]
    fn test_sequential_walls_last_one_wins() {
        // Two parallel walls 12 apart: the ball cannot be 10 from both
        let walls = [vertical_wall(44.0), vertical_wall(56.0)];
        let mut ball = Ball::new(Vec2::new(50.0, 50.0), Vec2::new(1.0, 0.0));
        let hits = resolve_ball_walls(&mut ball, &walls, 10.0);
        assert_eq!(hits, 2);
        // First pushes to x=54, second pushes back to x=46
        assert!((ball.pos.x - 46.0).abs() < EPS);
        // Reflected twice
        assert!((ball.vel - Vec2::new(1.0, 0.0)).length() < EPS);
    }
}

//! Wall growth
//!
//! Each frame both endpoints of an incomplete wall step outward along the
//! wall direction and are clamped to the arena. An endpoint stops once it
//! leaves the arena interior; when both have stopped the wall is complete.

use super::state::{Arena, Wall};

/// Advance one wall by a single frame. Returns true if it completed this frame.
pub fn grow_wall(wall: &mut Wall, arena: &Arena, speed: f32) -> bool {
    if wall.complete {
        return false;
    }

    let step = wall.direction * speed;
    if arena.contains(wall.left) {
        wall.left = arena.clamp(wall.left - step);
    }
    if arena.contains(wall.right) {
        wall.right = arena.clamp(wall.right + step);
    }

    if !arena.contains(wall.left) && !arena.contains(wall.right) {
        wall.complete = true;
        return true;
    }
    false
}

/// Advance every incomplete wall
pub fn grow_walls(walls: &mut [Wall], arena: &Arena, speed: f32) {
    for (index, wall) in walls.iter_mut().enumerate() {
        if grow_wall(wall, arena, speed) {
            log::debug!("Wall {} complete: {:?} -> {:?}", index, wall.left, wall.right);
        }
    }
}

//! Pointer gesture state machine
//!
//! Pointer events are applied the moment they arrive. A release while
//! dragging turns the drag into a new wall.

use glam::Vec2;

use super::state::{Gesture, SimState, Wall};
use super::vector::direction;

/// Pointer event in arena-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

/// Apply one pointer event. Returns the index of the wall it created, if any.
pub fn apply_pointer(state: &mut SimState, event: PointerEvent) -> Option<usize> {
    match event {
        PointerEvent::Down(p) => {
            pointer_down(state, p);
            None
        }
        PointerEvent::Move(p) => {
            pointer_move(state, p);
            None
        }
        PointerEvent::Up(p) => pointer_up(state, p),
    }
}

/// Start a drag at `p`, discarding any drag already in progress
pub fn pointer_down(state: &mut SimState, p: Vec2) {
    state.gesture = Gesture::Dragging { start: p, current: p };
}

/// Track the pointer while dragging
pub fn pointer_move(state: &mut SimState, p: Vec2) {
    if let Gesture::Dragging { current, .. } = &mut state.gesture {
        *current = p;
    }
}

/// Finish the drag and append its wall.
///
/// The release position itself is ignored: the wall direction comes from the
/// last tracked `current`.
pub fn pointer_up(state: &mut SimState, _p: Vec2) -> Option<usize> {
    match state.gesture {
        Gesture::Idle => None,
        Gesture::Dragging { start, current } => {
            let dir = direction(start, current);
            if !dir.is_finite() {
                log::debug!("Zero-length drag at {:?}, wall direction is not finite", start);
            }

            state.walls.push(Wall::new(start, dir));
            state.gesture = Gesture::Idle;

            let index = state.walls.len() - 1;
            log::debug!("Wall {} created at {:?} along {:?}", index, start, dir);
            Some(index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::Arena;

    fn empty_state() -> SimState {
        SimState::new(Arena::from_size(100.0, 100.0), &Settings::default())
    }

    #[test]
    fn test_down_starts_drag() {
        let mut state = empty_state();
        pointer_down(&mut state, Vec2::new(10.0, 20.0));
        assert_eq!(
            state.gesture,
            Gesture::Dragging {
                start: Vec2::new(10.0, 20.0),
                current: Vec2::new(10.0, 20.0),
            }
        );
    }

    #[test]
    fn test_down_overwrites_existing_drag() {
        let mut state = empty_state();
        pointer_down(&mut state, Vec2::new(10.0, 20.0));
        pointer_move(&mut state, Vec2::new(40.0, 20.0));
        pointer_down(&mut state, Vec2::new(70.0, 70.0));
        assert_eq!(
            state.gesture,
            Gesture::Dragging {
                start: Vec2::new(70.0, 70.0),
                current: Vec2::new(70.0, 70.0),
            }
        );
        assert!(state.walls.is_empty());
    }

    #[test]
    fn test_move_and_up_while_idle_are_noops() {
        let mut state = empty_state();
        pointer_move(&mut state, Vec2::new(10.0, 10.0));
        assert_eq!(state.gesture, Gesture::Idle);
        assert_eq!(pointer_up(&mut state, Vec2::new(10.0, 10.0)), None);
        assert!(state.walls.is_empty());
    }

    #[test]
    fn test_drag_creates_wall() {
        let mut state = empty_state();
        pointer_down(&mut state, Vec2::new(20.0, 50.0));
        pointer_move(&mut state, Vec2::new(30.0, 50.0));
        pointer_move(&mut state, Vec2::new(60.0, 50.0));
        let index = pointer_up(&mut state, Vec2::new(60.0, 50.0));

        assert_eq!(index, Some(0));
        assert_eq!(state.gesture, Gesture::Idle);
        let wall = state.walls[0];
        assert!(!wall.complete);
        assert_eq!(wall.origin, Vec2::new(20.0, 50.0));
        assert_eq!(wall.left, wall.origin);
        assert_eq!(wall.right, wall.origin);
        assert!((wall.direction - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_up_uses_last_move_not_release_point() {
        let mut state = empty_state();
        pointer_down(&mut state, Vec2::new(50.0, 50.0));
        pointer_move(&mut state, Vec2::new(50.0, 80.0));
        pointer_up(&mut state, Vec2::new(90.0, 50.0));
        assert!((state.walls[0].direction - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_walls_append_in_order() {
        let mut state = empty_state();
        for (i, x) in [10.0, 20.0, 30.0].into_iter().enumerate() {
            apply_pointer(&mut state, PointerEvent::Down(Vec2::new(x, 10.0)));
            apply_pointer(&mut state, PointerEvent::Move(Vec2::new(x, 40.0)));
            assert_eq!(apply_pointer(&mut state, PointerEvent::Up(Vec2::ZERO)), Some(i));
        }
        let origins: Vec<f32> = state.walls.iter().map(|w| w.origin.x).collect();
        assert_eq!(origins, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_zero_length_drag_gives_nan_direction() {
        let mut state = empty_state();
        let p = Vec2::new(40.0, 40.0);
        pointer_down(&mut state, p);
        assert_eq!(pointer_up(&mut state, p), Some(0));

        let wall = state.walls[0];
        assert!(wall.direction.x.is_nan());
        assert!(wall.direction.y.is_nan());
        assert_eq!(wall.origin, p);
    }
}

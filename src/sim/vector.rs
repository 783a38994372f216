//! 2D vector helpers on top of `glam::Vec2`
//!
//! Addition, subtraction, scaling, length and dot product come straight from
//! glam. The helpers here keep the raw arithmetic of the simulation: nothing
//! is clamped or substituted, so a zero-length input yields NaN components.

use glam::Vec2;

/// Divide a vector by its length.
///
/// Unlike `Vec2::normalize_or_zero`, a zero vector produces NaN components.
#[inline]
pub fn normalize_raw(v: Vec2) -> Vec2 {
    v / v.length()
}

/// Unit vector pointing from `from` to `to`
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    normalize_raw(to - from)
}

/// Rotate counter-clockwise (in a y-up frame) by `degrees`
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// `n / |n|`: +1 or -1, NaN at zero
#[inline]
pub fn sign(n: f32) -> f32 {
    n / n.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_normalize_raw() {
        let n = normalize_raw(Vec2::new(3.0, 4.0));
        assert!((n.x - 0.6).abs() < EPS);
        assert!((n.y - 0.8).abs() < EPS);
        assert!((n.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_raw_zero_is_nan() {
        let n = normalize_raw(Vec2::ZERO);
        assert!(n.x.is_nan());
        assert!(n.y.is_nan());
    }

    #[test]
    fn test_direction() {
        let d = direction(Vec2::new(10.0, 10.0), Vec2::new(10.0, 30.0));
        assert!(d.x.abs() < EPS);
        assert!((d.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_degrees() {
        let r = rotate_degrees(Vec2::new(0.0, 1.0), 90.0);
        assert!((r.x + 1.0).abs() < EPS);
        assert!(r.y.abs() < EPS);

        let r = rotate_degrees(Vec2::new(1.0, 0.0), 180.0);
        assert!((r.x + 1.0).abs() < EPS);
        assert!(r.y.abs() < EPS);
    }

    #[test]
    fn test_rotate_preserves_length() {
        let v = Vec2::new(-2.5, 7.0);
        for deg in [15.0, 90.0, 133.0, 270.0] {
            assert!((rotate_degrees(v, deg).length() - v.length()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(5.0), 1.0);
        assert_eq!(sign(-0.25), -1.0);
        assert!(sign(0.0).is_nan());
    }
}

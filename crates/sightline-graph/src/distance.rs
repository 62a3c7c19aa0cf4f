use sightline_core::Point;

/// Manhattan (L1) distance between two points. Never overflows, even for
/// coordinates at opposite ends of the `i32` range (saturates instead).
#[inline]
pub fn manhattan(a: Point, b: Point) -> u32 {
    let (dx, dy) = a.abs_diff(b);
    dx.saturating_add(dy)
}

/// Octile distance: straight steps cost 1, diagonal steps cost
/// `1 + diagonal`.
#[inline]
pub fn octile(a: Point, b: Point, diagonal: f64) -> f64 {
    let (dx, dy) = a.abs_diff(b);
    f64::from(dx.max(dy)) + diagonal * f64::from(dx.min(dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Point::new(1, 7);
        let b = Point::new(4, 2);
        assert_eq!(manhattan(a, b), 8);
        assert_eq!(manhattan(b, a), 8);
        assert_eq!(manhattan(a, a), 0);
    }

    #[test]
    fn manhattan_far_apart() {
        let a = Point::new(i32::MIN, i32::MIN);
        let b = Point::new(i32::MAX, i32::MAX);
        assert_eq!(manhattan(a, b), u32::MAX);
    }

    #[test]
    fn octile_mixes_straight_and_diagonal() {
        let k = 0.41421356237;
        assert_eq!(octile(Point::new(0, 0), Point::new(5, 0), k), 5.0);
        let d = octile(Point::new(0, 0), Point::new(9, 9), k);
        assert!((d - 9.0 * (1.0 + k)).abs() < 1e-9);
        let d = octile(Point::new(2, 1), Point::new(0, 5), k);
        assert!((d - (4.0 + 2.0 * k)).abs() < 1e-9);
    }
}

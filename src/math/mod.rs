pub mod circle_2d;
pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
///
/// Every equality, collinearity, and denominator check in the crate goes
/// through this constant.
pub const TOLERANCE: f64 = 1e-6;

/// 2D cross product (z-component of the 3D cross product).
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns `true` if the two vectors are parallel within [`TOLERANCE`].
#[must_use]
pub fn vectors_collinear(a: &Vector2, b: &Vector2) -> bool {
    cross_2d(a, b).abs() < TOLERANCE
}

/// Returns `true` if `p1`, `p2`, `p3` lie on one line within [`TOLERANCE`].
#[must_use]
pub fn collinear(p1: &Point2, p2: &Point2, p3: &Point2) -> bool {
    vectors_collinear(&(p2 - p1), &(p3 - p1))
}

/// Unsigned angle between two vectors in radians, in `[0, π]`.
///
/// Returns `0.0` when either vector has zero length.
#[must_use]
pub fn angle_between(a: &Vector2, b: &Vector2) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < f64::EPSILON {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}

/// Sorts `items` by the x then y coordinate of their point.
///
/// Consecutive items whose x lies within [`TOLERANCE`] of the first item of
/// their run form one column, ordered by y alone. Items with equal y keep
/// their relative order.
pub fn sort_xy<T>(items: &mut [(Point2, T)]) {
    items.sort_by(|(p, _), (q, _)| p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y)));

    let mut start = 0;
    while start < items.len() {
        let x0 = items[start].0.x;
        let mut end = start + 1;
        while end < items.len() && items[end].0.x - x0 < TOLERANCE {
            end += 1;
        }
        items[start..end].sort_by(|(p, _), (q, _)| p.y.total_cmp(&q.y));
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn collinear_points_on_line() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 1.0);
        let c = Point2::new(3.0, 3.0);
        assert!(collinear(&a, &b, &c));
    }

    #[test]
    fn collinear_rejects_triangle() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);
        assert!(!collinear(&a, &b, &c));
    }

    #[test]
    fn angle_between_axes() {
        let x = Vector2::new(1.0, 0.0);
        let y = Vector2::new(0.0, 2.0);
        assert_relative_eq!(angle_between(&x, &y), FRAC_PI_2);
        assert_relative_eq!(angle_between(&x, &-x), PI);
        assert_relative_eq!(angle_between(&x, &Vector2::zeros()), 0.0);
    }

    #[test]
    fn sort_xy_groups_near_equal_x_into_columns() {
        let mut items = vec![
            (Point2::new(1.0 + 1e-8, 0.0), 'a'),
            (Point2::new(2.0, 0.0), 'b'),
            (Point2::new(1.0, 3.0), 'c'),
            (Point2::new(0.0, 5.0), 'd'),
        ];
        sort_xy(&mut items);
        let order: Vec<char> = items.iter().map(|&(_, c)| c).collect();
        assert_eq!(order, vec!['d', 'a', 'c', 'b']);
    }

    #[test]
    fn sort_xy_handles_tolerance_scale_spacing() {
        // Neighbors closer than the tolerance, endpoints farther apart.
        let mut items: Vec<(Point2, u32)> = (0..200_u32)
            .map(|i| {
                let t = f64::from(i);
                (Point2::new((t * 7.0) % 23.0 * 4e-7, (t * 13.0) % 17.0 * 6e-7), i)
            })
            .collect();
        sort_xy(&mut items);
        for pair in items.windows(2) {
            assert!(pair[1].0.x - pair[0].0.x > -TOLERANCE);
        }
        let mut ids: Vec<u32> = items.iter().map(|&(_, i)| i).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..200).collect::<Vec<_>>());
    }
}

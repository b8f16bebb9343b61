use super::intersect_2d::line_line_intersect_2d;
use super::{Point2, Vector2};
use crate::error::{GeometryError, Result};

/// A circle in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center of the circle.
    pub center: Point2,
    /// Radius of the circle.
    pub radius: f64,
}

impl Circle {
    /// Returns `true` if `p` lies inside or on the circle.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        point_in_circle(p, &self.center, self.radius)
    }
}

/// Computes the circle passing through `t1`, `t2`, `t3`.
///
/// The center is the intersection of the perpendicular bisectors of
/// `t1`–`t2` and `t2`–`t3`.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateTriangle` if the bisectors are parallel,
/// i.e. the three points are (nearly) collinear.
pub fn circumcircle(t1: &Point2, t2: &Point2, t3: &Point2) -> Result<Circle> {
    let mid1 = nalgebra::center(t1, t2);
    let mid2 = nalgebra::center(t2, t3);
    let bisector1 = mid1 + perpendicular(&(t2 - t1));
    let bisector2 = mid2 + perpendicular(&(t3 - t2));

    let center = line_line_intersect_2d(&mid1, &bisector1, &mid2, &bisector2).ok_or(
        GeometryError::DegenerateTriangle {
            a: *t1,
            b: *t2,
            c: *t3,
        },
    )?;
    let radius = (center - t1).norm();
    Ok(Circle { center, radius })
}

/// Returns `true` if `p` lies inside or on the circle.
///
/// Points exactly on the boundary count as inside.
#[must_use]
pub fn point_in_circle(p: &Point2, center: &Point2, radius: f64) -> bool {
    (p - center).norm_squared() <= radius * radius
}

/// Delaunay legality test: returns `true` if `p` lies inside or on the
/// circumcircle of `t1`, `t2`, `t3`.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateTriangle` if the triangle is degenerate.
pub fn point_in_circumcircle(p: &Point2, t1: &Point2, t2: &Point2, t3: &Point2) -> Result<bool> {
    Ok(circumcircle(t1, t2, t3)?.contains(p))
}

fn perpendicular(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::DelaunayError;

    #[test]
    fn circumcircle_of_right_triangle() {
        let c = circumcircle(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
            &Point2::new(0.0, 2.0),
        )
        .unwrap();
        assert_relative_eq!(c.center.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.center.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.radius, 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn circumcircle_of_collinear_points_fails() {
        let err = circumcircle(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(2.0, 0.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DelaunayError::Geometry(GeometryError::DegenerateTriangle { .. })
        ));
    }

    #[test]
    fn point_in_circle_is_inclusive() {
        let center = Point2::new(0.0, 0.0);
        assert!(point_in_circle(&Point2::new(1.0, 0.0), &center, 1.0));
        assert!(point_in_circle(&Point2::new(0.5, 0.5), &center, 1.0));
        assert!(!point_in_circle(&Point2::new(1.0, 1.0), &center, 1.0));
    }

    #[test]
    fn point_in_circumcircle_legality() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);
        let c = Point2::new(2.0, 3.0);
        assert!(point_in_circumcircle(&Point2::new(2.0, 1.0), &a, &b, &c).unwrap());
        assert!(!point_in_circumcircle(&Point2::new(2.0, -3.0), &a, &b, &c).unwrap());
    }
}

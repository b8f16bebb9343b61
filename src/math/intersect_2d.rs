use super::{cross_2d, vectors_collinear, Point2, TOLERANCE};

/// Intersection of the infinite line through `l1`, `l2` with the infinite
/// line through `m1`, `m2`.
///
/// Returns `None` if the lines are parallel or coincident.
#[must_use]
pub fn line_line_intersect_2d(l1: &Point2, l2: &Point2, m1: &Point2, m2: &Point2) -> Option<Point2> {
    let dl = l2 - l1;
    let dm = m2 - m1;
    let denom = cross_2d(&dl, &dm);
    if denom.abs() < TOLERANCE {
        return None;
    }
    let t = cross_2d(&(m1 - l1), &dm) / denom;
    Some(l1 + dl * t)
}

/// Intersection of the infinite line through `l1`, `l2` with the segment
/// `s1`–`s2`.
///
/// Only crossings strictly inside the segment count: a hit on either
/// segment endpoint, or outside the segment, returns `None`.
#[must_use]
pub fn segment_intersection(l1: &Point2, l2: &Point2, s1: &Point2, s2: &Point2) -> Option<Point2> {
    let p = line_line_intersect_2d(l1, l2, s1, s2)?;
    if is_segment_end(&p, s1, s2) || !point_on_segment(&p, s1, s2) {
        return None;
    }
    Some(p)
}

/// Returns `true` if `p` lies strictly inside the segment `s1`–`s2`.
///
/// The point must be collinear with the segment and its projection must fall
/// strictly between the endpoints.
#[must_use]
pub fn point_on_segment(p: &Point2, s1: &Point2, s2: &Point2) -> bool {
    let s1p = p - s1;
    let s1s2 = s2 - s1;
    if !vectors_collinear(&s1p, &s1s2) {
        return false;
    }
    let proj = s1p.dot(&s1s2);
    proj > 0.0 && proj < s1s2.norm_squared()
}

/// Returns `true` if `p` coincides with either endpoint of the segment.
#[must_use]
pub fn is_segment_end(p: &Point2, s1: &Point2, s2: &Point2) -> bool {
    (p - s1).norm() < TOLERANCE || (p - s2).norm() < TOLERANCE
}

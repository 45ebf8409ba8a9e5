//! Midpoint circle tracing.

/// Traces the outline of a circle of `radius` around `(x0, y0)`.
///
/// Each octant step visits all eight reflections, so points on the axes and diagonals
/// are handed to the visitor more than once. The visitor's return value is ignored. A
/// negative radius traces nothing; a zero radius visits the center.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use tilecarve::trace::circle;
///
/// let mut points = HashSet::new();
/// circle(0, 0, 1, |x, y| points.insert((x, y)));
/// assert!(points.contains(&(1, 0)));
/// assert!(points.contains(&(0, -1)));
/// ```
pub fn circle<F>(x0: i32, y0: i32, radius: i32, mut visit: F)
where
    F: FnMut(i32, i32) -> bool,
{
    let mut x = radius;
    let mut y = 0;
    let mut radius_error = 1 - x;

    while x >= y {
        visit(x0 + x, y0 + y);
        visit(x0 + y, y0 + x);
        visit(x0 - x, y0 + y);
        visit(x0 - y, y0 + x);
        visit(x0 - x, y0 - y);
        visit(x0 - y, y0 - x);
        visit(x0 + x, y0 - y);
        visit(x0 + y, y0 - x);

        y += 1;
        if radius_error < 0 {
            radius_error += 2 * y + 1;
        } else {
            x -= 1;
            radius_error += 2 * (y - x + 1);
        }
    }
}

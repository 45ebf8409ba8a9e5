//! Bresenham line and ray tracing.

/// Exclusive bound on coordinate magnitude for [`line`] and [`ray`].
///
/// Inside `(-COORDINATE_LIMIT, COORDINATE_LIMIT)` the axis deltas and the doubled error
/// term fit in `i32`. Any tile grid coordinate is well within it.
pub const COORDINATE_LIMIT: i32 = 1 << 28;

/// Error-term state shared by [`line`] and [`ray`].
///
/// `dy` is stored negated so both axis updates compare against the doubled error
/// with a single comparison each.
struct Stepper {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
}

impl Stepper {
    fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        Self {
            x: x1,
            y: y1,
            dx,
            dy,
            sx: if x1 < x2 { 1 } else { -1 },
            sy: if y1 < y2 { 1 } else { -1 },
            err: dx + dy,
        }
    }

    fn step(&mut self) {
        let e2 = 2 * self.err;
        if e2 > self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
    }
}

/// Traces the line from `(x1, y1)` to `(x2, y2)`, both ends inclusive.
///
/// Returns `true` if the end point was reached and accepted, `false` as soon as the
/// visitor rejects a point. Both end points must lie within [`COORDINATE_LIMIT`].
///
/// # Examples
///
/// ```
/// use tilecarve::trace::line;
///
/// let mut count = 0;
/// assert!(line(0, 0, 4, -2, |_, _| {
///     count += 1;
///     true
/// }));
/// assert_eq!(count, 5);
///
/// // Blocked after the second point
/// let mut seen = 0;
/// assert!(!line(0, 0, 10, 0, |_, _| {
///     seen += 1;
///     seen < 2
/// }));
/// ```
pub fn line<F>(x1: i32, y1: i32, x2: i32, y2: i32, mut visit: F) -> bool
where
    F: FnMut(i32, i32) -> bool,
{
    let mut stepper = Stepper::new(x1, y1, x2, y2);
    loop {
        if !visit(stepper.x, stepper.y) {
            return false;
        }
        if stepper.x == x2 && stepper.y == y2 {
            return true;
        }
        stepper.step();
    }
}

/// Traces from `(x1, y1)` through `(x2, y2)` and beyond until the visitor returns
/// `false`.
///
/// A zero-length ray has no direction and returns without visiting anything. The
/// visitor is the only thing that ends the trace, so it must eventually reject a point
/// (typically when it leaves the grid), and it must do so before the trace leaves
/// [`COORDINATE_LIMIT`].
pub fn ray<F>(x1: i32, y1: i32, x2: i32, y2: i32, mut visit: F)
where
    F: FnMut(i32, i32) -> bool,
{
    if x1 == x2 && y1 == y2 {
        return;
    }

    let mut stepper = Stepper::new(x1, y1, x2, y2);
    while visit(stepper.x, stepper.y) {
        stepper.step();
    }
}

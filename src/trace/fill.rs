//! Stack-based flood fill.

/// Flood fills the 4-connected region around `(x, y)`.
///
/// The start point is offered to the visitor first. Every point the visitor accepts
/// has its four neighbours offered in turn. The fill keeps no visited set: the visitor
/// must record what it has accepted and reject it afterwards, and must reject points
/// outside its bounds. Otherwise the fill never terminates.
///
/// Points are kept on an explicit stack, so very large regions do not grow the call
/// stack.
///
/// # Examples
///
/// ```
/// use tilecarve::trace::fill;
///
/// // 3x3 region, marked as it is visited
/// let mut marked = [[false; 3]; 3];
/// fill(1, 1, |x, y| {
///     if !(0..3).contains(&x) || !(0..3).contains(&y) || marked[y as usize][x as usize] {
///         return false;
///     }
///     marked[y as usize][x as usize] = true;
///     true
/// });
/// assert!(marked.iter().flatten().all(|&m| m));
/// ```
pub fn fill<F>(x: i32, y: i32, mut visit: F)
where
    F: FnMut(i32, i32) -> bool,
{
    if !visit(x, y) {
        return;
    }

    let mut stack = vec![(x, y)];
    while let Some((px, py)) = stack.pop() {
        for (nx, ny) in [(px, py + 1), (px, py - 1), (px + 1, py), (px - 1, py)] {
            if visit(nx, ny) {
                stack.push((nx, ny));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal bounded bitmap used to drive the fill.
    struct Bitmap {
        width: i32,
        height: i32,
        open: Vec<bool>,
        marked: Vec<bool>,
    }

    impl Bitmap {
        fn parse(rows: &[&str]) -> Self {
            let height = rows.len() as i32;
            let width = rows[0].len() as i32;
            let open = rows
                .iter()
                .flat_map(|row| row.chars().map(|c| c == '.'))
                .collect::<Vec<_>>();
            let marked = vec![false; open.len()];
            Self {
                width,
                height,
                open,
                marked,
            }
        }

        fn visit(&mut self, x: i32, y: i32) -> bool {
            if x < 0 || y < 0 || x >= self.width || y >= self.height {
                return false;
            }
            let i = (y * self.width + x) as usize;
            if !self.open[i] || self.marked[i] {
                return false;
            }
            self.marked[i] = true;
            true
        }

        fn marked_count(&self) -> usize {
            self.marked.iter().filter(|&&m| m).count()
        }
    }

    #[test]
    fn test_isolated_tile_visits_only_itself() {
        let mut bitmap = Bitmap::parse(&["###", "#.#", "###"]);
        let mut accepted = Vec::new();
        fill(1, 1, |x, y| {
            let ok = bitmap.visit(x, y);
            if ok {
                accepted.push((x, y));
            }
            ok
        });
        assert_eq!(accepted, vec![(1, 1)]);
    }

    #[test]
    fn test_rejected_start_visits_nothing_else() {
        let mut bitmap = Bitmap::parse(&["...", ".#.", "..."]);
        let mut calls = 0;
        fill(1, 1, |x, y| {
            calls += 1;
            bitmap.visit(x, y)
        });
        assert_eq!(calls, 1);
        assert_eq!(bitmap.marked_count(), 0);
    }

    #[test]
    fn test_fill_does_not_cross_diagonals() {
        let mut bitmap = Bitmap::parse(&[
            "..#..", //
            "..#..", //
            "###..", //
            "...#.", //
        ]);
        fill(0, 0, |x, y| bitmap.visit(x, y));
        assert_eq!(bitmap.marked_count(), 4);
    }

    #[test]
    fn test_fill_reaches_winding_region() {
        let mut bitmap = Bitmap::parse(&[
            ".....", //
            "####.", //
            ".....", //
            ".####", //
            ".....", //
        ]);
        fill(0, 0, |x, y| bitmap.visit(x, y));
        assert_eq!(bitmap.marked_count(), 17);
    }

    #[test]
    fn test_large_region_uses_no_recursion() {
        let row = ".".repeat(400);
        let rows = vec![row.as_str(); 400];
        let mut bitmap = Bitmap::parse(&rows);
        fill(200, 200, |x, y| bitmap.visit(x, y));
        assert_eq!(bitmap.marked_count(), 400 * 400);
    }
}

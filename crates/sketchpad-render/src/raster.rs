//! Scan conversion of lines and circles into integer pixel coordinates.
//!
//! Every rasterizer is a lazy, finite iterator; the `*_plot` style wrappers
//! feed the same sequence into a callback. Nothing here draws.

use serde::{Deserialize, Serialize};

/// Which line algorithm the renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterAlgorithm {
    Dda,
    #[default]
    Bresenham,
}

impl RasterAlgorithm {
    /// Rasterize a line with the chosen algorithm.
    pub fn line(
        &self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Box<dyn Iterator<Item = (i32, i32)>> {
        match self {
            RasterAlgorithm::Dda => Box::new(DdaLine::new(x0, y0, x1, y1)),
            RasterAlgorithm::Bresenham => Box::new(BresenhamLine::new(x0, y0, x1, y1)),
        }
    }
}

/// Round half up, the way the canvas snaps coordinates to pixels
/// (`-0.5` rounds to `0`, not `-1`).
pub fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

// ── DDA ──────────────────────────────────────────────────────────────

/// Digital differential analyzer: walks `max(|dx|, |dy|)` equal float steps
/// and rounds each sample.
#[derive(Debug, Clone)]
pub struct DdaLine {
    x: f64,
    y: f64,
    x_inc: f64,
    y_inc: f64,
    remaining: u64,
}

impl DdaLine {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let dx = f64::from(x1) - f64::from(x0);
        let dy = f64::from(y1) - f64::from(y0);
        let steps = dx.abs().max(dy.abs());

        // Zero steps: a single pixel, increments unused.
        let (x_inc, y_inc) = if steps == 0.0 {
            (0.0, 0.0)
        } else {
            (dx / steps, dy / steps)
        };

        Self {
            x: f64::from(x0),
            y: f64::from(y0),
            x_inc,
            y_inc,
            remaining: steps as u64 + 1,
        }
    }
}

impl Iterator for DdaLine {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let pixel = (round_half_up(self.x), round_half_up(self.y));
        self.remaining -= 1;
        self.x += self.x_inc;
        self.y += self.y_inc;
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

pub fn dda_line(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(i32, i32)) {
    DdaLine::new(x0, y0, x1, y1).for_each(|(x, y)| plot(x, y));
}

// ── Bresenham line ───────────────────────────────────────────────────

/// Integer-only Bresenham line.
///
/// Steep lines are walked along y, and endpoints are swapped so the major
/// axis always increases, so pixels may come out end-to-start. Deltas are
/// kept in `i64` so any pair of `i32` endpoints is valid.
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    steep: bool,
    x: i64,
    x_end: i64,
    y: i64,
    y_step: i64,
    dx: i64,
    dy: i64,
    error: i64,
    done: bool,
}

impl BresenhamLine {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        Self {
            steep,
            x: x0,
            x_end: x1,
            y: y0,
            y_step: if y0 < y1 { 1 } else { -1 },
            dx,
            dy: (y1 - y0).abs(),
            error: dx / 2,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // x and y never leave the span of the original endpoints.
        let pixel = if self.steep {
            (self.y as i32, self.x as i32)
        } else {
            (self.x as i32, self.y as i32)
        };

        self.error -= self.dy;
        if self.error < 0 {
            self.y += self.y_step;
            self.error += self.dx;
        }

        if self.x == self.x_end {
            self.done = true;
        } else {
            self.x += 1;
        }

        Some(pixel)
    }
}

pub fn bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(i32, i32)) {
    BresenhamLine::new(x0, y0, x1, y1).for_each(|(x, y)| plot(x, y));
}

// ── Bresenham circle ─────────────────────────────────────────────────

/// Midpoint circle with the integer decision parameter `d = 3 - 2r`.
///
/// Emits the 8 symmetric points of every step, so points on the axes and
/// diagonals repeat; deduplicate downstream if it matters. A negative radius
/// is treated as zero. The decision parameter runs in `i64`; pixels that fall
/// outside the `i32` range saturate at its bounds.
#[derive(Debug, Clone)]
pub struct BresenhamCircle {
    xc: i64,
    yc: i64,
    x: i64,
    y: i64,
    d: i64,
    octant: u8,
    done: bool,
}

impl BresenhamCircle {
    pub fn new(xc: i32, yc: i32, radius: i32) -> Self {
        let r = i64::from(radius.max(0));
        Self {
            xc: i64::from(xc),
            yc: i64::from(yc),
            x: 0,
            y: r,
            d: 3 - 2 * r,
            octant: 0,
            done: false,
        }
    }

    fn symmetric_point(&self) -> (i32, i32) {
        let (xc, yc, x, y) = (self.xc, self.yc, self.x, self.y);
        let (px, py) = match self.octant {
            0 => (xc + x, yc + y),
            1 => (xc - x, yc + y),
            2 => (xc + x, yc - y),
            3 => (xc - x, yc - y),
            4 => (xc + y, yc + x),
            5 => (xc - y, yc + x),
            6 => (xc + y, yc - x),
            _ => (xc - y, yc - x),
        };
        (saturate(px), saturate(py))
    }
}

impl Iterator for BresenhamCircle {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let pixel = self.symmetric_point();
        self.octant += 1;

        if self.octant == 8 {
            self.octant = 0;
            if self.y >= self.x {
                self.x += 1;
                if self.d > 0 {
                    self.y -= 1;
                    self.d += 4 * (self.x - self.y) + 10;
                } else {
                    self.d += 4 * self.x + 6;
                }
            } else {
                self.done = true;
            }
        }

        Some(pixel)
    }
}

fn saturate(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

pub fn bresenham_circle(xc: i32, yc: i32, radius: i32, mut plot: impl FnMut(i32, i32)) {
    BresenhamCircle::new(xc, yc, radius).for_each(|(x, y)| plot(x, y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
        assert_eq!(round_half_up(1.49), 1);
    }

    #[test]
    fn test_bresenham_horizontal_line() {
        let pixels: Vec<_> = BresenhamLine::new(0, 0, 5, 0).collect();
        assert_eq!(pixels.len(), 6);
        assert!(pixels.iter().all(|&(_, y)| y == 0));
        let xs: Vec<i32> = pixels.iter().map(|&(x, _)| x).collect();
        assert_eq!(xs, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_bresenham_pixel_count_all_octants() {
        let ends = [
            (7, 3),
            (3, 7),
            (-3, 7),
            (-7, 3),
            (-7, -3),
            (-3, -7),
            (3, -7),
            (7, -3),
            (5, 5),
            (0, -9),
        ];
        for (x1, y1) in ends {
            let pixels: Vec<_> = BresenhamLine::new(0, 0, x1, y1).collect();
            let expected = x1.abs().max(y1.abs()) as usize + 1;
            assert_eq!(pixels.len(), expected, "line to ({}, {})", x1, y1);

            let unique: HashSet<_> = pixels.iter().copied().collect();
            assert_eq!(unique.len(), expected);
            assert!(unique.contains(&(0, 0)));
            assert!(unique.contains(&(x1, y1)));
        }
    }

    #[test]
    fn test_bresenham_steps_are_connected() {
        let pixels: Vec<_> = BresenhamLine::new(2, 9, 11, -4).collect();
        for pair in pixels.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!((a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1);
        }
    }

    #[test]
    fn test_bresenham_single_point() {
        let pixels: Vec<_> = BresenhamLine::new(4, 4, 4, 4).collect();
        assert_eq!(pixels, vec![(4, 4)]);
    }

    #[test]
    fn test_dda_matches_endpoints() {
        let pixels: Vec<_> = DdaLine::new(0, 0, 10, 4).collect();
        assert_eq!(pixels.len(), 11);
        assert_eq!(pixels.first(), Some(&(0, 0)));
        assert_eq!(pixels.last(), Some(&(10, 4)));
        assert_eq!(DdaLine::new(0, 0, 10, 4).size_hint(), (11, Some(11)));
    }

    #[test]
    fn test_dda_keeps_input_direction() {
        let pixels: Vec<_> = DdaLine::new(3, 0, 0, 0).collect();
        assert_eq!(pixels, vec![(3, 0), (2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn test_dda_single_pixel() {
        let mut plotted = Vec::new();
        dda_line(7, -2, 7, -2, |x, y| plotted.push((x, y)));
        assert_eq!(plotted, vec![(7, -2)]);
    }

    #[test]
    fn test_circle_radius_bound() {
        for r in [1, 2, 5, 10, 37, 100] {
            let mut count = 0;
            bresenham_circle(0, 0, r, |x, y| {
                let dist = f64::from(x * x + y * y).sqrt().round() as i32;
                assert!((r - 1..=r + 1).contains(&dist), "r={} pixel=({}, {})", r, x, y);
                count += 1;
            });
            assert_eq!(count % 8, 0);
        }
    }

    #[test]
    fn test_circle_covers_axis_points() {
        let pixels: HashSet<_> = BresenhamCircle::new(10, -4, 6).collect();
        for p in [(16, -4), (4, -4), (10, 2), (10, -10)] {
            assert!(pixels.contains(&p), "missing {:?}", p);
        }
    }

    #[test]
    fn test_circle_negative_radius_is_point() {
        let pixels: HashSet<_> = BresenhamCircle::new(3, 3, -5).collect();
        assert!(pixels.contains(&(3, 3)));
        assert!(pixels.iter().all(|&(x, y)| (x - 3).abs() <= 1 && (y - 3).abs() <= 1));
    }

    #[test]
    fn test_lines_accept_extreme_endpoints() {
        let mut bres = BresenhamLine::new(-2_000_000_000, 0, 2_000_000_000, 1);
        assert_eq!(bres.next(), Some((-2_000_000_000, 0)));
        assert_eq!(bres.next(), Some((-1_999_999_999, 0)));

        let mut dda = DdaLine::new(i32::MIN, 0, i32::MAX, 0);
        assert_eq!(dda.remaining, u64::from(u32::MAX) + 1);
        assert_eq!(dda.next(), Some((i32::MIN, 0)));
        assert_eq!(dda.next(), Some((i32::MIN + 1, 0)));

        let steep: Vec<_> = BresenhamLine::new(0, i32::MIN, 0, i32::MIN + 2).collect();
        assert_eq!(steep, vec![(0, i32::MIN), (0, i32::MIN + 1), (0, i32::MIN + 2)]);
    }

    #[test]
    fn test_circle_huge_radius_does_not_overflow() {
        let first: Vec<_> = BresenhamCircle::new(0, 0, i32::MAX).take(16).collect();
        assert_eq!(first[0], (0, i32::MAX));
        assert_eq!(first[3], (0, -i32::MAX));

        let near_edge: Vec<_> = BresenhamCircle::new(i32::MAX, 0, i32::MAX).take(8).collect();
        assert_eq!(near_edge[4], (i32::MAX, 0));
    }

    #[test]
    fn test_algorithm_dispatch() {
        let dda: Vec<_> = RasterAlgorithm::Dda.line(0, 0, 4, 4).collect();
        let bres: Vec<_> = RasterAlgorithm::Bresenham.line(0, 0, 4, 4).collect();
        assert_eq!(dda, bres);
    }
}

//! Line clipping against an axis-aligned viewport.
//!
//! Two classic algorithms with the same contract: `Some` carries the visible
//! part of the segment, `None` means nothing is visible. For any input they
//! agree on the verdict and, up to rounding, on the clipped endpoints.

use serde::{Deserialize, Serialize};

use sketchpad_core::{Point, Polygon};

use crate::viewport::Viewport;

/// The visible part of a clipped segment, oriented like the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClippedLine {
    pub start: Point,
    pub end: Point,
}

/// Which clipping algorithm the renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClipAlgorithm {
    #[default]
    CohenSutherland,
    LiangBarsky,
}

impl ClipAlgorithm {
    pub fn clip(&self, p0: Point, p1: Point, viewport: &Viewport) -> Option<ClippedLine> {
        match self {
            ClipAlgorithm::CohenSutherland => cohen_sutherland(p0, p1, viewport),
            ClipAlgorithm::LiangBarsky => liang_barsky(p0, p1, viewport),
        }
    }
}

// ── Cohen-Sutherland ─────────────────────────────────────────────────

mod outcode {
    pub const INSIDE: u8 = 0;
    pub const LEFT: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const BOTTOM: u8 = 4;
    pub const TOP: u8 = 8;
}

/// Region code of `p`. Points on the boundary are inside.
fn compute_outcode(p: &Point, vp: &Viewport) -> u8 {
    let mut code = outcode::INSIDE;

    if p.x < vp.x_min {
        code |= outcode::LEFT;
    } else if p.x > vp.x_max {
        code |= outcode::RIGHT;
    }

    if p.y < vp.y_min {
        code |= outcode::BOTTOM;
    } else if p.y > vp.y_max {
        code |= outcode::TOP;
    }

    code
}

/// Cohen-Sutherland clipping by repeated out-code classification.
pub fn cohen_sutherland(p0: Point, p1: Point, viewport: &Viewport) -> Option<ClippedLine> {
    let (mut p0, mut p1) = (p0, p1);
    let mut code0 = compute_outcode(&p0, viewport);
    let mut code1 = compute_outcode(&p1, viewport);

    loop {
        if code0 | code1 == outcode::INSIDE {
            return Some(ClippedLine { start: p0, end: p1 });
        }
        if code0 & code1 != 0 {
            // Both ends beyond the same boundary.
            return None;
        }

        let code = if code0 != outcode::INSIDE { code0 } else { code1 };

        // A zero delta on the crossed axis is impossible here: both ends
        // would share that boundary's bit and be rejected above.
        let crossing = if code & outcode::TOP != 0 {
            Point::new(
                p0.x + (p1.x - p0.x) * (viewport.y_max - p0.y) / (p1.y - p0.y),
                viewport.y_max,
            )
        } else if code & outcode::BOTTOM != 0 {
            Point::new(
                p0.x + (p1.x - p0.x) * (viewport.y_min - p0.y) / (p1.y - p0.y),
                viewport.y_min,
            )
        } else if code & outcode::RIGHT != 0 {
            Point::new(
                viewport.x_max,
                p0.y + (p1.y - p0.y) * (viewport.x_max - p0.x) / (p1.x - p0.x),
            )
        } else {
            Point::new(
                viewport.x_min,
                p0.y + (p1.y - p0.y) * (viewport.x_min - p0.x) / (p1.x - p0.x),
            )
        };

        if code == code0 {
            p0 = crossing;
            code0 = compute_outcode(&p0, viewport);
        } else {
            p1 = crossing;
            code1 = compute_outcode(&p1, viewport);
        }
    }
}

// ── Liang-Barsky ─────────────────────────────────────────────────────

/// Liang-Barsky parametric clipping of `P(t) = p0 + t (p1 - p0)`.
pub fn liang_barsky(p0: Point, p1: Point, viewport: &Viewport) -> Option<ClippedLine> {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;

    // (p, q) per boundary: left, right, bottom, top.
    let constraints = [
        (-dx, p0.x - viewport.x_min),
        (dx, viewport.x_max - p0.x),
        (-dy, p0.y - viewport.y_min),
        (dy, viewport.y_max - p0.y),
    ];

    let mut t_min = 0.0_f64;
    let mut t_max = 1.0_f64;

    for (p, q) in constraints {
        if p == 0.0 {
            // Parallel to this boundary.
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            t_min = t_min.max(r);
        } else {
            t_max = t_max.min(r);
        }

        if t_min > t_max {
            return None;
        }
    }

    Some(ClippedLine {
        start: Point::new(p0.x + t_min * dx, p0.y + t_min * dy),
        end: Point::new(p0.x + t_max * dx, p0.y + t_max * dy),
    })
}

// ── Polygons ─────────────────────────────────────────────────────────

/// Clip each edge independently and keep the visible pieces in edge order.
///
/// The result is a set of segments, not a re-closed polygon: edges that fall
/// entirely outside simply disappear, and no boundary runs are inserted along
/// the viewport.
pub fn clip_edges(
    edges: impl IntoIterator<Item = (Point, Point)>,
    viewport: &Viewport,
    algorithm: ClipAlgorithm,
) -> Vec<ClippedLine> {
    edges
        .into_iter()
        .filter_map(|(a, b)| algorithm.clip(a, b, viewport))
        .collect()
}

pub fn clip_polygon(
    polygon: &Polygon,
    viewport: &Viewport,
    algorithm: ClipAlgorithm,
) -> Vec<ClippedLine> {
    clip_edges(polygon.edges(), viewport, algorithm)
}

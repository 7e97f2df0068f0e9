//! Shape outlines as closed vector paths.
//!
//! Paths live in local coordinates `[0, edge] x [0, edge]` with the origin
//! at the top-left of the padded square. The same path object serves both
//! the gradient fill and the stroke, so the outline always hugs the fill
//! exactly.

use tiny_skia::{Path, PathBuilder};

use crate::error::{GlintError, Result};
use crate::types::ShapeKind;

/// Control-point offset factor for a cubic Bezier quarter-circle arc.
const ARC_KAPPA: f32 = 0.552_284_8;

/// Corner radius of the rounded square, as a fraction of the edge.
const CORNER_RADIUS: f32 = 0.2;

/// Superellipse exponent traced by the squircle.
const SQUIRCLE_EXPONENT: f32 = 4.5;

/// Straight segments tracing the squircle. Fewer visibly facets the curve
/// at large render sizes.
const SQUIRCLE_SEGMENTS: u32 = 256;

/// Build the closed outline for `shape` spanning an `edge`-sized square.
pub fn build_path(shape: ShapeKind, edge: f32) -> Result<Path> {
    let path = match shape {
        ShapeKind::Circle => circle(edge),
        ShapeKind::RoundedSquare => rounded_square(edge),
        ShapeKind::Squircle => squircle(edge),
    };

    path.ok_or_else(|| GlintError::Render {
        message: format!("degenerate {:?} outline at edge {}", shape, edge),
    })
}

fn circle(edge: f32) -> Option<Path> {
    let r = edge / 2.0;
    PathBuilder::from_circle(r, r, r)
}

/// Four straight edges joined by four quarter-circle corner arcs,
/// traversed clockwise.
fn rounded_square(edge: f32) -> Option<Path> {
    let e = edge;
    let r = e * CORNER_RADIUS;
    let k = r * ARC_KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(r, 0.0);
    pb.line_to(e - r, 0.0);
    pb.cubic_to(e - r + k, 0.0, e, r - k, e, r);
    pb.line_to(e, e - r);
    pb.cubic_to(e, e - r + k, e - r + k, e, e - r, e);
    pb.line_to(r, e);
    pb.cubic_to(r - k, e, 0.0, e - r + k, 0.0, e - r);
    pb.line_to(0.0, r);
    pb.cubic_to(0.0, r - k, r - k, 0.0, r, 0.0);
    pb.close();
    pb.finish()
}

/// Superellipse traced by straight segments from its parametric form.
fn squircle(edge: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();

    let (x0, y0) = superellipse_point(edge, 0.0);
    pb.move_to(x0, y0);
    for i in 1..=SQUIRCLE_SEGMENTS {
        let t = i as f32 * std::f32::consts::TAU / SQUIRCLE_SEGMENTS as f32;
        let (x, y) = superellipse_point(edge, t);
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}

/// Point on the superellipse `|x|^n + |y|^n = 1` scaled to the edge square,
/// at parameter `t` in `[0, 2*pi]`.
fn superellipse_point(edge: f32, t: f32) -> (f32, f32) {
    let half = edge / 2.0;
    let exp = 2.0 / SQUIRCLE_EXPONENT;
    let (s, c) = t.sin_cos();
    let x = half * c.signum() * c.abs().powf(exp) + half;
    let y = half * s.signum() * s.abs().powf(exp) + half;
    (x, y)
}

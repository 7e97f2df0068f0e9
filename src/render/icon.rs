//! Icon rasterizer.
//!
//! Composites one icon onto a fresh square surface in a fixed layer order:
//! background, glow, gradient fill clipped to the shape outline, stroke.
//! Rendering is a pure function of a resolved parameter snapshot and a
//! target size; identical inputs produce pixel-identical output, and every
//! size is rendered from scratch rather than scaled so small exports stay
//! crisp.

use tiny_skia::{
    BlendMode, Color, FillRule, GradientStop, LinearGradient, Mask, Paint, Path, PathBuilder,
    Pixmap, Point, RadialGradient, Rect, Shader, SpreadMode, Stroke, Transform,
};

use crate::error::{GlintError, Result};
use crate::render::path::build_path;
use crate::types::{Background, Colour, GradientKind, RenderParams};

/// Reference canvas size stroke widths are specified against.
const STROKE_REFERENCE: f32 = 1024.0;

/// Wedges approximating the conic gradient, one per degree.
const CONIC_WEDGES: u32 = 360;

/// Opacity applied to the glow's inner colour.
const GLOW_ALPHA: f32 = 0.35;

/// Glow plateau and falloff radii, as fractions of the inner extent.
const GLOW_INNER_RADIUS: f32 = 0.2;
const GLOW_OUTER_RADIUS: f32 = 0.75;

/// Fixed paper-background wash, independent of the icon colours.
const PAPER_LIGHT: Colour = Colour::rgb(0xff, 0xff, 0xff);
const PAPER_SHADE: Colour = Colour::rgb(0xf5, 0xf5, 0xf5);

/// Split of a square canvas into padding border and inner drawable square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Margin on each side, in pixels.
    pub pad: u32,
    /// Edge of the centred drawable square, in pixels.
    pub inner: u32,
}

impl Layout {
    /// Compute the layout for a canvas of `size` pixels with a padding
    /// percentage of the half-canvas.
    ///
    /// Only the margin is rounded to the pixel grid; everything drawn
    /// inside works in floating point.
    pub fn for_size(size: u32, padding: u8) -> Self {
        let pad = ((padding as f64 / 100.0) * (size as f64 / 2.0)).round() as u32;
        Self {
            pad,
            inner: size - 2 * pad,
        }
    }
}

/// Render one icon at `size x size` pixels.
///
/// Allocates and returns a fresh surface per call; nothing is shared or
/// cached between calls.
pub fn render(params: &RenderParams, size: u32) -> Result<Pixmap> {
    if size == 0 {
        return Err(GlintError::Render {
            message: "cannot render a zero-sized icon".to_string(),
        });
    }

    // A new pixmap is fully transparent, which doubles as the clear step.
    let mut pixmap = Pixmap::new(size, size).ok_or_else(|| GlintError::Render {
        message: format!("failed to allocate a {0}x{0} surface", size),
    })?;

    paint_background(&mut pixmap, params, size)?;

    let layout = Layout::for_size(size, params.padding);
    let inner = layout.inner as f32;
    let origin = Transform::from_translate(layout.pad as f32, layout.pad as f32);

    if params.glow {
        paint_glow(&mut pixmap, params, inner, origin)?;
    }

    let outline = build_path(params.shape, inner)?;
    fill_shape(&mut pixmap, params, &outline, inner, origin)?;

    if params.stroke_width > 0 {
        paint_stroke(&mut pixmap, params, &outline, inner, origin);
    }

    Ok(pixmap)
}

fn paint_background(pixmap: &mut Pixmap, params: &RenderParams, size: u32) -> Result<()> {
    match params.background {
        Background::Transparent => {}
        Background::Solid => pixmap.fill(to_color(params.bg_color)),
        Background::Paper => {
            let s = size as f32;
            let shader = LinearGradient::new(
                Point::from_xy(0.0, 0.0),
                Point::from_xy(s, s),
                vec![
                    GradientStop::new(0.0, to_color(PAPER_LIGHT)),
                    GradientStop::new(1.0, to_color(PAPER_SHADE)),
                ],
                SpreadMode::Pad,
                Transform::identity(),
            )
            .ok_or_else(|| degenerate("paper background"))?;

            let mut paint = Paint::default();
            paint.shader = shader;
            paint.anti_alias = false;

            let rect = Rect::from_xywh(0.0, 0.0, s, s).ok_or_else(|| degenerate("canvas"))?;
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }
    Ok(())
}

/// Soft halo behind the shape: a radial fade from `color_a` at reduced
/// opacity out to a fully transparent `color_b`, composited additively.
/// Deliberately not clipped to the outline, so it bleeds past the shape.
fn paint_glow(pixmap: &mut Pixmap, params: &RenderParams, inner: f32, origin: Transform) -> Result<()> {
    let c = inner / 2.0;
    let outer = inner * GLOW_OUTER_RADIUS;
    let plateau = GLOW_INNER_RADIUS / GLOW_OUTER_RADIUS;

    let core = to_color(params.color_a.fade(GLOW_ALPHA));
    let rim = to_color(params.color_b.with_alpha(0));

    let shader = RadialGradient::new(
        Point::from_xy(c, c),
        Point::from_xy(c, c),
        outer,
        vec![
            GradientStop::new(0.0, core),
            GradientStop::new(plateau, core),
            GradientStop::new(1.0, rim),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )
    .ok_or_else(|| degenerate("glow"))?;

    let mut paint = Paint::default();
    paint.shader = shader;
    paint.anti_alias = true;
    paint.blend_mode = BlendMode::Plus;

    let halo = PathBuilder::from_circle(c, c, outer).ok_or_else(|| degenerate("glow"))?;
    pixmap.fill_path(&halo, &paint, FillRule::Winding, origin, None);
    Ok(())
}

/// Fill the outline with the configured gradient.
///
/// Linear and radial gradients are native shaders filling the path
/// directly. The conic gradient has no native primitive and is swept from
/// solid one-degree wedges composited through a clip mask of the outline.
fn fill_shape(
    pixmap: &mut Pixmap,
    params: &RenderParams,
    outline: &Path,
    inner: f32,
    origin: Transform,
) -> Result<()> {
    match params.gradient {
        GradientKind::Linear => {
            let shader = linear_shader(params, inner)?;
            fill_with_shader(pixmap, outline, shader, origin);
        }
        GradientKind::Radial => {
            let shader = radial_shader(params, inner)?;
            fill_with_shader(pixmap, outline, shader, origin);
        }
        GradientKind::Conic => fill_conic(pixmap, params, outline, inner, origin)?,
    }
    Ok(())
}

fn fill_with_shader(pixmap: &mut Pixmap, outline: &Path, shader: Shader, origin: Transform) {
    let mut paint = Paint::default();
    paint.shader = shader;
    paint.anti_alias = true;
    pixmap.fill_path(outline, &paint, FillRule::Winding, origin, None);
}

/// Gradient axis spanning the inner square symmetrically about its centre,
/// rotated by the configured angle.
fn linear_shader(params: &RenderParams, inner: f32) -> Result<Shader<'static>> {
    let c = inner / 2.0;
    let rad = (params.angle as f32).to_radians();
    let (dx, dy) = (rad.cos() * c, rad.sin() * c);

    LinearGradient::new(
        Point::from_xy(c - dx, c - dy),
        Point::from_xy(c + dx, c + dy),
        vec![
            GradientStop::new(0.0, to_color(params.color_a)),
            GradientStop::new(1.0, to_color(params.color_b)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )
    .ok_or_else(|| degenerate("linear gradient"))
}

fn radial_shader(params: &RenderParams, inner: f32) -> Result<Shader<'static>> {
    let c = inner / 2.0;

    RadialGradient::new(
        Point::from_xy(c, c),
        Point::from_xy(c, c),
        c,
        vec![
            GradientStop::new(0.0, to_color(params.color_a)),
            GradientStop::new(1.0, to_color(params.color_b)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )
    .ok_or_else(|| degenerate("radial gradient"))
}

/// Sweep 360 one-degree wedges, each a solid interpolated colour, through
/// a clip mask of the outline.
///
/// Wedges reach the inner square's half-diagonal so the swept disk covers
/// rounded-square and squircle corners that sit outside the inscribed
/// circle. Each wedge overhangs its neighbour by a fraction of a degree
/// and they are painted last-to-first, hiding the hairline seams
/// antialiasing would otherwise leave between abutting edges.
fn fill_conic(
    pixmap: &mut Pixmap,
    params: &RenderParams,
    outline: &Path,
    inner: f32,
    origin: Transform,
) -> Result<()> {
    let mut mask = Mask::new(pixmap.width(), pixmap.height()).ok_or_else(|| degenerate("clip"))?;
    mask.fill_path(outline, FillRule::Winding, true, origin);

    let c = inner / 2.0;
    let radius = c * std::f32::consts::SQRT_2;
    let base = (params.angle as f32).to_radians();
    let step = std::f32::consts::TAU / CONIC_WEDGES as f32;
    let overhang = step * 0.25;

    let mut paint = Paint::default();
    paint.anti_alias = true;

    for i in (0..CONIC_WEDGES).rev() {
        paint.set_color(to_color(conic_wedge_colour(params.color_a, params.color_b, i)));

        let a0 = base + i as f32 * step;
        let a1 = a0 + step + overhang;

        let mut pb = PathBuilder::new();
        pb.move_to(c, c);
        pb.line_to(c + radius * a0.cos(), c + radius * a0.sin());
        pb.line_to(c + radius * a1.cos(), c + radius * a1.sin());
        pb.close();

        if let Some(wedge) = pb.finish() {
            pixmap.fill_path(&wedge, &paint, FillRule::Winding, origin, Some(&mask));
        }
    }
    Ok(())
}

/// Colour of one conic wedge: the linear RGB blend at fraction `i / 359`,
/// so the first wedge is exactly `color_a` and the last exactly `color_b`.
fn conic_wedge_colour(a: Colour, b: Colour, index: u32) -> Colour {
    a.lerp(b, index as f32 / (CONIC_WEDGES - 1) as f32)
}

/// Outline the shape along the same path used for the fill. The width is
/// given on a 1024-unit reference canvas and scales with the inner extent,
/// keeping the stroke visually consistent across export sizes.
fn paint_stroke(
    pixmap: &mut Pixmap,
    params: &RenderParams,
    outline: &Path,
    inner: f32,
    origin: Transform,
) {
    let mut paint = Paint::default();
    paint.set_color(to_color(params.stroke_color));
    paint.anti_alias = true;

    let stroke = Stroke {
        width: params.stroke_width as f32 / STROKE_REFERENCE * inner,
        ..Stroke::default()
    };

    pixmap.stroke_path(outline, &paint, &stroke, origin, None);
}

fn to_color(c: Colour) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn degenerate(what: &str) -> GlintError {
    GlintError::Render {
        message: format!("degenerate {} geometry", what),
    }
}

//! Icon definition files.
//!
//! An icon definition is a small declarative YAML (or JSON) document naming
//! the gradient, shape, stroke, glow, and background of one icon, plus the
//! pixel sizes to export. Definitions deserialize into [`IconDef`] and are
//! resolved into an immutable [`RenderParams`] snapshot before rendering, so
//! every render call sees a fully validated, self-consistent parameter set.
//!
//! # Example
//!
//! ```yaml
//! name: my-app
//! gradient: conic
//! color_a: "#4f46e5"
//! color_b: "#ec4899"
//! angle: 45
//! shape: squircle
//! padding: 8
//! glow: true
//! background: transparent
//! sizes: [16, 32, 48, 64, 128, 256]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GlintError, Result};
use crate::types::Colour;

/// Default PNG export sizes.
pub const DEFAULT_SIZES: &[u32] = &[16, 32, 48, 64, 128, 256];

/// Default sizes embedded in the ICO container.
pub const DEFAULT_ICO_SIZES: &[u32] = &[16, 32, 48, 64, 128, 256];

/// How the shape is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientKind {
    /// Straight gradient along a rotated axis.
    Linear,
    /// Gradient radiating from the centre. Ignores `angle`.
    Radial,
    /// Gradient sweeping around the centre, starting at `angle`.
    Conic,
}

/// The icon's outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Circle,
    RoundedSquare,
    /// Superellipse, smoother in the corners than a rounded square.
    Squircle,
}

/// What sits behind the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Background {
    Transparent,
    /// Flat fill with `bg_color`.
    Solid,
    /// Fixed light-grey diagonal wash, independent of the icon colours.
    Paper,
}

/// A deserialized icon definition file.
///
/// Colours are kept as the hex strings the user wrote; [`IconDef::resolve`]
/// parses and range-checks everything in one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconDef {
    /// Asset base name. Defaults to the definition file's stem.
    pub name: Option<String>,

    /// Gradient kind filling the shape.
    pub gradient: GradientKind,

    /// Gradient start colour.
    pub color_a: String,

    /// Gradient end colour.
    pub color_b: String,

    /// Gradient angle in degrees. Used by linear and conic gradients.
    pub angle: i64,

    /// Outline shape.
    pub shape: ShapeKind,

    /// Margin on all sides, as a percentage of half the canvas (0 to 20).
    pub padding: i64,

    /// Stroke width on a 1024-unit reference canvas (0 to 20, 0 disables).
    pub stroke_width: i64,

    /// Stroke colour, drawn along the shape outline.
    pub stroke_color: String,

    /// Soft halo behind the shape.
    pub glow: bool,

    /// Background layer.
    pub background: Background,

    /// Background colour. Required when `background` is `solid`.
    pub bg_color: Option<String>,

    /// Pixel sizes exported as standalone PNG files.
    pub sizes: Vec<u32>,

    /// Pixel sizes embedded in the ICO container (1 to 256 each).
    pub ico_sizes: Vec<u32>,
}

impl Default for IconDef {
    fn default() -> Self {
        Self {
            name: None,
            gradient: GradientKind::Linear,
            color_a: "#4f46e5".to_string(),
            color_b: "#ec4899".to_string(),
            angle: 0,
            shape: ShapeKind::Squircle,
            padding: 8,
            stroke_width: 0,
            stroke_color: "#ffffff".to_string(),
            glow: false,
            background: Background::Transparent,
            bg_color: None,
            sizes: DEFAULT_SIZES.to_vec(),
            ico_sizes: DEFAULT_ICO_SIZES.to_vec(),
        }
    }
}

impl IconDef {
    /// Parse a definition from YAML source.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| GlintError::Def {
            message: format!("invalid definition: {}", e),
            help: None,
        })
    }

    /// Parse a definition from JSON source.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| GlintError::Def {
            message: format!("invalid definition: {}", e),
            help: None,
        })
    }

    /// Load a definition file, dispatching on its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| GlintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read definition: {}", e),
        })?;

        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            Self::from_json(&source)
        } else {
            Self::from_yaml(&source)
        }
    }

    /// Resolve into an immutable, validated render snapshot.
    ///
    /// Colour strings are parsed here so that malformed input fails before
    /// any pixel is drawn. `angle` is reduced modulo 360 and `padding` is
    /// clamped to its documented range; an out-of-range `stroke_width` is an
    /// error.
    pub fn resolve(&self) -> Result<RenderParams> {
        let color_a = parse_colour("color_a", &self.color_a)?;
        let color_b = parse_colour("color_b", &self.color_b)?;
        let stroke_color = parse_colour("stroke_color", &self.stroke_color)?;

        let bg_color = match (self.background, &self.bg_color) {
            (Background::Solid, Some(hex)) => parse_colour("bg_color", hex)?,
            (Background::Solid, None) => {
                return Err(GlintError::Def {
                    message: "background is solid but no bg_color is set".to_string(),
                    help: Some("Add a bg_color, e.g. bg_color: \"#0f172a\"".to_string()),
                })
            }
            _ => Colour::TRANSPARENT,
        };

        if !(0..=20).contains(&self.stroke_width) {
            return Err(GlintError::Def {
                message: format!("stroke_width must be between 0 and 20 (was {})", self.stroke_width),
                help: Some("Stroke widths are specified on a 1024-unit reference canvas".to_string()),
            });
        }

        Ok(RenderParams {
            gradient: self.gradient,
            color_a,
            color_b,
            angle: self.angle.rem_euclid(360) as u16,
            shape: self.shape,
            padding: self.padding.clamp(0, 20) as u8,
            stroke_width: self.stroke_width as u8,
            stroke_color,
            glow: self.glow,
            background: self.background,
            bg_color,
        })
    }
}

/// A resolved, validated parameter snapshot for one render call.
///
/// Produced by [`IconDef::resolve`]; immutable by construction. Renders at
/// different sizes share one snapshot but nothing else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub gradient: GradientKind,
    pub color_a: Colour,
    pub color_b: Colour,
    /// Degrees, reduced to `[0, 360)`.
    pub angle: u16,
    pub shape: ShapeKind,
    /// Percent of the half-canvas, clamped to `[0, 20]`.
    pub padding: u8,
    /// Reference-canvas units, `[0, 20]`.
    pub stroke_width: u8,
    pub stroke_color: Colour,
    pub glow: bool,
    pub background: Background,
    pub bg_color: Colour,
}

fn parse_colour(field: &str, value: &str) -> Result<Colour> {
    Colour::from_hex(value).map_err(|_| GlintError::Def {
        message: format!("{} is not a valid colour: {}", field, value),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_yaml() {
        let def = IconDef::from_yaml("gradient: radial\nshape: circle\n").unwrap();
        assert_eq!(def.gradient, GradientKind::Radial);
        assert_eq!(def.shape, ShapeKind::Circle);
        assert_eq!(def.sizes, DEFAULT_SIZES.to_vec());
    }

    #[test]
    fn test_kebab_case_variants() {
        let def = IconDef::from_yaml("shape: rounded-square\nbackground: paper\n").unwrap();
        assert_eq!(def.shape, ShapeKind::RoundedSquare);
        assert_eq!(def.background, Background::Paper);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = IconDef::from_yaml("gradint: linear\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_json_definition() {
        let def = IconDef::from_json(r#"{"gradient": "conic", "angle": 90}"#).unwrap();
        assert_eq!(def.gradient, GradientKind::Conic);
        assert_eq!(def.angle, 90);
    }

    #[test]
    fn test_resolve_defaults() {
        let params = IconDef::default().resolve().unwrap();
        assert_eq!(params.color_a, Colour::rgb(0x4f, 0x46, 0xe5));
        assert_eq!(params.color_b, Colour::rgb(0xec, 0x48, 0x99));
        assert_eq!(params.angle, 0);
        assert_eq!(params.padding, 8);
        assert_eq!(params.bg_color, Colour::TRANSPARENT);
    }

    #[test]
    fn test_resolve_angle_modulo() {
        let mut def = IconDef::default();

        def.angle = 450;
        assert_eq!(def.resolve().unwrap().angle, 90);

        def.angle = -90;
        assert_eq!(def.resolve().unwrap().angle, 270);

        def.angle = 360;
        assert_eq!(def.resolve().unwrap().angle, 0);
    }

    #[test]
    fn test_resolve_clamps_padding() {
        let mut def = IconDef::default();

        def.padding = 35;
        assert_eq!(def.resolve().unwrap().padding, 20);

        def.padding = -5;
        assert_eq!(def.resolve().unwrap().padding, 0);
    }

    #[test]
    fn test_resolve_rejects_wide_stroke() {
        let mut def = IconDef::default();
        def.stroke_width = 21;
        assert!(def.resolve().is_err());
    }

    #[test]
    fn test_resolve_rejects_bad_colour() {
        let mut def = IconDef::default();
        def.color_a = "#nope".to_string();
        let err = def.resolve().unwrap_err();
        assert!(err.to_string().contains("color_a"));
    }

    #[test]
    fn test_resolve_solid_needs_bg_color() {
        let mut def = IconDef::default();
        def.background = Background::Solid;
        assert!(def.resolve().is_err());

        def.bg_color = Some("#0f172a".to_string());
        let params = def.resolve().unwrap();
        assert_eq!(params.bg_color, Colour::rgb(0x0f, 0x17, 0x2a));
    }

    #[test]
    fn test_resolve_honours_alpha() {
        // 8-digit colours keep their alpha in the resolved snapshot.
        let mut def = IconDef::default();
        def.color_a = "#ff000080".to_string();
        def.stroke_color = "#ffffff40".to_string();
        let params = def.resolve().unwrap();
        assert_eq!(params.color_a.a, 0x80);
        assert_eq!(params.stroke_color.a, 0x40);
    }

    #[test]
    fn test_resolve_is_pure() {
        let def = IconDef::default();
        assert_eq!(def.resolve().unwrap(), def.resolve().unwrap());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut def = IconDef::default();
        def.name = Some("app".to_string());
        def.gradient = GradientKind::Conic;
        def.shape = ShapeKind::RoundedSquare;

        let yaml = serde_yaml::to_string(&def).unwrap();
        let back = IconDef::from_yaml(&yaml).unwrap();
        assert_eq!(def, back);
    }
}

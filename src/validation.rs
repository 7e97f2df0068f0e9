//! Definition linting.
//!
//! Checks run by `glint validate` and printed as warnings before a build.
//! Errors mirror the hard failures `resolve()` would raise; warnings flag
//! definitions that render fine but almost certainly do not do what the
//! author intended.

use std::fmt;

use palette::{IntoColor, Lab, Srgb};

use crate::render::MAX_ICO_SIZE;
use crate::types::{Background, Colour, GradientKind, IconDef};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Machine-readable diagnostic code (e.g. "glint::validate::colour").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    /// Add help text to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Collects diagnostics from validation checks.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning)
    }

    /// Count errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Check if there are no diagnostics at all.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterate over diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

/// Lab-space distance below which two colours read as the same colour.
const FLAT_GRADIENT_THRESHOLD: f32 = 8.0;

/// Run every lint check against a definition.
pub fn check_def(def: &IconDef) -> ValidationResult {
    let mut result = ValidationResult::new();

    // Hard failures first. A definition that does not resolve gets one
    // error and no speculative warnings on top of it.
    let params = match def.resolve() {
        Ok(params) => params,
        Err(e) => {
            result.push(Diagnostic::error("glint::validate::resolve", e.to_string()));
            return result;
        }
    };

    if def.sizes.is_empty() {
        result.push(
            Diagnostic::error("glint::validate::sizes", "no export sizes requested")
                .with_help("List at least one size, e.g. sizes: [16, 32, 256]"),
        );
    }
    if def.sizes.iter().any(|&s| s == 0) {
        result.push(Diagnostic::error(
            "glint::validate::sizes",
            "export size 0 cannot be rendered",
        ));
    }

    for &size in &def.ico_sizes {
        if size == 0 || size > MAX_ICO_SIZE {
            result.push(
                Diagnostic::error(
                    "glint::validate::ico-sizes",
                    format!("{}px does not fit in an ICO container", size),
                )
                .with_help("ICO sizes range from 1 to 256"),
            );
        }
    }

    if gradient_is_flat(params.color_a, params.color_b) {
        result.push(
            Diagnostic::warning(
                "glint::validate::flat-gradient",
                format!(
                    "color_a {} and color_b {} are nearly identical; the gradient will look flat",
                    params.color_a, params.color_b
                ),
            )
            .with_help("Pick endpoints further apart, or use a solid-looking pair on purpose"),
        );
    }

    if params.gradient == GradientKind::Radial && def.angle != 0 {
        result.push(Diagnostic::warning(
            "glint::validate::angle",
            "angle is ignored for radial gradients",
        ));
    }

    if def.background != Background::Solid && def.bg_color.is_some() {
        result.push(Diagnostic::warning(
            "glint::validate::bg-color",
            "bg_color is ignored unless background is solid",
        ));
    }

    if params.stroke_width > 0 && params.stroke_color.is_transparent() {
        result.push(Diagnostic::warning(
            "glint::validate::stroke",
            "stroke_color is fully transparent; the stroke will be invisible",
        ));
    }

    result
}

/// Whether two colours are perceptually close enough to read as one.
///
/// Uses Lab distance rather than RGB distance so that, for example, two
/// dark blues flag as flat while a dark/light pair of the same hue does
/// not.
fn gradient_is_flat(a: Colour, b: Colour) -> bool {
    lab_distance(a, b) < FLAT_GRADIENT_THRESHOLD
}

fn lab_distance(a: Colour, b: Colour) -> f32 {
    let to_lab = |c: Colour| -> Lab {
        Srgb::new(c.r, c.g, c.b).into_format::<f32>().into_color()
    };
    let (la, lb) = (to_lab(a), to_lab(b));

    ((la.l - lb.l).powi(2) + (la.a - lb.a).powi(2) + (la.b - lb.b).powi(2)).sqrt()
}

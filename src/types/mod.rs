//! Core value types for glint.

mod colour;
mod def;

pub use colour::Colour;
pub use def::{
    Background, GradientKind, IconDef, RenderParams, ShapeKind, DEFAULT_ICO_SIZES, DEFAULT_SIZES,
};

//! glint - parametric icon and favicon generator
//!
//! A library and CLI for turning small declarative definitions into app
//! icon assets: each definition names a gradient, shape, stroke, glow, and
//! background, and glint renders it from scratch at every requested pixel
//! size, then packages the results as standalone PNG files and a
//! multi-resolution ICO container.
//!
//! # Example
//!
//! ```
//! use glint::{encode_ico, encode_png, render, IcoEntry, IconDef};
//!
//! let def = IconDef::from_yaml("gradient: radial\nshape: circle\n").unwrap();
//! let params = def.resolve().unwrap();
//!
//! let mut entries = Vec::new();
//! for size in [16, 32, 48] {
//!     let pixmap = render(&params, size).unwrap();
//!     entries.push(IcoEntry::new(size, encode_png(&pixmap).unwrap()));
//! }
//!
//! let ico_bytes = encode_ico(&entries).unwrap();
//! assert_eq!(&ico_bytes[..4], &[0, 0, 1, 0]);
//! ```

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod render;
pub mod types;
pub mod validation;

pub use discovery::{expand_inputs, find_definitions, is_definition_file};
pub use error::{GlintError, Result};
pub use render::{
    build_path, encode_ico, encode_png, pixmap_rgba, render, write_ico, write_png, IcoEntry,
    Layout, MAX_ICO_SIZE,
};
pub use types::{
    Background, Colour, GradientKind, IconDef, RenderParams, ShapeKind, DEFAULT_ICO_SIZES,
    DEFAULT_SIZES,
};
pub use validation::{check_def, Diagnostic, Severity, ValidationResult};

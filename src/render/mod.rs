//! Rendering module for glint.
//!
//! This module turns a resolved parameter snapshot into pixels and bytes:
//! shape outlines, the layered rasterizer, PNG encoding, and the ICO
//! container.

mod ico;
mod icon;
mod path;
mod png;

pub use ico::{encode_ico, write_ico, IcoEntry, MAX_ICO_SIZE};
pub use icon::{render, Layout};
pub use path::build_path;
pub use png::{encode_png, pixmap_rgba, write_png};

//! PNG output for rendered icons.
//!
//! Converts rendered surfaces to PNG bytes and files. The surface stores
//! premultiplied alpha internally; PNG wants straight alpha, so pixels are
//! demultiplied on the way out.

use std::io::Cursor;
use std::path::Path;

use image::{ImageBuffer, ImageFormat, RgbaImage};
use tiny_skia::Pixmap;

use crate::error::{GlintError, Result};

/// Extract straight (non-premultiplied) RGBA bytes from a surface.
pub fn pixmap_rgba(pixmap: &Pixmap) -> Vec<u8> {
    let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    data
}

/// Encode a rendered surface as PNG bytes.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let (width, height) = (pixmap.width(), pixmap.height());

    let img: RgbaImage =
        ImageBuffer::from_raw(width, height, pixmap_rgba(pixmap)).ok_or_else(|| {
            GlintError::Encode {
                message: format!("pixel buffer does not match {}x{}", width, height),
                help: None,
            }
        })?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| GlintError::Encode {
            message: format!("PNG encoding failed: {}", e),
            help: None,
        })?;

    Ok(bytes)
}

/// Write a rendered surface to a PNG file.
pub fn write_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    let bytes = encode_png(pixmap)?;
    std::fs::write(path, &bytes).map_err(|e| GlintError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::types::IconDef;
    use tempfile::tempdir;

    fn solid_def() -> IconDef {
        let mut def = IconDef::default();
        def.background = crate::types::Background::Solid;
        def.bg_color = Some("#336699".to_string());
        def
    }

    #[test]
    fn test_encode_png_round_trips_dimensions() {
        let params = IconDef::default().resolve().unwrap();
        let pixmap = render(&params, 48).unwrap();

        let bytes = encode_png(&pixmap).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.width(), 48);
        assert_eq!(decoded.height(), 48);
    }

    #[test]
    fn test_encode_png_preserves_opaque_pixels() {
        let params = solid_def().resolve().unwrap();
        let pixmap = render(&params, 16).unwrap();

        let bytes = encode_png(&pixmap).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0, [0x33, 0x66, 0x99, 0xff]);
    }

    #[test]
    fn test_encode_png_preserves_transparency() {
        let mut def = IconDef::default();
        def.padding = 20;
        let params = def.resolve().unwrap();
        let pixmap = render(&params, 64).unwrap();

        let bytes = encode_png(&pixmap).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_write_png() {
        let params = IconDef::default().resolve().unwrap();
        let pixmap = render(&params, 32).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("icon-32.png");
        write_png(&pixmap, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 32);
        assert_eq!(img.height(), 32);
    }

    #[test]
    fn test_pixmap_rgba_length() {
        let params = IconDef::default().resolve().unwrap();
        let pixmap = render(&params, 20).unwrap();
        assert_eq!(pixmap_rgba(&pixmap).len(), 20 * 20 * 4);
    }
}

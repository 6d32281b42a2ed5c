//! Drawable to PNG normalization.

use crate::drawable::Drawable;
use crate::error::IconPackError;
use image::{DynamicImage, ImageBuffer, ImageOutputFormat, RgbaImage};
use std::io::Cursor;

/// Encode a drawable as PNG bytes.
///
/// Drawables backed by a raster are encoded as-is. Anything else is rendered
/// into an RGBA canvas of its intrinsic size, or `fallback_size` square for
/// each dimension it cannot report.
pub fn to_png(drawable: &dyn Drawable, fallback_size: u32) -> Result<Vec<u8>, IconPackError> {
    if let Some(bitmap) = drawable.bitmap() {
        return encode_png(bitmap);
    }

    let width = drawable
        .intrinsic_width()
        .filter(|w| *w > 0)
        .unwrap_or(fallback_size);
    let height = drawable
        .intrinsic_height()
        .filter(|h| *h > 0)
        .unwrap_or(fallback_size);

    let mut canvas = allocate_canvas(width, height)?;
    drawable.draw(&mut canvas);
    encode_png(&canvas)
}

fn allocate_canvas(width: u32, height: u32) -> Result<RgbaImage, IconPackError> {
    let too_large = || IconPackError::RasterTooLarge { width, height };

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .filter(|len| *len > 0)
        .ok_or_else(too_large)?;

    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|_| too_large())?;
    pixels.resize(len, 0u8);

    ImageBuffer::from_raw(width, height, pixels).ok_or_else(too_large)
}

fn encode_png(bitmap: &RgbaImage) -> Result<Vec<u8>, IconPackError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(bitmap.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

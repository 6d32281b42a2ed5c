//! Drawables loaded from icon pack resources.

use image::{Rgba, RgbaImage};

/// Something that can be rendered into an RGBA raster.
pub trait Drawable: Send {
    /// The backing raster, when the drawable already is one.
    fn bitmap(&self) -> Option<&RgbaImage> {
        None
    }

    /// Natural width in pixels, `None` if the drawable has no size of its own.
    fn intrinsic_width(&self) -> Option<u32> {
        None
    }

    fn intrinsic_height(&self) -> Option<u32> {
        None
    }

    /// Render into the full bounds of `canvas`.
    fn draw(&self, canvas: &mut RgbaImage);
}

/// Transient handle to one drawable of a pack.
pub type ArtworkHandle = Box<dyn Drawable>;

/// A drawable backed by a decoded raster.
pub struct BitmapDrawable {
    bitmap: RgbaImage,
}

impl BitmapDrawable {
    pub fn new(bitmap: RgbaImage) -> Self {
        Self { bitmap }
    }
}

impl Drawable for BitmapDrawable {
    fn bitmap(&self) -> Option<&RgbaImage> {
        Some(&self.bitmap)
    }

    fn intrinsic_width(&self) -> Option<u32> {
        Some(self.bitmap.width())
    }

    fn intrinsic_height(&self) -> Option<u32> {
        Some(self.bitmap.height())
    }

    fn draw(&self, canvas: &mut RgbaImage) {
        if canvas.dimensions() == self.bitmap.dimensions() {
            canvas.copy_from_slice(&self.bitmap);
            return;
        }

        use image::imageops::FilterType;
        let scaled = image::imageops::resize(
            &self.bitmap,
            canvas.width(),
            canvas.height(),
            FilterType::Triangle,
        );
        canvas.copy_from_slice(&scaled);
    }
}

/// A solid fill with no intrinsic size.
pub struct ColorDrawable {
    color: Rgba<u8>,
}

impl ColorDrawable {
    pub fn new(color: Rgba<u8>) -> Self {
        Self { color }
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`.
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

        let color = match hex.len() {
            6 => Rgba([channel(0)?, channel(2)?, channel(4)?, 0xFF]),
            8 => Rgba([channel(2)?, channel(4)?, channel(6)?, channel(0)?]),
            _ => return None,
        };
        Some(Self::new(color))
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }
}

impl Drawable for ColorDrawable {
    fn draw(&self, canvas: &mut RgbaImage) {
        for pixel in canvas.pixels_mut() {
            *pixel = self.color;
        }
    }
}

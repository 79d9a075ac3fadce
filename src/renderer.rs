// Field -> RGBA pixels, and RGBA -> what the window shows.

use crate::color::heat_rgba;
use crate::error::Error;
use crate::field::IntensityField;
use crate::types::FrameBuffer;

/// Owns the RGBA output buffer (4 bytes per cell, row-major) and reuses it
/// across frames.
#[derive(Default)]
pub struct Renderer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

/// Zeroed RGBA buffer for a `width x height` surface, reserved fallibly.
fn zeroed_rgba(width: usize, height: usize) -> Result<Vec<u8>, Error> {
    let len = width
        .checked_mul(height)
        .and_then(|cells| cells.checked_mul(4))
        .ok_or(Error::Allocation { width, height })?;
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| Error::Allocation { width, height })?;
    pixels.resize(len, 0);
    Ok(pixels)
}

impl Renderer {
    /// Renderer with its output buffer already reserved for the surface.
    pub fn with_size(width: usize, height: usize) -> Result<Self, Error> {
        Ok(Self {
            width,
            height,
            pixels: zeroed_rgba(width, height)?,
        })
    }

    /// Recompute every pixel from the field. Same field in, same bytes out.
    pub fn render(&mut self, field: &IntensityField) -> &[u8] {
        // 1) A field of another size gets a fresh buffer. The engine sizes the
        //    renderer on resize, so this only happens for standalone use.
        let (w, h) = field.dimensions();
        if (w, h) != (self.width, self.height) {
            match zeroed_rgba(w, h) {
                Ok(pixels) => {
                    self.width = w;
                    self.height = h;
                    self.pixels = pixels;
                }
                Err(e) => {
                    log::warn!("Skipping render: {e}");
                    return &[];
                }
            }
        }

        // 2) One color per cell, same row-major order as the field.
        //    Visual: untouched cells stay see-through, hot cells turn solid red.
        for (px, &v) in self.pixels.chunks_exact_mut(4).zip(field.cells()) {
            px.copy_from_slice(&heat_rgba(v));
        }

        &self.pixels
    }

    /// Last rendered buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Blend an RGBA overlay onto an opaque `0x00RRGGBB` page color (straight alpha)
/// and write the result into `out`.
pub fn composite_over(rgba: &[u8], background: u32, out: &mut FrameBuffer) {
    let br = ((background >> 16) & 0xFF) as u32;
    let bg = ((background >> 8) & 0xFF) as u32;
    let bb = (background & 0xFF) as u32;

    // Visual: the page color shows through wherever heat is faint.
    for (dst, px) in out.pixels.iter_mut().zip(rgba.chunks_exact(4)) {
        let a = px[3] as u32;
        if a == 0 {
            *dst = background;
            continue;
        }
        if a == 255 {
            *dst = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
            continue;
        }

        let inv = 255 - a;
        let r = (px[0] as u32 * a + br * inv + 127) / 255;
        let g = (px[1] as u32 * a + bg * inv + 127) / 255;
        let b = (px[2] as u32 * a + bb * inv + 127) / 255;
        *dst = (r << 16) | (g << 8) | b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_renders_transparent() {
        let field = IntensityField::allocate(5, 4).unwrap();
        let mut renderer = Renderer::with_size(5, 4).unwrap();
        let pixels = renderer.render(&field);
        assert_eq!(pixels.len(), 5 * 4 * 4);
        assert!(pixels.chunks_exact(4).all(|px| px == [0, 0, 255, 0]));
    }

    #[test]
    fn layout_matches_field() {
        let mut field = IntensityField::allocate(3, 2).unwrap();
        field.accumulate(2, 1, 1.0);
        let mut renderer = Renderer::default();
        let pixels = renderer.render(&field);
        let idx = (3 + 2) * 4; // row 1, column 2
        assert_eq!(&pixels[idx..idx + 4], &[255, 0, 0, 255]);
        assert_eq!(pixels[3], 0);
    }

    #[test]
    fn render_is_idempotent() {
        let mut field = IntensityField::allocate(8, 8).unwrap();
        field.accumulate(3, 3, 0.37);
        field.accumulate(4, 3, 0.81);
        let mut renderer = Renderer::default();
        let first = renderer.render(&field).to_vec();
        let second = renderer.render(&field).to_vec();
        assert_eq!(first, second);
        assert_eq!(renderer.pixels(), &first[..]);
    }

    #[test]
    fn buffer_follows_resize() {
        let mut renderer = Renderer::default();
        renderer.render(&IntensityField::allocate(4, 4).unwrap());
        assert_eq!(renderer.dimensions(), (4, 4));
        let pixels = renderer.render(&IntensityField::allocate(6, 2).unwrap());
        assert_eq!(pixels.len(), 6 * 2 * 4);
        assert_eq!(renderer.dimensions(), (6, 2));
    }

    #[test]
    fn with_size_reserves_the_buffer() {
        let renderer = Renderer::with_size(7, 3).unwrap();
        assert_eq!(renderer.dimensions(), (7, 3));
        assert_eq!(renderer.pixels().len(), 7 * 3 * 4);
    }

    #[test]
    fn oversized_buffer_is_an_allocation_error() {
        assert!(matches!(
            Renderer::with_size(usize::MAX / 2, 3),
            Err(Error::Allocation { .. })
        ));
        assert!(matches!(
            Renderer::with_size(usize::MAX / 4 + 1, 1),
            Err(Error::Allocation { .. })
        ));
    }

    #[test]
    fn composite_respects_alpha() {
        let rgba = [
            0, 0, 255, 0, // transparent
            255, 0, 0, 255, // opaque red
            0, 0, 0, 128, // half black
        ];
        let mut out = FrameBuffer::new(3, 1, 0);
        composite_over(&rgba, 0x00_FF_FF_FF, &mut out);
        assert_eq!(out.pixels[0], 0x00_FF_FF_FF);
        assert_eq!(out.pixels[1], 0x00_FF_00_00);
        // 255 * 127 / 255 = 127
        assert_eq!(out.pixels[2], 0x00_7F_7F_7F);
    }
}

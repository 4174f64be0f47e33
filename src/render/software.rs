//! Bundled software renderer.
//!
//! A headless [`Renderer`] that rasterizes into a [`Framebuffer`]: Bresenham
//! lines, clipped rect fills, PNG-decoded textures with optional chroma
//! keying, and nearest-neighbour blits. Useful for tests, snapshots, and
//! running the frame loop without a display.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::render::{Renderer, TextureId};

/// Decoded RGBA texture.
#[derive(Debug, Clone)]
struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Software implementation of [`Renderer`] over a [`Framebuffer`].
#[derive(Debug)]
pub struct SoftwareRenderer {
    fb: Framebuffer,
    draw_color: Color,
    textures: Vec<Texture>,
}

impl SoftwareRenderer {
    /// Create a renderer with a buffer of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            fb: Framebuffer::new(width, height)?,
            draw_color: Color::default(),
            textures: Vec::new(),
        })
    }

    /// The underlying framebuffer.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    /// Consume the renderer, keeping the framebuffer.
    #[must_use]
    pub fn into_framebuffer(self) -> Framebuffer {
        self.fb
    }

    /// Clear the buffer to a solid color.
    pub fn clear(&mut self, color: Color) {
        self.fb.clear(color);
    }

    fn decode_png(path: &Path) -> Result<Texture> {
        let file = File::open(path)?;
        let decoder = png::Decoder::new(BufReader::new(file));
        let mut reader = decoder.read_info()?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        if info.bit_depth != png::BitDepth::Eight {
            return Err(Error::TextureLoad {
                path: path.to_path_buf(),
                reason: format!("unsupported bit depth {:?}", info.bit_depth),
            });
        }

        let pixels = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => {
                let mut rgba = Vec::with_capacity(buf.len() / 3 * 4);
                for chunk in buf.chunks_exact(3) {
                    rgba.extend_from_slice(chunk);
                    rgba.push(255);
                }
                rgba
            }
            other => {
                return Err(Error::TextureLoad {
                    path: path.to_path_buf(),
                    reason: format!("unsupported color type {other:?}"),
                });
            }
        };

        Ok(Texture {
            width: info.width,
            height: info.height,
            pixels,
        })
    }
}

impl Renderer for SoftwareRenderer {
    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        self.fb.set_pixel(x, y, self.draw_color);
    }

    /// Bresenham line; pixels outside the buffer are clipped away.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.fb.set_pixel(x, y, self.draw_color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                if x == x1 {
                    break;
                }
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                if y == y1 {
                    break;
                }
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.fb.fill_rect(x, y, w, h, self.draw_color);
    }

    fn draw_rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }

        let color = self.draw_color;
        self.fb.fill_rect(x, y, w, 1, color);
        self.fb.fill_rect(x, y + h - 1, w, 1, color);
        self.fb.fill_rect(x, y, 1, h, color);
        self.fb.fill_rect(x + w - 1, y, 1, h, color);
    }

    fn load_texture(&mut self, path: &Path, color_key: Option<Color>) -> Result<TextureId> {
        let mut texture = Self::decode_png(path).map_err(|err| match err {
            keep @ Error::TextureLoad { .. } => keep,
            other => Error::TextureLoad {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })?;

        if let Some(key) = color_key {
            for chunk in texture.pixels.chunks_exact_mut(4) {
                if chunk[0] == key.r && chunk[1] == key.g && chunk[2] == key.b {
                    chunk[3] = 0;
                }
            }
        }

        self.textures.push(texture);
        Ok(TextureId(self.textures.len() as u32 - 1))
    }

    fn blit(&mut self, texture: TextureId, dest: Rect) {
        let Some(tex) = self.textures.get(texture.0 as usize) else {
            log::warn!("blit with unknown texture id {texture:?}");
            return;
        };
        if dest.w <= 0 || dest.h <= 0 || tex.width == 0 || tex.height == 0 {
            return;
        }

        for row in 0..dest.h {
            let sy = (i64::from(row) * i64::from(tex.height) / i64::from(dest.h)) as usize;
            for col in 0..dest.w {
                let sx = (i64::from(col) * i64::from(tex.width) / i64::from(dest.w)) as usize;
                let idx = (sy * tex.width as usize + sx) * 4;
                let a = tex.pixels[idx + 3];
                if a == 0 {
                    // Color-keyed / transparent texel.
                    continue;
                }
                let color = Color::new(
                    tex.pixels[idx],
                    tex.pixels[idx + 1],
                    tex.pixels[idx + 2],
                    a,
                );
                self.fb.set_pixel(dest.x + col, dest.y + row, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_line_horizontal() {
        let mut out = SoftwareRenderer::new(100, 100).unwrap();
        out.clear(Color::WHITE);
        out.set_draw_color(Color::BLACK);
        out.draw_line(10, 50, 90, 50);

        assert_eq!(out.framebuffer().get_pixel(10, 50), Some(Color::BLACK));
        assert_eq!(out.framebuffer().get_pixel(50, 50), Some(Color::BLACK));
        assert_eq!(out.framebuffer().get_pixel(90, 50), Some(Color::BLACK));
        assert_eq!(out.framebuffer().get_pixel(50, 51), Some(Color::WHITE));
    }

    #[test]
    fn test_draw_line_diagonal() {
        let mut out = SoftwareRenderer::new(100, 100).unwrap();
        out.clear(Color::WHITE);
        out.set_draw_color(Color::BLACK);
        out.draw_line(10, 10, 90, 90);

        assert_eq!(out.framebuffer().get_pixel(10, 10), Some(Color::BLACK));
        assert_eq!(out.framebuffer().get_pixel(50, 50), Some(Color::BLACK));
        assert_eq!(out.framebuffer().get_pixel(90, 90), Some(Color::BLACK));
    }

    #[test]
    fn test_draw_line_out_of_bounds_does_not_panic() {
        let mut out = SoftwareRenderer::new(100, 100).unwrap();
        out.set_draw_color(Color::BLACK);
        out.draw_line(-10, -10, 110, 110);

        assert_eq!(out.framebuffer().get_pixel(50, 50), Some(Color::BLACK));
    }

    #[test]
    fn test_rect_outline_leaves_interior() {
        let mut out = SoftwareRenderer::new(100, 100).unwrap();
        out.clear(Color::WHITE);
        out.set_draw_color(Color::RED);
        out.draw_rect_outline(20, 20, 30, 30);

        assert_eq!(out.framebuffer().get_pixel(20, 20), Some(Color::RED));
        assert_eq!(out.framebuffer().get_pixel(49, 49), Some(Color::RED));
        assert_eq!(out.framebuffer().get_pixel(35, 35), Some(Color::WHITE));
    }

    #[test]
    fn test_load_texture_missing_file() {
        let mut out = SoftwareRenderer::new(10, 10).unwrap();
        let err = out
            .load_texture(Path::new("definitely/not/here.png"), None)
            .unwrap_err();
        assert!(matches!(err, Error::TextureLoad { .. }));
    }

    #[test]
    fn test_blit_unknown_texture_is_noop() {
        let mut out = SoftwareRenderer::new(10, 10).unwrap();
        out.clear(Color::BLACK);
        out.blit(TextureId(42), Rect::new(0, 0, 5, 5));
        assert_eq!(out.framebuffer().get_pixel(2, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_load_and_blit_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tex.png");

        // 2×2 texture: red / green over blue / black.
        let mut source = Framebuffer::new(2, 2).unwrap();
        source.set_pixel(0, 0, Color::RED);
        source.set_pixel(1, 0, Color::GREEN);
        source.set_pixel(0, 1, Color::BLUE);
        source.set_pixel(1, 1, Color::BLACK);
        source.write_png(&path).unwrap();

        let mut out = SoftwareRenderer::new(8, 8).unwrap();
        out.clear(Color::WHITE);
        let tex = out.load_texture(&path, None).unwrap();
        out.blit(tex, Rect::new(0, 0, 4, 4));

        // Each source texel covers a 2×2 block of the destination.
        assert_eq!(out.framebuffer().get_pixel(0, 0), Some(Color::RED));
        assert_eq!(out.framebuffer().get_pixel(3, 0), Some(Color::GREEN));
        assert_eq!(out.framebuffer().get_pixel(0, 3), Some(Color::BLUE));
        assert_eq!(out.framebuffer().get_pixel(3, 3), Some(Color::BLACK));
        assert_eq!(out.framebuffer().get_pixel(5, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_color_key_becomes_transparent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyed.png");

        let mut source = Framebuffer::new(2, 1).unwrap();
        source.set_pixel(0, 0, Color::BLACK);
        source.set_pixel(1, 0, Color::RED);
        source.write_png(&path).unwrap();

        let mut out = SoftwareRenderer::new(4, 4).unwrap();
        out.clear(Color::WHITE);
        let tex = out.load_texture(&path, Some(Color::BLACK)).unwrap();
        out.blit(tex, Rect::new(0, 0, 2, 1));

        // The keyed texel leaves the background untouched.
        assert_eq!(out.framebuffer().get_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(out.framebuffer().get_pixel(1, 0), Some(Color::RED));
    }
}

//! Value types shared by surfaces, drawing contexts and recordings.

use crate::error::{SurfaceError, SurfaceResult};
use serde::{Deserialize, Serialize};

/// Maximum drawable dimension reported by contexts that are not configured
/// otherwise (same as Chrome's canvas limit).
pub const DEFAULT_MAX_DIMENSION: u32 = 32767;

/// Width and height of a surface or recording, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const ZERO: SurfaceSize = SurfaceSize {
        width: 0,
        height: 0,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clamp each dimension to the given limits.
    pub fn clamp_to(self, limits: SurfaceLimits) -> Self {
        Self {
            width: self.width.min(limits.max_width),
            height: self.height.min(limits.max_height),
        }
    }

    /// Number of bytes needed to hold this many pixels at 4 bytes per pixel,
    /// or `None` if it does not fit in `usize`.
    pub(crate) fn byte_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(PixelFormat::BYTES_PER_PIXEL)
    }
}

/// Maximum drawable dimensions imposed by a drawing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceLimits {
    pub max_width: u32,
    pub max_height: u32,
}

impl SurfaceLimits {
    /// Limits that never reduce a requested size.
    pub const UNBOUNDED: SurfaceLimits = SurfaceLimits {
        max_width: u32::MAX,
        max_height: u32::MAX,
    };

    pub const fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }
}

impl Default for SurfaceLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIMENSION, DEFAULT_MAX_DIMENSION)
    }
}

/// Pixel layout of every surface produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// 8 bits per channel RGBA with premultiplied alpha.
    #[default]
    Rgba8888Premultiplied,
}

impl PixelFormat {
    pub const BYTES_PER_PIXEL: usize = 4;
}

/// Parameters for a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    /// X coordinate of the rectangle origin.
    pub x: f32,
    /// Y coordinate of the rectangle origin.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl RectParams {
    pub(crate) fn to_skia(self) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// A straight-alpha RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SurfaceColor {
    pub const TRANSPARENT: SurfaceColor = SurfaceColor::from_rgba8(0, 0, 0, 0);
    pub const BLACK: SurfaceColor = SurfaceColor::from_rgba8(0, 0, 0, 255);
    pub const WHITE: SurfaceColor = SurfaceColor::from_rgba8(255, 255, 255, 255);

    /// Create a color from 8-bit RGBA components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS color string such as `#ff0000`, `rgb(0 128 0)` or `teal`.
    pub fn parse(s: &str) -> SurfaceResult<Self> {
        let parsed = csscolorparser::parse(s)
            .map_err(|e| SurfaceError::ColorParseError(format!("{}: {}", s, e)))?;
        let [r, g, b, a] = parsed.to_rgba8();
        Ok(Self::from_rgba8(r, g, b, a))
    }

    /// Premultiplied form of this color, as stored in surface memory.
    pub fn premultiply(self) -> [u8; 4] {
        let [r, g, b] = premultiply_rgb(self.r, self.g, self.b, self.a);
        [r, g, b, self.a]
    }
}

impl From<SurfaceColor> for tiny_skia::Color {
    fn from(c: SurfaceColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

/// Convert straight RGB to premultiplied using `(c * a + 127) / 255`.
pub(crate) fn premultiply_rgb(r: u8, g: u8, b: u8, a: u8) -> [u8; 3] {
    match a {
        255 => [r, g, b],
        0 => [0, 0, 0],
        _ => {
            let a16 = a as u16;
            [
                ((r as u16 * a16 + 127) / 255) as u8,
                ((g as u16 * a16 + 127) / 255) as u8,
                ((b as u16 * a16 + 127) / 255) as u8,
            ]
        }
    }
}

/// Convert premultiplied RGB back to straight alpha.
pub(crate) fn unpremultiply_rgb(r: u8, g: u8, b: u8, a: u8) -> [u8; 3] {
    match a {
        255 => [r, g, b],
        0 => [0, 0, 0],
        _ => {
            let alpha_f = a as f32 / 255.0;
            [
                (r as f32 / alpha_f).round().min(255.0) as u8,
                (g as f32 / alpha_f).round().min(255.0) as u8,
                (b as f32 / alpha_f).round().min(255.0) as u8,
            ]
        }
    }
}

//! Drawing context backed by an owned raster surface.

use super::DrawingContext;
use crate::error::SurfaceResult;
use crate::geometry::{RectParams, SurfaceColor, SurfaceLimits, SurfaceSize};
use crate::surface::RasterSurface;

/// A raster drawing context that draws into a [`RasterSurface`] it owns.
#[derive(Debug, Clone)]
pub struct SurfaceCanvas {
    surface: RasterSurface,
    limits: SurfaceLimits,
}

impl SurfaceCanvas {
    /// Create a canvas over a new transparent surface with default limits.
    pub fn new(width: u32, height: u32) -> SurfaceResult<Self> {
        Ok(Self::from_surface(RasterSurface::new(width, height)?))
    }

    /// Create a canvas that draws into `surface`, with default limits.
    pub fn from_surface(surface: RasterSurface) -> Self {
        Self::with_limits(surface, SurfaceLimits::default())
    }

    /// Create a canvas that draws into `surface` and reports `limits` as its
    /// maximum drawable dimensions.
    pub fn with_limits(surface: RasterSurface, limits: SurfaceLimits) -> Self {
        Self { surface, limits }
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut RasterSurface {
        &mut self.surface
    }

    pub fn into_surface(self) -> RasterSurface {
        self.surface
    }
}

impl DrawingContext for SurfaceCanvas {
    fn max_drawable_width(&self) -> u32 {
        self.limits.max_width
    }

    fn max_drawable_height(&self) -> u32 {
        self.limits.max_height
    }

    fn size(&self) -> SurfaceSize {
        self.surface.size()
    }

    fn draw_surface(&mut self, source: &RasterSurface, x: i32, y: i32) {
        log::debug!(target: "surface", "drawSurface {}x{} at {} {}", source.width(), source.height(), x, y);
        self.surface.copy_from(source, x, y);
    }

    fn clear(&mut self, color: SurfaceColor) {
        log::debug!(target: "surface", "clear {:?}", color);
        self.surface.fill(color);
    }

    fn fill_rect(&mut self, rect: &RectParams, color: SurfaceColor) {
        log::debug!(target: "surface", "fillRect {} {} {} {}", rect.x, rect.y, rect.width, rect.height);
        self.surface.fill_rect(rect, color);
    }
}

//! Drawing contexts: targets that accept drawing commands.

mod raster;

pub use raster::SurfaceCanvas;

use crate::geometry::{RectParams, SurfaceColor, SurfaceLimits, SurfaceSize};
use crate::picture::RecordedPicture;
use crate::surface::RasterSurface;

/// A target onto which drawing commands can be issued.
///
/// Every context reports the largest surface it can draw. Surfaces bigger
/// than that may be rejected or corrupted by the backing platform, so
/// surfaces meant for a context should be sized with
/// [`SurfaceFactory::create_bounded_surface`](crate::SurfaceFactory::create_bounded_surface).
pub trait DrawingContext {
    /// Maximum width of a surface that can be drawn into this context.
    fn max_drawable_width(&self) -> u32;

    /// Maximum height of a surface that can be drawn into this context.
    fn max_drawable_height(&self) -> u32;

    /// Size of the drawable area.
    fn size(&self) -> SurfaceSize;

    /// Copy `source` into this context with its top-left corner at (x, y).
    ///
    /// No blending or filtering is applied.
    fn draw_surface(&mut self, source: &RasterSurface, x: i32, y: i32);

    /// Overwrite the whole context with `color`.
    fn clear(&mut self, color: SurfaceColor);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: &RectParams, color: SurfaceColor);

    /// Maximum drawable width and height as one value.
    fn limits(&self) -> SurfaceLimits {
        SurfaceLimits::new(self.max_drawable_width(), self.max_drawable_height())
    }

    /// Replay every command of `picture` into this context.
    fn draw_picture(&mut self, picture: &RecordedPicture) {
        picture.playback(self);
    }
}

//! Bounded surface creation, surface drawing and picture capture.

use crate::config::FactoryConfig;
use crate::context::{DrawingContext, SurfaceCanvas};
use crate::error::{SurfaceError, SurfaceResult};
use crate::geometry::SurfaceSize;
use crate::picture::{PictureRecorder, RecordedPicture};
use crate::surface::RasterSurface;

/// Creates surfaces sized for a drawing context and converts them into
/// recorded pictures.
///
/// The factory keeps no state between calls beyond its configuration. Handles
/// that the rendering engine may pass as null are taken as `Option` and
/// checked explicitly.
#[derive(Debug, Clone, Default)]
pub struct SurfaceFactory {
    config: FactoryConfig,
}

impl SurfaceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FactoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Allocate a surface of `width` x `height`, clamped to the maximum
    /// drawable dimensions of `target_context` when one is supplied.
    ///
    /// The context is only queried. The new surface is transparent and owned
    /// by the caller.
    pub fn create_bounded_surface(
        &self,
        width: u32,
        height: u32,
        target_context: Option<&dyn DrawingContext>,
    ) -> SurfaceResult<RasterSurface> {
        let requested = SurfaceSize::new(width, height);
        let size = match target_context {
            Some(context) => {
                let limits = context.limits();
                let clamped = requested.clamp_to(limits);
                if clamped != requested {
                    log::info!(
                        target: "surface",
                        "clamped surface {}x{} to {}x{} (max {}x{})",
                        width, height, clamped.width, clamped.height,
                        limits.max_width, limits.max_height
                    );
                }
                clamped
            }
            None => requested,
        };

        log::debug!(target: "surface", "createSurface {}x{}", size.width, size.height);
        RasterSurface::new(size.width, size.height)
    }

    /// Copy `source` into `destination` at (x, y) without blending.
    ///
    /// Both handles are required; a missing one yields
    /// [`SurfaceError::InvalidOperand`] and nothing is drawn.
    pub fn draw_surface_into(
        &self,
        source: Option<&RasterSurface>,
        destination: Option<&mut dyn DrawingContext>,
        x: i32,
        y: i32,
    ) -> SurfaceResult<()> {
        let source = source.ok_or(SurfaceError::InvalidOperand("source surface"))?;
        let destination =
            destination.ok_or(SurfaceError::InvalidOperand("destination context"))?;
        draw_into(source, destination, x, y);
        Ok(())
    }

    /// Record drawing `source` at the origin into a new picture of the same size.
    ///
    /// A missing source yields an empty 0x0 picture. The picture keeps a copy
    /// of the pixels, so later changes to `source` do not affect it.
    pub fn capture_surface_as_picture(&self, source: Option<&RasterSurface>) -> RecordedPicture {
        let Some(source) = source else {
            log::debug!(target: "surface", "capture of absent surface, returning empty picture");
            return RecordedPicture::empty();
        };

        let mut recording = PictureRecorder::with_limits(self.config.recording_limits)
            .begin_recording(source.width(), source.height());
        draw_into(source, &mut recording, 0, 0);
        recording.finish_recording()
    }

    /// Wrap `surface` in a raster canvas reporting the configured raster limits.
    pub fn create_canvas(&self, surface: RasterSurface) -> SurfaceCanvas {
        SurfaceCanvas::with_limits(surface, self.config.raster_limits)
    }
}

fn draw_into(source: &RasterSurface, destination: &mut dyn DrawingContext, x: i32, y: i32) {
    destination.draw_surface(source, x, y);
}

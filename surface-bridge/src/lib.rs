//! Bounded raster surfaces and recorded pictures for a native rendering engine.
//!
//! The engine asks a [`SurfaceFactory`] for surfaces that never exceed the
//! maximum drawable size of the context they will be drawn into, draws them
//! into [`DrawingContext`]s, and can package a rendered surface as a
//! replayable [`RecordedPicture`] instead of raw pixels. Pixel work is done
//! with `tiny-skia`.
//!
//! # Example
//!
//! ```rust,ignore
//! use surface_bridge::{SurfaceCanvas, SurfaceFactory, SurfaceLimits};
//!
//! let factory = SurfaceFactory::new();
//! let target = SurfaceCanvas::with_limits(surface, SurfaceLimits::new(2048, 2048));
//! let bitmap = factory.create_bounded_surface(4000, 4000, Some(&target))?;
//! assert_eq!((bitmap.width(), bitmap.height()), (2048, 2048));
//! let picture = factory.capture_surface_as_picture(Some(&bitmap));
//! ```

mod config;
mod context;
mod error;
mod factory;
mod geometry;
mod picture;
mod surface;

// Re-export public API
pub use config::FactoryConfig;
pub use context::{DrawingContext, SurfaceCanvas};
pub use error::{SurfaceError, SurfaceResult};
pub use factory::SurfaceFactory;
pub use geometry::{
    PixelFormat, RectParams, SurfaceColor, SurfaceLimits, SurfaceSize, DEFAULT_MAX_DIMENSION,
};
pub use picture::{DrawCommand, PictureRecorder, RecordedPicture, RecordingCanvas};
pub use surface::RasterSurface;

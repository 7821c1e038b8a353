//! Recorded pictures: immutable, replayable lists of drawing commands.
//!
//! A recording is made in two phases. [`PictureRecorder::begin_recording`]
//! opens a [`RecordingCanvas`] of a fixed size; commands issued to it through
//! [`DrawingContext`] are captured instead of rasterized. Calling
//! [`RecordingCanvas::finish_recording`] consumes the canvas and yields a
//! [`RecordedPicture`], so a recording cannot be read while it is still open
//! or written to after it is closed.

use crate::context::{DrawingContext, SurfaceCanvas};
use crate::error::SurfaceResult;
use crate::geometry::{RectParams, SurfaceColor, SurfaceLimits, SurfaceSize};
use crate::surface::RasterSurface;
use std::sync::Arc;

/// A single captured drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Direct copy of a surface snapshot at (x, y).
    DrawSurface {
        /// Pixels as they were when the command was recorded.
        surface: Arc<RasterSurface>,
        x: i32,
        y: i32,
    },
    /// Overwrite the whole target with a color.
    Clear { color: SurfaceColor },
    /// Fill a rectangle with a solid color.
    FillRect {
        rect: RectParams,
        color: SurfaceColor,
    },
}

impl DrawCommand {
    fn apply<C: DrawingContext + ?Sized>(&self, canvas: &mut C) {
        match self {
            DrawCommand::DrawSurface { surface, x, y } => canvas.draw_surface(surface, *x, *y),
            DrawCommand::Clear { color } => canvas.clear(*color),
            DrawCommand::FillRect { rect, color } => canvas.fill_rect(rect, *color),
        }
    }
}

/// Opens recordings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PictureRecorder {
    limits: SurfaceLimits,
}

impl PictureRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder whose canvases report `limits` as their maximum drawable size.
    pub fn with_limits(limits: SurfaceLimits) -> Self {
        Self { limits }
    }

    /// Open a recording of the given size.
    pub fn begin_recording(&self, width: u32, height: u32) -> RecordingCanvas {
        log::debug!(target: "surface", "beginRecording {}x{}", width, height);
        RecordingCanvas {
            size: SurfaceSize::new(width, height),
            limits: self.limits,
            commands: Vec::new(),
        }
    }
}

/// A drawing context that records commands into a picture.
#[derive(Debug)]
pub struct RecordingCanvas {
    size: SurfaceSize,
    limits: SurfaceLimits,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Number of commands recorded so far.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Close the recording.
    pub fn finish_recording(self) -> RecordedPicture {
        log::debug!(target: "surface", "endRecording {}x{} with {} commands", self.size.width, self.size.height, self.commands.len());
        RecordedPicture {
            size: self.size,
            commands: self.commands,
        }
    }
}

impl DrawingContext for RecordingCanvas {
    fn max_drawable_width(&self) -> u32 {
        self.limits.max_width
    }

    fn max_drawable_height(&self) -> u32 {
        self.limits.max_height
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn draw_surface(&mut self, source: &RasterSurface, x: i32, y: i32) {
        log::debug!(target: "surface", "record drawSurface {}x{} at {} {}", source.width(), source.height(), x, y);
        // Snapshot the pixels so later changes to `source` cannot leak into
        // the recording.
        self.commands.push(DrawCommand::DrawSurface {
            surface: Arc::new(source.clone()),
            x,
            y,
        });
    }

    fn clear(&mut self, color: SurfaceColor) {
        log::debug!(target: "surface", "record clear {:?}", color);
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_rect(&mut self, rect: &RectParams, color: SurfaceColor) {
        log::debug!(target: "surface", "record fillRect {} {} {} {}", rect.x, rect.y, rect.width, rect.height);
        self.commands.push(DrawCommand::FillRect { rect: *rect, color });
    }
}

/// An immutable sequence of drawing commands plus the size it was recorded at.
///
/// Cloning a picture shares the captured pixel snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedPicture {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl RecordedPicture {
    /// A 0x0 picture with no commands.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// True if the picture has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every command, in recording order, into `canvas`.
    pub fn playback<C: DrawingContext + ?Sized>(&self, canvas: &mut C) {
        log::debug!(target: "surface", "playback {} commands", self.commands.len());
        for command in &self.commands {
            command.apply(canvas);
        }
    }

    /// Rasterize the picture into a new transparent surface of the recorded size.
    pub fn to_surface(&self) -> SurfaceResult<RasterSurface> {
        let mut canvas = SurfaceCanvas::with_limits(
            RasterSurface::new(self.size.width, self.size.height)?,
            SurfaceLimits::UNBOUNDED,
        );
        self.playback(&mut canvas);
        Ok(canvas.into_surface())
    }
}

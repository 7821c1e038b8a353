//! Integration tests for surface-bridge.

use surface_bridge::{
    DrawCommand, DrawingContext, FactoryConfig, PictureRecorder, RasterSurface, RecordedPicture,
    RectParams, SurfaceCanvas, SurfaceColor, SurfaceError, SurfaceFactory, SurfaceLimits,
    SurfaceSize,
};

fn context_with_max(max_width: u32, max_height: u32) -> SurfaceCanvas {
    SurfaceCanvas::with_limits(
        RasterSurface::new(16, 16).unwrap(),
        SurfaceLimits::new(max_width, max_height),
    )
}

/// Paint a recognizable pattern so pixel comparisons are meaningful.
fn render_content(surface: &mut RasterSurface) {
    surface.fill(SurfaceColor::from_rgba8(20, 40, 60, 255));
    surface.fill_rect(
        &RectParams {
            x: 1.0,
            y: 1.0,
            width: 3.0,
            height: 2.0,
        },
        SurfaceColor::from_rgba8(255, 0, 0, 255),
    );
    surface
        .put_image_data(&[0, 255, 0, 128], 1, 1, 0, 0)
        .unwrap();
}

/// Oversized request against a 2048x2048 context, then capture.
#[test]
fn test_bounded_surface_to_picture() {
    let factory = SurfaceFactory::new();
    let context = context_with_max(2048, 2048);

    let surface = factory
        .create_bounded_surface(4000, 4000, Some(&context))
        .unwrap();
    assert_eq!(surface.size(), SurfaceSize::new(2048, 2048));

    let picture = factory.capture_surface_as_picture(Some(&surface));
    assert_eq!(picture.size(), SurfaceSize::new(2048, 2048));
    assert_eq!(picture.command_count(), 1);

    let empty = factory.capture_surface_as_picture(None);
    assert_eq!(empty.size(), SurfaceSize::ZERO);
    assert_eq!(empty.command_count(), 0);
}

/// Replaying a captured picture reproduces the surface exactly.
#[test]
fn test_capture_replay_is_pixel_identical() {
    let factory = SurfaceFactory::new();
    let mut surface = factory.create_bounded_surface(8, 5, None).unwrap();
    render_content(&mut surface);

    let picture = factory.capture_surface_as_picture(Some(&surface));
    let replay = picture.to_surface().unwrap();

    assert_eq!(replay.size(), surface.size());
    assert_eq!(replay.data(), surface.data());
}

/// Changing or dropping the source after capture leaves the picture alone.
#[test]
fn test_capture_snapshot_isolation() {
    let factory = SurfaceFactory::new();
    let mut surface = factory.create_bounded_surface(6, 6, None).unwrap();
    render_content(&mut surface);
    let original = surface.clone();

    let picture = factory.capture_surface_as_picture(Some(&surface));

    surface.fill(SurfaceColor::WHITE);
    assert_eq!(picture.to_surface().unwrap(), original);

    drop(surface);
    assert_eq!(picture.to_surface().unwrap(), original);
}

/// A picture can be replayed into a larger raster context at any time.
#[test]
fn test_picture_playback_into_canvas() {
    let factory = SurfaceFactory::new();
    let mut surface = factory.create_bounded_surface(2, 2, None).unwrap();
    surface.fill(SurfaceColor::WHITE);
    let picture = factory.capture_surface_as_picture(Some(&surface));

    let mut canvas = factory.create_canvas(RasterSurface::new(4, 4).unwrap());
    canvas.clear(SurfaceColor::BLACK);
    canvas.draw_picture(&picture);

    let out = canvas.surface();
    assert_eq!(out.pixel(0, 0), Some(SurfaceColor::WHITE));
    assert_eq!(out.pixel(1, 1), Some(SurfaceColor::WHITE));
    assert_eq!(out.pixel(2, 2), Some(SurfaceColor::BLACK));
}

/// Surfaces drawn into a recording canvas end up as commands, not pixels.
#[test]
fn test_draw_surface_into_recording_canvas() {
    let factory = SurfaceFactory::new();
    let mut surface = RasterSurface::new(3, 3).unwrap();
    surface.fill(SurfaceColor::WHITE);

    let mut recording = PictureRecorder::new().begin_recording(10, 10);
    factory
        .draw_surface_into(Some(&surface), Some(&mut recording), 4, 5)
        .unwrap();
    let picture = recording.finish_recording();

    assert_eq!(picture.size(), SurfaceSize::new(10, 10));
    assert!(matches!(
        picture.commands(),
        [DrawCommand::DrawSurface { x: 4, y: 5, .. }]
    ));

    let raster = picture.to_surface().unwrap();
    assert_eq!(raster.pixel(4, 5), Some(SurfaceColor::WHITE));
    assert_eq!(raster.pixel(6, 7), Some(SurfaceColor::WHITE));
    assert_eq!(raster.pixel(3, 5), Some(SurfaceColor::TRANSPARENT));
}

#[test]
fn test_missing_operands() {
    let factory = SurfaceFactory::new();
    let surface = RasterSurface::new(1, 1).unwrap();
    let mut canvas = SurfaceCanvas::new(1, 1).unwrap();

    let err = factory
        .draw_surface_into(None, Some(&mut canvas), 0, 0)
        .unwrap_err();
    assert!(matches!(err, SurfaceError::InvalidOperand("source surface")));

    let err = factory
        .draw_surface_into(Some(&surface), None, 0, 0)
        .unwrap_err();
    assert!(matches!(
        err,
        SurfaceError::InvalidOperand("destination context")
    ));
    assert_eq!(
        err.to_string(),
        "Invalid operand: destination context must not be absent"
    );
}

/// Recording limits from the config are visible to code drawing into the
/// recording, so nested bounded surfaces are clamped to them.
#[test]
fn test_recording_limits_clamp_nested_surfaces() {
    let factory = SurfaceFactory::with_config(FactoryConfig {
        recording_limits: SurfaceLimits::new(32, 16),
        ..FactoryConfig::default()
    });
    let recording = PictureRecorder::with_limits(factory.config().recording_limits)
        .begin_recording(100, 100);

    let surface = factory
        .create_bounded_surface(100, 100, Some(&recording))
        .unwrap();
    assert_eq!(surface.size(), SurfaceSize::new(32, 16));
    assert_eq!(recording.finish_recording().command_count(), 0);
}

#[test]
fn test_empty_picture_is_default() {
    assert_eq!(RecordedPicture::default(), RecordedPicture::empty());
}

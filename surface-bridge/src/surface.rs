//! Owned raster surfaces.

use crate::error::{SurfaceError, SurfaceResult};
use crate::geometry::{
    premultiply_rgb, unpremultiply_rgb, PixelFormat, RectParams, SurfaceColor, SurfaceSize,
};
use tiny_skia::{Paint, PixmapMut, Transform};

const BPP: usize = PixelFormat::BYTES_PER_PIXEL;

/// An owned pixel buffer with fixed dimensions and a fixed pixel format.
///
/// Pixels are stored row-major as premultiplied RGBA, 4 bytes per pixel,
/// which is the native layout of `tiny_skia::Pixmap`. Unlike a pixmap, a
/// surface may have a zero width or height; such a surface holds no pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterSurface {
    size: SurfaceSize,
    data: Vec<u8>,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .field("format", &self.pixel_format())
            .finish()
    }
}

impl RasterSurface {
    /// Allocate a zero-filled (transparent black) surface.
    ///
    /// Fails with [`SurfaceError::ResourceExhaustion`] if the buffer size
    /// overflows or the allocator refuses the request.
    pub fn new(width: u32, height: u32) -> SurfaceResult<Self> {
        let size = SurfaceSize::new(width, height);
        let exhausted = SurfaceError::ResourceExhaustion { width, height };
        let len = size.byte_len().ok_or(exhausted)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| SurfaceError::ResourceExhaustion { width, height })?;
        data.resize(len, 0);

        Ok(Self { size, data })
    }

    /// Build a surface from straight-alpha RGBA bytes (the ImageData layout).
    pub fn from_rgba(data: &[u8], width: u32, height: u32) -> SurfaceResult<Self> {
        // Reject mismatched input before allocating a buffer sized by the caller.
        check_len(SurfaceSize::new(width, height), data.len())?;
        let mut surface = Self::new(width, height)?;
        for (dst, src) in surface
            .data
            .chunks_exact_mut(BPP)
            .zip(data.chunks_exact(BPP))
        {
            let [r, g, b] = premultiply_rgb(src[0], src[1], src[2], src[3]);
            dst.copy_from_slice(&[r, g, b, src[3]]);
        }
        Ok(surface)
    }

    /// Get surface width.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Get surface height.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// True if the surface holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    pub fn pixel_format(&self) -> PixelFormat {
        PixelFormat::Rgba8888Premultiplied
    }

    /// Raw premultiplied RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read a single pixel as a straight-alpha color.
    pub fn pixel(&self, x: u32, y: u32) -> Option<SurfaceColor> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = (y as usize * self.size.width as usize + x as usize) * BPP;
        let p = &self.data[idx..idx + BPP];
        let [r, g, b] = unpremultiply_rgb(p[0], p[1], p[2], p[3]);
        Some(SurfaceColor::from_rgba8(r, g, b, p[3]))
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: SurfaceColor) {
        let px = color.premultiply();
        for dst in self.data.chunks_exact_mut(BPP) {
            dst.copy_from_slice(&px);
        }
    }

    /// Fill a rectangle with `color`, source-over, without anti-aliasing.
    ///
    /// Degenerate rectangles and empty surfaces are ignored.
    pub fn fill_rect(&mut self, rect: &RectParams, color: SurfaceColor) {
        let (width, height) = (self.size.width, self.size.height);
        let Some(rect) = rect.to_skia() else {
            return;
        };
        let Some(mut pixmap) = PixmapMut::from_bytes(&mut self.data, width, height) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color.into());
        paint.anti_alias = false;
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Copy all pixels of `source` into this surface with its top-left corner
    /// at (dx, dy).
    ///
    /// This is a direct pixel write: no blending or filtering is applied.
    /// Pixels landing outside this surface are dropped.
    pub fn copy_from(&mut self, source: &RasterSurface, dx: i32, dy: i32) {
        let dst_w = self.size.width as i64;
        let dst_h = self.size.height as i64;
        let src_w = source.size.width as i64;
        let src_h = source.size.height as i64;
        let (dx, dy) = (dx as i64, dy as i64);

        let x0 = dx.max(0);
        let x1 = (dx + src_w).min(dst_w);
        let y0 = dy.max(0);
        let y1 = (dy + src_h).min(dst_h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let row_bytes = ((x1 - x0) as usize) * BPP;
        let src_col = (x0 - dx) as usize;
        for dst_row in y0..y1 {
            let src_row = (dst_row - dy) as usize;
            let src_idx = (src_row * src_w as usize + src_col) * BPP;
            let dst_idx = (dst_row as usize * dst_w as usize + x0 as usize) * BPP;
            self.data[dst_idx..dst_idx + row_bytes]
                .copy_from_slice(&source.data[src_idx..src_idx + row_bytes]);
        }
    }

    /// Get the whole surface as straight-alpha RGBA bytes.
    pub fn get_image_data(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for p in self.data.chunks_exact(BPP) {
            let [r, g, b] = unpremultiply_rgb(p[0], p[1], p[2], p[3]);
            out.extend_from_slice(&[r, g, b, p[3]]);
        }
        out
    }

    /// Write straight-alpha RGBA data at (dx, dy), bypassing compositing.
    ///
    /// Pixels outside the surface are silently ignored.
    pub fn put_image_data(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
        dx: i32,
        dy: i32,
    ) -> SurfaceResult<()> {
        let patch = RasterSurface::from_rgba(data, width, height)?;
        self.copy_from(&patch, dx, dy);
        Ok(())
    }

    /// Export the surface as PNG data.
    ///
    /// # Arguments
    /// * `ppi` - Optional pixels per inch for PNG metadata. Defaults to 72 if not specified.
    pub fn to_png(&self, ppi: Option<f32>) -> SurfaceResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.size.width, self.size.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Pixels per meter
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.get_image_data())?;
        }
        Ok(buf)
    }

    /// Decode a PNG image into a surface.
    ///
    /// Palette, grayscale and 16-bit images are normalized to 8-bit RGBA.
    pub fn from_png(bytes: &[u8]) -> SurfaceResult<Self> {
        let mut decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let frame = &buf[..info.buffer_size()];

        let rgba: Vec<u8> = match info.color_type {
            png::ColorType::Rgba => frame.to_vec(),
            png::ColorType::Rgb => frame
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => frame
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            png::ColorType::Grayscale => frame.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            png::ColorType::Indexed => {
                return Err(SurfaceError::PngError(
                    "indexed color was not expanded".to_string(),
                ))
            }
        };

        log::debug!(target: "surface", "decoded png {}x{} ({:?})", info.width, info.height, info.color_type);
        Self::from_rgba(&rgba, info.width, info.height)
    }
}

fn check_len(size: SurfaceSize, actual: usize) -> SurfaceResult<()> {
    // A size whose byte length overflows can never match real data.
    let expected = size.byte_len().unwrap_or(usize::MAX);
    if expected != actual {
        return Err(SurfaceError::InvalidPixelData {
            width: size.width,
            height: size.height,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: SurfaceColor = SurfaceColor::from_rgba8(255, 0, 0, 255);
    const BLUE: SurfaceColor = SurfaceColor::from_rgba8(0, 0, 255, 255);

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = RasterSurface::new(20, 10).unwrap();
        assert_eq!(surface.width(), 20);
        assert_eq!(surface.height(), 10);
        assert_eq!(surface.data().len(), 20 * 10 * 4);
        assert!(surface.data().iter().all(|&b| b == 0));
        assert_eq!(surface.pixel_format(), PixelFormat::Rgba8888Premultiplied);
    }

    #[test]
    fn test_zero_sized_surfaces_are_valid() {
        for (w, h) in [(0, 0), (0, 5), (5, 0)] {
            let surface = RasterSurface::new(w, h).unwrap();
            assert!(surface.is_empty());
            assert!(surface.data().is_empty());
            assert_eq!(surface.pixel(0, 0), None);
        }
    }

    #[test]
    fn test_unallocatable_surface() {
        assert!(matches!(
            RasterSurface::new(u32::MAX, u32::MAX),
            Err(SurfaceError::ResourceExhaustion { .. })
        ));
    }

    #[test]
    fn test_fill_and_pixel() {
        let mut surface = RasterSurface::new(4, 4).unwrap();
        surface.fill(SurfaceColor::from_rgba8(255, 0, 0, 128));
        assert_eq!(surface.data()[0..4], [128, 0, 0, 128]);
        assert_eq!(
            surface.pixel(3, 3),
            Some(SurfaceColor::from_rgba8(255, 0, 0, 128))
        );
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_rect_pixels() {
        let mut surface = RasterSurface::new(100, 100).unwrap();
        surface.fill_rect(
            &RectParams {
                x: 10.0,
                y: 10.0,
                width: 50.0,
                height: 50.0,
            },
            RED,
        );
        assert_eq!(surface.pixel(30, 30), Some(RED));
        assert_eq!(surface.pixel(5, 5), Some(SurfaceColor::TRANSPARENT));
        assert_eq!(surface.pixel(60, 60), Some(SurfaceColor::TRANSPARENT));
    }

    #[test]
    fn test_fill_rect_on_empty_surface_is_noop() {
        let mut surface = RasterSurface::new(0, 0).unwrap();
        surface.fill_rect(
            &RectParams {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            },
            RED,
        );
        assert!(surface.data().is_empty());
    }

    #[test]
    fn test_copy_from_is_direct_write() {
        let mut dst = RasterSurface::new(4, 4).unwrap();
        dst.fill(BLUE);
        let mut src = RasterSurface::new(2, 2).unwrap();
        src.fill(SurfaceColor::from_rgba8(255, 0, 0, 0));

        dst.copy_from(&src, 1, 1);

        // Fully transparent source pixels replace the destination instead of
        // compositing over it.
        assert_eq!(dst.pixel(1, 1), Some(SurfaceColor::TRANSPARENT));
        assert_eq!(dst.pixel(2, 2), Some(SurfaceColor::TRANSPARENT));
        assert_eq!(dst.pixel(0, 0), Some(BLUE));
        assert_eq!(dst.pixel(3, 3), Some(BLUE));
    }

    #[test]
    fn test_copy_from_clips_to_destination() {
        let mut dst = RasterSurface::new(4, 4).unwrap();
        let mut src = RasterSurface::new(3, 3).unwrap();
        src.fill(RED);

        dst.copy_from(&src, -2, 2);
        assert_eq!(dst.pixel(0, 2), Some(RED));
        assert_eq!(dst.pixel(0, 3), Some(RED));
        assert_eq!(dst.pixel(1, 2), Some(SurfaceColor::TRANSPARENT));
        assert_eq!(dst.pixel(0, 1), Some(SurfaceColor::TRANSPARENT));

        // Entirely outside
        let before = dst.clone();
        dst.copy_from(&src, 10, 10);
        dst.copy_from(&src, -3, 0);
        assert_eq!(dst, before);
    }

    #[test]
    fn test_put_and_get_image_data() {
        let mut surface = RasterSurface::new(3, 1).unwrap();
        let patch = [0, 255, 0, 255, 255, 0, 0, 128];
        surface.put_image_data(&patch, 2, 1, 1, 0).unwrap();

        let data = surface.get_image_data();
        assert_eq!(&data[0..4], &[0, 0, 0, 0]);
        assert_eq!(&data[4..8], &[0, 255, 0, 255]);
        assert_eq!(&data[8..12], &[255, 0, 0, 128]);
    }

    #[test]
    fn test_put_image_data_length_mismatch() {
        let mut surface = RasterSurface::new(3, 3).unwrap();
        let err = surface.put_image_data(&[0; 7], 2, 1, 0, 0).unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::InvalidPixelData {
                expected: 8,
                actual: 7,
                ..
            }
        ));
    }

    #[test]
    fn test_from_rgba_length_checked_before_allocation() {
        // Too little data for a large declared size is a data error, reported
        // without allocating the declared buffer.
        assert!(matches!(
            RasterSurface::from_rgba(&[], u32::MAX, u32::MAX),
            Err(SurfaceError::InvalidPixelData { actual: 0, .. })
        ));
        assert!(matches!(
            RasterSurface::from_rgba(&[0; 4], 100_000, 100_000),
            Err(SurfaceError::InvalidPixelData {
                width: 100_000,
                height: 100_000,
                actual: 4,
                ..
            })
        ));

        let mut surface = RasterSurface::new(2, 2).unwrap();
        assert!(matches!(
            surface.put_image_data(&[0; 4], 100_000, 100_000, 0, 0),
            Err(SurfaceError::InvalidPixelData { .. })
        ));
        assert!(surface.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_png_roundtrip_preserves_pixels() {
        let mut surface = RasterSurface::new(8, 6).unwrap();
        surface.fill(BLUE);
        surface.fill_rect(
            &RectParams {
                x: 2.0,
                y: 2.0,
                width: 3.0,
                height: 2.0,
            },
            RED,
        );

        let png = surface.to_png(None).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        let decoded = RasterSurface::from_png(&png).unwrap();
        assert_eq!(decoded, surface);
    }

    #[test]
    fn test_from_png_rejects_garbage() {
        assert!(matches!(
            RasterSurface::from_png(b"definitely not a png"),
            Err(SurfaceError::PngError(_))
        ));
    }
}

//! Externally supplied signature images shown instead of hand-drawn strokes.

use super::point::Canvas;
use image::RgbaImage;
use std::sync::Arc;
use thiserror::Error;

/// Largest edge Cairo accepts for an image surface.
pub(crate) const MAX_SURFACE_EDGE: u32 = 32767;

/// Errors raised while loading an overlay image.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Invalid overlay image: {0}")]
    InvalidImage(String),

    #[error("Failed to read overlay image: {0}")]
    Io(#[from] std::io::Error),
}

/// Aspect-preserving placement of an image inside the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayFit {
    /// Uniform scale from image pixels to canvas units
    pub scale: f64,
    /// Left edge of the placed image in canvas units
    pub offset_x: f64,
    /// Top edge of the placed image in canvas units
    pub offset_y: f64,
}

impl OverlayFit {
    /// Largest uniform scale that fits `width × height` into the canvas minus
    /// `padding` on every side, centered in the full canvas.
    pub fn compute(width: u32, height: u32, canvas: Canvas, padding: f64) -> Self {
        let padding = padding.max(0.0);
        let avail_w = (canvas.width - 2.0 * padding).max(1.0);
        let avail_h = (canvas.height - 2.0 * padding).max(1.0);
        let (w, h) = (width.max(1) as f64, height.max(1) as f64);

        let scale = (avail_w / w).min(avail_h / h);
        Self {
            scale,
            offset_x: (canvas.width - w * scale) / 2.0,
            offset_y: (canvas.height - h * scale) / 2.0,
        }
    }
}

/// Decoded bitmap plus its fit. Pixels are shared, so cloning is cheap and
/// the image can travel inside model snapshots to an export worker.
#[derive(Clone, Debug)]
pub struct OverlayImage {
    pixels: Arc<RgbaImage>,
    fit: OverlayFit,
}

impl OverlayImage {
    /// Decodes `bytes` (any format the `image` crate recognises) and fits
    /// the result into `canvas`.
    pub fn decode(bytes: &[u8], canvas: Canvas, padding: f64) -> Result<Self, OverlayError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|err| OverlayError::InvalidImage(err.to_string()))?;
        Self::from_rgba(decoded.to_rgba8(), canvas, padding)
    }

    pub fn from_rgba(pixels: RgbaImage, canvas: Canvas, padding: f64) -> Result<Self, OverlayError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(OverlayError::InvalidImage("image has no pixels".to_string()));
        }
        if width > MAX_SURFACE_EDGE || height > MAX_SURFACE_EDGE {
            return Err(OverlayError::InvalidImage(format!(
                "image is too large ({width}x{height})"
            )));
        }

        let fit = OverlayFit::compute(width, height, canvas, padding);
        Ok(Self {
            pixels: Arc::new(pixels),
            fit,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn fit(&self) -> OverlayFit {
        self.fit
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Copies the bitmap into a premultiplied ARGB32 Cairo surface.
    pub(crate) fn to_surface(&self) -> Result<cairo::ImageSurface, cairo::Error> {
        let (width, height) = self.pixels.dimensions();
        let stride = cairo::Format::ARgb32.stride_for_width(width)?;
        let mut data = vec![0u8; stride as usize * height as usize];

        for (y, row) in self.pixels.rows().enumerate() {
            let row_start = y * stride as usize;
            for (x, pixel) in row.enumerate() {
                let [r, g, b, a] = pixel.0;
                let premul = |c: u8| (c as u32 * a as u32 + 127) / 255;
                let argb = (a as u32) << 24 | premul(r) << 16 | premul(g) << 8 | premul(b);
                let offset = row_start + x * 4;
                data[offset..offset + 4].copy_from_slice(&argb.to_ne_bytes());
            }
        }

        cairo::ImageSurface::create_for_data(
            data,
            cairo::Format::ARgb32,
            width as i32,
            height as i32,
            stride,
        )
    }
}

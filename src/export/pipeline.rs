use std::{fmt, io::Cursor, path::PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};

use crate::draw::{Background, StrokeModel, render};
use crate::export::{
    dependencies::ExportDependencies,
    types::{ExportError, ExportRequest},
};

/// A request bound to the model snapshot taken when it was issued.
#[derive(Clone)]
pub(crate) struct ExportJob {
    pub(crate) snapshot: StrokeModel,
    pub(crate) request: ExportRequest,
}

impl fmt::Debug for ExportJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportJob")
            .field("destination", &self.request.destination)
            .field("scale", &self.request.scale)
            .field("strokes", &self.snapshot.strokes().len())
            .field("overlay", &self.snapshot.overlay().is_some())
            .finish()
    }
}

/// Renders `model` at `scale` and encodes the surface as an RGBA8 PNG.
///
/// Cairo's own PNG writer drops the alpha channel for fully opaque surfaces,
/// so the pixels go through `image` to keep the colour type fixed.
pub fn encode_png(
    model: &StrokeModel,
    scale: f64,
    background: Background,
) -> Result<Vec<u8>, ExportError> {
    let surface = render::render_to_surface(model, scale, background)?;
    log::debug!(
        "Rendered export surface {}x{} (scale={})",
        surface.width(),
        surface.height(),
        scale
    );

    let rgba = surface_to_rgba(&surface)?;
    let mut png = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|err| ExportError::Encode(err.to_string()))?;
    Ok(png)
}

/// Converts premultiplied native-endian ARGB32 pixels to straight RGBA8.
fn surface_to_rgba(surface: &cairo::ImageSurface) -> Result<RgbaImage, ExportError> {
    let width = surface.width() as u32;
    let height = surface.height() as u32;
    let stride = surface.stride() as usize;
    let mut rgba = RgbaImage::new(width, height);

    surface
        .with_data(|data| {
            for (y, row) in data.chunks_exact(stride).take(height as usize).enumerate() {
                for (x, px) in row.chunks_exact(4).take(width as usize).enumerate() {
                    let argb = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
                    rgba.put_pixel(x as u32, y as u32, Rgba(unpremultiply(argb)));
                }
            }
        })
        .map_err(|err| ExportError::Encode(err.to_string()))?;
    Ok(rgba)
}

fn unpremultiply(argb: u32) -> [u8; 4] {
    let a = (argb >> 24) as u8;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let channel = |shift: u32| {
        let c = (argb >> shift) & 0xFF;
        ((c * 255 + a as u32 / 2) / a as u32).min(255) as u8
    };
    [channel(16), channel(8), channel(0), a]
}

/// Runs one export to completion. Blocking; call from a worker thread.
pub(crate) fn perform_export(
    job: ExportJob,
    dependencies: &ExportDependencies,
) -> Result<PathBuf, ExportError> {
    log::info!("Starting export: {:?}", job);

    if !job.snapshot.has_content() {
        return Err(ExportError::EmptyCanvas);
    }

    let ExportJob { snapshot, request } = job;
    let png = encode_png(&snapshot, request.scale, request.background)?;
    log::debug!("Encoded signature PNG ({} bytes)", png.len());

    dependencies.saver.save(&png, &request.destination)
}

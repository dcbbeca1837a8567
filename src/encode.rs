// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::Error;

const METERS_PER_INCH: f64 = 0.0254;

/// Converts DPI into PNG `pHYs` pixels per meter.
pub(crate) fn dpi_to_ppm(dpi: u32) -> u32 {
    (dpi as f64 / METERS_PER_INCH).round() as u32
}

/// Encodes a pixmap into an RGBA8 PNG with the DPI stored in `pHYs`.
pub(crate) fn encode_png(pixmap: &tiny_skia::Pixmap, dpi: u32) -> Result<Vec<u8>, Error> {
    // Pixmap stores premultiplied colors, PNG expects straight alpha.
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let ppm = dpi_to_ppm(dpi);

    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Best);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
        writer.finish()?;
    }

    Ok(data)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use crate::{Background, Error};

/// The smallest allowed output side, in pixels.
pub const MIN_SIZE: u32 = 1;
/// The largest allowed output side, in pixels.
pub const MAX_SIZE: u32 = 10_000;
/// The smallest allowed scale factor.
pub const MIN_SCALE: f32 = 0.1;
/// The largest allowed scale factor.
pub const MAX_SCALE: f32 = 10.0;
/// The smallest allowed DPI.
pub const MIN_DPI: u32 = 72;
/// The largest allowed DPI.
pub const MAX_DPI: u32 = 600;
/// DPI used when none was requested.
pub const DEFAULT_DPI: u32 = 96;

/// A single conversion request.
///
/// Lives only for one conversion. All numeric fields are validated
/// by [`RenderRequest::resolve`].
#[derive(Clone, PartialEq, Debug)]
pub struct RenderRequest {
    /// SVG or SVGZ data.
    pub svg_data: Vec<u8>,
    /// Requested output width in pixels.
    pub width: Option<u32>,
    /// Requested output height in pixels.
    pub height: Option<u32>,
    /// Factor to multiply the native size by. Overrides `width` and `height`.
    pub scale: Option<f32>,
    /// Resolution used to convert physical units into pixels.
    pub dpi: u32,
    /// A hex color or `transparent`.
    pub background: String,
}

impl RenderRequest {
    /// Creates a request that keeps the native size on a transparent background.
    pub fn new(svg_data: Vec<u8>) -> Self {
        RenderRequest {
            svg_data,
            width: None,
            height: None,
            scale: None,
            dpi: DEFAULT_DPI,
            background: crate::background::TRANSPARENT.to_string(),
        }
    }

    /// Resolves the request against the document native size.
    pub fn resolve(&self, native: usvg::Size) -> Result<Resolved, Error> {
        resolve(
            native,
            self.width,
            self.height,
            self.scale,
            self.dpi,
            &self.background,
        )
    }
}

/// Output sizing mode.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FitTo {
    /// Keep original size.
    Original,
    /// Scale to width, keeping the aspect ratio.
    Width(u32),
    /// Scale to height, keeping the aspect ratio.
    Height(u32),
    /// Stretch to an exact size.
    Size(u32, u32),
    /// Zoom by factor.
    Zoom(f32),
}

impl FitTo {
    /// Selects the sizing mode. A scale factor wins over explicit dimensions.
    pub fn new(width: Option<u32>, height: Option<u32>, scale: Option<f32>) -> Self {
        match (width, height, scale) {
            (_, _, Some(z)) => FitTo::Zoom(z),
            (Some(w), Some(h), None) => FitTo::Size(w, h),
            (Some(w), None, None) => FitTo::Width(w),
            (None, Some(h), None) => FitTo::Height(h),
            (None, None, None) => FitTo::Original,
        }
    }

    /// Computes the output size in pixels.
    ///
    /// Explicit sides are used as is. Derived sides are rounded to the nearest integer
    /// and clamped to `MIN_SIZE..=MAX_SIZE`.
    pub fn fit_to_size(&self, native: usvg::Size) -> (u32, u32) {
        let (nw, nh) = (native.width(), native.height());
        match *self {
            FitTo::Original => (clamp_side(nw), clamp_side(nh)),
            FitTo::Width(w) => (w, clamp_side(w as f32 * nh / nw)),
            FitTo::Height(h) => (clamp_side(h as f32 * nw / nh), h),
            FitTo::Size(w, h) => (w, h),
            FitTo::Zoom(z) => (clamp_side(nw * z), clamp_side(nh * z)),
        }
    }
}

fn clamp_side(v: f32) -> u32 {
    let v = v.round();
    // Also catches NaN.
    if !(v >= MIN_SIZE as f32) {
        log::warn!("Output side {} is below {}px. Clamped.", v, MIN_SIZE);
        MIN_SIZE
    } else if v > MAX_SIZE as f32 {
        log::warn!("Output side {} is above {}px. Clamped.", v, MAX_SIZE);
        MAX_SIZE
    } else {
        v as u32
    }
}

/// Fully resolved rendering parameters.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Resolved {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Rendering resolution.
    pub dpi: u32,
    /// Output background.
    pub background: Background,
    /// The sizing mode the size was derived from.
    pub fit_to: FitTo,
}

impl Resolved {
    /// Returns a root transform that maps the native size onto `width`x`height`.
    ///
    /// Only the output size is used, so the drawing always fills the image.
    pub fn transform(&self, native: usvg::Size) -> tiny_skia::Transform {
        tiny_skia::Transform::from_scale(
            self.width as f32 / native.width(),
            self.height as f32 / native.height(),
        )
    }
}

/// Resolves optional request parameters into a definitive output description.
///
/// `native` is the document size as reported by the parser.
///
/// Explicit `width` and `height` are validated even when `scale` overrides them.
pub fn resolve(
    native: usvg::Size,
    width: Option<u32>,
    height: Option<u32>,
    scale: Option<f32>,
    dpi: u32,
    background: &str,
) -> Result<Resolved, Error> {
    check_dpi(dpi)?;
    let background = Background::from_str(background)?;

    if let Some(z) = scale {
        if !(MIN_SCALE..=MAX_SCALE).contains(&z) {
            return Err(Error::invalid(
                "scale",
                format!("{} is not in {}..={}", z, MIN_SCALE, MAX_SCALE),
            ));
        }
    }

    check_side("width", width)?;
    check_side("height", height)?;

    if scale.is_some() && (width.is_some() || height.is_some()) {
        log::debug!("Scale is set. Width and height are ignored.");
    }

    let fit_to = FitTo::new(width, height, scale);
    let (width, height) = fit_to.fit_to_size(native);

    log::debug!(
        "Resolved {}x{} -> {}x{} at {} DPI using {:?}.",
        native.width(),
        native.height(),
        width,
        height,
        dpi,
        fit_to
    );

    Ok(Resolved {
        width,
        height,
        dpi,
        background,
        fit_to,
    })
}

/// Checks that DPI is in `MIN_DPI..=MAX_DPI`.
pub fn check_dpi(dpi: u32) -> Result<(), Error> {
    if (MIN_DPI..=MAX_DPI).contains(&dpi) {
        Ok(())
    } else {
        Err(Error::invalid(
            "dpi",
            format!("{} is not in {}..={}", dpi, MIN_DPI, MAX_DPI),
        ))
    }
}

fn check_side(name: &'static str, side: Option<u32>) -> Result<(), Error> {
    match side {
        Some(v) if !(MIN_SIZE..=MAX_SIZE).contains(&v) => Err(Error::invalid(
            name,
            format!("{} is not in {}..={}", v, MIN_SIZE, MAX_SIZE),
        )),
        _ => Ok(()),
    }
}

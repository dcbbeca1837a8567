// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svg2png` converts SVG documents into PNG images.

The output size, DPI and background are validated and resolved first:

- `scale` multiplies the native size and wins over everything else
- `width` and `height` together stretch the image to an exact size
- a single `width` or `height` keeps the native aspect ratio
- otherwise the native size is used

The actual rendering is done by [resvg](https://github.com/RazrFalcon/resvg).

```no_run
let data = std::fs::read("in.svg").unwrap();
let mut request = svg2png::RenderRequest::new(data);
request.scale = Some(2.0);
request.background = "#ffffff".to_string();

let rendered = svg2png::render(&request, &svg2png::Options::default()).unwrap();
rendered.save_png("out.png").unwrap();
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::uninlined_format_args)]

pub use tiny_skia;
pub use usvg;

mod background;
mod encode;
mod error;
mod fonts;
mod render;
mod resolve;

use std::path::PathBuf;

pub use background::{Background, TRANSPARENT};
pub use error::Error;
pub use fonts::{load_fonts, FontOptions};
pub use render::{parse_tree, render, render_tree, Rendered};
pub use resolve::{
    check_dpi, resolve, FitTo, RenderRequest, Resolved, DEFAULT_DPI, MAX_DPI, MAX_SCALE, MAX_SIZE,
    MIN_DPI, MIN_SCALE, MIN_SIZE,
};

/// Conversion options that are shared between requests.
#[derive(Clone, Debug)]
pub struct Options {
    /// Directory used to resolve relative paths.
    ///
    /// Default: None
    pub resources_dir: Option<PathBuf>,

    /// Font family used when no `font-family` is present.
    ///
    /// Default: Times New Roman
    pub font_family: String,

    /// Font size used when no `font-size` is present.
    ///
    /// Default: 12
    pub font_size: f32,

    /// Languages used during `systemLanguage` resolving.
    ///
    /// Default: `[en]`
    pub languages: Vec<String>,

    /// Font database options.
    pub fonts: FontOptions,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            resources_dir: None,
            font_family: "Times New Roman".to_string(),
            font_size: 12.0,
            languages: vec!["en".to_string()],
            fonts: FontOptions::default(),
        }
    }
}

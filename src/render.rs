// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::Path;

use crate::{fonts, Error, Options, RenderRequest, Resolved};

/// A rendered image together with the parameters it was rendered with.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// Rendered pixels.
    pub pixmap: tiny_skia::Pixmap,
    /// Resolved request parameters.
    pub resolved: Resolved,
}

impl Rendered {
    /// Encodes the image as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        crate::encode::encode_png(&self.pixmap, self.resolved.dpi)
    }

    /// Encodes the image as PNG and writes it to `path`.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let data = self.encode_png()?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

/// Parses SVG data into a tree.
///
/// Accepts both SVG and SVGZ data. `dpi` must already be validated.
pub fn parse_tree(svg_data: &[u8], dpi: u32, opt: &Options) -> Result<usvg::Tree, Error> {
    let decompressed;
    let svg_data = if svg_data.starts_with(&[0x1f, 0x8b]) {
        decompressed = usvg::decompress_svgz(svg_data)?;
        decompressed.as_slice()
    } else {
        svg_data
    };

    let svg_string = std::str::from_utf8(svg_data).map_err(|_| usvg::Error::NotAnUtf8Str)?;

    let xml_opt = usvg::roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let xml_tree = usvg::roxmltree::Document::parse_with_options(svg_string, xml_opt)
        .map_err(usvg::Error::ParsingFailed)?;

    // fontdb initialization is pretty expensive, so perform it only when needed.
    let fontdb = if fonts::has_text_nodes(&xml_tree) {
        fonts::load_fonts(&opt.fonts)
    } else {
        usvg::fontdb::Database::new()
    };

    let usvg_opt = usvg::Options {
        resources_dir: opt.resources_dir.clone(),
        dpi: dpi as f32,
        font_family: opt.font_family.clone(),
        font_size: opt.font_size,
        languages: opt.languages.clone(),
        ..usvg::Options::default()
    };

    let tree = usvg::Tree::from_xmltree(&xml_tree, &usvg_opt, &fontdb)?;
    Ok(tree)
}

/// Renders a tree using already resolved parameters.
pub fn render_tree(tree: &usvg::Tree, resolved: Resolved) -> Result<Rendered, Error> {
    let mut pixmap = tiny_skia::Pixmap::new(resolved.width, resolved.height).ok_or(
        Error::PixmapCreationFailed {
            width: resolved.width,
            height: resolved.height,
        },
    )?;

    if let Some(color) = resolved.background.to_skia_color() {
        pixmap.fill(color);
    }

    let ts = resolved.transform(tree.size());
    resvg::render(tree, ts, &mut pixmap.as_mut());

    Ok(Rendered { pixmap, resolved })
}

/// Validates, parses, resolves and renders a request.
pub fn render(request: &RenderRequest, opt: &Options) -> Result<Rendered, Error> {
    crate::resolve::check_dpi(request.dpi)?;
    let tree = parse_tree(&request.svg_data, request.dpi, opt)?;
    let resolved = request.resolve(tree.size())?;
    render_tree(&tree, resolved)
}

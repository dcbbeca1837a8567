// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use usvg::fontdb;

/// Font database options.
///
/// Fonts are loaded only for documents that contain text.
#[derive(Clone, Default, Debug)]
pub struct FontOptions {
    /// Font files to load.
    pub font_files: Vec<PathBuf>,
    /// Directories to load fonts from.
    pub font_dirs: Vec<PathBuf>,
    /// Do not load system fonts.
    pub skip_system_fonts: bool,

    /// The `serif` family. Default: Times New Roman
    pub serif_family: Option<String>,
    /// The `sans-serif` family. Default: Arial
    pub sans_serif_family: Option<String>,
    /// The `cursive` family. Default: Comic Sans MS
    pub cursive_family: Option<String>,
    /// The `fantasy` family. Default: Impact
    pub fantasy_family: Option<String>,
    /// The `monospace` family. Default: Courier New
    pub monospace_family: Option<String>,
}

/// Builds a font database.
pub fn load_fonts(opt: &FontOptions) -> fontdb::Database {
    let mut fontdb = fontdb::Database::new();
    load_sources(opt, &mut fontdb);

    let take_or =
        |family: &Option<String>, fallback: &str| family.clone().unwrap_or_else(|| fallback.to_string());

    fontdb.set_serif_family(take_or(&opt.serif_family, "Times New Roman"));
    fontdb.set_sans_serif_family(take_or(&opt.sans_serif_family, "Arial"));
    fontdb.set_cursive_family(take_or(&opt.cursive_family, "Comic Sans MS"));
    fontdb.set_fantasy_family(take_or(&opt.fantasy_family, "Impact"));
    fontdb.set_monospace_family(take_or(&opt.monospace_family, "Courier New"));

    log::debug!("Loaded {} font faces.", fontdb.len());

    fontdb
}

#[cfg(feature = "system-fonts")]
fn load_sources(opt: &FontOptions, fontdb: &mut fontdb::Database) {
    if !opt.skip_system_fonts {
        fontdb.load_system_fonts();
    }

    for path in &opt.font_files {
        if let Err(e) = fontdb.load_font_file(path) {
            log::warn!("Failed to load '{}' cause {}.", path.display(), e);
        }
    }

    for path in &opt.font_dirs {
        fontdb.load_fonts_dir(path);
    }
}

#[cfg(not(feature = "system-fonts"))]
fn load_sources(opt: &FontOptions, _: &mut fontdb::Database) {
    if !opt.font_files.is_empty() || !opt.font_dirs.is_empty() {
        log::warn!("The system-fonts feature is not enabled. Font files are ignored.");
    }
}

/// Checks that a document has at least one `text` element.
pub(crate) fn has_text_nodes(doc: &usvg::roxmltree::Document) -> bool {
    doc.descendants()
        .any(|n| n.has_tag_name(("http://www.w3.org/2000/svg", "text")))
}

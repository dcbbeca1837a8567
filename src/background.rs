// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use crate::Error;

/// The token that disables background filling.
pub const TRANSPARENT: &str = "transparent";

/// An image background.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Background {
    /// Leave uncovered pixels fully transparent.
    #[default]
    Transparent,
    /// Fill the whole image with a color before rendering.
    Color(svgtypes::Color),
}

impl Background {
    /// Returns the fill color, if any.
    pub fn to_skia_color(&self) -> Option<tiny_skia::Color> {
        match *self {
            Background::Transparent => None,
            Background::Color(c) => Some(tiny_skia::Color::from_rgba8(
                c.red, c.green, c.blue, c.alpha,
            )),
        }
    }
}

impl FromStr for Background {
    type Err = Error;

    /// Parses `transparent` or a `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` hex color.
    ///
    /// Named and functional colors are not accepted.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.eq_ignore_ascii_case(TRANSPARENT) {
            return Ok(Background::Transparent);
        }

        let digits = match text.strip_prefix('#') {
            Some(digits) => digits,
            None => {
                return Err(Error::invalid(
                    "background",
                    format!("'{}' is not a hex color or '{}'", text, TRANSPARENT),
                ))
            }
        };

        let is_hex = digits.bytes().all(|c| c.is_ascii_hexdigit());
        if !is_hex || !matches!(digits.len(), 3 | 4 | 6 | 8) {
            return Err(Error::invalid(
                "background",
                format!("'{}' is not a valid hex color", text),
            ));
        }

        svgtypes::Color::from_str(text)
            .map(Background::Color)
            .map_err(|e| Error::invalid("background", e.to_string()))
    }
}

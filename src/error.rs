// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// A request parameter is outside of its documented bounds.
    InvalidParameter {
        /// Parameter name, like `scale` or `dpi`.
        name: &'static str,
        /// Human readable explanation.
        message: String,
    },

    /// The rendering engine rejected the provided SVG data.
    RenderFailure(usvg::Error),

    /// Failed to allocate the output image.
    ///
    /// Probably because it's too big or there is not enough memory.
    PixmapCreationFailed {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Failed to encode the rendered image as PNG.
    EncodingFailed(png::EncodingError),

    /// Failed to write the output file.
    Io(std::io::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

impl From<usvg::Error> for Error {
    fn from(e: usvg::Error) -> Self {
        Error::RenderFailure(e)
    }
}

impl From<png::EncodingError> for Error {
    fn from(e: png::EncodingError) -> Self {
        Error::EncodingFailed(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::InvalidParameter { name, ref message } => {
                write!(f, "invalid {}: {}", name, message)
            }
            Error::RenderFailure(ref e) => {
                write!(f, "rendering failed cause {}", e)
            }
            Error::PixmapCreationFailed { width, height } => {
                write!(f, "failed to allocate a {}x{} image", width, height)
            }
            Error::EncodingFailed(ref e) => {
                write!(f, "PNG encoding failed cause {}", e)
            }
            Error::Io(ref e) => {
                write!(f, "failed to write the output cause {}", e)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::RenderFailure(ref e) => Some(e),
            Error::EncodingFailed(ref e) => Some(e),
            Error::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

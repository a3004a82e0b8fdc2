// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
///
/// Malformed markup itself is not an error — per-element parse failures
/// are skipped and parsing resumes at the next tag, matching permissive
/// SVG-in-the-wild behavior. Only the conditions below abort a parse
/// entirely.
#[derive(Debug)]
pub enum Error {
    /// Only UTF-8 content is supported.
    NotAnUtf8Str,

    /// Failed to read the input file.
    Io(std::io::Error),

    /// The document has no usable size: width and/or height are `<= 0`,
    /// or neither was set and no `viewBox` was present to fall back on.
    InvalidSize,
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NotAnUtf8Str => write!(f, "provided data has not an UTF-8 encoding"),
            Error::Io(ref e) => write!(f, "failed to read the SVG file cause {}", e),
            Error::InvalidSize => write!(f, "SVG has an invalid size"),
        }
    }
}

impl std::error::Error for Error {}

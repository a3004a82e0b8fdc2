// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Builds an [`svg_tree::Image`] from an SVG document, using [`xml_scan`] for
tokenizing and this crate for everything SVG-specific: the attribute/
transform stack, color and path-data parsing, and the shape constructors
for `rect`/`circle`/`ellipse`/`line`/`polyline`/`polygon`/`path`.

Malformed markup never aborts a parse outright — see [`parse_str`]'s docs
and `spec.md` §7. The only hard errors are at the I/O boundary
([`parse_file`]) and in [`units::resolve_pixel_size`], which needs a
resolvable absolute size to do anything useful.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod color;
mod converter;
mod error;
mod numbers;
mod path_data;
mod shapes;
mod transform;
mod units;

pub use crate::color::parse_color;
pub use crate::converter::parse_str;
pub use crate::error::Error;
pub use crate::transform::parse_transform_list;
pub use crate::units::resolve_pixel_size;

use std::path::Path;

use svg_tree::Image;

/// Reads an SVG document from `path` and parses it.
///
/// Matches `spec.md` §6(a): the file is read fully into memory before
/// parsing begins. Any I/O failure (not found, permissions, not valid
/// UTF-8) is reported as [`Error`]; a malformed-but-readable document
/// still parses successfully (see [`parse_str`]).
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Image, Error> {
    let bytes = std::fs::read(path)?;
    parse_bytes(&bytes)
}

/// Parses an SVG document from a byte buffer.
///
/// `spec.md` §6(b) describes this as a "mutable NUL-terminated UTF-8 byte
/// buffer (ASCII in practice)"; this crate doesn't need — or expose — the
/// destructive in-place tokenization the source used, so the buffer is
/// taken by shared reference and never mutated (see `spec.md` §9,
/// "Destructive XML input").
pub fn parse_bytes(bytes: &[u8]) -> Result<Image, Error> {
    let text = std::str::from_utf8(bytes).map_err(|_| Error::NotAnUtf8Str)?;
    Ok(parse_str(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_utf8_bytes_are_rejected() {
        let bytes = [0xff, 0xfe, 0x00];
        assert!(matches!(parse_bytes(&bytes), Err(Error::NotAnUtf8Str)));
    }

    #[test]
    fn valid_document_round_trips_through_bytes() {
        let img = parse_bytes(br#"<svg width="4" height="4"><circle cx="2" cy="2" r="2" fill="blue"/></svg>"#)
            .unwrap();
        assert_eq!(img.shapes().len(), 1);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svg_tree::Image;

use crate::Error;

/// Resolves an [`Image`]'s nominal width/height to pixels, using the
/// caller-supplied pixels-per-inch for any unit that isn't already `px`
/// (or bare, which this crate treats the same as `px`).
///
/// This is the one piece of DPI negotiation `spec.md` §1 allows: "a single
/// caller-supplied pixels-per-inch used to size the document when
/// unit-typed." There is no support for resolving `%`/`em`/`ex` (those are
/// relative to a viewport or font metric this core never has), and a
/// document with an unset dimension (`-1`, meaning no `width`/`height`
/// attribute was present) is likewise unresolvable — both return
/// [`Error::InvalidSize`].
pub fn resolve_pixel_size(image: &Image, ppi: f64) -> Result<(f64, f64), Error> {
    let w = resolve_one(image.width(), image.width_unit(), ppi)?;
    let h = resolve_one(image.height(), image.height_unit(), ppi)?;
    Ok((w, h))
}

fn resolve_one(value: f64, unit: &str, ppi: f64) -> Result<f64, Error> {
    if value <= 0.0 {
        return Err(Error::InvalidSize);
    }
    let factor = match unit {
        "" | "px" => 1.0,
        "in" => ppi,
        "pt" => ppi / 72.0,
        "pc" => ppi / 6.0,
        "mm" => ppi / 25.4,
        "cm" => ppi / 2.54,
        _ => return Err(Error::InvalidSize),
    };
    Ok(value * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_is_identity() {
        let mut img = Image::new();
        img.set_width(100.0, "px");
        img.set_height(50.0, "px");
        assert_eq!(resolve_pixel_size(&img, 96.0).unwrap(), (100.0, 50.0));
    }

    #[test]
    fn inches_scale_by_ppi() {
        let mut img = Image::new();
        img.set_width(2.0, "in");
        img.set_height(1.0, "in");
        assert_eq!(resolve_pixel_size(&img, 96.0).unwrap(), (192.0, 96.0));
    }

    #[test]
    fn unset_dimension_is_invalid_size() {
        let img = Image::new();
        assert!(resolve_pixel_size(&img, 96.0).is_err());
    }

    #[test]
    fn relative_units_are_unresolvable() {
        let mut img = Image::new();
        img.set_width(100.0, "%");
        img.set_height(50.0, "px");
        assert!(resolve_pixel_size(&img, 96.0).is_err());
    }
}

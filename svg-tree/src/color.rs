// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// An opaque RGB color with a separately-tracked alpha.
///
/// Alpha is not a field here: a shape's alpha is `round(opacity * 255)`
/// derived from the fill/stroke opacity in effect when the shape was
/// built, and is folded in only when producing the packed byte form the
/// rasterizer composites with (see [`Color::to_straight_rgba`]).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// Constructs a new color from RGB components.
    #[inline]
    pub fn new_rgb(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue }
    }

    /// Opaque black — the default fill/stroke color of the root attribute
    /// frame.
    #[inline]
    pub fn black() -> Color {
        Color::new_rgb(0, 0, 0)
    }

    /// Packs this color and an opacity into non-premultiplied RGBA bytes,
    /// in `R, G, B, A` byte order.
    #[inline]
    pub fn to_straight_rgba(self, opacity: f64) -> [u8; 4] {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.red, self.green, self.blue, a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_alpha_from_opacity() {
        let c = Color::new_rgb(255, 0, 0);
        assert_eq!(c.to_straight_rgba(1.0), [255, 0, 0, 255]);
        assert_eq!(c.to_straight_rgba(0.0), [255, 0, 0, 0]);
    }

    #[test]
    fn black_is_default_fill() {
        assert_eq!(Color::black(), Color::new_rgb(0, 0, 0));
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// A 2D affine transform, stored as the six coefficients of a 2x3 matrix.
///
/// Applies to a point as:
///
/// ```text
/// x' = a*x + c*y + e
/// y' = b*x + d*y + f
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    /// Constructs a new transform from its six coefficients.
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f }
    }

    /// Constructs a translation transform.
    #[inline]
    pub fn new_translate(x: f64, y: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Constructs a scale transform.
    #[inline]
    pub fn new_scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Constructs a rotation transform, `angle` in degrees.
    #[inline]
    pub fn new_rotate(angle: f64) -> Self {
        let v = angle.to_radians();
        let a = v.cos();
        let b = v.sin();
        let c = -b;
        let d = a;
        Transform::new(a, b, c, d, 0.0, 0.0)
    }

    /// Constructs a skew-X transform, `angle` in degrees.
    #[inline]
    pub fn new_skew_x(angle: f64) -> Self {
        let c = angle.to_radians().tan();
        Transform::new(1.0, 0.0, c, 1.0, 0.0, 0.0)
    }

    /// Constructs a skew-Y transform, `angle` in degrees.
    #[inline]
    pub fn new_skew_y(angle: f64) -> Self {
        let b = angle.to_radians().tan();
        Transform::new(1.0, b, 0.0, 1.0, 0.0, 0.0)
    }

    /// Folds a newly-parsed transform-list token into this frame's
    /// transform, as `<svg>`'s `transform` attribute accumulates its
    /// space-separated token list left to right: `other` is applied to a
    /// point *before* the transform accumulated so far.
    ///
    /// Processing a token list `A B` this way by calling
    /// `frame.premultiply(&A)` then `frame.premultiply(&B)` leaves the
    /// frame's transform equivalent to the single matrix `A * B`, i.e. `B`
    /// (the later token) is applied to a point first and `A` last — which
    /// is the standard SVG nested-coordinate-system reading ("scale
    /// happens in child space, then translate in parent space").
    #[inline]
    pub fn premultiply(&mut self, other: &Transform) {
        let ts = multiply(self, other);
        *self = ts;
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let new_x = self.a * x + self.c * y + self.e;
        let new_y = self.b * x + self.d * y + self.f;
        (new_x, new_y)
    }

    /// Returns the largest of the transform's x/y axis scale magnitudes.
    ///
    /// Used to scale a stroke width so it stays visually consistent after
    /// a non-uniform transform is applied.
    pub fn scale_hint(&self) -> f64 {
        let x_scale = (self.a * self.a + self.b * self.b).sqrt();
        let y_scale = (self.c * self.c + self.d * self.d).sqrt();
        x_scale.max(y_scale)
    }
}

#[inline(never)]
fn multiply(ts1: &Transform, ts2: &Transform) -> Transform {
    Transform {
        a: ts1.a * ts2.a + ts1.c * ts2.b,
        b: ts1.b * ts2.a + ts1.d * ts2.b,
        c: ts1.a * ts2.c + ts1.c * ts2.d,
        d: ts1.b * ts2.c + ts1.d * ts2.d,
        e: ts1.a * ts2.e + ts1.c * ts2.f + ts1.e,
        f: ts1.b * ts2.e + ts1.d * ts2.f + ts1.f,
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_apply_is_noop() {
        let t = Transform::default();
        assert_eq!(t.apply(3.0, 4.0), (3.0, 4.0));
    }

    #[test]
    fn premultiply_applies_later_tokens_first() {
        // transform="translate(10,0) scale(2)": scale happens in child
        // space, translate happens after in parent space.
        let mut frame = Transform::default();
        frame.premultiply(&Transform::new_translate(10.0, 0.0));
        frame.premultiply(&Transform::new_scale(2.0, 2.0));

        assert_eq!(frame.apply(0.0, 0.0), (10.0, 0.0));
        assert_eq!(frame.apply(1.0, 1.0), (12.0, 2.0));
    }

    #[test]
    fn scale_hint_picks_larger_axis() {
        let t = Transform::new_scale(2.0, 3.0);
        assert_eq!(t.scale_hint(), 3.0);
    }
}

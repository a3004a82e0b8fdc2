// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Color, Path};

/// One filled contour group: a fill/stroke style plus an ordered list of
/// [`Path`]s, all already in the image's user-coordinate space.
///
/// Stroke attributes are carried through so an embedder that wants them
/// can read them back, but the rasterizer in this crate only fills —
/// `has_stroke`/`stroke_color`/`stroke_width` have no effect on the
/// rendered output.
#[derive(Clone, Debug)]
pub struct Shape {
    fill_color: Color,
    has_fill: bool,
    fill_opacity: f64,
    stroke_color: Color,
    has_stroke: bool,
    stroke_width: f64,
    stroke_opacity: f64,
    paths: Vec<Path>,
}

impl Shape {
    /// Constructs a shape with no paths yet attached.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        fill_color: Color,
        has_fill: bool,
        fill_opacity: f64,
        stroke_color: Color,
        has_stroke: bool,
        stroke_width: f64,
        stroke_opacity: f64,
        paths: Vec<Path>,
    ) -> Self {
        Shape {
            fill_color,
            has_fill,
            fill_opacity,
            stroke_color,
            has_stroke,
            stroke_width,
            stroke_opacity,
            paths,
        }
    }

    /// Returns `true` if the rasterizer should paint this shape at all.
    #[inline]
    pub fn has_fill(&self) -> bool {
        self.has_fill
    }

    /// Returns the fill color, with alpha already folded in from
    /// `fill_opacity` at construction time.
    #[inline]
    pub fn fill_rgba(&self) -> [u8; 4] {
        self.fill_color.to_straight_rgba(self.fill_opacity)
    }

    /// Returns `true` if this shape carries a stroke attribute (unused by
    /// the rasterizer, but preserved for callers that inspect the tree).
    #[inline]
    pub fn has_stroke(&self) -> bool {
        self.has_stroke
    }

    /// Returns the stroke color and opacity-folded alpha.
    #[inline]
    pub fn stroke_rgba(&self) -> [u8; 4] {
        self.stroke_color.to_straight_rgba(self.stroke_opacity)
    }

    /// Returns the effective stroke width (already scaled by the
    /// transform's scale hint at construction time).
    #[inline]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Returns this shape's paths, in construction order.
    #[inline]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }
}

/// The root entity: an image's nominal size plus an unordered collection
/// of [`Shape`]s, each owning its own paths.
#[derive(Clone, Debug, Default)]
pub struct Image {
    width: f64,
    height: f64,
    width_unit: String,
    height_unit: String,
    view_box: Option<ViewBox>,
    shapes: Vec<Shape>,
}

/// A parsed `viewBox` attribute, recorded but never auto-applied as a
/// transform — callers that want the standard viewBox-to-viewport mapping
/// compose it themselves from `width`/`height`/`view_box` and their own
/// destination size.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

const UNSET_SIZE: f64 = -1.0;

impl Image {
    /// Constructs an image with unset width/height and no shapes.
    pub fn new() -> Self {
        Image {
            width: UNSET_SIZE,
            height: UNSET_SIZE,
            width_unit: String::new(),
            height_unit: String::new(),
            view_box: None,
            shapes: Vec::new(),
        }
    }

    /// Sets the nominal width, with its unit suffix (e.g. `"px"`, `"pt"`,
    /// `"em"`), opaque to this crate but preserved for the caller.
    pub fn set_width(&mut self, value: f64, unit: &str) {
        self.width = value;
        self.width_unit = unit.to_string();
    }

    /// Sets the nominal height, with its unit suffix.
    pub fn set_height(&mut self, value: f64, unit: &str) {
        self.height = value;
        self.height_unit = unit.to_string();
    }

    /// Sets the parsed `viewBox`.
    pub fn set_view_box(&mut self, view_box: ViewBox) {
        self.view_box = Some(view_box);
    }

    /// Returns the nominal width, or `-1.0` if unset.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the nominal height, or `-1.0` if unset.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the width's unit suffix.
    #[inline]
    pub fn width_unit(&self) -> &str {
        &self.width_unit
    }

    /// Returns the height's unit suffix.
    #[inline]
    pub fn height_unit(&self) -> &str {
        &self.height_unit
    }

    /// Returns the parsed `viewBox`, if the document had one.
    #[inline]
    pub fn view_box(&self) -> Option<ViewBox> {
        self.view_box
    }

    /// Prepends a fully-built shape to the image.
    ///
    /// Insertion order is reverse construction order: the shape built
    /// last in document order ends up at the front. `svg-parser` commits
    /// shapes in document order, so paint order (shapes later in the list
    /// overwrite earlier ones, per the rasterizer's ordering contract)
    /// still matches document order as long as callers iterate
    /// [`Image::shapes`] back to front, which the root crate does.
    pub(crate) fn push_shape_front(&mut self, shape: Shape) {
        self.shapes.insert(0, shape);
    }

    /// Returns the image's shapes, in reverse document order.
    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

/// Constructs a [`Shape`] and prepends it to `image`. Exposed to
/// `svg-parser`, which is the only other crate that builds shapes.
#[allow(clippy::too_many_arguments)]
pub fn commit_shape(
    image: &mut Image,
    fill_color: Color,
    has_fill: bool,
    fill_opacity: f64,
    stroke_color: Color,
    has_stroke: bool,
    stroke_width: f64,
    stroke_opacity: f64,
    paths: Vec<Path>,
) {
    let shape = Shape::new(
        fill_color,
        has_fill,
        fill_opacity,
        stroke_color,
        has_stroke,
        stroke_width,
        stroke_opacity,
        paths,
    );
    image.push_shape_front(shape);
}

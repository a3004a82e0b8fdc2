// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svg-tree` is the flat shape/path data model produced by `svg-parser` and
consumed by the `svgraster` rasterizer.

It deliberately has no notion of groups, gradients, clipping, or any other
SVG feature beyond "a color and a list of cubic poly-Bézier paths": anything
hierarchical in the source document has already been flattened into
absolute user-space coordinates by the time a [`Shape`] is built.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

mod color;
mod image;
mod path;
mod transform;

pub use crate::color::Color;
pub use crate::image::{commit_shape, Image, Shape, ViewBox};
pub use crate::path::{Path, Point};
pub use crate::transform::Transform;

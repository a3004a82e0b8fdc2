// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svg_tree::{commit_shape, Color, Image, Path, Transform, ViewBox};
use xml_scan::{Attributes, Event, Tokenizer};

use crate::color::parse_color;
use crate::numbers::NumberScanner;
use crate::path_data::parse_path_data;
use crate::transform::parse_transform_list;
use crate::{shapes, Error};

/// Transform stack depth bound. `spec.md` §3 suggests >= 128 and requires
/// overflow to clamp silently rather than panic (mirrors nanosvg's fixed
/// `NSVG_MAX_ATTR` array).
const MAX_ATTR_DEPTH: usize = 128;

/// One pushed drawing-state frame: a running transform plus the paint
/// attributes `style`/`fill`/`stroke`/... accumulate onto as an element's
/// own attributes are applied. Copied from the parent frame on push.
#[derive(Clone)]
struct AttrFrame {
    transform: Transform,
    fill_color: Color,
    stroke_color: Color,
    fill_opacity: f64,
    stroke_opacity: f64,
    stroke_width: f64,
    has_fill: bool,
    has_stroke: bool,
    visible: bool,
}

impl AttrFrame {
    fn root() -> Self {
        AttrFrame {
            transform: Transform::default(),
            fill_color: Color::black(),
            stroke_color: Color::black(),
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
            stroke_width: 1.0,
            has_fill: false,
            has_stroke: false,
            visible: true,
        }
    }

    /// Applies one `name="value"` attribute's effect onto this frame.
    /// Unrecognized names are silently ignored, per `spec.md` §4.2/§7.
    fn apply(&mut self, name: &str, value: &str) {
        match name {
            "style" => self.apply_style(value),
            "display" => self.visible = value.trim() != "none",
            "fill" => {
                if value.trim() == "none" {
                    self.has_fill = false;
                } else {
                    self.has_fill = true;
                    self.fill_color = parse_color(value);
                }
            }
            "fill-opacity" => {
                if let Some(v) = parse_opacity(value) {
                    self.fill_opacity = v;
                }
            }
            "stroke" => {
                if value.trim() == "none" {
                    self.has_stroke = false;
                } else {
                    self.has_stroke = true;
                    self.stroke_color = parse_color(value);
                }
            }
            "stroke-width" => {
                if let Ok(v) = value.trim().parse::<f64>() {
                    self.stroke_width = v;
                }
            }
            "stroke-opacity" => {
                if let Some(v) = parse_opacity(value) {
                    self.stroke_opacity = v;
                }
            }
            "opacity" => {
                // Not in nanosvg; a supplement grounded in resvg's
                // converter, which folds a plain `opacity` into the
                // element's effective paint opacity (see SPEC_FULL.md).
                if let Some(v) = parse_opacity(value) {
                    self.fill_opacity *= v;
                    self.stroke_opacity *= v;
                }
            }
            "transform" => {
                let token = parse_transform_list(value);
                self.transform.premultiply(&token);
            }
            _ => {}
        }
    }

    /// Splits a `style="a:b;c:d"` attribute value on `;` then `:` and
    /// recurses through [`AttrFrame::apply`] for each pair.
    fn apply_style(&mut self, style: &str) {
        for decl in style.split(';') {
            let decl = decl.trim();
            if decl.is_empty() {
                continue;
            }
            if let Some((name, value)) = decl.split_once(':') {
                self.apply(name.trim(), value.trim());
            }
        }
    }

    fn apply_attrs(&mut self, attrs: &Attributes) {
        for a in attrs.clone() {
            self.apply(a.name, a.value);
        }
    }
}

fn parse_opacity(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().map(|v| v.clamp(0.0, 1.0))
}

struct AttrStack {
    frames: Vec<AttrFrame>,
}

impl AttrStack {
    fn new() -> Self {
        AttrStack { frames: vec![AttrFrame::root()] }
    }

    fn top(&self) -> &AttrFrame {
        self.frames.last().expect("attribute stack is never empty")
    }

    /// Pushes a copy of the top frame. Silently clamped at
    /// [`MAX_ATTR_DEPTH`] rather than growing unbounded or panicking.
    fn push(&mut self) {
        if self.frames.len() < MAX_ATTR_DEPTH {
            let top = self.top().clone();
            self.frames.push(top);
        } else {
            log::warn!("transform/attribute stack depth capped at {}", MAX_ATTR_DEPTH);
        }
    }

    fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }
}

/// Parses an SVG document's text into an [`Image`].
///
/// Malformed markup never aborts the whole document: the tokenizer simply
/// stops producing events at the point markup becomes unparseable, and
/// whatever was built up to then is returned (`spec.md` §7's
/// "parse-abandoned" contract — this function has no error return of its
/// own for that case, only [`Error::NotAnUtf8Str`] for the byte-decoding
/// front door in [`crate::parse_bytes`]).
pub fn parse_str(text: &str) -> Image {
    let mut image = Image::new();
    let mut stack = AttrStack::new();
    // A single boolean, not a nesting counter: nanosvg doesn't track
    // `<defs>` nesting either (`spec.md` §4.2 calls this out explicitly
    // as out of scope), so a nested `</defs>` clears the flag early just
    // like the source it's ported from.
    let mut in_defs = false;
    let mut current_paths: Vec<Path> = Vec::new();

    let mut tok = Tokenizer::from_str(text);
    while let Some(event) = tok.next() {
        match event {
            Event::StartElement { name, attributes } => {
                if in_defs {
                    continue;
                }

                match name {
                    "svg" => parse_svg_root(&mut image, &attributes),
                    "defs" => in_defs = true,
                    "g" => {
                        stack.push();
                        stack.frames.last_mut().unwrap().apply_attrs(&attributes);
                    }
                    "path" => {
                        stack.push();
                        stack.frames.last_mut().unwrap().apply_attrs(&attributes);
                        if let Some(d) = attributes.get("d") {
                            current_paths = parse_path_data(d);
                        } else {
                            current_paths.clear();
                        }
                        commit_current_shape(&mut image, &stack, &mut current_paths);
                        stack.pop();
                    }
                    "rect" | "circle" | "ellipse" | "line" | "polyline" | "polygon" => {
                        stack.push();
                        stack.frames.last_mut().unwrap().apply_attrs(&attributes);
                        current_paths.clear();
                        if let Some(path) = build_primitive_path(name, &attributes) {
                            current_paths.push(path);
                        }
                        commit_current_shape(&mut image, &stack, &mut current_paths);
                        stack.pop();
                    }
                    _ => {}
                }
            }
            Event::EndElement { name } => {
                if in_defs {
                    if name == "defs" {
                        in_defs = false;
                    }
                    continue;
                }
                if name == "g" {
                    stack.pop();
                }
                // "path"/"rect"/etc. already popped their frame at the end
                // of their StartElement handling above (they have no
                // children that could depend on the pushed frame).
            }
            Event::Content(_) => {}
        }
    }

    image
}

fn commit_current_shape(image: &mut Image, stack: &AttrStack, paths: &mut Vec<Path>) {
    if paths.is_empty() {
        return;
    }
    let frame = stack.top();
    if !frame.visible {
        paths.clear();
        return;
    }

    let scale_hint = frame.transform.scale_hint();
    let mut owned = std::mem::take(paths);
    for path in &mut owned {
        path.transform(&frame.transform);
    }

    commit_shape(
        image,
        frame.fill_color,
        frame.has_fill,
        frame.fill_opacity,
        frame.stroke_color,
        frame.has_stroke,
        frame.stroke_width * scale_hint,
        frame.stroke_opacity,
        owned,
    );
}

fn build_primitive_path(name: &str, attrs: &Attributes) -> Option<Path> {
    match name {
        "rect" => shapes::rect_path(attrs),
        "circle" => shapes::circle_path(attrs),
        "ellipse" => shapes::ellipse_path(attrs),
        "line" => shapes::line_path(attrs),
        "polyline" => shapes::poly_path(attrs.get("points").unwrap_or(""), false),
        "polygon" => shapes::poly_path(attrs.get("points").unwrap_or(""), true),
        _ => None,
    }
}

fn parse_svg_root(image: &mut Image, attrs: &Attributes) {
    if let Some(v) = attrs.get("width") {
        let (value, unit) = parse_length(v);
        image.set_width(value, unit);
    }
    if let Some(v) = attrs.get("height") {
        let (value, unit) = parse_length(v);
        image.set_height(value, unit);
    }
    if let Some(v) = attrs.get("viewBox") {
        if let Some(vb) = parse_view_box(v) {
            image.set_view_box(vb);
        }
    }
}

/// Parses a `"<float><unit-suffix>"` pair, e.g. `"100px"`, `"8.5in"`,
/// `"50%"`. The unit suffix is opaque to this crate beyond the handful
/// [`crate::units::resolve_pixel_size`] understands.
fn parse_length(s: &str) -> (f64, &str) {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mark = i;
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        } else {
            i = mark;
        }
    }
    let value = s[..i].parse::<f64>().unwrap_or(-1.0);
    (value, s[i..].trim())
}

fn parse_view_box(s: &str) -> Option<ViewBox> {
    let mut scanner = NumberScanner::new(s);
    let min_x = scanner.next_number()?;
    let min_y = scanner.next_number()?;
    let width = scanner.next_number()?;
    let height = scanner.next_number()?;
    Some(ViewBox { min_x, min_y, width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_svg_has_dimensions_and_no_shapes() {
        let img = parse_str(r#"<svg width="10" height="20"/>"#);
        assert_eq!(img.width(), 10.0);
        assert_eq!(img.height(), 20.0);
        assert!(img.shapes().is_empty());
    }

    #[test]
    fn rect_with_fill_commits_one_shape() {
        let img = parse_str(r#"<svg width="2" height="2"><rect x="0" y="0" width="2" height="2" fill="#ff0000"/></svg>"#);
        assert_eq!(img.shapes().len(), 1);
        let shape = &img.shapes()[0];
        assert!(shape.has_fill());
        assert_eq!(shape.fill_rgba(), [255, 0, 0, 255]);
    }

    #[test]
    fn display_none_drops_the_shape() {
        let img = parse_str(r#"<svg width="2" height="2"><rect x="0" y="0" width="2" height="2" display="none"/></svg>"#);
        assert!(img.shapes().is_empty());
    }

    #[test]
    fn defs_contents_are_skipped() {
        let img = parse_str(
            r#"<svg width="2" height="2"><defs><rect x="0" y="0" width="2" height="2" fill="red"/></defs></svg>"#,
        );
        assert!(img.shapes().is_empty());
    }

    #[test]
    fn transform_prequel_scenario() {
        // <g transform="translate(10,0) scale(2)"><rect x=0 y=0 w=1 h=1/></g>
        let img = parse_str(
            r#"<svg width="10" height="10"><g transform="translate(10,0) scale(2)"><rect x="0" y="0" width="1" height="1"/></g></svg>"#,
        );
        let shape = &img.shapes()[0];
        let path = &shape.paths()[0];
        assert_eq!(path.first_point(), svg_tree::Point::new(10.0, 0.0));
        // Opposite corner of the unit square, after scale(2) in child
        // space then translate(10,0) in parent space.
        let last = path
            .points()
            .iter()
            .fold((f64::MIN, f64::MIN), |acc, p| (acc.0.max(p.x), acc.1.max(p.y)));
        assert_eq!(last, (12.0, 2.0));
    }

    #[test]
    fn group_fill_inherits_to_children() {
        let img = parse_str(
            r#"<svg width="2" height="2"><g fill="#00ff00"><rect x="0" y="0" width="1" height="1"/></g></svg>"#,
        );
        assert_eq!(img.shapes()[0].fill_rgba(), [0, 255, 0, 255]);
    }

    #[test]
    fn style_attribute_splits_on_semicolon_and_colon() {
        let img = parse_str(
            r#"<svg width="2" height="2"><rect x="0" y="0" width="1" height="1" style="fill:#0000ff; fill-opacity: 0.5"/></svg>"#,
        );
        let shape = &img.shapes()[0];
        assert_eq!(shape.fill_rgba(), [0, 0, 255, 128]);
    }

    #[test]
    fn view_box_is_recorded() {
        let img = parse_str(r#"<svg width="100" height="50" viewBox="0 0 200 100"/>"#);
        let vb = img.view_box().unwrap();
        assert_eq!((vb.min_x, vb.min_y, vb.width, vb.height), (0.0, 0.0, 200.0, 100.0));
    }
}

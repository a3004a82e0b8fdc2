// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svg_tree::{Path, Point};
use xml_scan::Attributes;

use crate::numbers::NumberScanner;

/// Cubic Bézier handle length (as a fraction of radius) that best
/// approximates a 90-degree circular arc.
const KAPPA90: f64 = 0.5522847493;

fn attr_f64(attrs: &Attributes, name: &str, default: f64) -> f64 {
    attrs.get(name).and_then(|v| v.trim().parse::<f64>().ok()).unwrap_or(default)
}

/// Builds the single closed path for a `<rect>`. Returns `None` if the
/// rect has zero width or height (nothing to draw — matches nanosvg,
/// which only emits a shape when both are non-zero).
pub fn rect_path(attrs: &Attributes) -> Option<Path> {
    let x = attr_f64(attrs, "x", 0.0);
    let y = attr_f64(attrs, "y", 0.0);
    let w = attr_f64(attrs, "width", 0.0);
    let h = attr_f64(attrs, "height", 0.0);
    if w == 0.0 || h == 0.0 {
        return None;
    }

    let mut rx = attrs.get("rx").and_then(|v| v.trim().parse::<f64>().ok()).map(f64::abs);
    let mut ry = attrs.get("ry").and_then(|v| v.trim().parse::<f64>().ok()).map(f64::abs);
    // Missing radius on one axis defaults to the other axis's value.
    if rx.is_none() {
        rx = ry;
    }
    if ry.is_none() {
        ry = rx;
    }
    let mut rx = rx.unwrap_or(0.0);
    let mut ry = ry.unwrap_or(0.0);
    rx = rx.min(w / 2.0);
    ry = ry.min(h / 2.0);

    let mut path = Path::new(Point::new(x, y));
    if rx < 1e-5 || ry < 1e-5 {
        path.line_to(Point::new(x + w, y));
        path.line_to(Point::new(x + w, y + h));
        path.line_to(Point::new(x, y + h));
    } else {
        path = Path::new(Point::new(x + rx, y));
        path.line_to(Point::new(x + w - rx, y));
        path.cubic_to(
            Point::new(x + w - rx * (1.0 - KAPPA90), y),
            Point::new(x + w, y + ry * (1.0 - KAPPA90)),
            Point::new(x + w, y + ry),
        );
        path.line_to(Point::new(x + w, y + h - ry));
        path.cubic_to(
            Point::new(x + w, y + h - ry * (1.0 - KAPPA90)),
            Point::new(x + w - rx * (1.0 - KAPPA90), y + h),
            Point::new(x + w - rx, y + h),
        );
        path.line_to(Point::new(x + rx, y + h));
        path.cubic_to(
            Point::new(x + rx * (1.0 - KAPPA90), y + h),
            Point::new(x, y + h - ry * (1.0 - KAPPA90)),
            Point::new(x, y + h - ry),
        );
        path.line_to(Point::new(x, y + ry));
        path.cubic_to(
            Point::new(x, y + ry * (1.0 - KAPPA90)),
            Point::new(x + rx * (1.0 - KAPPA90), y),
            Point::new(x + rx, y),
        );
    }
    path.close();
    Some(path)
}

/// Builds the four-quadrant path for a `<circle>`. `None` if the radius
/// is zero or negative.
pub fn circle_path(attrs: &Attributes) -> Option<Path> {
    let cx = attr_f64(attrs, "cx", 0.0);
    let cy = attr_f64(attrs, "cy", 0.0);
    let r = attr_f64(attrs, "r", 0.0).abs();
    if r <= 0.0 {
        return None;
    }
    Some(ellipse_quadrants(cx, cy, r, r))
}

/// Builds the four-quadrant path for an `<ellipse>`. `None` if either
/// radius is zero or negative.
pub fn ellipse_path(attrs: &Attributes) -> Option<Path> {
    let cx = attr_f64(attrs, "cx", 0.0);
    let cy = attr_f64(attrs, "cy", 0.0);
    let rx = attr_f64(attrs, "rx", 0.0).abs();
    let ry = attr_f64(attrs, "ry", 0.0).abs();
    if rx <= 0.0 || ry <= 0.0 {
        return None;
    }
    Some(ellipse_quadrants(cx, cy, rx, ry))
}

fn ellipse_quadrants(cx: f64, cy: f64, rx: f64, ry: f64) -> Path {
    let mut path = Path::new(Point::new(cx + rx, cy));
    path.cubic_to(
        Point::new(cx + rx, cy + ry * KAPPA90),
        Point::new(cx + rx * KAPPA90, cy + ry),
        Point::new(cx, cy + ry),
    );
    path.cubic_to(
        Point::new(cx - rx * KAPPA90, cy + ry),
        Point::new(cx - rx, cy + ry * KAPPA90),
        Point::new(cx - rx, cy),
    );
    path.cubic_to(
        Point::new(cx - rx, cy - ry * KAPPA90),
        Point::new(cx - rx * KAPPA90, cy - ry),
        Point::new(cx, cy - ry),
    );
    path.cubic_to(
        Point::new(cx + rx * KAPPA90, cy - ry),
        Point::new(cx + rx, cy - ry * KAPPA90),
        Point::new(cx + rx, cy),
    );
    path.close();
    path
}

/// Builds the single degenerate-cubic segment for a `<line>`. Always
/// returns `Some`: a zero-length line is still a valid (if invisible)
/// path.
pub fn line_path(attrs: &Attributes) -> Option<Path> {
    let x1 = attr_f64(attrs, "x1", 0.0);
    let y1 = attr_f64(attrs, "y1", 0.0);
    let x2 = attr_f64(attrs, "x2", 0.0);
    let y2 = attr_f64(attrs, "y2", 0.0);
    let mut path = Path::new(Point::new(x1, y1));
    path.line_to(Point::new(x2, y2));
    Some(path)
}

/// Tokenizes a `points="x,y x,y ..."` list into move-to-then-line-to's.
/// `closed` marks the path `Z`-closed for `<polygon>` and left open for
/// `<polyline>`, matching the SVG fill rule either way (both are closed
/// implicitly under non-zero winding, but the `closed` flag is still
/// recorded for callers that distinguish them).
pub fn poly_path(points: &str, closed: bool) -> Option<Path> {
    let mut scanner = NumberScanner::new(points);
    let mut path: Option<Path> = None;
    loop {
        let Some(x) = scanner.next_number() else { break };
        let Some(y) = scanner.next_number() else { break };
        match &mut path {
            None => path = Some(Path::new(Point::new(x, y))),
            Some(p) => p.line_to(Point::new(x, y)),
        }
    }
    let mut path = path?;
    if closed {
        path.close();
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xml_scan::Tokenizer;

    fn attrs_of(tag: &str) -> Attributes<'_> {
        let mut t = Tokenizer::from_str(tag);
        match t.next() {
            Some(xml_scan::Event::StartElement { attributes, .. }) => attributes,
            _ => panic!("expected a start element"),
        }
    }

    #[test]
    fn square_rect_is_four_line_segments() {
        let a = attrs_of(r#"<rect x="0" y="0" width="2" height="2"/>"#);
        let path = rect_path(&a).unwrap();
        assert_eq!(path.segment_count(), 4);
        assert!(path.is_closed());
        assert_eq!(path.first_point(), Point::new(0.0, 0.0));
    }

    #[test]
    fn rx_defaults_from_ry_and_clamps_to_half_extent() {
        let a = attrs_of(r#"<rect x="0" y="0" width="10" height="4" ry="100"/>"#);
        let path = rect_path(&a).unwrap();
        // ry clamps to height/2 = 2, and rx (unset) defaults to ry = 2,
        // then clamps to width/2 = 5 (no-op since 2 < 5).
        assert_eq!(path.first_point(), Point::new(2.0, 0.0));
    }

    #[test]
    fn zero_size_rect_is_skipped() {
        let a = attrs_of(r#"<rect x="0" y="0" width="0" height="4"/>"#);
        assert!(rect_path(&a).is_none());
    }

    #[test]
    fn circle_has_four_quadrants() {
        let a = attrs_of(r#"<circle cx="5" cy="5" r="5"/>"#);
        let path = circle_path(&a).unwrap();
        assert_eq!(path.segment_count(), 4);
        assert_eq!(path.first_point(), Point::new(10.0, 5.0));
    }

    #[test]
    fn polygon_closes_polyline_does_not() {
        let open = poly_path("0,0 10,0 10,10", false).unwrap();
        let closed = poly_path("0,0 10,0 10,10", true).unwrap();
        assert!(!open.is_closed());
        assert!(closed.is_closed());
        assert_eq!(open.segment_count(), 2);
    }
}

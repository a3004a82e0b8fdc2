// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! End-to-end scenarios taken literally from the project's testable-
//! properties list: quadratic promotion, arc degeneracy, transform
//! pre-multiplication, and determinism across repeated rasterize calls.

use once_cell::sync::Lazy;
use svgraster::{FitTo, Options, Rasterizer};

// Shared across the `render_file` tests below, the same way the teacher's
// own integration suite keeps one `Lazy<Options>` fixture rather than
// rebuilding it per test (`tests/render.rs::GLOBAL_OPT`).
static OPTIONS: Lazy<Options> =
    Lazy::new(|| Options { pixels_per_inch: 96.0, fit_to: FitTo::Width(20) });

fn rasterize(svg: &str, w: u32, h: u32) -> Vec<u8> {
    let image = svg_parser::parse_str(svg);
    let mut r = Rasterizer::new();
    let stride = w * 4;
    let mut dst = vec![0u8; (stride * h) as usize];
    r.rasterize(&image, 0.0, 0.0, 1.0, &mut dst, w, h, stride);
    dst
}

#[test]
fn quadratic_and_equivalent_cubic_rasterize_identically() {
    let q = rasterize(
        r#"<svg width="12" height="12"><path d="M0 0 Q 10 0 10 10 L0 10 Z" fill="black"/></svg>"#,
        12,
        12,
    );
    let c = rasterize(
        r#"<svg width="12" height="12"><path d="M0 0 C 6.666666666666667 0 10 3.3333333333333335 10 10 L0 10 Z" fill="black"/></svg>"#,
        12,
        12,
    );
    assert_eq!(q, c);
}

#[test]
fn arc_degeneracy_matches_a_straight_line() {
    let arc = rasterize(
        r#"<svg width="30" height="30"><path d="M10 10 A 0 0 0 0 0 20 20 L10 20 Z" fill="black"/></svg>"#,
        30,
        30,
    );
    let line = rasterize(
        r#"<svg width="30" height="30"><path d="M10 10 L 20 20 L10 20 Z" fill="black"/></svg>"#,
        30,
        30,
    );
    assert_eq!(arc, line);
}

#[test]
fn transform_prequel_rasterizes_where_expected() {
    // <g transform="translate(10,0) scale(2)"><rect x=0 y=0 w=1 h=1/></g>
    // produces a 2x2 device-pixel square at image-space (10,0)-(12,2).
    let dst = rasterize(
        r#"<svg width="16" height="4"><g transform="translate(10,0) scale(2)"><rect x="0" y="0" width="1" height="1" fill="black"/></g></svg>"#,
        16,
        4,
    );
    let alpha_at = |x: u32, y: u32| -> u8 {
        let i = ((y * 16 + x) * 4 + 3) as usize;
        dst[i]
    };
    assert_eq!(alpha_at(10, 0), 255);
    assert_eq!(alpha_at(11, 1), 255);
    assert_eq!(alpha_at(13, 0), 0);
}

#[test]
fn rasterizing_twice_is_deterministic() {
    let svg = r#"<svg width="8" height="8"><circle cx="4" cy="4" r="3" fill="#336699"/></svg>"#;
    let a = rasterize(svg, 8, 8);
    let b = rasterize(svg, 8, 8);
    assert_eq!(a, b);
}

#[test]
fn render_file_resolves_fit_to_width_from_shared_options() {
    let path = std::env::temp_dir().join("svgraster_render_file_scenario.svg");
    std::fs::write(&path, r#"<svg width="10" height="5"><rect width="10" height="5" fill="blue"/></svg>"#).unwrap();

    let (buf, w, h) = svgraster::render_file(path.to_str().unwrap(), &OPTIONS).unwrap();
    assert_eq!((w, h), (20, 10));
    assert_eq!(buf.len(), (w * h * 4) as usize);
    assert_eq!(&buf[0..4], &[0, 0, 255, 255]);

    std::fs::remove_file(&path).ok();
}

#[test]
fn polygon_and_equivalent_path_rasterize_identically() {
    let polygon = rasterize(
        r#"<svg width="10" height="10"><polygon points="1,1 8,1 8,8 1,8" fill="green"/></svg>"#,
        10,
        10,
    );
    let path = rasterize(
        r#"<svg width="10" height="10"><path d="M1 1 L8 1 L8 8 L1 8 Z" fill="green"/></svg>"#,
        10,
        10,
    );
    assert_eq!(polygon, path);
}

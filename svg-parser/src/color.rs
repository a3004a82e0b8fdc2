// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svg_tree::Color;

const BASE_COLORS: &[(&str, u8, u8, u8)] = &[
    ("red", 255, 0, 0),
    ("green", 0, 128, 0),
    ("blue", 0, 0, 255),
    ("yellow", 255, 255, 0),
    ("cyan", 0, 255, 255),
    ("magenta", 255, 0, 255),
    ("black", 0, 0, 0),
    ("grey", 128, 128, 128),
    ("gray", 128, 128, 128),
    ("white", 255, 255, 255),
];

#[cfg(feature = "extended-colors")]
const EXTENDED_COLORS: &[(&str, u8, u8, u8)] = &include!("extended_colors.in");

/// Parses an SVG color value: `#rrggbb`, `#rgb`, `rgb(...)`, or a named
/// keyword. Unknown tokens yield opaque black, matching nanosvg's
/// fall-through-to-zero behavior rather than surfacing a parse error.
pub fn parse_color(input: &str) -> Color {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if s.len() >= 4 && s.as_bytes()[..3].eq_ignore_ascii_case(b"rgb") && s.as_bytes()[3] == b'(' {
        return parse_rgb_fn(s);
    }
    parse_name(s)
}

fn parse_hex(hex: &str) -> Color {
    let hex: String = hex.chars().take_while(|c| !c.is_ascii_whitespace()).collect();
    match hex.len() {
        6 => {
            let v = u32::from_str_radix(&hex, 16).unwrap_or(0);
            Color::new_rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
        }
        3 => {
            let v = u32::from_str_radix(&hex, 16).unwrap_or(0);
            let r = ((v >> 8) & 0xf) as u8;
            let g = ((v >> 4) & 0xf) as u8;
            let b = (v & 0xf) as u8;
            Color::new_rgb(r | (r << 4), g | (g << 4), b | (b << 4))
        }
        _ => Color::black(),
    }
}

/// Parses `rgb(r,g,b)` with integer or percent components.
///
/// Percent-or-not is ambiguous if components mix styles; nanosvg detects
/// it from the separator after the *first* component only and applies
/// that choice uniformly to all three, so this does the same.
fn parse_rgb_fn(s: &str) -> Color {
    let inner = match s.find('(').and_then(|open| s.find(')').map(|close| (open, close))) {
        Some((open, close)) if close > open => &s[open + 1..close],
        _ => return Color::black(),
    };

    let mut components = Vec::with_capacity(3);
    let mut is_percent = false;
    for (i, raw) in inner.split(',').enumerate() {
        let raw = raw.trim();
        if i == 0 {
            is_percent = raw.ends_with('%');
        }
        let num_str = raw.trim_end_matches('%').trim();
        let n: f64 = num_str.parse().unwrap_or(0.0);
        components.push(n);
    }
    if components.len() != 3 {
        return Color::black();
    }

    let to_byte = |n: f64| -> u8 {
        let v = if is_percent { n * 255.0 / 100.0 } else { n };
        v.round().clamp(0.0, 255.0) as u8
    };
    Color::new_rgb(to_byte(components[0]), to_byte(components[1]), to_byte(components[2]))
}

fn parse_name(name: &str) -> Color {
    for (n, r, g, b) in BASE_COLORS {
        if *n == name {
            return Color::new_rgb(*r, *g, *b);
        }
    }
    #[cfg(feature = "extended-colors")]
    for (n, r, g, b) in EXTENDED_COLORS {
        if *n == name {
            return Color::new_rgb(*r, *g, *b);
        }
    }
    Color::black()
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svg_tree::Transform;

use crate::numbers::NumberScanner;

/// Parses an SVG `transform` attribute value into a single accumulated
/// [`Transform`].
///
/// The list is a space-separated sequence of `name(args...)` tokens
/// (`matrix`, `translate`, `scale`, `rotate`, `skewX`, `skewY`); each token
/// is pre-multiplied onto the running transform in order, so a token later
/// in the list ends up applied to a point *before* one earlier in the list
/// (see [`Transform::premultiply`]). An unrecognized token name stops the
/// parse at that point rather than guessing; everything successfully
/// parsed before it is still returned.
pub fn parse_transform_list(input: &str) -> Transform {
    let mut ts = Transform::default();
    let bytes = input.as_bytes();
    let mut pos = 0;

    loop {
        skip_separators(bytes, &mut pos);
        if pos >= bytes.len() {
            break;
        }

        let name_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        let name = &input[name_start..pos];
        if name.is_empty() {
            break;
        }

        skip_separators(bytes, &mut pos);
        if pos >= bytes.len() || bytes[pos] != b'(' {
            break;
        }
        let args_start = pos + 1;
        let Some(close_off) = input[args_start..].find(')') else {
            break;
        };
        let args_str = &input[args_start..args_start + close_off];
        pos = args_start + close_off + 1;

        let mut scanner = NumberScanner::new(args_str);
        let mut args = Vec::with_capacity(6);
        while let Some(n) = scanner.next_number() {
            args.push(n);
        }

        let token = match build_token(name, &args) {
            Some(t) => t,
            None => break,
        };
        ts.premultiply(&token);
    }

    ts
}

fn build_token(name: &str, args: &[f64]) -> Option<Transform> {
    match name {
        "matrix" if args.len() == 6 => {
            Some(Transform::new(args[0], args[1], args[2], args[3], args[4], args[5]))
        }
        "translate" if args.len() == 1 => Some(Transform::new_translate(args[0], 0.0)),
        "translate" if args.len() == 2 => Some(Transform::new_translate(args[0], args[1])),
        "scale" if args.len() == 1 => Some(Transform::new_scale(args[0], args[0])),
        "scale" if args.len() == 2 => Some(Transform::new_scale(args[0], args[1])),
        "rotate" if args.len() == 1 => Some(Transform::new_rotate(args[0])),
        "rotate" if args.len() == 3 => {
            // Equivalent to the token list
            // "translate(cx,cy) rotate(a) translate(-cx,-cy)", folded into
            // one token via the same premultiply rule used for the outer
            // list (so the center is subtracted before rotating, and
            // added back after).
            let (cx, cy) = (args[1], args[2]);
            let mut t = Transform::default();
            t.premultiply(&Transform::new_translate(cx, cy));
            t.premultiply(&Transform::new_rotate(args[0]));
            t.premultiply(&Transform::new_translate(-cx, -cy));
            Some(t)
        }
        "skewX" if args.len() == 1 => Some(Transform::new_skew_x(args[0])),
        "skewY" if args.len() == 1 => Some(Transform::new_skew_y(args[0])),
        _ => None,
    }
}

fn skip_separators(bytes: &[u8], pos: &mut usize) {
    while *pos < bytes.len() {
        let b = bytes[*pos];
        if b == b' ' || b == b'\t' || b == b'\r' || b == b'\n' || b == b',' {
            *pos += 1;
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_then_scale_premultiplies_in_list_order() {
        let t = parse_transform_list("translate(10,0) scale(2)");
        assert_eq!(t.apply(0.0, 0.0), (10.0, 0.0));
        assert_eq!(t.apply(1.0, 1.0), (12.0, 2.0));
    }

    #[test]
    fn rotate_around_point_decomposes_into_three_premultiplies() {
        // rotate(90, 10, 10) should map (10, 0) -> roughly (20, 10).
        let t = parse_transform_list("rotate(90, 10, 10)");
        let (x, y) = t.apply(10.0, 0.0);
        assert!((x - 20.0).abs() < 1e-9, "x={x}");
        assert!((y - 10.0).abs() < 1e-9, "y={y}");
    }

    #[test]
    fn matrix_token() {
        let t = parse_transform_list("matrix(1,0,0,1,5,6)");
        assert_eq!(t.apply(0.0, 0.0), (5.0, 6.0));
    }

    #[test]
    fn unrecognized_token_stops_but_keeps_prior_tokens() {
        let t = parse_transform_list("translate(1,2) bogus(3)");
        assert_eq!(t.apply(0.0, 0.0), (1.0, 2.0));
    }
}

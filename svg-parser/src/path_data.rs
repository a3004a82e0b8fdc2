// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svg_tree::{Path, Point};

use crate::numbers::NumberScanner;

/// The last cubic-control kind seen, used to decide whether `S`/`T` may
/// reflect a prior control point or must fall back to the current pen.
#[derive(Clone, Copy, PartialEq)]
enum LastControl {
    None,
    Cubic(Point),
    Quadratic(Point),
}

struct Builder {
    paths: Vec<Path>,
    current: Option<Path>,
    pen: Point,
    /// Pen position at the start of the current subpath; `M`/`m` and `Z`/`z`
    /// reset the pen here, and an implicit Z-then-draw cycle starts again
    /// from this anchor.
    subpath_start: Point,
    last_control: LastControl,
}

impl Builder {
    fn new() -> Self {
        Builder {
            paths: Vec::new(),
            current: None,
            pen: Point::new(0.0, 0.0),
            subpath_start: Point::new(0.0, 0.0),
            last_control: LastControl::None,
        }
    }

    fn commit_current(&mut self, closed: bool) {
        if let Some(mut path) = self.current.take() {
            if closed {
                path.close();
            }
            if path.npts() > 1 || closed {
                self.paths.push(path);
            }
        }
    }

    fn move_to(&mut self, p: Point) {
        self.commit_current(false);
        self.current = Some(Path::new(p));
        self.pen = p;
        self.subpath_start = p;
        self.last_control = LastControl::None;
    }

    fn ensure_current(&mut self) -> &mut Path {
        if self.current.is_none() {
            self.current = Some(Path::new(self.pen));
        }
        self.current.as_mut().unwrap()
    }

    fn line_to(&mut self, p: Point) {
        self.ensure_current().line_to(p);
        self.pen = p;
        self.last_control = LastControl::None;
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.ensure_current().cubic_to(c1, c2, end);
        self.pen = end;
        self.last_control = LastControl::Cubic(c2);
    }

    fn quadratic_to(&mut self, ctrl: Point, end: Point) {
        // Promote to cubic: P1 + 2/3*(Q - P1), P2 + 2/3*(Q - P2).
        let p1 = self.pen;
        let c1 = Point::new(p1.x + 2.0 / 3.0 * (ctrl.x - p1.x), p1.y + 2.0 / 3.0 * (ctrl.y - p1.y));
        let c2 = Point::new(end.x + 2.0 / 3.0 * (ctrl.x - end.x), end.y + 2.0 / 3.0 * (ctrl.y - end.y));
        self.ensure_current().cubic_to(c1, c2, end);
        self.pen = end;
        self.last_control = LastControl::Quadratic(ctrl);
    }

    fn close(&mut self) {
        self.commit_current(true);
        self.pen = self.subpath_start;
        self.last_control = LastControl::None;
    }

    fn reflected_cubic_control(&self) -> Point {
        match self.last_control {
            LastControl::Cubic(c2) => Point::new(2.0 * self.pen.x - c2.x, 2.0 * self.pen.y - c2.y),
            _ => self.pen,
        }
    }

    fn reflected_quad_control(&self) -> Point {
        match self.last_control {
            LastControl::Quadratic(q) => Point::new(2.0 * self.pen.x - q.x, 2.0 * self.pen.y - q.y),
            _ => self.pen,
        }
    }

    fn finish(mut self) -> Vec<Path> {
        self.commit_current(false);
        self.paths
    }
}

/// Parses the SVG path mini-language (`d` attribute) into a list of
/// [`Path`]s, in the pen's own coordinate space (the caller transforms
/// them afterward).
///
/// Per `spec` §4.2/§9: the `M`/`m` command's own coordinate pair sets the
/// pen absolutely (or relatively) without drawing; any *subsequent*
/// coordinate pairs that follow it before the next command letter are
/// implicit line-to's. Unrecognized command letters abandon the rest of
/// the string, matching the permissive "parse what we can" contract —
/// whatever subpaths were already committed are kept.
pub fn parse_path_data(d: &str) -> Vec<Path> {
    let mut b = Builder::new();
    let mut scanner = NumberScanner::new(d);
    // The active command letter for implicit repeats: a coordinate pair
    // with no new command letter in front of it repeats the last command
    // — except after `M`/`m`, where repeats are implicit line-to's rather
    // than further move-to's (`spec` §4.2/§9).
    let mut active: Option<u8> = None;
    let mut m_repeats_as_line = false;

    loop {
        if scanner.is_exhausted() {
            break;
        }
        if let Some(c) = scanner.peek_command() {
            scanner.next_command();
            active = Some(c);
            m_repeats_as_line = false;
        } else if active.is_none() {
            break;
        }
        let Some(c) = active else { break };
        let relative = c.is_ascii_lowercase();
        let dispatch = if (c == b'M' || c == b'm') && m_repeats_as_line {
            b'L'
        } else {
            c.to_ascii_uppercase()
        };

        match dispatch {
            b'M' => {
                let Some((x, y)) = take2(&mut scanner) else { break };
                let p = rel_point(b.pen, x, y, relative);
                b.move_to(p);
                m_repeats_as_line = true;
            }
            b'L' => {
                let Some((x, y)) = take2(&mut scanner) else { break };
                let p = rel_point(b.pen, x, y, relative);
                b.line_to(p);
            }
            b'H' => {
                let Some(x) = scanner.next_number() else { break };
                let x = if relative { b.pen.x + x } else { x };
                let p = Point::new(x, b.pen.y);
                b.line_to(p);
            }
            b'V' => {
                let Some(y) = scanner.next_number() else { break };
                let y = if relative { b.pen.y + y } else { y };
                let p = Point::new(b.pen.x, y);
                b.line_to(p);
            }
            b'C' => {
                let Some(args) = take6(&mut scanner) else { break };
                let c1 = rel_point(b.pen, args[0], args[1], relative);
                let c2 = rel_point(b.pen, args[2], args[3], relative);
                let end = rel_point(b.pen, args[4], args[5], relative);
                b.cubic_to(c1, c2, end);
            }
            b'S' => {
                let Some(args) = take4(&mut scanner) else { break };
                let c1 = b.reflected_cubic_control();
                let c2 = rel_point(b.pen, args[0], args[1], relative);
                let end = rel_point(b.pen, args[2], args[3], relative);
                b.cubic_to(c1, c2, end);
            }
            b'Q' => {
                let Some(args) = take4(&mut scanner) else { break };
                let ctrl = rel_point(b.pen, args[0], args[1], relative);
                let end = rel_point(b.pen, args[2], args[3], relative);
                b.quadratic_to(ctrl, end);
            }
            b'T' => {
                let Some((x, y)) = take2(&mut scanner) else { break };
                let ctrl = b.reflected_quad_control();
                let end = rel_point(b.pen, x, y, relative);
                b.quadratic_to(ctrl, end);
            }
            b'A' => {
                let Some(args) = take7(&mut scanner) else { break };
                let end = rel_point(b.pen, args[5], args[6], relative);
                arc_to(&mut b, args[0], args[1], args[2], args[3] != 0.0, args[4] != 0.0, end);
            }
            b'Z' => {
                b.close();
                active = None;
            }
            _ => {
                log::warn!("path data: unrecognized command '{}', abandoning rest of 'd'", c as char);
                break;
            }
        }
    }

    b.finish()
}

fn rel_point(pen: Point, x: f64, y: f64, relative: bool) -> Point {
    if relative {
        Point::new(pen.x + x, pen.y + y)
    } else {
        Point::new(x, y)
    }
}

fn take2(s: &mut NumberScanner) -> Option<(f64, f64)> {
    let x = s.next_number()?;
    let y = s.next_number()?;
    Some((x, y))
}

fn take4(s: &mut NumberScanner) -> Option<[f64; 4]> {
    Some([s.next_number()?, s.next_number()?, s.next_number()?, s.next_number()?])
}

fn take6(s: &mut NumberScanner) -> Option<[f64; 6]> {
    Some([
        s.next_number()?,
        s.next_number()?,
        s.next_number()?,
        s.next_number()?,
        s.next_number()?,
        s.next_number()?,
    ])
}

fn take7(s: &mut NumberScanner) -> Option<[f64; 7]> {
    Some([
        s.next_number()?,
        s.next_number()?,
        s.next_number()?,
        s.next_number()?,
        s.next_number()?,
        s.next_number()?,
        s.next_number()?,
    ])
}

/// Converts one elliptic-arc command into one or more cubic segments,
/// appended directly to `b`. Implements the SVG 1.1 center-parameterization
/// (endpoint -> center) construction.
fn arc_to(b: &mut Builder, rx: f64, ry: f64, x_rot_deg: f64, large_arc: bool, sweep: bool, end: Point) {
    let (x1, y1) = (b.pen.x, b.pen.y);
    let (x2, y2) = (end.x, end.y);
    let mut rx = rx.abs();
    let mut ry = ry.abs();

    let dx = x1 - x2;
    let dy = y1 - y2;
    let d = (dx * dx + dy * dy).sqrt();
    if d < 1e-6 || rx < 1e-6 || ry < 1e-6 {
        // Degenerate: start==end, or a zero radius. Falls back to a line.
        b.line_to(end);
        return;
    }

    let rotx = x_rot_deg.to_radians();
    let sinrx = rotx.sin();
    let cosrx = rotx.cos();

    // 1) Compute (x1', y1'): the endpoints in the ellipse's own rotated frame.
    let x1p = cosrx * dx / 2.0 + sinrx * dy / 2.0;
    let y1p = -sinrx * dx / 2.0 + cosrx * dy / 2.0;

    // Scale up rx/ry if the radii are too small to reach between the points.
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    // 2) Compute (cx', cy'); sign chosen from `large_arc == sweep`.
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let x1p2 = x1p * x1p;
    let y1p2 = y1p * y1p;
    let mut sa = rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2;
    if sa < 0.0 {
        sa = 0.0;
    }
    let sb = rx2 * y1p2 + ry2 * x1p2;
    let mut s = if sb > 0.0 { (sa / sb).sqrt() } else { 0.0 };
    if large_arc == sweep {
        s = -s;
    }
    let cxp = s * rx * y1p / ry;
    let cyp = s * -ry * x1p / rx;

    // 3) Compute (cx, cy) from (cx', cy').
    let cx = (x1 + x2) / 2.0 + cosrx * cxp - sinrx * cyp;
    let cy = (y1 + y2) / 2.0 + sinrx * cxp + cosrx * cyp;

    // 4) Compute the start angle and the angular extent of the arc.
    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;
    let a1 = vector_angle(1.0, 0.0, ux, uy);
    let mut da = vector_angle(ux, uy, vx, vy);

    if large_arc {
        if da > 0.0 {
            da -= 2.0 * std::f64::consts::PI;
        } else {
            da += 2.0 * std::f64::consts::PI;
        }
    }

    // Approximate the arc using cubic spline segments, splitting into at
    // most 90-degree chunks.
    let t = (cosrx, sinrx, -sinrx, cosrx, cx, cy);
    let ndivs = ((da.abs() / (std::f64::consts::PI * 0.5)) + 0.5) as i32;
    let ndivs = ndivs.max(1);
    let hda = (da / ndivs as f64) / 2.0;
    let mut kappa = (4.0 / 3.0 * (1.0 - hda.cos()) / hda.sin()).abs();
    if da < 0.0 {
        kappa = -kappa;
    }

    let mut prev: Option<(f64, f64, f64, f64)> = None;
    for i in 0..=ndivs {
        let a = a1 + da * (i as f64 / ndivs as f64);
        let dx = a.cos();
        let dy = a.sin();
        let (x, y) = xform_point(dx * rx, dy * ry, t);
        let (tanx, tany) = xform_vec(-dy * rx * kappa, dx * ry * kappa, t);
        if let Some((px, py, ptanx, ptany)) = prev {
            b.cubic_to(
                Point::new(px + ptanx, py + ptany),
                Point::new(x - tanx, y - tany),
                Point::new(x, y),
            );
        }
        prev = Some((x, y, tanx, tany));
    }
}

fn xform_point(x: f64, y: f64, t: (f64, f64, f64, f64, f64, f64)) -> (f64, f64) {
    (t.0 * x + t.2 * y + t.4, t.1 * x + t.3 * y + t.5)
}

fn xform_vec(x: f64, y: f64, t: (f64, f64, f64, f64, f64, f64)) -> (f64, f64) {
    (t.0 * x + t.2 * y, t.1 * x + t.3 * y)
}

fn vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let mag_u = (ux * ux + uy * uy).sqrt();
    let mag_v = (vx * vx + vy * vy).sqrt();
    let mut r = (ux * vx + uy * vy) / (mag_u * mag_v);
    r = r.clamp(-1.0, 1.0);
    let sign = if ux * vy < uy * vx { -1.0 } else { 1.0 };
    sign * r.acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_then_implicit_lines() {
        let paths = parse_path_data("M0 0 10 0 10 10");
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].npts(), 7);
        assert_eq!(paths[0].last_point(), Point::new(10.0, 10.0));
    }

    #[test]
    fn quadratic_promotion_matches_explicit_cubic() {
        let q = parse_path_data("M0 0 Q 10 0 10 10");
        let c = parse_path_data("M0 0 C 6.666666666666667 0 10 3.3333333333333335 10 10");
        assert_eq!(q.len(), 1);
        assert_eq!(c.len(), 1);
        for (a, b) in q[0].points().iter().zip(c[0].points().iter()) {
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn smooth_cubic_reflects_prior_control() {
        let paths = parse_path_data("M0 0 C 10 0 10 10 20 10 S 30 20 40 20");
        assert_eq!(paths.len(), 1);
        // Segment 2's first control point (index 4) must be the reflection
        // of the prior cubic's second control (10,10) about the pen (20,10):
        // (2*20-10, 2*10-10) = (30,10).
        let pts = paths[0].points();
        // points: [anchor, c1,c2,p(seg1), c1',c2',p(seg2)]
        assert_eq!(pts[4], Point::new(30.0, 10.0));
    }

    #[test]
    fn arc_degenerates_to_line_on_zero_radius() {
        let paths = parse_path_data("M10 10 A 0 0 0 0 0 20 20");
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].first_point(), Point::new(10.0, 10.0));
        assert_eq!(paths[0].last_point(), Point::new(20.0, 20.0));
        assert_eq!(paths[0].npts(), 4);
    }

    #[test]
    fn z_closes_and_resets_pen_to_subpath_start() {
        let paths = parse_path_data("M0 0 L10 0 L10 10 Z L5 5");
        assert_eq!(paths.len(), 2);
        assert!(paths[0].is_closed());
        // After Z, pen resets to (0,0); the bare L5,5 starts an implicit
        // subpath from there.
        assert_eq!(paths[1].first_point(), Point::new(0.0, 0.0));
        assert_eq!(paths[1].last_point(), Point::new(5.0, 5.0));
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Un-premultiplies alpha and defringes fully-transparent pixels, in
/// place, over the `w x h` region of `image` addressed by `stride`.
///
/// Ported from `nsvg__unpremultiplyAlpha`, with one correction: the
/// source's defringe loop computes `r`/`g`/`b` neighbour means into local
/// variables but never assigns them back into the pixel — a no-op bug
/// (`spec.md` §9 calls this out explicitly). This reimplementation writes
/// the computed means back.
pub(crate) fn unpremultiply_and_defringe(image: &mut [u8], w: usize, h: usize, stride: usize) {
    unpremultiply(image, w, h, stride);
    defringe(image, w, h, stride);
}

fn unpremultiply(image: &mut [u8], w: usize, h: usize, stride: usize) {
    for y in 0..h {
        let row = &mut image[y * stride..y * stride + w * 4];
        for px in row.chunks_exact_mut(4) {
            let a = px[3] as u32;
            if a != 0 {
                px[0] = ((px[0] as u32 * 255) / a).min(255) as u8;
                px[1] = ((px[1] as u32 * 255) / a).min(255) as u8;
                px[2] = ((px[2] as u32 * 255) / a).min(255) as u8;
            }
        }
    }
}

fn defringe(image: &mut [u8], w: usize, h: usize, stride: usize) {
    // Neighbour pixels are read from a separate snapshot so columns don't
    // feed the previous pixel's freshly-defringed value into its own
    // neighbour average within the same pass.
    let snapshot = image.to_vec();
    let pixel = |buf: &[u8], x: usize, y: usize| -> [u8; 4] {
        let i = y * stride + x * 4;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    };

    for y in 0..h {
        for x in 0..w {
            let i = y * stride + x * 4;
            if snapshot[i + 3] != 0 {
                continue;
            }
            let mut r = 0u32;
            let mut g = 0u32;
            let mut b = 0u32;
            let mut n = 0u32;

            if x > 0 {
                let p = pixel(&snapshot, x - 1, y);
                if p[3] != 0 {
                    r += p[0] as u32;
                    g += p[1] as u32;
                    b += p[2] as u32;
                    n += 1;
                }
            }
            if x + 1 < w {
                let p = pixel(&snapshot, x + 1, y);
                if p[3] != 0 {
                    r += p[0] as u32;
                    g += p[1] as u32;
                    b += p[2] as u32;
                    n += 1;
                }
            }
            if y > 0 {
                let p = pixel(&snapshot, x, y - 1);
                if p[3] != 0 {
                    r += p[0] as u32;
                    g += p[1] as u32;
                    b += p[2] as u32;
                    n += 1;
                }
            }
            if y + 1 < h {
                let p = pixel(&snapshot, x, y + 1);
                if p[3] != 0 {
                    r += p[0] as u32;
                    g += p[1] as u32;
                    b += p[2] as u32;
                    n += 1;
                }
            }

            if n > 0 {
                image[i] = (r / n) as u8;
                image[i + 1] = (g / n) as u8;
                image[i + 2] = (b / n) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpremultiply_divides_by_alpha() {
        let mut buf = [128u8, 0, 0, 128];
        unpremultiply(&mut buf, 1, 1, 4);
        assert_eq!(buf, [255, 0, 0, 128]);
    }

    #[test]
    fn unpremultiply_leaves_fully_transparent_alone() {
        let mut buf = [5u8, 6, 7, 0];
        unpremultiply(&mut buf, 1, 1, 4);
        assert_eq!(buf, [5, 6, 7, 0]);
    }

    #[test]
    fn defringe_averages_opaque_neighbours() {
        // Row of 3 pixels: opaque red, transparent, opaque blue.
        let mut buf = vec![
            255, 0, 0, 255, //
            0, 0, 0, 0, //
            0, 0, 255, 255, //
        ];
        defringe(&mut buf, 3, 1, 12);
        assert_eq!(&buf[4..7], &[127, 0, 127]);
        assert_eq!(buf[7], 0, "alpha of a defringed pixel stays transparent");
    }

    #[test]
    fn defringe_skips_pixels_with_no_opaque_neighbour() {
        let mut buf = vec![0u8; 4];
        defringe(&mut buf, 1, 1, 4);
        assert_eq!(buf, [0, 0, 0, 0]);
    }
}

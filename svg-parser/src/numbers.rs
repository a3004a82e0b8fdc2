// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

fn is_xml_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
}

/// A cursor over a `path` / `transform` argument string that pulls one
/// "sticky" number or one single-character command token at a time.
///
/// Numbers and commands run together with no required separator (e.g.
/// `"M10-20.5"` is `M`, `10`, `-20.5`): after an optional sign, digits,
/// a decimal point, and an optional exponent (itself optionally signed)
/// are consumed; a further `+`/`-` that is not the exponent's own sign
/// ends the current number and starts a new one. Whitespace and commas
/// between tokens are skipped.
pub struct NumberScanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> NumberScanner<'a> {
    pub fn new(s: &'a str) -> Self {
        NumberScanner { bytes: s.as_bytes(), pos: 0 }
    }

    fn skip_separators(&mut self) {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if is_xml_space(b) || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Returns the next command letter without consuming a number, if the
    /// next non-separator byte is an ASCII letter.
    pub fn peek_command(&mut self) -> Option<u8> {
        self.skip_separators();
        let b = *self.bytes.get(self.pos)?;
        if b.is_ascii_alphabetic() {
            Some(b)
        } else {
            None
        }
    }

    /// Consumes and returns the next command letter.
    pub fn next_command(&mut self) -> Option<u8> {
        let c = self.peek_command()?;
        self.pos += 1;
        Some(c)
    }

    /// Consumes and parses the next sticky number.
    pub fn next_number(&mut self) -> Option<f64> {
        self.skip_separators();
        let start = self.pos;
        let bytes = self.bytes;
        let len = bytes.len();
        let mut i = self.pos;

        if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let digits_start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i < len && bytes[i] == b'.' {
            i += 1;
            while i < len && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
        if i == digits_start || (i == digits_start + 1 && bytes[digits_start] == b'.') {
            // No digits at all: not a number.
            if i == digits_start {
                return None;
            }
        }
        if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mark = i;
            let mut j = i + 1;
            if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
                j += 1;
            }
            let exp_digits_start = j;
            while j < len && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > exp_digits_start {
                i = j;
            } else {
                let _ = mark;
            }
        }

        if i == start {
            return None;
        }
        let text = std::str::from_utf8(&bytes[start..i]).ok()?;
        self.pos = i;
        text.parse::<f64>().ok()
    }

    /// Returns `true` once the remaining input has no more separators or
    /// tokens left.
    pub fn is_exhausted(&mut self) -> bool {
        self.skip_separators();
        self.pos >= self.bytes.len()
    }
}

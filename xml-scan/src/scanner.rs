// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// The maximum number of `name="value"` pairs collected per tag.
///
/// Matches the cap nanosvg enforces via a fixed `attr[256]` array (128
/// name/value pairs); attributes beyond this are silently dropped rather
/// than causing an allocation or an error.
const MAX_ATTRIBUTE_PAIRS: usize = 128;

/// A single `name="value"` attribute borrowed from the source text.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// An iterator over a tag's attributes, in document order.
#[derive(Clone, Debug)]
pub struct Attributes<'a> {
    items: Vec<Attribute<'a>>,
    idx: usize,
}

impl<'a> Attributes<'a> {
    fn new(items: Vec<Attribute<'a>>) -> Self {
        Attributes { items, idx: 0 }
    }

    /// Returns the value of the first attribute with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.items.iter().find(|a| a.name == name).map(|a| a.value)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = Attribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = *self.items.get(self.idx)?;
        self.idx += 1;
        Some(item)
    }
}

/// One tokenizer event.
#[derive(Debug)]
pub enum Event<'a> {
    /// A `<name attr="value">` or self-closing `<name attr="value"/>` tag.
    ///
    /// A self-closing tag is reported as a `StartElement` immediately
    /// followed by an `EndElement` with the same name on the next call to
    /// [`Tokenizer::next`].
    StartElement {
        name: &'a str,
        attributes: Attributes<'a>,
    },
    /// A `</name>` tag, or the synthetic close of a self-closing tag.
    EndElement { name: &'a str },
    /// Non-tag text, with leading whitespace already trimmed.
    ///
    /// Never empty: a span of pure whitespace produces no event at all.
    Content(&'a str),
}

fn is_xml_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
}

enum TagBody<'a> {
    Skip,
    Start { name: &'a str, attrs: Vec<Attribute<'a>>, self_close: bool },
    End { name: &'a str },
}

/// A streaming, non-validating XML tokenizer.
///
/// Works directly on a borrowed `&str`: no copy is made and nothing is
/// mutated, so the caller's buffer is untouched. Malformed input is never
/// an error — the tokenizer just stops producing events (see module docs
/// and `spec` §7's "parse-abandoned" contract).
pub struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
    pending_end: Option<&'a str>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over the given text.
    pub fn from_str(text: &'a str) -> Self {
        Tokenizer { text, pos: 0, pending_end: None }
    }

    /// Returns the next event, or `None` once the input is exhausted (or
    /// parsing was abandoned because of unterminated markup).
    pub fn next(&mut self) -> Option<Event<'a>> {
        if let Some(name) = self.pending_end.take() {
            return Some(Event::EndElement { name });
        }

        let bytes = self.text.as_bytes();
        loop {
            if self.pos >= bytes.len() {
                return None;
            }

            if bytes[self.pos] == b'<' {
                self.pos += 1;
                let body_start = self.pos;
                while self.pos < bytes.len() && bytes[self.pos] != b'>' {
                    self.pos += 1;
                }
                if self.pos >= bytes.len() {
                    // No matching '>': trailing markup is unterminated.
                    // Abandon the parse rather than guess at intent.
                    log::warn!("unterminated tag at byte offset {}", body_start);
                    self.pos = bytes.len();
                    return None;
                }
                let body_end = self.pos;
                self.pos += 1; // consume '>'

                match parse_tag_body(self.text, body_start, body_end) {
                    TagBody::Skip => continue,
                    TagBody::End { name } => return Some(Event::EndElement { name }),
                    TagBody::Start { name, attrs, self_close } => {
                        if self_close {
                            self.pending_end = Some(name);
                        }
                        return Some(Event::StartElement {
                            name,
                            attributes: Attributes::new(attrs),
                        });
                    }
                }
            } else {
                let start = self.pos;
                while self.pos < bytes.len() && bytes[self.pos] != b'<' {
                    self.pos += 1;
                }
                let mut s = start;
                let raw_end = self.pos;
                while s < raw_end && is_xml_space(bytes[s]) {
                    s += 1;
                }
                if s < raw_end {
                    return Some(Event::Content(&self.text[s..raw_end]));
                }
                // Pure whitespace: nanosvg's content callback never fires
                // for it either. Keep scanning for the next real event.
            }
        }
    }
}

fn parse_tag_body(text: &str, start: usize, end: usize) -> TagBody<'_> {
    let bytes = text.as_bytes();
    let mut i = start;
    skip_ws(bytes, &mut i, end);

    let mut is_end_tag = false;
    if i < end && bytes[i] == b'/' {
        i += 1;
        is_end_tag = true;
    }

    // XML declarations, DOCTYPE, and comments are skipped with no event.
    if i >= end || bytes[i] == b'?' || bytes[i] == b'!' {
        return TagBody::Skip;
    }

    let name_start = i;
    while i < end && !is_xml_space(bytes[i]) && bytes[i] != b'/' && bytes[i] != b'>' {
        i += 1;
    }
    let name_end = i;
    if name_start == name_end {
        return TagBody::Skip;
    }
    let name = &text[name_start..name_end];

    if is_end_tag {
        return TagBody::End { name };
    }

    let mut attrs = Vec::new();
    let mut self_close = false;
    loop {
        skip_ws(bytes, &mut i, end);
        if i >= end {
            break;
        }
        if bytes[i] == b'/' {
            self_close = true;
            break;
        }
        if attrs.len() >= MAX_ATTRIBUTE_PAIRS {
            log::warn!("dropping attributes past the {}-pair cap", MAX_ATTRIBUTE_PAIRS);
            break;
        }

        let an_start = i;
        while i < end && !is_xml_space(bytes[i]) && bytes[i] != b'=' && bytes[i] != b'/' {
            i += 1;
        }
        let an_end = i;
        if an_start == an_end {
            break;
        }

        // Skip up to the opening quote. Values are double-quoted only.
        while i < end && bytes[i] != b'"' {
            i += 1;
        }
        if i >= end {
            // No value found for this attribute name: drop it.
            break;
        }
        i += 1;
        let av_start = i;
        while i < end && bytes[i] != b'"' {
            i += 1;
        }
        let av_end = i;
        if i < end {
            i += 1; // closing quote
        }

        attrs.push(Attribute {
            name: &text[an_start..an_end],
            value: &text[av_start..av_end],
        });
    }

    TagBody::Start { name, attrs, self_close }
}

fn skip_ws(bytes: &[u8], pos: &mut usize, end: usize) {
    while *pos < end && is_xml_space(bytes[*pos]) {
        *pos += 1;
    }
}

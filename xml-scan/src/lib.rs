/*!
A minimal, allocation-light streaming XML tokenizer tuned for SVG documents.

`xml-scan` is similar in spirit to a real XML parser, but it does not build a
tree, does not resolve namespaces, does not validate well-formedness, and
silently skips anything it cannot make sense of. It exists to feed an SVG
tree builder one tag at a time.

The tokenizer borrows the input text directly and never mutates it: every
name, value, and content span returned by [`Tokenizer::next`] is a `&str`
slice into the caller's own buffer.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod scanner;

pub use scanner::{Attribute, Attributes, Event, Tokenizer};

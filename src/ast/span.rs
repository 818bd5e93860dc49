//! Source spans.

use std::ops::Range;

/// A span representing a range in query text.
///
/// A node's offset is `span.start` and its length is `span.len()`.
pub type Span = Range<usize>;

/// Builds a span from an offset and a length.
pub fn span_at(offset: usize, length: usize) -> Span {
    offset..offset + length
}

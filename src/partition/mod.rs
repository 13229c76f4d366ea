//! Content-type partitioning socket, grounded on
//! `ascension::kernel::DocumentPartitioner`/`NullPartitioner`
//! (`original_source/ascension/ascension/kernel/document.hpp`). The document owns exactly one
//! partitioner; it is consulted for the content type covering a position and is told when an
//! edit may have invalidated its cached partition boundaries, but this crate does not implement
//! any partitioning *algorithm* itself (that is a syntax-highlighting concern, out of scope) —
//! only the contract a real partitioner plugs into.

use crate::line_store::LinePosition;

/// Opaque identifier for a content type. Interpretation (what "1" means) belongs entirely to
/// the partitioner implementation; the kernel only ever compares these for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentType(pub u32);

/// The default content type assigned to a document with no partitioner installed.
pub const DEFAULT_CONTENT_TYPE: ContentType = ContentType(0);

/// A half-open-ish span of the document assigned a single content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub content_type: ContentType,
    pub start: LinePosition,
    pub end: LinePosition,
}

/// Socket a document consults to classify positions by content type (e.g. "this span is a
/// string literal", "this span is markup versus embedded script").
pub trait DocumentPartitioner {
    /// The partition containing `at`.
    fn partition_at(&self, at: LinePosition) -> Partition;

    /// Called after every successful edit so the partitioner can invalidate or recompute any
    /// cached boundaries it keeps; `changed` is the region that was replaced, in *new*
    /// coordinates.
    ///
    /// Returns the span of the document whose partitioning actually changed, if any. This can
    /// be wider than `changed` itself — inserting an opening comment delimiter reclassifies
    /// everything up to the next matching close, not just the two characters typed — and the
    /// document forwards whatever is returned to its listeners via
    /// [`crate::document::DocumentListener::document_partitioning_changed`]. Returning `None`
    /// means the edit did not change how any text is classified (e.g. typing inside a partition
    /// far from its boundaries).
    fn notify_change(&mut self, changed: std::ops::Range<LinePosition>) -> Option<std::ops::Range<LinePosition>>;
}

/// A partitioner that reports the whole document as a single partition. Used when no real
/// partitioner is installed, mirroring `ascension::kernel::NullPartitioner`.
pub struct NullPartitioner {
    document_end: LinePosition,
}

impl NullPartitioner {
    pub fn new(document_end: LinePosition) -> Self {
        Self { document_end }
    }

    pub fn set_document_end(&mut self, end: LinePosition) {
        self.document_end = end;
    }
}

impl DocumentPartitioner for NullPartitioner {
    fn partition_at(&self, _at: LinePosition) -> Partition {
        Partition {
            content_type: DEFAULT_CONTENT_TYPE,
            start: LinePosition::new(0, 0),
            end: self.document_end,
        }
    }

    fn notify_change(&mut self, changed: std::ops::Range<LinePosition>) -> Option<std::ops::Range<LinePosition>> {
        self.document_end = self.document_end.max(changed.end);
        Some(changed)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

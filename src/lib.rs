//! glyphkernel - a Unicode-aware document-editing kernel
//!
//! Provides the text-storage and editing primitives a text editor builds on: a UTF codec, a
//! bidirectional Unicode character iterator, UAX #29 grapheme/word/sentence break iterators, a
//! gap-buffer line store, an anchor set that tracks positions across edits, the document core
//! that ties storage, undo, anchors, bookmarks and partitioning together behind a single
//! `replace` operation, and literal/regex search.

pub mod anchor;
pub mod bookmark;
pub mod char_iter;
pub mod codec;
pub mod document;
pub mod error;
pub mod gap_vector;
pub mod line_store;
pub mod partition;
pub mod search;
pub mod text_break;
pub mod undo;

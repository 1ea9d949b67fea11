//! Span edits: the printing half of the tree model.
//!
//! A rewrite pass never mutates a syntax tree directly. It walks the parsed
//! tree, records [`EditPrimitive`]s against byte spans of the original text,
//! and hands them to a [`BatchSpanEditor`] which applies them in one go.
//! Anything no edit touches is reproduced byte for byte.
//!
//! | Primitive | Span Semantics |
//! |-----------|----------------|
//! | `Replace(span, text)` | `span.start..span.end` becomes `text` |
//! | `InsertBefore(span, text)` | Insert at `span.start` |
//! | `InsertAfter(span, text)` | Insert at `span.end` |
//! | `Delete(span)` | Equivalent to `Replace(span, "")` |
//! | `InsertAt(position, text)` | Zero-width span at position |
//!
//! # Example
//!
//! ```
//! use queuegen_core::patch::{BatchSpanEditor, EditPrimitive, Span};
//!
//! let source = "class MpscLinkedQueue {}";
//!
//! let mut editor = BatchSpanEditor::new(source);
//! editor.add(EditPrimitive::Replace {
//!     span: Span::new(6, 21),
//!     new_text: "MpscLinkedAtomicQueue".to_string(),
//! });
//!
//! let result = editor.apply().unwrap();
//! assert_eq!(result, "class MpscLinkedAtomicQueue {}");
//! ```

use std::cmp::Ordering;
use std::fmt;

/// Byte offsets into source text.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span overlaps with another.
    ///
    /// Adjacent spans (one ends where another starts) do NOT overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// An atomic edit operation on source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPrimitive {
    /// Replace content at span with new text.
    Replace { span: Span, new_text: String },

    /// Insert text immediately before the given span.
    InsertBefore { anchor_span: Span, text: String },

    /// Insert text immediately after the given span.
    InsertAfter { anchor_span: Span, text: String },

    /// Delete content at span.
    Delete { span: Span },

    /// Insert text at an absolute byte position.
    InsertAt { position: usize, text: String },
}

impl EditPrimitive {
    /// Returns the insertion point (byte offset where new text begins).
    pub fn insertion_point(&self) -> usize {
        match self {
            EditPrimitive::Replace { span, .. } => span.start,
            EditPrimitive::InsertBefore { anchor_span, .. } => anchor_span.start,
            EditPrimitive::InsertAfter { anchor_span, .. } => anchor_span.end,
            EditPrimitive::Delete { span } => span.start,
            EditPrimitive::InsertAt { position, .. } => *position,
        }
    }

    /// Returns true if this is an insertion (InsertBefore, InsertAfter, InsertAt).
    pub fn is_insertion(&self) -> bool {
        matches!(
            self,
            EditPrimitive::InsertBefore { .. }
                | EditPrimitive::InsertAfter { .. }
                | EditPrimitive::InsertAt { .. }
        )
    }

    /// Span used for bounds checking: anchors count, insertion points do not widen.
    fn bounds_span(&self) -> Span {
        match self {
            EditPrimitive::Replace { span, .. } | EditPrimitive::Delete { span } => *span,
            EditPrimitive::InsertBefore { anchor_span, .. }
            | EditPrimitive::InsertAfter { anchor_span, .. } => *anchor_span,
            EditPrimitive::InsertAt { position, .. } => Span::new(*position, *position),
        }
    }

    /// Span used for overlap checking. Insertions are zero-width.
    fn overlap_span(&self) -> Span {
        match self {
            EditPrimitive::Replace { span, .. } | EditPrimitive::Delete { span } => *span,
            _ => {
                let at = self.insertion_point();
                Span::new(at, at)
            }
        }
    }

    fn text(&self) -> &str {
        match self {
            EditPrimitive::Replace { new_text, .. } => new_text,
            EditPrimitive::InsertBefore { text, .. }
            | EditPrimitive::InsertAfter { text, .. }
            | EditPrimitive::InsertAt { text, .. } => text,
            EditPrimitive::Delete { .. } => "",
        }
    }
}

/// Error type for batch edit operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEditError {
    /// Two edits have overlapping spans.
    OverlappingEdits { edit1_span: Span, edit2_span: Span },

    /// An edit span extends beyond source length.
    SpanOutOfBounds { span: Span, source_len: usize },
}

impl fmt::Display for BatchEditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchEditError::OverlappingEdits {
                edit1_span,
                edit2_span,
            } => {
                write!(
                    f,
                    "overlapping edits: ({}, {}) and ({}, {})",
                    edit1_span.start, edit1_span.end, edit2_span.start, edit2_span.end
                )
            }
            BatchEditError::SpanOutOfBounds { span, source_len } => {
                write!(
                    f,
                    "span ({}, {}) is out of bounds for source of length {}",
                    span.start, span.end, source_len
                )
            }
        }
    }
}

impl std::error::Error for BatchEditError {}

/// Result type for batch edit operations.
pub type BatchEditResult<T> = Result<T, BatchEditError>;

/// A batch editor that collects edit primitives and applies them atomically.
///
/// All spans refer to the original source. Edits are sorted by position and
/// spliced in a single forward sweep; several insertions at the same position
/// keep the order they were added in, ahead of any replacement starting there.
pub struct BatchSpanEditor<'src> {
    source: &'src str,
    edits: Vec<EditPrimitive>,
}

impl<'src> BatchSpanEditor<'src> {
    /// Create a new BatchSpanEditor for the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    /// Add an edit primitive to the batch.
    pub fn add(&mut self, edit: EditPrimitive) {
        self.edits.push(edit);
    }

    /// Add multiple edit primitives.
    pub fn add_all(&mut self, edits: impl IntoIterator<Item = EditPrimitive>) {
        self.edits.extend(edits);
    }

    /// Returns the number of edits currently queued.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns true if no edits are queued.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply all queued edits and return the transformed source.
    ///
    /// # Errors
    ///
    /// - `BatchEditError::OverlappingEdits` if any two edits overlap
    /// - `BatchEditError::SpanOutOfBounds` if any span exceeds source length
    ///
    /// An empty batch returns the source unchanged. Adjacent edits are allowed.
    pub fn apply(self) -> BatchEditResult<String> {
        if self.edits.is_empty() {
            return Ok(self.source.to_string());
        }

        let source_len = self.source.len();
        for edit in &self.edits {
            let span = edit.bounds_span();
            if span.end > source_len {
                return Err(BatchEditError::SpanOutOfBounds { span, source_len });
            }
        }

        // Stable sort keeps insertion order among edits at the same position.
        let mut edits = self.edits;
        edits.sort_by(|a, b| match a.insertion_point().cmp(&b.insertion_point()) {
            Ordering::Equal => match (a.is_insertion(), b.is_insertion()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            },
            other => other,
        });

        for pair in edits.windows(2) {
            let first = pair[0].overlap_span();
            let second = pair[1].overlap_span();
            let conflict = first.overlaps(&second) || (!first.is_empty() && first == second);
            if conflict {
                return Err(BatchEditError::OverlappingEdits {
                    edit1_span: first,
                    edit2_span: second,
                });
            }
        }

        let mut result = String::with_capacity(source_len);
        let mut cursor = 0;
        for edit in &edits {
            let at = edit.insertion_point();
            result.push_str(&self.source[cursor..at]);
            result.push_str(edit.text());
            cursor = cursor.max(edit.overlap_span().end);
        }
        result.push_str(&self.source[cursor..]);
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================

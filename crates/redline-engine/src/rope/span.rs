/// A byte range `[start, end)` into a string.
///
/// Spans are only meaningful against the exact string they were computed
/// from. Any mutation of that string invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True when the two half-open ranges share at least one byte.
    #[must_use]
    pub fn overlaps(self, other: Span) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Shifts the span right by `delta` bytes.
    #[must_use]
    pub fn offset(self, delta: usize) -> Span {
        Span {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    pub fn range(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_spans() {
        assert!(Span::new(0, 5).overlaps(Span::new(4, 8)));
        assert!(Span::new(4, 8).overlaps(Span::new(0, 5)));
        assert!(Span::new(2, 3).overlaps(Span::new(0, 10)));
    }

    #[test]
    fn adjacent_spans_do_not_overlap() {
        assert!(!Span::new(0, 5).overlaps(Span::new(5, 8)));
        assert!(!Span::new(5, 8).overlaps(Span::new(0, 5)));
    }

    #[test]
    fn empty_span_overlaps_nothing() {
        assert!(!Span::new(3, 3).overlaps(Span::new(0, 10)));
        assert!(!Span::new(0, 10).overlaps(Span::new(3, 3)));
        assert!(!Span::new(3, 3).overlaps(Span::new(3, 3)));
    }

    #[test]
    fn offset_shifts_both_ends() {
        assert_eq!(Span::new(2, 4).offset(10), Span::new(12, 14));
    }
}

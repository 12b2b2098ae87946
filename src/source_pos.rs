use std::ops::Range;

/// Character offsets into the source text, 0-based and end-exclusive.
pub type Span = Range<usize>;

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub elem: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(elem: T, span: Span) -> Self {
        Self { elem, span }
    }

    /// 1-based position of the first character, as reported in errors.
    pub fn position(&self) -> usize {
        self.span.start + 1
    }
}

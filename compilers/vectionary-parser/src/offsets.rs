use vectionary_protocol::Span;

/// Converts between byte offsets and Unicode scalar offsets of one string.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    /// Byte offset of every char boundary, plus the final `len()`.
    boundaries: Vec<usize>,
}

impl OffsetMap {
    pub fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { boundaries }
    }

    /// Number of chars in the text.
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Byte offset of char index `ci`, or `None` past the end.
    pub fn byte_of(&self, ci: usize) -> Option<usize> {
        self.boundaries.get(ci).copied()
    }

    /// Char index of byte offset `bi`. Offsets inside a char round down.
    pub fn char_of(&self, bi: usize) -> usize {
        match self.boundaries.binary_search(&bi) {
            Ok(ci) => ci,
            Err(ci) => ci.saturating_sub(1),
        }
    }

    pub fn char_span(&self, bytes: Span) -> Span {
        Span::new(self.char_of(bytes.start), self.char_of(bytes.end))
    }
}

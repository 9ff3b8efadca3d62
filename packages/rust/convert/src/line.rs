//! Classified-line data model shared by the classifier and renderer.

/// Block category assigned to one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `#`-prefixed heading, levels 1–6.
    Header,
    /// `>`-prefixed quote, arbitrarily nested.
    Blockquote,
    /// `- ` bullet item, nested by two-space indentation.
    List,
    /// A ``` delimiter line opening or closing a verbatim block.
    CodeFence,
    /// Anything else.
    Paragraph,
}

/// One classified input line — the sole hand-off between the classifier
/// and the renderer. Created once per non-empty line, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Block category, resolved by a first-match priority chain.
    pub kind: LineKind,
    /// Header depth (1–6) or blockquote nesting count; 0 otherwise.
    pub level: usize,
    /// The line's text after inline substitution. For [`LineKind::CodeFence`]
    /// this holds the optional language tag instead of body text.
    pub content: String,
    /// List indentation level (leading-space count ÷ 2); 0 otherwise.
    pub depth: usize,
}

impl Line {
    pub(crate) fn new(kind: LineKind, level: usize, content: String, depth: usize) -> Self {
        Self {
            kind,
            level,
            content,
            depth,
        }
    }
}

//! Restricted-Markdown to HTML conversion.
//!
//! A two-stage, line-oriented pipeline with no parser dependency:
//! 1. The classifier turns each non-empty input line into a [`Line`] —
//!    inline spans (code, strong, emphasis, image, link) resolved, block
//!    kind and nesting recorded.
//! 2. The renderer walks the classified sequence once and emits nested
//!    HTML, tracking open code fences and list depth across lines.
//!
//! The pipeline is total: any line that matches no rule becomes a
//! paragraph. Calls are independent and safe to run concurrently; the
//! only shared state is the precompiled pattern set.

mod classify;
mod line;
mod render;

pub use classify::classify_document;
pub use line::{Line, LineKind};
pub use render::render;

use tracing::instrument;

/// Convert a Markdown byte buffer to an HTML fragment.
///
/// Trims the whole input, drops empty lines, classifies the rest, and
/// renders. Never fails; invalid UTF-8 is replaced lossily.
#[instrument(skip(input), fields(input_len = input.len()))]
pub fn to_html(input: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(input);
    let lines = classify_document(text.trim());
    render(&lines).into_bytes()
}

// ---------------------------------------------------------------------------
// End-to-end tests
// ---------------------------------------------------------------------------

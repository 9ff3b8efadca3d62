//! Line classifier: inline substitution passes, then block classification.
//!
//! Each inline pass is a bounded fixed-point rewrite over a single line.
//! Patterns are compiled once into `LazyLock` statics and shared read-only
//! across calls.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::line::{Line, LineKind};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static CODE_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));

// The closing marker must repeat the opening character, so `**x__` and
// `_x*` never pair up.
static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").expect("valid regex"));

static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*|_([^_]+)_").expect("valid regex"));

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]*)\)").expect("valid regex"));

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").expect("valid regex"));

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6}) (.+)").expect("valid regex"));

static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(>+)(.+)").expect("valid regex"));

static LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( *)- (.+)").expect("valid regex"));

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```([A-Za-z0-9_+#.-]*)$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Document walk
// ---------------------------------------------------------------------------

/// Classify every non-empty line of a pre-trimmed document.
///
/// Fence membership is resolved here, during the walk: lines physically
/// inside an open fence skip all inline passes and are classified on
/// their raw text, so verbatim code is never rewritten.
pub fn classify_document(input: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut in_fence = false;

    for raw in input.lines() {
        if raw.is_empty() {
            continue;
        }

        let line = if in_fence {
            classify_block(raw)
        } else {
            classify_block(&apply_inline(raw))
        };

        if line.kind == LineKind::CodeFence {
            in_fence = !in_fence;
        }
        lines.push(line);
    }

    debug!(line_count = lines.len(), "document classified");
    lines
}

// ---------------------------------------------------------------------------
// Inline passes
// ---------------------------------------------------------------------------

/// Run the inline passes in order: code span, strong, emphasis, image, link.
///
/// A line containing any code span freezes after the code-span pass —
/// markdown inside and around the span stays literal.
fn apply_inline(raw: &str) -> String {
    let (text, found_code) = code_spans(raw);
    if found_code {
        return text;
    }

    let text = strong(&text);
    let text = emphasis(&text);
    let text = image(&text);
    links(&text)
}

/// Replace the first match repeatedly, up to a cap derived from the line
/// length. Every substitution consumes at least one marker byte, so the
/// cap only binds on adversarial input.
fn rewrite_bounded(
    text: &str,
    re: &Regex,
    apply: impl Fn(&Captures) -> String,
) -> (String, usize) {
    let mut current = text.to_string();
    let mut count = 0;
    let cap = text.len().max(1);

    for _ in 0..cap {
        let Some(caps) = re.captures(&current) else {
            break;
        };
        let m = caps.get(0).expect("group 0 always present");

        let mut next = String::with_capacity(current.len());
        next.push_str(&current[..m.start()]);
        next.push_str(&apply(&caps));
        next.push_str(&current[m.end()..]);
        current = next;
        count += 1;
    }

    (current, count)
}

/// First or second capture group, whichever side of the alternation matched.
fn either_group<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default()
}

/// `` `x` `` → `<code>x</code>`. Returns whether any span was found.
fn code_spans(text: &str) -> (String, bool) {
    let (out, count) = rewrite_bounded(text, &CODE_SPAN_RE, |caps: &Captures| {
        format!("<code>{}</code>", &caps[1])
    });
    (out, count > 0)
}

/// `**x**` / `__x__` → `<strong>x</strong>`, left to right.
fn strong(text: &str) -> String {
    rewrite_bounded(text, &STRONG_RE, |caps: &Captures| {
        format!("<strong>{}</strong>", either_group(caps))
    })
    .0
}

/// `*x*` / `_x_` → `<em>x</em>`. Runs after [`strong`], so `***x***`
/// resolves to `<em><strong>x</strong></em>`.
fn emphasis(text: &str) -> String {
    rewrite_bounded(text, &EMPHASIS_RE, |caps: &Captures| {
        format!("<em>{}</em>", either_group(caps))
    })
    .0
}

/// Line-initial `![alt](url)` → `<img />`, at most once per line.
fn image(text: &str) -> String {
    IMAGE_RE
        .replace(text, |caps: &Captures| {
            format!(r#"<img src="{}" alt="{}" />"#, &caps[2], &caps[1])
        })
        .into_owned()
}

/// `[text](url)` → `<a href="url">text</a>`, left to right.
fn links(text: &str) -> String {
    rewrite_bounded(text, &LINK_RE, |caps: &Captures| {
        format!(r#"<a href="{}">{}</a>"#, &caps[2], &caps[1])
    })
    .0
}

// ---------------------------------------------------------------------------
// Block classification
// ---------------------------------------------------------------------------

/// Assign a block kind to an inline-resolved line. Total: the priority
/// chain ends in a paragraph fallback, never an error.
fn classify_block(text: &str) -> Line {
    if let Some(caps) = HEADER_RE.captures(text) {
        return Line::new(LineKind::Header, caps[1].len(), caps[2].to_string(), 0);
    }

    if let Some(caps) = BLOCKQUOTE_RE.captures(text) {
        return Line::new(LineKind::Blockquote, caps[1].len(), caps[2].to_string(), 0);
    }

    if let Some(caps) = LIST_RE.captures(text) {
        let depth = caps[1].len() / 2;
        return Line::new(LineKind::List, 0, caps[2].to_string(), depth);
    }

    if let Some(caps) = FENCE_RE.captures(text) {
        return Line::new(LineKind::CodeFence, 0, caps[1].to_string(), 0);
    }

    Line::new(LineKind::Paragraph, 0, text.to_string(), 0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_single_and_multiple() {
        assert_eq!(apply_inline("*em*"), "<em>em</em>");
        assert_eq!(
            apply_inline("This is *multiple* *em* sample."),
            "This is <em>multiple</em> <em>em</em> sample."
        );
        assert_eq!(apply_inline("This is _other_ em."), "This is <em>other</em> em.");
    }

    #[test]
    fn emphasis_mismatched_markers_left_alone() {
        assert_eq!(apply_inline("This is _not* em."), "This is _not* em.");
        assert_eq!(apply_inline("___not***"), "___not***");
    }

    #[test]
    fn strong_double_markers() {
        assert_eq!(apply_inline("**strong**"), "<strong>strong</strong>");
        assert_eq!(
            apply_inline("a **b** and __c__"),
            "a <strong>b</strong> and <strong>c</strong>"
        );
        assert_eq!(apply_inline("This is **not__ strong."), "This is **not__ strong.");
    }

    #[test]
    fn strong_before_emphasis_on_triple_marker() {
        assert_eq!(
            apply_inline("***both***"),
            "<em><strong>both</strong></em>"
        );
    }

    #[test]
    fn code_span_freezes_line() {
        assert_eq!(apply_inline("`cs sample`"), "<code>cs sample</code>");
        assert_eq!(
            apply_inline("This is `__emphasis in codespan__` sentence."),
            "This is <code>__emphasis in codespan__</code> sentence."
        );
        // Markdown outside the span is frozen too
        assert_eq!(
            apply_inline("*outside* `span`"),
            "*outside* <code>span</code>"
        );
    }

    #[test]
    fn image_only_line_initial_and_once() {
        assert_eq!(
            apply_inline("![image](/path/to/image)"),
            r#"<img src="/path/to/image" alt="image" />"#
        );
    }

    #[test]
    fn links_rewritten_left_to_right() {
        assert_eq!(
            apply_inline("See [a](/a) and [b](/b)."),
            r#"See <a href="/a">a</a> and <a href="/b">b</a>."#
        );
    }

    #[test]
    fn rewrite_bounded_terminates_on_marker_runs() {
        // Unpaired markers: no pass matches, the line passes through.
        let hostile = "*".repeat(10_000);
        assert_eq!(apply_inline(&hostile), hostile);

        // Thousands of paired markers: rewriting stays within the cap.
        let hostile = "*a".repeat(5_000);
        let out = apply_inline(&hostile);
        assert!(out.contains("<em>a</em>"));
    }

    #[test]
    fn header_levels_and_overflow() {
        for level in 1..=6 {
            let line = classify_block(&format!("{} text", "#".repeat(level)));
            assert_eq!(line.kind, LineKind::Header);
            assert_eq!(line.level, level);
            assert_eq!(line.content, "text");
        }

        let line = classify_block("####### Header7");
        assert_eq!(line.kind, LineKind::Paragraph);
        assert_eq!(line.content, "####### Header7");
    }

    #[test]
    fn blockquote_level_counts_markers() {
        let line = classify_block(">> quote level2");
        assert_eq!(line.kind, LineKind::Blockquote);
        assert_eq!(line.level, 2);
        assert_eq!(line.content, " quote level2");
    }

    #[test]
    fn list_depth_from_indentation() {
        let line = classify_block("- item");
        assert_eq!((line.kind, line.depth), (LineKind::List, 0));

        let line = classify_block("  - nested");
        assert_eq!((line.kind, line.depth), (LineKind::List, 1));
        assert_eq!(line.content, "nested");

        let line = classify_block("    - deeper");
        assert_eq!(line.depth, 2);
    }

    #[test]
    fn fence_with_and_without_tag() {
        let line = classify_block("```");
        assert_eq!(line.kind, LineKind::CodeFence);
        assert_eq!(line.content, "");

        let line = classify_block("```go");
        assert_eq!(line.kind, LineKind::CodeFence);
        assert_eq!(line.content, "go");

        // Trailing junk disqualifies the fence
        let line = classify_block("``` not a fence");
        assert_eq!(line.kind, LineKind::Paragraph);
    }

    #[test]
    fn unmatched_lines_degrade_to_paragraph() {
        let line = classify_block("just a sentence");
        assert_eq!(line.kind, LineKind::Paragraph);
        assert_eq!(line.content, "just a sentence");
    }

    #[test]
    fn fence_interior_skips_inline_passes() {
        let lines = classify_document("```\n__strong__\n[x](/y)\n```");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].kind, LineKind::Paragraph);
        assert_eq!(lines[1].content, "__strong__");
        assert_eq!(lines[2].content, "[x](/y)");
    }

    #[test]
    fn fence_interior_still_block_classified() {
        let lines = classify_document("```\n## header2\n> quoted\n- item\n```");
        assert_eq!(lines[1].kind, LineKind::Header);
        assert_eq!(lines[1].level, 2);
        assert_eq!(lines[2].kind, LineKind::Blockquote);
        assert_eq!(lines[3].kind, LineKind::List);
    }

    #[test]
    fn empty_lines_discarded() {
        let lines = classify_document("# a\n\n\nb");
        assert_eq!(lines.len(), 2);
    }
}

//! Document renderer: a single forward pass over the classified lines.
//!
//! Cross-line state is one fence toggle plus lookback/lookahead at
//! neighbor kinds and depths — list nesting needs no stack because
//! adjacent depth comparison decides every open and close.

use tracing::debug;

use crate::line::{Line, LineKind};

/// Render the classified-line sequence to an HTML fragment.
///
/// Every rendered line except the last is followed by one `\n`. Fence
/// delimiter lines are pure delimiters: they contribute no body text and
/// are joined without a trailing newline, so `<pre><code>` abuts the
/// first verbatim line.
pub fn render(lines: &[Line]) -> String {
    let mut out = String::new();
    let mut in_fence = false;

    for (idx, line) in lines.iter().enumerate() {
        let rendered = match line.kind {
            LineKind::Header => header(line, in_fence),
            LineKind::Blockquote => blockquote(line, in_fence),
            LineKind::List => list(line, idx, lines, in_fence),
            LineKind::CodeFence => {
                let tag = fence(line, in_fence);
                in_fence = !in_fence;
                tag
            }
            LineKind::Paragraph => paragraph(line, in_fence),
        };

        out.push_str(&rendered);

        let is_last = idx + 1 == lines.len();
        if !is_last && line.kind != LineKind::CodeFence {
            out.push('\n');
        }
    }

    debug!(output_len = out.len(), "render complete");
    out
}

// ---------------------------------------------------------------------------
// Per-kind emission
// ---------------------------------------------------------------------------

fn header(line: &Line, in_fence: bool) -> String {
    if in_fence {
        // Reproduce the source markup verbatim inside a fence.
        return format!("{} {}", "#".repeat(line.level), line.content);
    }

    format!("<h{lv}>{}</h{lv}>", line.content, lv = line.level)
}

fn blockquote(line: &Line, in_fence: bool) -> String {
    if in_fence {
        // Quote markers are the one thing escaped inside fences.
        return format!("{}{}", "&gt;".repeat(line.level), line.content);
    }

    format!(
        "{}<p>{}</p>{}",
        "<blockquote>".repeat(line.level),
        line.content.trim(),
        "</blockquote>".repeat(line.level),
    )
}

fn list(line: &Line, idx: usize, lines: &[Line], in_fence: bool) -> String {
    if in_fence {
        return format!("- {}", line.content);
    }

    let prev = idx.checked_sub(1).map(|i| &lines[i]);
    let next = lines.get(idx + 1);

    let mut out = String::new();

    // Open a <ul> at the start of a run, or when this item is deeper
    // than the previous one (one open per increase transition).
    let opens = match prev {
        Some(p) if p.kind == LineKind::List => usize::from(line.depth > p.depth),
        _ => 1,
    };
    for _ in 0..opens {
        out.push_str("<ul>\n");
    }

    out.push_str(&format!("<li>{}</li>", line.content));

    // Close one </ul> per unit of depth decrease toward the next item;
    // at the end of the run, close down to depth zero plus the outer <ul>.
    let closes = match next {
        Some(n) if n.kind == LineKind::List => line.depth.saturating_sub(n.depth),
        _ => line.depth + 1,
    };
    for _ in 0..closes {
        out.push_str("\n</ul>");
    }

    out
}

fn fence(line: &Line, in_fence: bool) -> String {
    if in_fence {
        return "</code></pre>".to_string();
    }

    if line.content.is_empty() {
        "<pre><code>".to_string()
    } else {
        format!(r#"<pre><code class="{}">"#, line.content)
    }
}

fn paragraph(line: &Line, in_fence: bool) -> String {
    if in_fence {
        return line.content.clone();
    }

    format!("<p>{}</p>", line.content)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn line(kind: LineKind, level: usize, content: &str, depth: usize) -> Line {
        Line::new(kind, level, content.to_string(), depth)
    }

    #[test]
    fn header_levels() {
        let out = render(&[line(LineKind::Header, 3, "Title", 0)]);
        assert_eq!(out, "<h3>Title</h3>");
    }

    #[test]
    fn blockquote_nesting_matches_level() {
        let out = render(&[line(LineKind::Blockquote, 2, " quote level2", 0)]);
        assert_eq!(
            out,
            "<blockquote><blockquote><p>quote level2</p></blockquote></blockquote>"
        );
    }

    #[test]
    fn single_item_list() {
        let out = render(&[line(LineKind::List, 0, "list1", 0)]);
        assert_eq!(out, "<ul>\n<li>list1</li>\n</ul>");
    }

    #[test]
    fn nested_list_opens_and_closes_per_depth_step() {
        let lines = [
            line(LineKind::List, 0, "list1", 0),
            line(LineKind::List, 0, "list2", 0),
            line(LineKind::List, 0, "list2-1", 1),
            line(LineKind::List, 0, "list3", 0),
        ];
        assert_eq!(
            render(&lines),
            "<ul>\n<li>list1</li>\n<li>list2</li>\n<ul>\n<li>list2-1</li>\n</ul>\n<li>list3</li>\n</ul>"
        );
    }

    #[test]
    fn list_run_ending_deep_closes_to_zero() {
        let lines = [
            line(LineKind::List, 0, "a", 0),
            line(LineKind::List, 0, "b", 1),
        ];
        // One close per remaining depth unit, then the outer close.
        assert_eq!(render(&lines), "<ul>\n<li>a</li>\n<ul>\n<li>b</li>\n</ul>\n</ul>");
    }

    #[test]
    fn list_tags_stay_balanced() {
        let lines = [
            line(LineKind::List, 0, "a", 0),
            line(LineKind::List, 0, "b", 1),
            line(LineKind::List, 0, "c", 2),
            line(LineKind::List, 0, "d", 0),
            line(LineKind::Paragraph, 0, "after", 0),
        ];
        let out = render(&lines);
        assert_eq!(out.matches("<ul>").count(), out.matches("</ul>").count());
    }

    #[test]
    fn list_interrupted_by_paragraph_restarts() {
        let lines = [
            line(LineKind::List, 0, "a", 0),
            line(LineKind::Paragraph, 0, "break", 0),
            line(LineKind::List, 0, "b", 0),
        ];
        assert_eq!(
            render(&lines),
            "<ul>\n<li>a</li>\n</ul>\n<p>break</p>\n<ul>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn fence_open_close_and_language_tag() {
        let lines = [
            line(LineKind::CodeFence, 0, "go", 0),
            line(LineKind::Paragraph, 0, "code", 0),
            line(LineKind::CodeFence, 0, "", 0),
        ];
        assert_eq!(render(&lines), "<pre><code class=\"go\">code\n</code></pre>");
    }

    #[test]
    fn fence_reproduces_block_markup_verbatim() {
        let lines = [
            line(LineKind::CodeFence, 0, "", 0),
            line(LineKind::Header, 2, "header2", 0),
            line(LineKind::Blockquote, 2, " quoted", 0),
            line(LineKind::List, 0, "item", 0),
            line(LineKind::CodeFence, 0, "", 0),
        ];
        assert_eq!(
            render(&lines),
            "<pre><code>## header2\n&gt;&gt; quoted\n- item\n</code></pre>"
        );
    }

    #[test]
    fn paragraph_wrapped_outside_fence() {
        let out = render(&[line(LineKind::Paragraph, 0, "hello", 0)]);
        assert_eq!(out, "<p>hello</p>");
    }

    #[test]
    fn empty_sequence_renders_empty() {
        assert_eq!(render(&[]), "");
    }
}

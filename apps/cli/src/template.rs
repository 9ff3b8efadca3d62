//! HTML page shell around the converted fragment.
//!
//! The page embeds the stylesheet inline so the output is a single
//! self-contained file, and optionally pulls highlight.js from a CDN for
//! fenced code blocks.

use mdpress_shared::TemplateConfig;

/// Stylesheet embedded when neither `--css` nor config provide one.
pub(crate) const DEFAULT_STYLESHEET: &str = include_str!("../assets/default.css");

/// Page sizing rules applied after the user stylesheet, matching the
/// markdown-body article wrapper.
const BODY_STYLE: &str = r#"      body {
        box-sizing: border-box;
        min-width: 200px;
        max-width: 980px;
        margin: 0 auto;
        padding: 45px;
      }
      @media (max-width: 767px) {
        .markdown-body {
          padding: 15px;
        }
      }"#;

/// Wrap an HTML fragment in a full document.
pub(crate) fn render_page(content: &str, stylesheet: &str, config: &TemplateConfig) -> String {
    let highlight = if config.highlight_js {
        let v = &config.highlight_version;
        format!(
            "    <link rel=\"stylesheet\" href=\"https://cdnjs.cloudflare.com/ajax/libs/highlight.js/{v}/styles/default.min.css\">\n\
             \x20   <script src=\"https://cdnjs.cloudflare.com/ajax/libs/highlight.js/{v}/highlight.min.js\"></script>\n\
             \x20   <script>hljs.initHighlightingOnLoad();</script>\n"
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1, minimal-ui">
{highlight}    <style>
{stylesheet}
    </style>
    <style>
{BODY_STYLE}
    </style>
  </head>
  <body>
    <article class="markdown-body">
{content}
    </article>
  </body>
</html>
"#
    )
}

//! Document compilation for the live preview.
//!
//! Takes raw editor text (front matter + body), strips inline presentational
//! style attributes outside code spans, extracts the front-matter mapping,
//! and renders the body to sanitized HTML.

use std::sync::LazyLock;

use pulldown_cmark::{Options, Parser, html};
use regex::Regex;
use serde_yaml::Value;
use thiserror::Error;

/// Compilation failure, rendered inline in place of the preview pane.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("Front matter is not valid YAML: {0}")]
    FrontMatter(String),
}

/// Result of compiling one snapshot of editor text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompiledPreview {
    /// Sanitized HTML for the document body.
    pub html: String,
    /// Front-matter fields, formatted for display. Empty values are skipped
    /// and arrays are joined with `", "`.
    pub front_matter: Vec<(String, String)>,
}

/// Compile one snapshot of editor text into a renderable preview.
pub fn compile_preview(text: &str) -> Result<CompiledPreview, CompileError> {
    let processed = strip_inline_styles(text);
    let (mapping, body) = split_front_matter(&processed)?;
    let front_matter = mapping.as_ref().map(format_front_matter).unwrap_or_default();
    Ok(CompiledPreview {
        html: markdown_to_html(body),
        front_matter,
    })
}

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]+`").expect("valid regex"));
static STYLE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s*style\s*=\s*["'][^"']*["']"#).expect("valid regex"));

/// Remove inline HTML `style` attributes from non-code regions.
///
/// Fenced blocks and inline code spans are extracted verbatim before the
/// transform and restored by position afterward, so code content is never
/// altered.
pub fn strip_inline_styles(source: &str) -> String {
    let mut code_spans: Vec<String> = Vec::new();

    let mut processed = FENCED_CODE
        .replace_all(source, |caps: &regex::Captures<'_>| {
            code_spans.push(caps[0].to_string());
            format!("__CODE_SPAN_{}__", code_spans.len() - 1)
        })
        .into_owned();

    processed = INLINE_CODE
        .replace_all(&processed, |caps: &regex::Captures<'_>| {
            code_spans.push(caps[0].to_string());
            format!("__CODE_SPAN_{}__", code_spans.len() - 1)
        })
        .into_owned();

    processed = STYLE_ATTR.replace_all(&processed, "").into_owned();

    for (index, span) in code_spans.iter().enumerate() {
        processed = processed.replacen(&format!("__CODE_SPAN_{index}__"), span, 1);
    }

    processed
}

/// Split a leading `---` front-matter block off the document body.
///
/// Returns `(None, text)` when the text does not open with a front-matter
/// delimiter. An opening delimiter without a closing one is a compile error.
pub fn split_front_matter(text: &str) -> Result<(Option<serde_yaml::Mapping>, &str), CompileError> {
    let Some(after_open) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return Ok((None, text));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            if yaml.trim().is_empty() {
                return Ok((None, body));
            }
            let mapping = serde_yaml::from_str::<serde_yaml::Mapping>(yaml)
                .map_err(|e| CompileError::FrontMatter(e.to_string()))?;
            return Ok((Some(mapping), body));
        }
        offset += line.len();
    }

    Err(CompileError::FrontMatter(
        "the opening delimiter is never closed".to_string(),
    ))
}

/// Convert markdown content to sanitized HTML.
///
/// Supports strikethrough, tables, and footnotes. The output is sanitized
/// with `ammonia` to strip dangerous elements and attributes.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    ammonia::clean(&html_output)
}

/// Flatten a front-matter mapping into displayable key/value rows.
fn format_front_matter(mapping: &serde_yaml::Mapping) -> Vec<(String, String)> {
    mapping
        .iter()
        .filter_map(|(key, value)| {
            let key = key.as_str()?;
            Some((key.to_string(), format_value(value)?))
        })
        .collect()
}

fn format_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Sequence(items) => {
            let joined = items
                .iter()
                .filter_map(format_value)
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        }
        other => serde_json::to_string(other).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_removes_style_outside_code() {
        let input = r#"<div style="color:red">hi</div>"#;
        assert_eq!(strip_inline_styles(input), "<div>hi</div>");
    }

    #[test]
    fn test_strip_preserves_fenced_code_exactly() {
        let fenced = "```html\n<span style=\"color:red\">x</span>\n```";
        let input = format!("<p style='margin:0'>before</p>\n\n{fenced}\n");
        let output = strip_inline_styles(&input);
        assert!(output.contains(fenced), "fenced block must be unchanged");
        assert!(!output.contains("<p style"));
    }

    #[test]
    fn test_strip_preserves_inline_code() {
        let input = "use `style=\"color:red\"` sparingly, <b style=\"x\">ok</b>";
        let output = strip_inline_styles(input);
        assert!(output.contains("`style=\"color:red\"`"));
        assert!(output.contains("<b>ok</b>"));
    }

    #[test]
    fn test_front_matter_extraction() {
        let text = "---\ntitle: \"Hello\"\ntags: [rust, wasm]\ndescription: \"\"\nseries: ~\n---\n\n# Body\n";
        let (mapping, body) = split_front_matter(text).expect("parses");
        let rows = format_front_matter(&mapping.expect("has front matter"));
        assert_eq!(
            rows,
            vec![
                ("title".to_string(), "Hello".to_string()),
                ("tags".to_string(), "rust, wasm".to_string()),
            ]
        );
        assert_eq!(body, "\n# Body\n");
    }

    #[test]
    fn test_no_front_matter_passes_through() {
        let (mapping, body) = split_front_matter("# Just a body\n").expect("ok");
        assert!(mapping.is_none());
        assert_eq!(body, "# Just a body\n");
    }

    #[test]
    fn test_unterminated_front_matter_is_error() {
        assert!(split_front_matter("---\ntitle: x\n").is_err());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let text = "---\ntitle: [unclosed\n---\nbody";
        assert!(matches!(
            split_front_matter(text),
            Err(CompileError::FrontMatter(_))
        ));
    }

    #[test]
    fn test_markdown_rendering_and_sanitization() {
        let html = markdown_to_html("# Title\n\n<script>alert(1)</script>\n\n~~gone~~");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_compile_preview_end_to_end() {
        let text = "---\ntitle: \"Post\"\ncategory: \"posts\"\n---\n\nSome *body* text.\n";
        let preview = compile_preview(text).expect("compiles");
        assert!(preview.html.contains("<em>body</em>"));
        assert_eq!(preview.front_matter[0], ("title".to_string(), "Post".to_string()));
    }
}

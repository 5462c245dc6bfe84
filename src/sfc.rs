// Single-file components bundle template, script, and style sections; only
// the script block is JavaScript. This module locates that block so the
// analyzer can parse its content and report positions in whole-file
// coordinates.

use std::sync::OnceLock;

use regex::Regex;

/// Location of the first `<script>` block of a single-file component.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptBlock {
    /// Byte offset of the content start in the whole file.
    pub start: usize,
    /// Byte offset one past the content end.
    pub end: usize,
    /// Value of the `lang` attribute, when present.
    pub lang: Option<String>,
    /// Number of lines preceding the content start.
    pub line_offset: usize,
}

impl ScriptBlock {
    pub fn content<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

fn script_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script(?P<attrs>\s[^>]*)?>(?P<content>.*?)</script\s*>")
            .expect("script block pattern")
    })
}

fn lang_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)\blang\s*=\s*["']([^"']*)["']"#).expect("lang attribute pattern"))
}

/// Locate the first `<script>` element of the file. Returns `None` when the
/// file has no script block or an empty one; that is a valid component, not
/// an error.
pub fn extract_script_block(source: &str) -> Option<ScriptBlock> {
    let captures = script_regex().captures(source)?;
    let content = captures.name("content")?;
    if content.as_str().trim().is_empty() {
        return None;
    }
    let lang = captures
        .name("attrs")
        .and_then(|attrs| lang_regex().captures(attrs.as_str()))
        .and_then(|lang| lang.get(1))
        .map(|lang| lang.as_str().to_string());
    let line_offset = source[..content.start()].matches('\n').count();
    Some(ScriptBlock {
        start: content.start(),
        end: content.end(),
        lang,
        line_offset,
    })
}

//! Regex-level cleanup of fetched wiki markup.
//!
//! This is best-effort stripping against the MediaWiki page template, not an
//! HTML parser. Malformed markup yields malformed output.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

const HATNOTE_PATTERN: &str = r#"(?s)<div\b[^>]*\bclass="[^"]*\bhatnote\b[^"]*"[^>]*>.*?</div>"#;
const COMMENT_PATTERN: &str = r"(?s)<!--.*?-->";
const NON_TEXT_PATTERN: &str =
    r"(?is)<head\b.*?</head>|<script\b.*?</script>|<noscript\b.*?</noscript>|<style\b.*?</style>";
const TAG_PATTERN: &str = r"<[^<>]*>";
const WHITESPACE_RUN_PATTERN: &str = r"\s{2,}";

static HATNOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HATNOTE_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COMMENT_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));
static NON_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NON_TEXT_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TAG_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));
static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(WHITESPACE_RUN_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// The two views of a page the rest of the pipeline works on.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Markup for link extraction.
    pub link_source: String,
    /// Plain text used as the relevance corpus.
    pub text: String,
}

impl PageContent {
    pub fn from_markup(raw: &str) -> Self {
        let markup = strip_disambiguation(raw);
        Self {
            link_source: extract_link_source(&markup).into_owned(),
            text: extract_text(&markup),
        }
    }
}

/// Removes "not to be confused with" hatnote boxes.
pub fn strip_disambiguation(markup: &str) -> Cow<'_, str> {
    HATNOTE_RE.replace_all(markup, "")
}

/// Markup with comments removed. Navigation, infoboxes and footers stay.
pub fn extract_link_source(markup: &str) -> Cow<'_, str> {
    COMMENT_RE.replace_all(markup, "")
}

/// Plain text of the page: head, scripts and styles dropped, tags stripped,
/// whitespace runs collapsed to one space, stray control characters removed.
///
/// Single line breaks survive, so the text can still be scanned line by line.
pub fn extract_text(markup: &str) -> String {
    let without_blocks = NON_TEXT_RE.replace_all(markup, "");
    let without_tags = TAG_RE.replace_all(&without_blocks, "");
    let collapsed = WHITESPACE_RUN_RE.replace_all(&without_tags, " ");

    collapsed
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

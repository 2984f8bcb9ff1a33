use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// Path prefix of article links.
pub const ARTICLE_PREFIX: &str = "/wiki/";

/// Namespaces that never hold articles. A link whose target starts with
/// `<namespace>:` is dropped.
pub const EXCLUDED_NAMESPACES: &[&str] = &[
    "Book",
    "Book_talk",
    "Category",
    "Category_talk",
    "Draft",
    "Draft_talk",
    "File",
    "File_talk",
    "Forum",
    "Help",
    "Help_talk",
    "Image",
    "Media",
    "MediaWiki",
    "MediaWiki_talk",
    "Module",
    "Module_talk",
    "Portal",
    "Portal_talk",
    "Special",
    "Talk",
    "Template",
    "Template_talk",
    "Thread",
    "TimedText",
    "User",
    "User_blog",
    "User_talk",
    "Wikipedia",
    "Wikipedia_talk",
];

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<a\s[^>]*>").unwrap_or_else(|_| panic!("Invalid Regex")));
static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bhref="([^"]*)""#).unwrap_or_else(|_| panic!("Invalid Regex")));
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\btitle="([^"]*)""#).unwrap_or_else(|_| panic!("Invalid Regex")));

/// A reference to another topic found on a page.
///
/// Identity is the canonical `key`; `score` is only written by the ranker.
#[derive(Debug, Clone, Serialize)]
pub struct LinkCandidate {
    pub key: String,
    pub href: String,
    pub title: String,
    pub score: usize,
}

impl LinkCandidate {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            href: format!("{}{}", ARTICLE_PREFIX, key),
            key,
            title: title.into(),
            score: 0,
        }
    }
}

impl PartialEq for LinkCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for LinkCandidate {}

/// Canonical key for a user-supplied topic name.
///
/// Fragment and query are dropped the same way `parse_anchor` drops them, so
/// the root shares its key with links pointing back at it.
pub fn topic_key(topic: &str) -> String {
    let (topic, _fragment) = split_once_or_all(topic.trim(), '#');
    let (path, _query) = split_once_or_all(topic, '?');
    path.trim().replace(' ', "_")
}

/// Extracts the distinct article links of a page, in discovery order.
///
/// Anchors are scanned line by line; an anchor broken across lines is not seen.
pub fn extract_links(link_source: &str) -> Vec<LinkCandidate> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for line in link_source.lines() {
        for anchor in ANCHOR_RE.find_iter(line) {
            let Some(candidate) = parse_anchor(anchor.as_str()) else {
                continue;
            };
            if seen.insert(candidate.key.clone()) {
                links.push(candidate);
            }
        }
    }

    links
}

/// Turns one `<a ...>` tag into a candidate, or `None` if it is filtered out.
pub fn parse_anchor(anchor: &str) -> Option<LinkCandidate> {
    let href = HREF_RE.captures(anchor)?.get(1)?.as_str();
    let target = href.strip_prefix(ARTICLE_PREFIX)?;

    let (target, _fragment) = split_once_or_all(target, '#');
    let (path, query) = split_once_or_all(target, '?');

    if path.is_empty() {
        return None;
    }
    if is_excluded_namespace(path) {
        debug!("Skipping non-article link {}", href);
        return None;
    }
    if query.is_some_and(|q| q.split(['&', ';']).any(|pair| pair == "redirect=no")) {
        debug!("Skipping redirect-suppressing link {}", href);
        return None;
    }

    let title = match TITLE_RE.captures(anchor).and_then(|c| c.get(1)) {
        Some(title) if !title.as_str().trim().is_empty() => title.as_str(),
        _ => {
            debug!("Skipping untitled link {}", href);
            return None;
        }
    };

    Some(LinkCandidate::new(path, title))
}

pub fn is_excluded_namespace(path: &str) -> bool {
    path.split_once(':')
        .is_some_and(|(namespace, _)| EXCLUDED_NAMESPACES.contains(&namespace))
}

fn split_once_or_all(s: &str, delimiter: char) -> (&str, Option<&str>) {
    match s.split_once(delimiter) {
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(links: &[LinkCandidate]) -> Vec<&str> {
        links.iter().map(|l| l.key.as_str()).collect()
    }

    #[test]
    fn test_extracts_titled_article_links() {
        let markup = r#"<p><a href="/wiki/Ferris" title="Ferris">crab</a> and <a href="/wiki/Cargo_(software)" title="Cargo (software)">cargo</a></p>"#;
        let links = extract_links(markup);

        assert_eq!(keys(&links), vec!["Ferris", "Cargo_(software)"]);
        assert_eq!(links[1].title, "Cargo (software)");
        assert_eq!(links[1].href, "/wiki/Cargo_(software)");
        assert_eq!(links[0].score, 0);
    }

    #[test]
    fn test_repeated_anchor_counted_once() {
        let anchor = r#"<a href="/wiki/Ferris" title="Ferris">Ferris</a>"#;
        let markup = format!("{}\n{}\n{} {}", anchor, anchor, anchor, anchor);

        let links = extract_links(&markup);

        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_fragment_collapses_onto_bare_topic() {
        let markup = concat!(
            r#"<a href="/wiki/Ownership#Borrowing" title="Ownership">borrowing</a>"#,
            "\n",
            r#"<a href="/wiki/Ownership" title="Ownership">ownership</a>"#,
        );

        let links = extract_links(markup);

        assert_eq!(keys(&links), vec!["Ownership"]);
        assert_eq!(links[0].href, "/wiki/Ownership");
    }

    #[test]
    fn test_excluded_namespaces_dropped() {
        let markup = concat!(
            r#"<li><a href="/wiki/Category:Programming_languages" title="Category:Programming languages">x</a></li>"#,
            r#"<li><a href="/wiki/Talk:Rust" title="Talk:Rust">talk</a></li>"#,
            r#"<li><a href="/wiki/File:Logo.svg" title="File:Logo.svg">logo</a></li>"#,
            r#"<li><a href="/wiki/Special:Random" title="Special:Random">random</a></li>"#,
            r#"<li><a href="/wiki/Template:Infobox" title="Template:Infobox">t</a></li>"#,
            r#"<li><a href="/wiki/User:Someone" title="User:Someone">u</a></li>"#,
            r#"<li><a href="/wiki/Portal:Computing" title="Portal:Computing">p</a></li>"#,
            r#"<li><a href="/wiki/Help:Contents" title="Help:Contents">h</a></li>"#,
            r#"<li><a href="/wiki/Memory_safety" title="Memory safety">m</a></li>"#,
        );

        let links = extract_links(markup);

        assert_eq!(keys(&links), vec!["Memory_safety"]);
    }

    #[test]
    fn test_colon_in_article_title_is_kept() {
        let links = extract_links(r#"<a href="/wiki/Star_Wars:_Andor" title="Star Wars: Andor">x</a>"#);
        assert_eq!(keys(&links), vec!["Star_Wars:_Andor"]);
    }

    #[test]
    fn test_redirect_suppressed_links_dropped() {
        let markup = concat!(
            r#"<a href="/wiki/Rust_lang?redirect=no" title="Rust lang">r</a>"#,
            r#"<a href="/wiki/Rust_lang?oldid=1&amp;redirect=no" title="Rust lang">r</a>"#,
        );
        assert!(extract_links(markup).is_empty());
    }

    #[test]
    fn test_query_is_not_part_of_key() {
        let links = extract_links(r#"<a href="/wiki/Rust?action=view" title="Rust">r</a>"#);
        assert_eq!(keys(&links), vec!["Rust"]);
    }

    #[test]
    fn test_untitled_and_non_article_links_dropped() {
        let markup = concat!(
            r#"<a href="/wiki/Untitled">no title</a>"#,
            r#"<a href="/wiki/Blank" title="  ">blank title</a>"#,
            r#"<a href="/w/index.php?title=Rust&action=edit" title="Edit">edit</a>"#,
            r#"<a href="https://example.com/wiki/Rust" title="Rust">external</a>"#,
            r##"<a href="#cite_note-1" title="note">1</a>"##,
            r#"<a href="/wiki/" title="Main">main</a>"#,
        );
        assert!(extract_links(markup).is_empty());
    }

    #[test]
    fn test_attribute_order_does_not_matter() {
        let links = extract_links(r#"<a class="mw-redirect" title="Crab" href="/wiki/Crab">crab</a>"#);
        assert_eq!(keys(&links), vec!["Crab"]);
    }

    #[test]
    fn test_empty_page_yields_no_links() {
        assert!(extract_links("").is_empty());
        assert!(extract_links("<p>plain text only</p>").is_empty());
    }

    #[test]
    fn test_topic_key_replaces_spaces() {
        assert_eq!(topic_key("Eric Cartman"), "Eric_Cartman");
        assert_eq!(topic_key(" Rust "), "Rust");
    }

    #[test]
    fn test_topic_key_drops_fragment_and_query() {
        assert_eq!(topic_key("A#Sec"), "A");
        assert_eq!(topic_key("Rust?action=view"), "Rust");
        assert_eq!(topic_key("Eric Cartman?x=1#Early life"), "Eric_Cartman");
        assert_eq!(topic_key("#Sec"), "");
    }
}

use crate::links::LinkCandidate;

/// Number of lines of `text` that contain `title` as a substring.
///
/// Several mentions on one line count once; this is a coarse relevance
/// signal, not a term frequency.
pub fn line_occurrences(title: &str, text: &str) -> usize {
    text.lines().filter(|line| line.contains(title)).count()
}

/// Scores every candidate against `text` and orders them by descending score.
///
/// The sort is stable: equal scores keep discovery order.
pub fn rank_links(mut links: Vec<LinkCandidate>, text: &str) -> Vec<LinkCandidate> {
    for link in links.iter_mut() {
        link.score = line_occurrences(&link.title, text);
    }
    links.sort_by(|a, b| b.score.cmp(&a.score));
    links
}

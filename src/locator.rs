//! Line locator: maps a rendered node back to a line in the source
//!
//! There is no stored mapping from rendered nodes to source positions, so the
//! line is re-derived from the node's fingerprint each time. Strategies run
//! from most to least precise and the first hit wins.

use crate::dom::{NodeId, Tree};
use crate::model::SourceBuffer;

/// Which fingerprint produced a location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// The node's full markup appears verbatim in the source
    Exact,
    /// A line holds the node's open tag and its `id`
    Identifier,
    /// A line holds the node's open tag and its `class` value
    Class,
    /// First line holding the node's open tag
    Tag,
}

/// A resolved source position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// 1-based line number
    pub line: usize,
    pub strategy: MatchStrategy,
}

/// Find the source line a node was most likely rendered from.
///
/// `None` means the node could not be placed; callers must not navigate.
pub fn locate(tree: &Tree, node: NodeId, source: &SourceBuffer) -> Option<Location> {
    let found = locate_inner(tree, node, source);
    match found {
        Some(loc) => tracing::debug!(line = loc.line, strategy = ?loc.strategy, "located node"),
        None => tracing::debug!(node = node.0, "locator miss"),
    }
    found
}

fn locate_inner(tree: &Tree, node: NodeId, source: &SourceBuffer) -> Option<Location> {
    if let Some(offset) = source.find(&tree.source_markup(node)) {
        return Some(Location {
            line: source.line_of_byte(offset),
            strategy: MatchStrategy::Exact,
        });
    }

    let el = tree.element(node)?;
    let text = source.text();
    let with_open_tag = || lines_with_open_tag(&text, &el.tag);

    if let Some(id) = el.attr("id").filter(|id| !id.is_empty()) {
        let double = format!("id=\"{id}\"");
        let single = format!("id='{id}'");
        if let Some((idx, _)) = with_open_tag()
            .find(|(_, line)| has_attr_token(line, &double) || has_attr_token(line, &single))
        {
            return Some(Location {
                line: idx + 1,
                strategy: MatchStrategy::Identifier,
            });
        }
    }

    if let Some(class) = el.attr("class").map(str::trim).filter(|c| !c.is_empty()) {
        let double = format!("class=\"{class}");
        let single = format!("class='{class}");
        if let Some((idx, _)) = with_open_tag()
            .find(|(_, line)| has_attr_token(line, &double) || has_attr_token(line, &single))
        {
            return Some(Location {
                line: idx + 1,
                strategy: MatchStrategy::Class,
            });
        }
    }

    // Bound to a local so the iterator is dropped before `text`
    let found = with_open_tag().next().map(|(idx, _)| Location {
        line: idx + 1,
        strategy: MatchStrategy::Tag,
    });
    found
}

/// True if `token` starts an attribute on `line`, not the tail of a longer name
fn has_attr_token(line: &str, token: &str) -> bool {
    line.match_indices(token).any(|(i, _)| {
        line[..i]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace)
    })
}

/// 0-based index and content of every line holding `<tag`
fn lines_with_open_tag<'a>(text: &'a str, tag: &'a str) -> impl Iterator<Item = (usize, &'a str)> {
    text.lines()
        .enumerate()
        .filter(move |(_, line)| has_open_tag(line, tag))
}

/// True if `line` contains `<tag` not followed by another name character
pub fn has_open_tag(line: &str, tag: &str) -> bool {
    if tag.is_empty() {
        return false;
    }
    let bytes = line.as_bytes();
    let needle = tag.as_bytes();
    let mut i = 0;
    while i + 1 + needle.len() <= bytes.len() {
        if bytes[i] == b'<' && bytes[i + 1..i + 1 + needle.len()].eq_ignore_ascii_case(needle) {
            let next = bytes.get(i + 1 + needle.len());
            if next.map_or(true, |&b| b.is_ascii_whitespace() || b == b'>' || b == b'/') {
                return true;
            }
        }
        i += 1;
    }
    false
}

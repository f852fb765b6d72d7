//! Minimal element selectors: `tag`, `#id`, `.class` and their compounds

use super::Element;

/// A compound selector such as `div`, `#main`, `.card` or `div.card#main`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Selector {
    /// Parse a compound selector. Returns `None` for an empty or malformed one.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() || input.contains(char::is_whitespace) {
            return None;
        }

        let mut selector = Selector::default();
        let tag_end = input.find(['#', '.']).unwrap_or(input.len());
        if tag_end > 0 {
            selector.tag = Some(input[..tag_end].to_ascii_lowercase());
        }

        let mut rest = &input[tag_end..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            match marker {
                '#' => selector.id = Some(name.to_string()),
                _ => selector.classes.push(name.to_string()),
            }
            rest = &body[end..];
        }

        Some(selector)
    }

    pub fn matches(&self, el: &Element) -> bool {
        if self.tag.as_deref().is_some_and(|tag| tag != el.tag) {
            return false;
        }
        if self.id.as_deref().is_some_and(|id| el.attr("id") != Some(id)) {
            return false;
        }
        self.classes
            .iter()
            .all(|class| el.classes().any(|c| c == class))
    }
}

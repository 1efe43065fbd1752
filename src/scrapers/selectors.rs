use anyhow::{anyhow, Result};
use scraper::{ElementRef, Selector};

/// Compile a CSS selector, reporting the offending text on failure
pub fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css:?}: {e:?}"))
}

/// Trimmed text content of an element
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Ordered candidate selectors for one field; the first with non-empty text wins
#[derive(Debug, Clone)]
pub struct SelectorChain {
    candidates: Vec<Selector>,
}

impl SelectorChain {
    pub fn parse(candidates: &[&str]) -> Result<Self> {
        let candidates = candidates.iter().map(|css| compile(css)).collect::<Result<_>>()?;
        Ok(Self { candidates })
    }

    /// Text of the first matching candidate, or empty when none yields any
    pub fn text(&self, scope: ElementRef<'_>) -> String {
        self.candidates
            .iter()
            .filter_map(|selector| scope.select(selector).next())
            .map(text_of)
            .find(|text| !text.is_empty())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_first_non_empty_candidate_wins() {
        let html = Html::parse_fragment(
            r#"<article><h3>  </h3><h4> Second choice </h4><p class="title">Third</p></article>"#,
        );
        let root = html.root_element();

        let chain = SelectorChain::parse(&["h3", "h4", ".title"]).unwrap();
        assert_eq!(chain.text(root), "Second choice");

        let missing = SelectorChain::parse(&[".nope", "h2"]).unwrap();
        assert_eq!(missing.text(root), "");
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        assert!(SelectorChain::parse(&["div[", "h3"]).is_err());
    }
}

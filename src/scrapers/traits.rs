use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Page height measured while scrolling
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub inner_height: f64,
}

/// The browser capabilities the scrapers consume.
///
/// Implementors provide the primitives; the higher-level probes have
/// default bodies built on `evaluate` so any engine that can run a
/// script gets them for free.
pub trait PageDriver {
    /// Navigate and wait for the page to finish loading
    fn navigate(&self, url: &str) -> Result<()>;

    /// Wait until an element matching `selector` exists
    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Click the first element matching `selector`
    fn click(&self, selector: &str) -> Result<()>;

    /// Run a script in the page and return its value
    fn evaluate(&self, script: &str) -> Result<Value>;

    /// Fixed settle delay
    fn pause(&self, duration: Duration);

    fn count(&self, selector: &str) -> Result<usize> {
        let script = format!("document.querySelectorAll({}).length", js_string(selector));
        self.evaluate(&script)?
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| anyhow!("element count for {selector} was not a number"))
    }

    /// Outer HTML of the whole document
    fn content(&self) -> Result<String> {
        match self.evaluate("document.documentElement.outerHTML")? {
            Value::String(html) => Ok(html),
            other => Err(anyhow!("page HTML was not a string: {other}")),
        }
    }

    /// Control exists, is enabled and is not hidden by CSS
    fn control_ready(&self, selector: &str) -> Result<bool> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el || el.disabled) return false;
                const style = window.getComputedStyle(el);
                return style.display !== 'none' && style.visibility !== 'hidden';
            }})()"#,
            sel = js_string(selector)
        );
        Ok(self.evaluate(&script)?.as_bool().unwrap_or(false))
    }

    /// Click the first ready control in page context, returning whether one was clicked
    fn click_first_ready(&self, selectors: &[&str]) -> Result<bool> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el || el.disabled) return false;
                const style = window.getComputedStyle(el);
                if (style.display === 'none' || style.visibility === 'hidden') return false;
                el.click();
                return true;
            }})()"#,
            sel = js_string(&selectors.join(", "))
        );
        Ok(self.evaluate(&script)?.as_bool().unwrap_or(false))
    }

    /// Scroll down by `distance` pixels, returning the heights measured before the scroll
    fn scroll_step(&self, distance: u32) -> Result<ScrollMetrics> {
        let script = format!(
            r#"(() => {{
                const metrics = {{ scrollHeight: document.body.scrollHeight, innerHeight: window.innerHeight }};
                window.scrollBy(0, {distance});
                return JSON.stringify(metrics);
            }})()"#
        );
        match self.evaluate(&script)? {
            Value::String(json) => serde_json::from_str(&json).context("Failed to decode scroll metrics"),
            other => Err(anyhow!("scroll metrics were not a string: {other}")),
        }
    }
}

/// Quote a selector as a JavaScript string literal
pub fn js_string(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(
            js_string(r#"button[data-qa="loadMoreButton"]"#),
            r#""button[data-qa=\"loadMoreButton\"]""#
        );
    }
}

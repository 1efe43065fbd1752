use crate::scrapers::traits::PageDriver;
use crate::scrapers::types::SessionConfig;
use anyhow::{bail, Context, Result};
use headless_chrome::types::Bounds;
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use std::ffi::OsStr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One headless Chrome process with a single tab.
///
/// The browser is torn down when the session is dropped, so every exit
/// path out of a scrape releases it.
pub struct ChromeSession {
    // Dropping `Browser` kills the Chrome process
    _browser: Browser,
    tab: Arc<Tab>,
}

/// Per-tab overrides, applied in order
#[derive(Debug, PartialEq)]
enum TabSetup<'a> {
    HideAutomation,
    UserAgent(&'a str),
}

impl ChromeSession {
    /// Launch Chrome and open a tab configured per `config`
    pub fn launch(config: &SessionConfig) -> Result<Self> {
        info!(headless = config.headless, "Launching Chrome...");

        let options = launch_options(config)?;
        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;
        tab.set_default_timeout(config.navigation_timeout);

        for step in tab_setup(config) {
            match step {
                TabSetup::HideAutomation => tab
                    .enable_stealth_mode()
                    .context("Failed to hide automation flag")?,
                TabSetup::UserAgent(agent) => tab
                    .set_user_agent(agent, None, None)
                    .context("Failed to override user agent")?,
            }
        }

        let session = Self { _browser: browser, tab };
        if let Err(e) = session.fit_viewport(config.viewport) {
            warn!(error = %e, "Could not size window to the configured viewport");
        }

        debug!(viewport = ?config.viewport, "Browser session ready");
        Ok(session)
    }

    /// Grow the window by the browser frame so the page itself gets `viewport`
    fn fit_viewport(&self, viewport: (u32, u32)) -> Result<()> {
        let frame: (f64, f64) = match self.evaluate(
            "JSON.stringify([window.outerWidth - window.innerWidth, window.outerHeight - window.innerHeight])",
        )? {
            Value::String(json) => serde_json::from_str(&json).context("Failed to decode window frame size")?,
            other => bail!("window frame size was not a string: {other}"),
        };
        if frame.0 <= 0.0 && frame.1 <= 0.0 {
            return Ok(());
        }

        let (width, height) = window_for_viewport(viewport, frame);
        self.tab
            .set_bounds(Bounds::Normal {
                left: None,
                top: None,
                width: Some(width),
                height: Some(height),
            })
            .context("Failed to resize browser window")?;
        debug!(width, height, "Resized window around viewport");
        Ok(())
    }
}

/// Chrome launch flags derived from the session settings
fn launch_options(config: &SessionConfig) -> Result<LaunchOptions<'static>> {
    let mut args = vec![
        OsStr::new("--disable-dev-shm-usage"),
        OsStr::new("--disable-notifications"),
        OsStr::new("--disable-popup-blocking"),
    ];
    if config.suppress_automation_flag {
        args.push(OsStr::new("--disable-blink-features=AutomationControlled"));
    }

    LaunchOptions::default_builder()
        .headless(config.headless)
        .sandbox(false)
        .window_size(Some(config.viewport))
        .idle_browser_timeout(config.navigation_timeout * 2)
        .args(args)
        .build()
        .context("Failed to build launch options")
}

/// Stealth mode rewrites the user agent itself, so the configured agent must come last
fn tab_setup(config: &SessionConfig) -> Vec<TabSetup<'_>> {
    let mut steps = Vec::new();
    if config.suppress_automation_flag {
        steps.push(TabSetup::HideAutomation);
    }
    steps.push(TabSetup::UserAgent(&config.user_agent));
    steps
}

fn window_for_viewport(viewport: (u32, u32), frame: (f64, f64)) -> (f64, f64) {
    (
        f64::from(viewport.0) + frame.0.max(0.0),
        f64::from(viewport.1) + frame.1.max(0.0),
    )
}

impl PageDriver for ChromeSession {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {url}"))?
            .wait_until_navigated()
            .with_context(|| format!("Timed out loading {url}"))?;
        Ok(())
    }

    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .with_context(|| format!("No element matched {selector}"))?;
        Ok(())
    }

    fn click(&self, selector: &str) -> Result<()> {
        self.tab
            .find_element(selector)
            .with_context(|| format!("No element matched {selector}"))?
            .click()
            .with_context(|| format!("Failed to click {selector}"))?;
        Ok(())
    }

    fn evaluate(&self, script: &str) -> Result<Value> {
        let result = self
            .tab
            .evaluate(script, false)
            .context("Script evaluation failed")?;
        Ok(result.value.unwrap_or(Value::Null))
    }

    fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        debug!("Closing browser session");
        if let Err(e) = self.tab.close(false) {
            warn!(error = %e, "Failed to close tab cleanly");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_follow_session_config() {
        let options = launch_options(&SessionConfig::default()).unwrap();

        assert!(options.headless);
        assert_eq!(options.window_size, Some((1280, 800)));
        assert!(options
            .args
            .contains(&OsStr::new("--disable-blink-features=AutomationControlled")));

        let visible = SessionConfig {
            headless: false,
            suppress_automation_flag: false,
            viewport: (1920, 1080),
            ..SessionConfig::default()
        };
        let options = launch_options(&visible).unwrap();

        assert!(!options.headless);
        assert_eq!(options.window_size, Some((1920, 1080)));
        assert!(!options
            .args
            .contains(&OsStr::new("--disable-blink-features=AutomationControlled")));
    }

    #[test]
    fn test_configured_user_agent_is_applied_last() {
        let config = SessionConfig::default();

        let steps = tab_setup(&config);

        assert_eq!(
            steps,
            [TabSetup::HideAutomation, TabSetup::UserAgent(&config.user_agent)]
        );
        assert!(config.user_agent.starts_with("Mozilla/5.0 (Windows NT 10.0"));
    }

    #[test]
    fn test_user_agent_without_stealth() {
        let config = SessionConfig {
            suppress_automation_flag: false,
            ..SessionConfig::default()
        };

        assert_eq!(tab_setup(&config), [TabSetup::UserAgent(&config.user_agent)]);
    }

    #[test]
    fn test_window_grows_by_frame() {
        assert_eq!(window_for_viewport((1280, 800), (16.0, 87.0)), (1296.0, 887.0));
        assert_eq!(window_for_viewport((1280, 800), (-4.0, 0.0)), (1280.0, 800.0));
    }
}

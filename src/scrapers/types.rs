use std::time::Duration;

/// Browser session settings that make the automation footprint look like a desktop visitor
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub user_agent: String,
    /// Viewport width and height in CSS pixels
    pub viewport: (u32, u32),
    /// Hide `navigator.webdriver` and the automation-controlled blink feature
    pub suppress_automation_flag: bool,
    pub headless: bool,
    pub navigation_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            viewport: (1280, 800),
            suppress_automation_flag: true,
            headless: true,
            navigation_timeout: Duration::from_secs(60),
        }
    }
}

/// Settings for a click-driven "load more" loop
#[derive(Debug, Clone)]
pub struct ClickLoadConfig {
    /// Candidate controls, first ready one is clicked
    pub control_selectors: Vec<&'static str>,
    /// Review items counted to detect growth
    pub item_selector: &'static str,
    pub max_iterations: usize,
    pub wait_timeout: Duration,
    pub settle_delay: Duration,
}

impl ClickLoadConfig {
    pub fn g2() -> Self {
        Self {
            control_selectors: vec![r#"button[data-qa="loadMoreButton"]"#],
            item_selector: ".review-list__item",
            max_iterations: 30,
            wait_timeout: Duration::from_secs(5),
            settle_delay: Duration::from_millis(1500),
        }
    }

    pub fn trustradius() -> Self {
        Self {
            control_selectors: vec![
                r#"button[data-testid="load-more-button"]"#,
                "button.load-more-reviews",
            ],
            item_selector: r#"article[class*="ReviewNew_article"], .tr-review-card, .review-detail, article[role="article"]"#,
            max_iterations: 10,
            wait_timeout: Duration::from_secs(5),
            settle_delay: Duration::from_secs(2),
        }
    }
}

/// Settings for synthetic scrolling that triggers lazy-loaded content
#[derive(Debug, Clone)]
pub struct ScrollConfig {
    pub step_px: u32,
    pub step_delay: Duration,
    pub max_steps: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            step_px: 500,
            step_delay: Duration::from_millis(300),
            max_steps: 50,
        }
    }
}

//! Loops that drive a page until all review content is materialized.
//!
//! Every loop has a hard iteration ceiling. Probe failures (timeouts,
//! missing controls, script errors) end the loop; they are never
//! returned as errors, and the caller extracts whatever is loaded.

use crate::scrapers::traits::PageDriver;
use crate::scrapers::types::{ClickLoadConfig, ScrollConfig};
use tracing::{debug, info};

/// Where a load loop ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Probing,
    /// Ran to its ceiling or finished scrolling
    Loaded,
    /// Activating the control did not add any items
    Stalled,
    /// The control is gone, disabled or hidden
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub state: LoadState,
    /// Successful control activations or scroll steps
    pub steps: usize,
}

/// G2 style loop: wait for the control, click it, and stop once the item count stops growing
pub fn click_until_stable(page: &dyn PageDriver, config: &ClickLoadConfig) -> LoadOutcome {
    let mut state = LoadState::Idle;
    let mut clicks = 0;
    let mut loaded = 0;

    let Some(&control) = config.control_selectors.first() else {
        return LoadOutcome { state: LoadState::Exhausted, steps: 0 };
    };

    for iteration in 1..=config.max_iterations {
        state = LoadState::Probing;

        if let Err(e) = page.wait_for(control, config.wait_timeout) {
            debug!(iteration, error = %e, "Load-more control did not appear");
            state = LoadState::Exhausted;
            break;
        }

        match page.control_ready(control) {
            Ok(true) => {}
            Ok(false) => {
                info!(iteration, "Load-more control no longer visible");
                state = LoadState::Exhausted;
                break;
            }
            Err(e) => {
                debug!(iteration, error = %e, "Load-more probe failed");
                state = LoadState::Exhausted;
                break;
            }
        }

        if let Err(e) = page.click(control) {
            debug!(iteration, error = %e, "Load-more click failed");
            state = LoadState::Exhausted;
            break;
        }
        clicks += 1;
        page.pause(config.settle_delay);

        let count = match page.count(config.item_selector) {
            Ok(count) => count,
            Err(e) => {
                debug!(iteration, error = %e, "Could not count review items");
                state = LoadState::Exhausted;
                break;
            }
        };
        if count <= loaded {
            info!(iteration, count, "Review count did not increase, stopping");
            state = LoadState::Stalled;
            break;
        }
        loaded = count;
        info!(iteration, count, "Loaded more reviews");
    }

    if state == LoadState::Probing {
        state = LoadState::Loaded;
    }
    LoadOutcome { state, steps: clicks }
}

/// TrustRadius style loop: click in page context while a control is ready
pub fn click_while_ready(page: &dyn PageDriver, config: &ClickLoadConfig) -> LoadOutcome {
    let mut state = LoadState::Idle;
    let mut clicks = 0;

    while clicks < config.max_iterations {
        state = LoadState::Probing;
        match page.click_first_ready(&config.control_selectors) {
            Ok(true) => {
                page.pause(config.settle_delay);
                clicks += 1;
                info!(clicks, "Loaded more reviews");
            }
            Ok(false) => {
                info!(clicks, "No visible load-more control, stopping");
                state = LoadState::Exhausted;
                break;
            }
            Err(e) => {
                debug!(clicks, error = %e, "Load-more probe failed");
                state = LoadState::Exhausted;
                break;
            }
        }
    }

    if state == LoadState::Probing {
        state = LoadState::Loaded;
    }
    LoadOutcome { state, steps: clicks }
}

/// Scroll in fixed steps until the bottom is reached or the step cap is hit
pub fn scroll_to_bottom(page: &dyn PageDriver, config: &ScrollConfig) -> LoadOutcome {
    let mut scrolled = 0.0;
    let mut steps = 0;

    while steps < config.max_steps {
        let metrics = match page.scroll_step(config.step_px) {
            Ok(metrics) => metrics,
            Err(e) => {
                debug!(steps, error = %e, "Scroll step failed");
                return LoadOutcome { state: LoadState::Exhausted, steps };
            }
        };
        scrolled += f64::from(config.step_px);
        steps += 1;

        if scrolled >= metrics.scroll_height - metrics.inner_height {
            break;
        }
        page.pause(config.step_delay);
    }

    debug!(steps, scrolled, "Finished scrolling");
    LoadOutcome { state: LoadState::Loaded, steps }
}

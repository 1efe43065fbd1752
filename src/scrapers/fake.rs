//! Scripted page used by loader and pipeline tests.

use crate::scrapers::traits::{PageDriver, ScrollMetrics};
use anyhow::{anyhow, Result};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

pub struct FakePage {
    control: bool,
    click_fails: bool,
    count_fails: bool,
    ready_polls: Cell<Option<usize>>,
    counts: RefCell<VecDeque<usize>>,
    last_count: Cell<usize>,
    scroll: Option<ScrollMetrics>,
    html: String,
    navigations: RefCell<Vec<String>>,
    clicks: Cell<usize>,
    scrolls: Cell<usize>,
    paused: Cell<Duration>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            control: true,
            click_fails: false,
            count_fails: false,
            ready_polls: Cell::new(None),
            counts: RefCell::new(VecDeque::new()),
            last_count: Cell::new(0),
            scroll: None,
            html: String::new(),
            navigations: RefCell::new(Vec::new()),
            clicks: Cell::new(0),
            scrolls: Cell::new(0),
            paused: Cell::new(Duration::ZERO),
        }
    }
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_control(mut self) -> Self {
        self.control = false;
        self
    }

    pub fn failing_click(mut self) -> Self {
        self.click_fails = true;
        self
    }

    pub fn failing_count(mut self) -> Self {
        self.count_fails = true;
        self
    }

    /// Control reports ready this many times, then hidden
    pub fn with_ready_polls(self, polls: usize) -> Self {
        self.ready_polls.set(Some(polls));
        self
    }

    /// Item counts returned after successive clicks
    pub fn with_counts(self, counts: impl IntoIterator<Item = usize>) -> Self {
        self.counts.borrow_mut().extend(counts);
        self
    }

    pub fn with_scroll(mut self, metrics: ScrollMetrics) -> Self {
        self.scroll = Some(metrics);
        self
    }

    pub fn with_html(mut self, html: &str) -> Self {
        self.html = html.to_string();
        self
    }

    pub fn clicks(&self) -> usize {
        self.clicks.get()
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls.get()
    }

    pub fn total_pause(&self) -> Duration {
        self.paused.get()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    fn poll_ready(&self) -> bool {
        if !self.control {
            return false;
        }
        match self.ready_polls.get() {
            None => true,
            Some(0) => false,
            Some(n) => {
                self.ready_polls.set(Some(n - 1));
                true
            }
        }
    }
}

impl PageDriver for FakePage {
    fn navigate(&self, url: &str) -> Result<()> {
        self.navigations.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn wait_for(&self, selector: &str, _timeout: Duration) -> Result<()> {
        if self.control {
            Ok(())
        } else {
            Err(anyhow!("timed out waiting for {selector}"))
        }
    }

    fn click(&self, selector: &str) -> Result<()> {
        if self.click_fails {
            return Err(anyhow!("{selector} is covered by another element"));
        }
        self.clicks.set(self.clicks.get() + 1);
        Ok(())
    }

    fn evaluate(&self, _script: &str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn pause(&self, duration: Duration) {
        self.paused.set(self.paused.get() + duration);
    }

    fn count(&self, selector: &str) -> Result<usize> {
        if self.count_fails {
            return Err(anyhow!("could not count {selector}"));
        }
        if let Some(next) = self.counts.borrow_mut().pop_front() {
            self.last_count.set(next);
        }
        Ok(self.last_count.get())
    }

    fn content(&self) -> Result<String> {
        Ok(self.html.clone())
    }

    fn control_ready(&self, _selector: &str) -> Result<bool> {
        Ok(self.poll_ready())
    }

    fn click_first_ready(&self, _selectors: &[&str]) -> Result<bool> {
        if !self.poll_ready() {
            return Ok(false);
        }
        self.clicks.set(self.clicks.get() + 1);
        Ok(true)
    }

    fn scroll_step(&self, _distance: u32) -> Result<ScrollMetrics> {
        self.scrolls.set(self.scrolls.get() + 1);
        self.scroll.ok_or_else(|| anyhow!("page cannot scroll"))
    }
}

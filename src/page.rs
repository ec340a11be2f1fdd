//! Page capability interface.
//!
//! The extractor and report builder never talk to a browser directly; they
//! talk to a [`Page`], which any driver backend (or an in-memory fake) can
//! implement. [`StaticPage`] is the canned implementation used by the test
//! suite and by anyone embedding the core without a WebDriver endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{FpError, Result};

/// A handle to one matched element on a live page.
#[async_trait]
pub trait PageElement: Send + Sync {
    /// Text of the first descendant matching `selector`, or `None` when the
    /// element has no such descendant.
    async fn first_text(&self, selector: &str) -> Result<Option<String>>;
}

/// A live, navigable page.
#[async_trait]
pub trait Page: Send + Sync {
    type Element: PageElement;

    /// Navigate the page to `url`.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// All elements currently matching the CSS `selector`.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>>;

    /// Run a script in the page and return its result as a string.
    async fn evaluate_script(&self, script: &str) -> Result<String>;

    /// The current document title.
    async fn title(&self) -> Result<String>;

    /// Tear the page down, releasing the underlying session.
    async fn close(self) -> Result<()>;
}

/// One canned feature entry on a [`StaticPage`].
///
/// `label`/`value` of `None` model a list item whose heading or preformatted
/// node is missing, which the extractor must skip.
#[derive(Debug, Clone, Default)]
pub struct StaticEntry {
    pub label: Option<String>,
    pub value: Option<String>,
}

/// In-memory [`Page`] with a fixed set of feature entries.
#[derive(Debug, Default)]
pub struct StaticPage {
    title: String,
    body_text: Option<String>,
    entries: Vec<StaticEntry>,
    visible_after_polls: usize,
    polls: AtomicUsize,
    last_url: Mutex<Option<String>>,
}

impl StaticPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Add a fully-populated feature entry.
    pub fn with_feature(self, label: &str, value: &str) -> Self {
        self.with_entry(Some(label), Some(value))
    }

    /// Add an entry with possibly-missing label/value sub-nodes.
    pub fn with_entry(mut self, label: Option<&str>, value: Option<&str>) -> Self {
        self.entries.push(StaticEntry {
            label: label.map(str::to_owned),
            value: value.map(str::to_owned),
        });
        self
    }

    /// Make `find_all` return nothing for the first `polls` calls, modelling
    /// a page that renders its feature list late.
    pub fn visible_after_polls(mut self, polls: usize) -> Self {
        self.visible_after_polls = polls;
        self
    }

    /// Set the body text returned by script evaluation; without one, script
    /// evaluation fails.
    pub fn with_body_text(mut self, text: &str) -> Self {
        self.body_text = Some(text.to_owned());
        self
    }

    /// How many times `find_all` has been called.
    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    /// The last URL passed to `navigate`, if any.
    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().expect("last_url lock").clone()
    }
}

#[async_trait]
impl Page for StaticPage {
    type Element = StaticEntry;

    async fn navigate(&self, url: &str) -> Result<()> {
        *self.last_url.lock().expect("last_url lock") = Some(url.to_owned());
        Ok(())
    }

    async fn find_all(&self, _selector: &str) -> Result<Vec<StaticEntry>> {
        let seen = self.polls.fetch_add(1, Ordering::SeqCst);
        if seen < self.visible_after_polls {
            return Ok(Vec::new());
        }
        Ok(self.entries.clone())
    }

    async fn evaluate_script(&self, _script: &str) -> Result<String> {
        self.body_text
            .clone()
            .ok_or_else(|| FpError::config("script evaluation failed"))
    }

    async fn title(&self) -> Result<String> {
        Ok(self.title.clone())
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl PageElement for StaticEntry {
    async fn first_text(&self, selector: &str) -> Result<Option<String>> {
        let text = match selector {
            "h3" => self.label.clone(),
            "pre" => self.value.clone(),
            _ => None,
        };
        Ok(text)
    }
}

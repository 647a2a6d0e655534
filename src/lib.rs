//! Deterministic in-process page acceptance testing.
//!
//! `page_acceptance` runs a declarative suite of UI-contract scenarios
//! against mock pages served from an in-memory [`Site`]. Pages are plain
//! HTML parsed into an arena DOM; dynamic behavior is modeled with
//! data-driven [`Reaction`]s bound to events instead of scripts, and time
//! only advances through an explicit simulated clock. The same suite run
//! therefore always produces the same report.
//!
//! ```
//! use page_acceptance::{Browser, PageAcceptanceSuite, PageDef, Site, SuiteConfig};
//!
//! let mut site = Site::new("https://app.local");
//! site.route("/", PageDef::new("<title>My Web Application</title>"));
//!
//! let mut browser = Browser::new(site);
//! let report = PageAcceptanceSuite::standard(SuiteConfig::default()).run(&mut browser);
//! assert!(!report.is_success()); // the bare page fails most contracts
//! ```

use std::collections::{HashMap, HashSet, VecDeque};
use std::error::Error as StdError;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    StyleParse(String),
    UnsupportedSelector(String),
    SelectorNotFound(String),
    PageLoad(String),
    ActionFailed {
        selector: String,
        action: String,
        reason: String,
    },
    AssertionFailed {
        subject: String,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::StyleParse(msg) => write!(f, "style parse error: {msg}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::PageLoad(path) => write!(f, "page failed to load: {path}"),
            Self::ActionFailed {
                selector,
                action,
                reason,
            } => write!(f, "{action} failed for {selector}: {reason}"),
            Self::AssertionFailed {
                subject,
                expected,
                actual,
            } => write!(
                f,
                "assertion failed for {subject}: expected {expected}, actual {actual}"
            ),
        }
    }
}

impl StdError for Error {}

mod browser;
mod dom;
mod html;
mod page;
mod scenarios;
mod selector;
mod style;
mod suite;

pub(crate) use dom::*;
pub(crate) use html::*;
pub(crate) use page::*;
pub(crate) use selector::*;
pub(crate) use style::*;

pub use browser::{Browser, ImageStatus, Site, TraceLog};
pub use page::{Binding, PageDef, PageTimer, Reaction};
pub use scenarios::{
    contact_form_contract, footer_contract, image_load_contract, main_content_contract,
    navigation_contract, responsive_contract, search_contract, title_contract,
};
pub use style::{Viewport, ViewportPreset};
pub use suite::{
    ContactSample, FailureKind, Outcome, PageAcceptanceSuite, Scenario, ScenarioFn,
    ScenarioReport, SuiteConfig, SuiteReport,
};

#[cfg(test)]
mod tests;

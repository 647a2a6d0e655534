use super::*;

/// The pages and resources a [`Browser`] can reach. Routes map paths to
/// page fixtures; the image registry maps `src` values to the natural
/// width the resource decodes to (anything unregistered is broken).
#[derive(Debug, Clone)]
pub struct Site {
    pub(crate) base: String,
    pub(crate) routes: HashMap<String, PageDef>,
    pub(crate) images: HashMap<String, u32>,
}

impl Site {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            routes: HashMap::new(),
            images: HashMap::new(),
        }
    }

    pub fn route(&mut self, path: impl Into<String>, def: PageDef) -> &mut Self {
        self.routes.insert(path.into(), def);
        self
    }

    pub fn image(&mut self, src: impl Into<String>, natural_width: u32) -> &mut Self {
        self.images.insert(src.into(), natural_width);
        self
    }

    fn page_def(&self, path: &str) -> Option<&PageDef> {
        let bare = path.split('?').next().unwrap_or(path);
        self.routes.get(bare)
    }

    fn natural_width_of(&self, src: &str) -> u32 {
        if src.is_empty() {
            return 0;
        }
        self.images.get(src).copied().unwrap_or(0)
    }
}

/// Bounded trace of browser activity, for diagnosing failing scenarios.
#[derive(Debug)]
pub struct TraceLog {
    enabled: bool,
    logs: VecDeque<String>,
    log_limit: usize,
    to_stderr: bool,
}

impl Default for TraceLog {
    fn default() -> Self {
        Self {
            enabled: false,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: false,
        }
    }
}

impl TraceLog {
    fn line(&mut self, line: String) {
        if !self.enabled {
            return;
        }
        if self.to_stderr {
            eprintln!("{line}");
        }
        if self.logs.len() == self.log_limit {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    pub fn take(&mut self) -> Vec<String> {
        self.logs.drain(..).collect()
    }
}

/// Load state of one `<img>` on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStatus {
    pub src: String,
    pub visible: bool,
    pub natural_width: u32,
}

/// The deterministic runner: one current page, an emulated viewport, and
/// a simulated clock that only advances through [`Browser::wait`].
#[derive(Debug)]
pub struct Browser {
    site: Site,
    page: Option<Page>,
    viewport: Viewport,
    trace: TraceLog,
}

impl Browser {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            page: None,
            // Default desktop window of the emulated runner.
            viewport: Viewport::new(1000, 660),
            trace: TraceLog::default(),
        }
    }

    pub fn set_trace_enabled(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.take()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: impl Into<Viewport>) {
        self.viewport = viewport.into();
        self.trace.line(format!(
            "[viewport] {}x{}",
            self.viewport.width, self.viewport.height
        ));
    }

    /// Load a fresh page for `path`. Rebuilding from the page definition
    /// guarantees nothing leaks between visits.
    pub fn visit(&mut self, path: &str) -> Result<()> {
        let def = self
            .site
            .page_def(path)
            .ok_or_else(|| Error::PageLoad(path.to_string()))?
            .clone();
        let page = Page::build(&def, &self.site.base, path)?;
        self.page = Some(page);
        self.trace.line(format!("[visit] {path}"));
        Ok(())
    }

    /// Advance the simulated clock, firing any page timers that come due.
    pub fn wait(&mut self, ms: i64) -> Result<()> {
        let fired = self.page_mut()?.advance_time(ms)?;
        let now = self.page()?.now_ms;
        self.trace
            .line(format!("[timer] waited={ms} fired={fired} now={now}"));
        Ok(())
    }

    pub fn title(&self) -> Result<String> {
        Ok(self.page()?.title())
    }

    pub fn url(&self) -> Result<String> {
        Ok(self.page()?.url.href())
    }

    pub fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.page()?.dom.query_selector(selector)?.is_some())
    }

    pub fn is_visible(&self, selector: &str) -> Result<bool> {
        let page = self.page()?;
        let node = page
            .dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))?;
        Ok(page.stylesheet.is_visible(&page.dom, node, self.viewport))
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let page = self.page()?;
        let node = self.select_one(selector)?;
        Ok(page.dom.text_content(node))
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let page = self.page()?;
        let node = self.select_one(selector)?;
        Ok(page.dom.value(node))
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.trace.line(format!("[click] {selector}"));
        self.click_node(target, selector)
    }

    /// Click the most specific element within `scope` whose text contains
    /// `text`. Visible matches win over hidden ones.
    pub fn click_contains(&mut self, scope: &str, text: &str) -> Result<()> {
        let scope_node = self.select_one(scope)?;
        let page = self.page()?;
        let matches = page.dom.find_by_text(scope_node, text);
        let target = matches
            .iter()
            .copied()
            .find(|node| page.stylesheet.is_visible(&page.dom, *node, self.viewport))
            .or_else(|| matches.first().copied())
            .ok_or_else(|| Error::SelectorNotFound(format!("{scope} text '{text}'")))?;
        self.trace.line(format!("[click] {scope} '{text}'"));
        self.click_node(target, &format!("{scope} '{text}'"))
    }

    fn click_node(&mut self, target: NodeId, described_as: &str) -> Result<()> {
        let page = self.page()?;
        if page
            .dom
            .element(target)
            .is_some_and(|element| element.disabled)
        {
            return Err(Error::ActionFailed {
                selector: described_as.to_string(),
                action: "click".into(),
                reason: "element is disabled".into(),
            });
        }

        let tag = page
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        let submit_form = if is_submit_control(&page.dom, target, &tag) {
            page.dom.find_ancestor_by_tag(target, "form")
        } else {
            None
        };
        let href = if tag == "a" {
            page.dom.attr(target, "href")
        } else {
            None
        };

        let page = self.page_mut()?;
        let mut reactions = page.dispatch(target, "click")?;
        if let Some(form) = submit_form {
            reactions += page.dispatch(form, "submit")?;
        }

        // Anchors keep their default navigation only when no bound
        // reaction consumed the click.
        if reactions == 0 && page.pending_navigation.is_none() {
            if let Some(href) = href {
                if href.starts_with('/') {
                    page.pending_navigation = Some(href);
                }
            }
        }

        if let Some(path) = self.page_mut()?.pending_navigation.take() {
            self.visit(&path)?;
        }
        Ok(())
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let page = self.page()?;
        let tag = page
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        if tag != "input" && tag != "textarea" {
            return Err(Error::ActionFailed {
                selector: selector.to_string(),
                action: "type".into(),
                reason: format!("expected input or textarea, found {tag}"),
            });
        }
        let element = page.dom.element(target);
        if element.is_some_and(|element| element.disabled)
            || page.dom.attr(target, "readonly").is_some()
        {
            return Err(Error::ActionFailed {
                selector: selector.to_string(),
                action: "type".into(),
                reason: "element does not accept input".into(),
            });
        }

        let page = self.page_mut()?;
        page.dom.set_value(target, text)?;
        page.dispatch(target, "input")?;
        self.trace.line(format!("[type] {selector} {text:?}"));
        Ok(())
    }

    /// Load state of every `<img>` on the page, in document order.
    pub fn images(&self) -> Result<Vec<ImageStatus>> {
        let page = self.page()?;
        let nodes = page.dom.query_selector_all("img")?;
        Ok(nodes
            .into_iter()
            .map(|node| {
                let src = page.dom.attr(node, "src").unwrap_or_default();
                ImageStatus {
                    visible: page.stylesheet.is_visible(&page.dom, node, self.viewport),
                    natural_width: self.site.natural_width_of(&src),
                    src,
                }
            })
            .collect())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        if self.exists(selector)? {
            Ok(())
        } else {
            Err(Error::SelectorNotFound(selector.to_string()))
        }
    }

    pub fn assert_visible(&self, selector: &str) -> Result<()> {
        if self.is_visible(selector)? {
            Ok(())
        } else {
            Err(Error::AssertionFailed {
                subject: selector.to_string(),
                expected: "visible".into(),
                actual: "hidden".into(),
            })
        }
    }

    pub fn assert_not_visible(&self, selector: &str) -> Result<()> {
        if self.is_visible(selector)? {
            Err(Error::AssertionFailed {
                subject: selector.to_string(),
                expected: "hidden".into(),
                actual: "visible".into(),
            })
        } else {
            Ok(())
        }
    }

    /// The scope must contain the text somewhere, visible or not.
    pub fn assert_contains(&self, scope: &str, text: &str) -> Result<()> {
        let scope_node = self.select_one(scope)?;
        let page = self.page()?;
        if page.dom.find_by_text(scope_node, text).is_empty() {
            return Err(Error::AssertionFailed {
                subject: scope.to_string(),
                expected: format!("text containing {text:?}"),
                actual: summarize(&page.dom.text_content(scope_node)),
            });
        }
        Ok(())
    }

    /// The scope must contain the text on an element that is visible.
    pub fn assert_contains_visible(&self, scope: &str, text: &str) -> Result<()> {
        let scope_node = self.select_one(scope)?;
        let page = self.page()?;
        let matches = page.dom.find_by_text(scope_node, text);
        if matches.is_empty() {
            return Err(Error::AssertionFailed {
                subject: scope.to_string(),
                expected: format!("text containing {text:?}"),
                actual: summarize(&page.dom.text_content(scope_node)),
            });
        }
        if matches
            .iter()
            .any(|node| page.stylesheet.is_visible(&page.dom, *node, self.viewport))
        {
            Ok(())
        } else {
            Err(Error::AssertionFailed {
                subject: scope.to_string(),
                expected: format!("visible text containing {text:?}"),
                actual: "matching text is hidden".into(),
            })
        }
    }

    pub fn assert_title_contains(&self, needle: &str) -> Result<()> {
        let title = self.title()?;
        if text_contains(&title, needle) {
            Ok(())
        } else {
            Err(Error::AssertionFailed {
                subject: "title".into(),
                expected: format!("contains {needle:?}"),
                actual: summarize(&title),
            })
        }
    }

    pub fn assert_url_contains(&self, needle: &str) -> Result<()> {
        let url = self.url()?;
        if url.contains(needle) {
            Ok(())
        } else {
            Err(Error::AssertionFailed {
                subject: "url".into(),
                expected: format!("contains {needle:?}"),
                actual: url,
            })
        }
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.page()?
            .dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn page(&self) -> Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| Error::PageLoad("no page loaded".into()))
    }

    fn page_mut(&mut self) -> Result<&mut Page> {
        self.page
            .as_mut()
            .ok_or_else(|| Error::PageLoad("no page loaded".into()))
    }
}

fn is_submit_control(dom: &Dom, node_id: NodeId, tag: &str) -> bool {
    match tag {
        "button" => dom
            .attr(node_id, "type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(true),
        "input" => dom
            .attr(node_id, "type")
            .is_some_and(|kind| kind.eq_ignore_ascii_case("submit")),
        _ => false,
    }
}

fn summarize(text: &str) -> String {
    let compact = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.chars().count() > 80 {
        let clipped: String = compact.chars().take(80).collect();
        format!("{clipped}...")
    } else {
        compact
    }
}

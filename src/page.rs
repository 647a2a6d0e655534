use super::*;

/// Declarative page behavior. Pages carry no scripts; anything a real page
/// would do in an event handler is expressed as data so a page definition
/// stays cloneable and every rebuild starts from the same state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Remove `hidden` and force `display: block` on every match.
    Show(String),
    /// Force `display: none` on every match.
    Hide(String),
    SetText {
        selector: String,
        text: String,
    },
    SetAttr {
        selector: String,
        name: String,
        value: String,
    },
    RemoveAttr {
        selector: String,
        name: String,
    },
    /// Set a literal query parameter on the current URL.
    SetQueryParam {
        param: String,
        value: String,
    },
    /// Copy the current value of an input into a query parameter, the way
    /// a search box updates the location on submit.
    QueryParamFromInput {
        param: String,
        input: String,
    },
    Navigate(String),
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub event: String,
    pub selector: String,
    pub reactions: Vec<Reaction>,
}

/// Reactions that fire once a fixed delay after page load, standing in for
/// content that arrives asynchronously while a settling delay runs.
#[derive(Debug, Clone)]
pub struct PageTimer {
    pub delay_ms: i64,
    pub reactions: Vec<Reaction>,
}

/// A reusable page fixture. Cloneable so every `visit` rebuilds a fresh
/// page; nothing survives a reload.
#[derive(Debug, Clone)]
pub struct PageDef {
    pub(crate) html: String,
    pub(crate) bindings: Vec<Binding>,
    pub(crate) timers: Vec<PageTimer>,
}

impl PageDef {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            bindings: Vec::new(),
            timers: Vec::new(),
        }
    }

    pub fn bind(
        &mut self,
        event: impl Into<String>,
        selector: impl Into<String>,
        reactions: Vec<Reaction>,
    ) -> &mut Self {
        self.bindings.push(Binding {
            event: event.into(),
            selector: selector.into(),
            reactions,
        });
        self
    }

    pub fn after(&mut self, delay_ms: i64, reactions: Vec<Reaction>) -> &mut Self {
        self.timers.push(PageTimer {
            delay_ms,
            reactions,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageUrl {
    pub(crate) base: String,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
}

impl PageUrl {
    pub(crate) fn new(base: &str, path: &str) -> Self {
        let (path, query) = match path.split_once('?') {
            Some((path, raw_query)) => (path.to_string(), parse_query_pairs(raw_query)),
            None => (path.to_string(), Vec::new()),
        };
        Self {
            base: base.trim_end_matches('/').to_string(),
            path,
            query,
        }
    }

    pub(crate) fn set_query_param(&mut self, param: &str, value: &str) {
        if let Some(pair) = self.query.iter_mut().find(|(key, _)| key == param) {
            pair.1 = value.to_string();
        } else {
            self.query.push((param.to_string(), value.to_string()));
        }
    }

    pub(crate) fn href(&self) -> String {
        let mut out = format!("{}{}", self.base, self.path);
        if !self.query.is_empty() {
            let encoded = self
                .query
                .iter()
                .map(|(key, value)| {
                    format!(
                        "{}={}",
                        url_encode_component(key),
                        url_encode_component(value)
                    )
                })
                .collect::<Vec<_>>()
                .join("&");
            out.push('?');
            out.push_str(&encoded);
        }
        out
    }
}

fn parse_query_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (
                url_decode_component(key),
                url_decode_component(value),
            ),
            None => (url_decode_component(pair), String::new()),
        })
        .collect()
}

/// Percent-encoding with the RFC 3986 unreserved set; spaces become `%20`,
/// not `+`.
pub(crate) fn url_encode_component(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for byte in src.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            other => {
                out.push('%');
                out.push_str(&format!("{other:02X}"));
            }
        }
    }
    out
}

pub(crate) fn url_decode_component(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 3 <= bytes.len() {
            if let Some(hex) = src.get(i + 1..i + 3) {
                if let Ok(byte) = u8::from_str_radix(hex, 16) {
                    decoded.push(byte);
                    i += 3;
                    continue;
                }
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

#[derive(Debug, Clone)]
struct ScheduledTimer {
    due_ms: i64,
    order: usize,
    reactions: Vec<Reaction>,
}

/// A loaded page: DOM, stylesheet, location, bindings, and pending timers.
#[derive(Debug)]
pub(crate) struct Page {
    pub(crate) dom: Dom,
    pub(crate) stylesheet: Stylesheet,
    pub(crate) url: PageUrl,
    pub(crate) bindings: Vec<Binding>,
    timers: Vec<ScheduledTimer>,
    pub(crate) now_ms: i64,
    pub(crate) pending_navigation: Option<String>,
}

impl Page {
    pub(crate) fn build(def: &PageDef, base: &str, path: &str) -> Result<Self> {
        let ParseOutput { dom, styles } = parse_html(&def.html)?;
        let stylesheet = Stylesheet::parse(&styles)?;
        let timers = def
            .timers
            .iter()
            .enumerate()
            .map(|(order, timer)| ScheduledTimer {
                due_ms: timer.delay_ms.max(0),
                order,
                reactions: timer.reactions.clone(),
            })
            .collect();
        Ok(Self {
            dom,
            stylesheet,
            url: PageUrl::new(base, path),
            bindings: def.bindings.clone(),
            timers,
            now_ms: 0,
            pending_navigation: None,
        })
    }

    pub(crate) fn title(&self) -> String {
        match self.dom.query_selector("title") {
            Ok(Some(node)) => self.dom.text_content(node),
            _ => String::new(),
        }
    }

    /// Advance the page clock, firing due timers in (due, insertion) order.
    pub(crate) fn advance_time(&mut self, delta_ms: i64) -> Result<usize> {
        let target = self.now_ms.saturating_add(delta_ms.max(0));
        let mut fired = 0usize;

        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, timer)| timer.due_ms <= target)
                .min_by_key(|(_, timer)| (timer.due_ms, timer.order))
                .map(|(index, _)| index);
            let Some(index) = next else {
                break;
            };
            let timer = self.timers.remove(index);
            self.now_ms = self.now_ms.max(timer.due_ms);
            for reaction in &timer.reactions {
                self.apply_reaction(reaction)?;
            }
            fired += 1;
        }

        self.now_ms = target;
        Ok(fired)
    }

    /// Dispatch an event at `target`, bubbling from the target to the root.
    /// Returns how many reactions ran.
    pub(crate) fn dispatch(&mut self, target: NodeId, event: &str) -> Result<usize> {
        let mut chain = vec![target];
        let mut cursor = self.dom.parent(target);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.dom.parent(current);
        }

        let mut to_run = Vec::new();
        for node in chain {
            for binding in &self.bindings {
                if binding.event != event {
                    continue;
                }
                if self.dom.matches_selector(node, &binding.selector)? {
                    to_run.extend(binding.reactions.iter().cloned());
                }
            }
        }

        for reaction in &to_run {
            self.apply_reaction(reaction)?;
        }
        Ok(to_run.len())
    }

    fn apply_reaction(&mut self, reaction: &Reaction) -> Result<()> {
        match reaction {
            Reaction::Show(selector) => {
                for node in self.select_all_nonempty(selector)? {
                    self.dom.remove_attr(node, "hidden")?;
                    self.dom.style_set(node, "display", "block")?;
                }
            }
            Reaction::Hide(selector) => {
                for node in self.select_all_nonempty(selector)? {
                    self.dom.style_set(node, "display", "none")?;
                }
            }
            Reaction::SetText { selector, text } => {
                for node in self.select_all_nonempty(selector)? {
                    self.dom.set_text_content(node, text)?;
                }
            }
            Reaction::SetAttr {
                selector,
                name,
                value,
            } => {
                for node in self.select_all_nonempty(selector)? {
                    self.dom.set_attr(node, name, value)?;
                }
            }
            Reaction::RemoveAttr { selector, name } => {
                for node in self.select_all_nonempty(selector)? {
                    self.dom.remove_attr(node, name)?;
                }
            }
            Reaction::SetQueryParam { param, value } => {
                self.url.set_query_param(param, value);
            }
            Reaction::QueryParamFromInput { param, input } => {
                let node = self
                    .dom
                    .query_selector(input)?
                    .ok_or_else(|| Error::SelectorNotFound(input.clone()))?;
                let value = self.dom.value(node);
                self.url.set_query_param(param, &value);
            }
            Reaction::Navigate(path) => {
                self.pending_navigation = Some(path.clone());
            }
        }
        Ok(())
    }

    fn select_all_nonempty(&self, selector: &str) -> Result<Vec<NodeId>> {
        let nodes = self.dom.query_selector_all(selector)?;
        if nodes.is_empty() {
            return Err(Error::SelectorNotFound(selector.to_string()));
        }
        Ok(nodes)
    }
}

use super::*;

/// Emulated viewport dimensions, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Named device presets matching the common runner vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportPreset {
    IphoneX,
    Ipad2,
    MacbookThirteen,
}

impl ViewportPreset {
    pub fn dimensions(self) -> Viewport {
        match self {
            Self::IphoneX => Viewport::new(375, 812),
            Self::Ipad2 => Viewport::new(768, 1024),
            Self::MacbookThirteen => Viewport::new(1280, 800),
        }
    }
}

impl From<ViewportPreset> for Viewport {
    fn from(preset: ViewportPreset) -> Self {
        preset.dimensions()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MediaCondition {
    pub(crate) min_width: Option<u32>,
    pub(crate) max_width: Option<u32>,
}

impl MediaCondition {
    pub(crate) fn matches(&self, viewport: Viewport) -> bool {
        if let Some(min) = self.min_width {
            if viewport.width < min {
                return false;
            }
        }
        if let Some(max) = self.max_width {
            if viewport.width > max {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StyleRule {
    pub(crate) media: Option<MediaCondition>,
    pub(crate) selectors: Vec<Vec<SelectorPart>>,
    pub(crate) declarations: Vec<(String, String)>,
}

impl StyleRule {
    fn display(&self) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|(prop, _)| prop == "display")
            .map(|(_, value)| value.as_str())
    }
}

/// Document stylesheet, flattened into rules in source order. Only the
/// `display` property participates in visibility; everything else is
/// carried but inert.
#[derive(Debug, Clone, Default)]
pub(crate) struct Stylesheet {
    pub(crate) rules: Vec<StyleRule>,
}

impl Stylesheet {
    pub(crate) fn parse(sources: &[String]) -> Result<Self> {
        let mut rules = Vec::new();
        for source in sources {
            parse_style_block(source, None, &mut rules)?;
        }
        Ok(Self { rules })
    }

    /// Resolved `display` for a node under the given viewport. Inline
    /// style wins over stylesheet rules; among stylesheet rules the last
    /// matching one in source order wins.
    pub(crate) fn effective_display(
        &self,
        dom: &Dom,
        node_id: NodeId,
        viewport: Viewport,
    ) -> Option<String> {
        if let Some(element) = dom.element(node_id) {
            let inline = parse_style_declarations(element.attrs.get("style").map(String::as_str));
            if let Some((_, value)) = inline.iter().rev().find(|(prop, _)| prop == "display") {
                return Some(value.clone());
            }
        }

        let mut resolved = None;
        for rule in &self.rules {
            if let Some(condition) = &rule.media {
                if !condition.matches(viewport) {
                    continue;
                }
            }
            if rule
                .selectors
                .iter()
                .any(|chain| dom.matches_selector_chain(node_id, chain))
            {
                if let Some(display) = rule.display() {
                    resolved = Some(display.to_string());
                }
            }
        }
        resolved
    }

    /// An element is visible when neither it nor any ancestor is hidden,
    /// either through the `hidden` attribute or a resolved `display: none`.
    pub(crate) fn is_visible(&self, dom: &Dom, node_id: NodeId, viewport: Viewport) -> bool {
        if dom.element(node_id).is_none() {
            return false;
        }

        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if let Some(element) = dom.element(current) {
                if element.attrs.contains_key("hidden") {
                    return false;
                }
                if self
                    .effective_display(dom, current, viewport)
                    .is_some_and(|display| display == "none")
                {
                    return false;
                }
            }
            cursor = dom.parent(current);
        }
        true
    }
}

fn parse_style_block(
    source: &str,
    media: Option<&MediaCondition>,
    rules: &mut Vec<StyleRule>,
) -> Result<()> {
    let bytes = source.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        if source[i..].starts_with("/*") {
            match source[i + 2..].find("*/") {
                Some(end) => {
                    i += 2 + end + 2;
                    continue;
                }
                None => return Err(Error::StyleParse("unclosed comment".into())),
            }
        }

        let Some(open) = source[i..].find('{') else {
            // Trailing junk without a block; browsers drop it.
            break;
        };
        let prelude = source[i..i + open].trim().to_string();
        let body_start = i + open + 1;
        let body_end = find_matching_brace(bytes, body_start)
            .ok_or_else(|| Error::StyleParse(format!("unclosed block after '{prelude}'")))?;
        let body = &source[body_start..body_end];
        i = body_end + 1;

        if let Some(condition_src) = prelude.strip_prefix("@media") {
            if media.is_some() {
                return Err(Error::StyleParse("nested @media is not supported".into()));
            }
            let condition = parse_media_condition(condition_src)?;
            parse_style_block(body, Some(&condition), rules)?;
            continue;
        }

        if prelude.starts_with('@') {
            // Other at-rules (@import, @font-face, ...) are inert here.
            continue;
        }

        // Selectors the engine does not support make the whole rule inert,
        // matching how browsers drop rules with unknown selectors.
        let Ok(selectors) = parse_selector_groups(&prelude) else {
            continue;
        };
        let declarations = parse_style_declarations(Some(body));
        rules.push(StyleRule {
            media: media.cloned(),
            selectors,
            declarations,
        });
    }

    Ok(())
}

fn find_matching_brace(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn parse_media_condition(src: &str) -> Result<MediaCondition> {
    let mut condition = MediaCondition::default();

    for clause in src.split("and") {
        let clause = clause.trim();
        if clause.is_empty() || clause == "screen" || clause == "all" {
            continue;
        }
        let inner = clause
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| Error::StyleParse(format!("bad media clause: {clause}")))?;
        let (feature, value) = inner
            .split_once(':')
            .ok_or_else(|| Error::StyleParse(format!("bad media feature: {inner}")))?;
        let pixels = parse_px(value.trim())
            .ok_or_else(|| Error::StyleParse(format!("bad media length: {value}")))?;
        match feature.trim() {
            "min-width" => condition.min_width = Some(pixels),
            "max-width" => condition.max_width = Some(pixels),
            other => return Err(Error::StyleParse(format!("unsupported feature: {other}"))),
        }
    }

    Ok(condition)
}

fn parse_px(value: &str) -> Option<u32> {
    value.strip_suffix("px")?.trim().parse().ok()
}

impl Dom {
    pub(crate) fn style_get(&self, node_id: NodeId, prop: &str) -> Option<String> {
        let element = self.element(node_id)?;
        let decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        decls
            .iter()
            .rev()
            .find(|(name, _)| name == prop)
            .map(|(_, value)| value.clone())
    }

    pub(crate) fn style_set(&mut self, node_id: NodeId, prop: &str, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::ActionFailed {
                selector: format!("node {}", node_id.0),
                action: "set style".into(),
                reason: "target is not an element".into(),
            })?;

        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if let Some(pos) = decls.iter().position(|(name, _)| name == prop) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((prop.to_string(), value.to_string()));
        }

        element
            .attrs
            .insert("style".to_string(), serialize_style_declarations(&decls));
        Ok(())
    }
}

pub(crate) fn parse_style_declarations(style: Option<&str>) -> Vec<(String, String)> {
    let Some(style) = style else {
        return Vec::new();
    };

    let mut declarations = Vec::new();
    for declaration in style.split(';') {
        let Some((prop, value)) = declaration.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim().to_string();
        if !prop.is_empty() && !value.is_empty() {
            declarations.push((prop, value));
        }
    }
    declarations
}

pub(crate) fn serialize_style_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(prop, value)| format!("{prop}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

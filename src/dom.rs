//! Page surface the insight poller renders into.
//!
//! [`Page`] is the handful of DOM operations the poller needs. [`Document`]
//! is an in-memory implementation used by the watch binary and the tests.

use crate::models::{AlertNotice, Placement};
use std::collections::BTreeMap;

pub const TOOLTIP_MARKER_ATTR: &str = "data-bs-toggle";
pub const TOOLTIP_MARKER_VALUE: &str = "tooltip";
pub const TOOLTIP_TITLE_ATTR: &str = "title";
pub const TOOLTIP_PLACEMENT_ATTR: &str = "data-bs-placement";

/// One rendered, dismissible alert.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub detail: String,
    pub kind: String,
}

impl Notice {
    pub fn from_alert(alert: &AlertNotice) -> Self {
        Self {
            message: alert.message.clone(),
            detail: alert.tooltip.clone(),
            kind: alert.kind.clone().unwrap_or_else(|| "info".to_string()),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="alert alert-{kind} alert-dismissible fade show" role="alert"><strong>{message}</strong><small class="d-block">{detail}</small><button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button></div>"#,
            kind = escape(&self.kind),
            message = escape(&self.message),
            detail = escape(&self.detail),
        )
    }
}

/// A live tooltip behavior attached to an element.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipInstance {
    pub message: String,
    pub placement: Placement,
}

pub trait Page: Send {
    fn contains(&self, id: &str) -> bool;

    /// Ids of elements carrying the tooltip-trigger marker.
    fn tooltip_triggers(&self) -> Vec<String>;

    /// Creates the fixed-position container `id` unless it exists.
    /// Returns true when a new container was created.
    fn ensure_container(&mut self, id: &str) -> bool;

    /// Marks `id` as tooltip-enabled with `message` and `placement`.
    fn mark_tooltip(&mut self, id: &str, message: &str, placement: Placement) -> bool;

    fn dispose_tooltip(&mut self, id: &str);

    /// Attaches tooltip behavior built from the element's current marks.
    fn attach_tooltip(&mut self, id: &str) -> bool;

    /// Replaces every child of container `id`. False if it does not exist.
    fn replace_notices(&mut self, id: &str, notices: Vec<Notice>) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub attributes: BTreeMap<String, String>,
    pub tooltips: Vec<TooltipInstance>,
    pub notices: Vec<Notice>,
    pub fixed: bool,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn is_tooltip_trigger(&self) -> bool {
        self.attr(TOOLTIP_MARKER_ATTR) == Some(TOOLTIP_MARKER_VALUE)
    }

    pub fn active_tooltip(&self) -> Option<&TooltipInstance> {
        self.tooltips.last()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: BTreeMap<String, Element>,
    containers_created: usize,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, element: Element) {
        self.elements.insert(id.into(), element);
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn containers_created(&self) -> usize {
        self.containers_created
    }

    pub fn notices(&self, id: &str) -> &[Notice] {
        self.elements.get(id).map(|el| el.notices.as_slice()).unwrap_or_default()
    }

    /// Inner HTML of container `id`, if present.
    pub fn container_html(&self, id: &str) -> Option<String> {
        self.elements
            .get(id)
            .map(|el| el.notices.iter().map(Notice::to_html).collect())
    }
}

impl Page for Document {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn tooltip_triggers(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter(|(_, el)| el.is_tooltip_trigger())
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn ensure_container(&mut self, id: &str) -> bool {
        if self.elements.contains_key(id) {
            return false;
        }
        self.elements.insert(
            id.to_string(),
            Element {
                fixed: true,
                ..Element::default()
            },
        );
        self.containers_created += 1;
        true
    }

    fn mark_tooltip(&mut self, id: &str, message: &str, placement: Placement) -> bool {
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        let attrs = &mut el.attributes;
        attrs.insert(TOOLTIP_MARKER_ATTR.to_string(), TOOLTIP_MARKER_VALUE.to_string());
        attrs.insert(TOOLTIP_TITLE_ATTR.to_string(), message.to_string());
        attrs.insert(TOOLTIP_PLACEMENT_ATTR.to_string(), placement.as_str().to_string());
        true
    }

    fn dispose_tooltip(&mut self, id: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.tooltips.clear();
        }
    }

    fn attach_tooltip(&mut self, id: &str) -> bool {
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        let instance = TooltipInstance {
            message: el.attr(TOOLTIP_TITLE_ATTR).unwrap_or_default().to_string(),
            placement: el
                .attr(TOOLTIP_PLACEMENT_ATTR)
                .and_then(Placement::parse)
                .unwrap_or_default(),
        };
        el.tooltips.push(instance);
        true
    }

    fn replace_notices(&mut self, id: &str, notices: Vec<Notice>) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.notices = notices;
                true
            }
            None => false,
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_container_is_idempotent() {
        let mut doc = Document::new();
        assert!(doc.ensure_container("agent-alerts"));
        assert!(!doc.ensure_container("agent-alerts"));
        assert_eq!(doc.containers_created(), 1);
        assert!(doc.element("agent-alerts").unwrap().fixed);
    }

    #[test]
    fn attach_reads_marked_attributes() {
        let mut doc = Document::new();
        doc.insert("e1", Element::default());
        assert!(doc.mark_tooltip("e1", "Low water pressure", Placement::Bottom));
        assert!(doc.attach_tooltip("e1"));

        let el = doc.element("e1").unwrap();
        assert!(el.is_tooltip_trigger());
        assert_eq!(
            el.active_tooltip(),
            Some(&TooltipInstance {
                message: "Low water pressure".into(),
                placement: Placement::Bottom,
            })
        );
    }

    #[test]
    fn missing_elements_are_reported() {
        let mut doc = Document::new();
        assert!(!doc.mark_tooltip("nope", "m", Placement::Top));
        assert!(!doc.attach_tooltip("nope"));
        assert!(!doc.replace_notices("nope", Vec::new()));
        doc.dispose_tooltip("nope");
    }

    #[test]
    fn notice_html_is_escaped() {
        let notice = Notice {
            message: "<b>High</b> use".into(),
            detail: "Tom & Jerry's".into(),
            kind: "warning".into(),
        };
        let html = notice.to_html();
        assert!(html.contains("alert-warning alert-dismissible"));
        assert!(html.contains("&lt;b&gt;High&lt;/b&gt; use"));
        assert!(html.contains("Tom &amp; Jerry&#39;s"));
        assert!(html.contains(r#"data-bs-dismiss="alert""#));
    }
}

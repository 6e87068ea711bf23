//! Page chrome: behavior shared by every page of the application.
//!
//! Each piece is headless. Elements are plain values and time is passed in
//! explicitly as Unix milliseconds, so a host can drive them from any clock.

pub mod alert;
pub mod busy_button;
pub mod fade_in;
pub mod form;

use std::collections::BTreeMap;

pub use alert::{ALERT_LIFETIME_MS, Alert, AlertKind, AlertTray};
pub use busy_button::{BUSY_DURATION_MS, BusyButton, LOADING_LABEL};
pub use fade_in::{FadeInObserver, Rect, intersection_ratio};
pub use form::{FormField, FormValidation, mask_phone_input, validate_form};

/// Attribute that marks an element as a tooltip trigger
pub const TOOLTIP_TOGGLE_ATTR: &str = "data-bs-toggle";

/// A page element as far as the chrome cares: an id and its attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    attributes: BTreeMap<String, String>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub target_id: String,
    pub title: String,
}

/// Create a tooltip for every element flagged with `data-bs-toggle="tooltip"`
pub fn activate_tooltips(elements: &[Element]) -> Vec<Tooltip> {
    elements
        .iter()
        .filter(|e| e.attr(TOOLTIP_TOGGLE_ATTR) == Some("tooltip"))
        .map(|e| Tooltip {
            target_id: e.id.clone(),
            title: e
                .attr("title")
                .or_else(|| e.attr("data-bs-title"))
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}

/// Target id for a same-page fragment link (`#section`).
///
/// A bare `#` and anything that is not a fragment are left to the browser.
pub fn smooth_scroll_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|target| !target.is_empty())
}

//! Platform tabs (frontend / backend / mobile panels of the taxonomy section).
//!
//! Exactly one tab is active at a time. The DOM side toggles the `active`
//! class on every button and panel from [`TabGroup::is_active`] after each
//! selection, so the group is the single source of truth.

use crate::analytics::{emit, Analytics, AnalyticsEvent};

/// CSS class marking the active tab button and platform panel.
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// `data-platform` value, also the id of the panel it shows.
    pub platform: String,
    /// Button text.
    pub label: String,
}

impl Tab {
    pub fn new(platform: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TabGroup {
    tabs: Vec<Tab>,
    active: Option<usize>,
}

impl TabGroup {
    /// The first tab starts active (none if `tabs` is empty).
    pub fn new(tabs: Vec<Tab>) -> Self {
        let active = if tabs.is_empty() { None } else { Some(0) };
        Self { tabs, active }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn is_active(&self, platform: &str) -> bool {
        self.active().is_some_and(|tab| tab.platform == platform)
    }

    /// Activate `platform` without reporting anything. Used to adopt the
    /// state the page was rendered with.
    pub fn set_active(&mut self, platform: &str) -> bool {
        match self.tabs.iter().position(|tab| tab.platform == platform) {
            Some(position) => {
                self.active = Some(position);
                true
            }
            None => false,
        }
    }

    /// Activate `platform` and report `tab_switch`.
    ///
    /// Unknown platforms are ignored. Re-selecting the active tab still
    /// reports, since the user did click it.
    pub fn select(&mut self, platform: &str, analytics: Option<&dyn Analytics>) -> bool {
        let Some(position) = self.tabs.iter().position(|tab| tab.platform == platform) else {
            tracing::debug!(platform, "unknown tab, ignoring");
            return false;
        };

        emit(
            analytics,
            &AnalyticsEvent::TabSwitch {
                platform: platform.to_string(),
                tab_text: self.tabs[position].label.clone(),
            },
        );
        self.active = Some(position);
        true
    }
}

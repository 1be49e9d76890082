// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Section navigation.
//!
//! A [`Navigator`] scrolls the page to a section by id. The only contract is
//! that an unknown id is a no-op: records can point at sections a page author
//! later renamed, and clicking such a result must not blow up. The navigator
//! reports whether it found the section so callers can decide whether the
//! click is worth reporting.
//!
//! Top-level nav links (`<a class="nav-link" href="#tools">`) go through the
//! same navigator via [`follow_link`].

use crate::analytics::{emit, Analytics, AnalyticsEvent};
use crate::index::ContentIndex;
use crate::types::SectionId;

pub trait Navigator {
    /// Scroll to `section`. Returns `false`, and does nothing, when the page
    /// has no such section.
    fn scroll_to_section(&mut self, section: &SectionId) -> bool;
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn scroll_to_section(&mut self, section: &SectionId) -> bool {
        (**self).scroll_to_section(section)
    }
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn scroll_to_section(&mut self, section: &SectionId) -> bool {
        (**self).scroll_to_section(section)
    }
}

/// In-memory page: a fixed set of section ids and a log of where we scrolled.
#[derive(Debug, Clone, Default)]
pub struct PageSections {
    sections: Vec<SectionId>,
    visits: Vec<SectionId>,
}

impl PageSections {
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionId>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
            visits: Vec::new(),
        }
    }

    /// A page containing exactly the sections `index` refers to.
    pub fn from_index(index: &ContentIndex) -> Self {
        Self::new(index.sections().into_iter().cloned())
    }

    pub fn contains(&self, section: &SectionId) -> bool {
        self.sections.contains(section)
    }

    /// Every successful scroll, oldest first.
    pub fn visits(&self) -> &[SectionId] {
        &self.visits
    }

    /// Section most recently scrolled to.
    pub fn current(&self) -> Option<&SectionId> {
        self.visits.last()
    }
}

impl Navigator for PageSections {
    fn scroll_to_section(&mut self, section: &SectionId) -> bool {
        if !self.contains(section) {
            tracing::debug!(%section, "no such section, ignoring");
            return false;
        }
        self.visits.push(section.clone());
        true
    }
}

/// A top-level navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub text: String,
}

impl NavLink {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }

    /// Section named by an in-page `#fragment` href.
    pub fn target(&self) -> Option<SectionId> {
        match self.href.strip_prefix('#') {
            Some(fragment) if !fragment.is_empty() => Some(SectionId::new(fragment)),
            _ => None,
        }
    }
}

/// What happened when a nav link was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    /// Not an in-page link; the browser should follow it normally.
    External,
    /// Scrolled to the target section. The browser's jump must be suppressed.
    Scrolled,
    /// In-page link to a section that does not exist. The browser's jump is
    /// still suppressed, nothing else happens.
    Missing,
}

impl LinkAction {
    pub fn prevents_default(self) -> bool {
        !matches!(self, LinkAction::External)
    }
}

/// Follow a nav link: scroll and report `navigation_click` if the target exists.
pub fn follow_link(
    link: &NavLink,
    navigator: &mut dyn Navigator,
    analytics: Option<&dyn Analytics>,
) -> LinkAction {
    let Some(section) = link.target() else {
        return LinkAction::External;
    };

    if !navigator.scroll_to_section(&section) {
        return LinkAction::Missing;
    }

    emit(
        analytics,
        &AnalyticsEvent::NavigationClick {
            section: section.to_string(),
            link_text: link.text.clone(),
        },
    );
    LinkAction::Scrolled
}

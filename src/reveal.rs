//! Scroll fade-in for page sections.
//!
//! Every `<section>` starts transparent and shifted down. Once at least a
//! tenth of it is in view it fades into place and stays there.

/// Elements that fade in.
pub const SECTION_SELECTOR: &str = "section";

/// Fraction of a section that must be visible before it is revealed.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// Shrinks the viewport's bottom edge so sections reveal slightly late.
pub const ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Styles applied before a section has been seen.
pub const HIDDEN_STYLES: &[(&str, &str)] = &[
    ("opacity", "0"),
    ("transform", "translateY(30px)"),
    ("transition", "opacity 0.6s ease, transform 0.6s ease"),
];

/// Styles applied on reveal.
pub const SHOWN_STYLES: &[(&str, &str)] = &[("opacity", "1"), ("transform", "translateY(0)")];

/// Which sections have been revealed.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    revealed: Vec<bool>,
    remaining: usize,
}

impl RevealTracker {
    pub fn new(sections: usize) -> Self {
        Self {
            revealed: vec![false; sections],
            remaining: sections,
        }
    }

    /// Mark section `index` as seen. True only the first time; out-of-range
    /// indexes are ignored.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.revealed.get_mut(index) {
            Some(seen) if !*seen => {
                *seen = true;
                self.remaining -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Nothing left to watch.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

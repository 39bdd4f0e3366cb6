//! Configuration options for rendering.
//!
//! The text format itself is fixed. The one thing a caller can choose is the
//! order in which named sections are written:
//!
//! - [`SectionOrder::Insertion`]: first-seen order (default)
//! - [`SectionOrder::Sorted`]: ascending by lowercased section name
//!
//! Keys inside a section are always sorted, whatever the options.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{from_str, RenderOptions, SectionOrder};
//!
//! let doc = from_str("[b]\nx = 1\n[a]\nx = 2").unwrap();
//!
//! assert_eq!(doc.render(), "\n[b]\nx=1\n\n[a]\nx=2\n\n");
//!
//! let options = RenderOptions::new().with_section_order(SectionOrder::Sorted);
//! assert_eq!(doc.render_with(&options), "\n[a]\nx=2\n\n[b]\nx=1\n\n");
//! ```

/// Order in which named sections are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SectionOrder {
    #[default]
    Insertion,
    Sorted,
}

/// Configuration options for rendering a [`Document`](crate::Document).
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    pub section_order: SectionOrder,
}

impl RenderOptions {
    /// Creates default options (sections in first-seen order).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::{RenderOptions, SectionOrder};
    ///
    /// let options = RenderOptions::new();
    /// assert_eq!(options.section_order, SectionOrder::Insertion);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that render sections sorted by name.
    #[must_use]
    pub fn sorted() -> Self {
        RenderOptions {
            section_order: SectionOrder::Sorted,
        }
    }

    #[must_use]
    pub fn with_section_order(mut self, section_order: SectionOrder) -> Self {
        self.section_order = section_order;
        self
    }
}

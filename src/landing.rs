//! Scroll and navigation behaviour of the marketing landing page.
//!
//! Geometry comes from whoever lays the page out (the egui view measures
//! its sections each frame); this module only decides what the header,
//! nav links, cards and contact form should look like.

/// Scroll offset past which the header compacts
pub const COMPACT_THRESHOLD: f32 = 50.0;
/// Height hidden behind the fixed header when jumping to a section
pub const HEADER_OFFSET: f32 = 70.0;
/// How far above a section's top it already counts as current
pub const ACTIVE_LEAD: f32 = 100.0;
/// Vertical lift of a hovered card
pub const HOVER_LIFT: f32 = -10.0;

pub const CONTACT_THANKS: &str = "Thanks for signing up! We will be in touch soon.";
pub const CONTACT_MISSING: &str = "Please fill in all required fields.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderStyle {
    pub padding: f32,
    /// Alpha of the drop shadow
    pub shadow_alpha: f32,
}

impl HeaderStyle {
    pub const EXPANDED: HeaderStyle = HeaderStyle {
        padding: 15.0,
        shadow_alpha: 0.05,
    };
    pub const COMPACT: HeaderStyle = HeaderStyle {
        padding: 10.0,
        shadow_alpha: 0.1,
    };

    pub fn for_scroll(offset: f32) -> Self {
        if offset > COMPACT_THRESHOLD {
            Self::COMPACT
        } else {
            Self::EXPANDED
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub title: String,
    /// Offset of the section's top from the top of the page
    pub top: f32,
}

/// Navigation state: sections in document order plus the active link
#[derive(Debug, Clone)]
pub struct LandingPage {
    sections: Vec<Section>,
    active: Option<String>,
    header: HeaderStyle,
    scroll: f32,
}

impl LandingPage {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections,
            active: None,
            header: HeaderStyle::EXPANDED,
            scroll: 0.0,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn header(&self) -> HeaderStyle {
        self.header
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Update a section's measured position
    pub fn set_section_top(&mut self, id: &str, top: f32) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.id == id) {
            section.top = top;
        }
    }

    /// React to the page scrolling to `offset`
    pub fn on_scroll(&mut self, offset: f32) {
        self.scroll = offset;
        self.header = HeaderStyle::for_scroll(offset);
        self.active = self
            .sections
            .iter()
            .filter(|s| offset >= s.top - ACTIVE_LEAD)
            .last()
            .map(|s| s.id.clone());
    }

    /// Handle a nav link click. Returns the offset to scroll to, or `None`
    /// when the link points at no section (nothing changes then).
    pub fn click_link(&mut self, id: &str) -> Option<f32> {
        let section = self.sections.iter().find(|s| s.id == id)?;
        let target = section.top - HEADER_OFFSET;
        self.active = Some(section.id.clone());
        Some(target)
    }
}

/// Vertical offset for a course card or feature box
pub fn hover_offset(hovered: bool) -> f32 {
    if hovered {
        HOVER_LIFT
    } else {
        0.0
    }
}

/// Sign-up form. Validation only, nothing is submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
}

impl ContactForm {
    /// Check required fields; on success the form is cleared.
    pub fn submit(&mut self) -> Result<&'static str, &'static str> {
        if self.name.is_empty() || self.email.is_empty() {
            return Err(CONTACT_MISSING);
        }
        *self = Self::default();
        Ok(CONTACT_THANKS)
    }
}

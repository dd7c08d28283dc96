//! Application state types for the egui frontend

use std::time::{Duration, Instant};

use crate::document::Document;

/// Navigation state for the main content area
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// Upload forms, search and the document list
    #[default]
    Documents,
    /// A single document's JSON body
    DocumentDetail,
    /// The marketing landing page
    Landing,
}

/// Banner visual style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// Operation completed successfully (green)
    Success,
    /// Validation, transport or server failure (red)
    Error,
}

/// Where a banner is shown; each form has its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    FileUpload,
    DirectoryUpload,
    HistoryUpload,
    Search,
    Documents,
}

/// Inline notification that hides itself after `duration`
#[derive(Debug, Clone)]
pub struct Banner {
    pub message: String,
    pub kind: BannerKind,
    /// When the banner was shown
    pub shown_at: Instant,
    pub duration: Duration,
}

impl Banner {
    pub fn new(message: impl Into<String>, kind: BannerKind, duration: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
            duration,
        }
    }

    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(message, BannerKind::Success, duration)
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(message, BannerKind::Error, duration)
    }

    /// Check if this banner should be hidden at `now`
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }

    /// Time left before the banner hides, for scheduling a repaint
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.shown_at))
    }
}

/// Contents of a result panel (search results or the document list)
#[derive(Debug, Clone, Default)]
pub enum PanelState {
    /// Nothing requested yet
    #[default]
    Empty,
    Loading,
    Loaded(Vec<Document>),
    Failed(String),
}

impl PanelState {
    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }

    pub fn documents(&self) -> Option<&[Document]> {
        match self {
            PanelState::Loaded(docs) => Some(docs),
            _ => None,
        }
    }
}

/// Document opened in the in-app detail view
#[derive(Debug, Clone, Default)]
pub enum DetailState {
    #[default]
    Closed,
    Loading(String),
    Loaded(Box<Document>),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_expires_after_duration() {
        let banner = Banner::success("saved", Duration::from_secs(5));
        let shown = banner.shown_at;
        assert!(!banner.is_expired_at(shown));
        assert!(!banner.is_expired_at(shown + Duration::from_millis(4999)));
        assert!(banner.is_expired_at(shown + Duration::from_secs(5)));
        assert_eq!(banner.remaining_at(shown + Duration::from_secs(2)), Duration::from_secs(3));
        assert_eq!(banner.remaining_at(shown + Duration::from_secs(9)), Duration::ZERO);
    }
}

//! Reusable widget components for the egui frontend
//!
//! Widgets are self-contained UI elements used across multiple views.

pub mod banner;
pub mod card;
pub mod json;

//! Inline banner widget
//!
//! Provides rendering and styling for per-form success/error banners.

use crate::gui::state::{Banner, BannerKind};
use egui::{Color32, Ui};

/// Render a banner if one is visible for this form
pub fn render_banner(ui: &mut Ui, banner: Option<&Banner>) {
    let Some(banner) = banner else {
        return;
    };

    let (color, icon) = banner_style(banner.kind);
    ui.add_space(4.0);
    egui::Frame::none()
        .fill(color)
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(Color32::WHITE, format!("{} {}", icon, banner.message));
        });
}

/// Get the color and icon for a banner based on its kind
fn banner_style(kind: BannerKind) -> (Color32, &'static str) {
    match kind {
        BannerKind::Success => (Color32::from_rgb(60, 179, 113), "✔"), // Medium sea green
        BannerKind::Error => (Color32::from_rgb(220, 20, 60), "⚠"),    // Crimson
    }
}

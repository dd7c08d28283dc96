//! Document card widget

use egui::{Color32, Ui};

use crate::document::DocumentCard;

/// What the user asked for on a card this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Open `/document/{id}` in the browser
    OpenInBrowser,
    /// Show the document body inside the app
    ShowHere,
}

/// Render one document card
pub fn render_document_card(ui: &mut Ui, card: &DocumentCard) -> Option<CardAction> {
    let mut action = None;

    egui::Frame::none()
        .fill(if ui.visuals().dark_mode {
            Color32::from_gray(30)
        } else {
            Color32::from_gray(245)
        })
        .rounding(4.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            // Title row with size badge
            ui.horizontal(|ui| {
                ui.strong(format!("Document {}", card.filename));

                if let Some(ref size) = card.size_label {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        badge(ui, size, Color32::from_rgb(70, 130, 180));
                    });
                }
            });

            ui.add_space(4.0);

            // Metadata
            ui.horizontal(|ui| {
                ui.weak(format!("📅 {}", card.date));
                if let Some(ref subject) = card.subject {
                    badge(ui, subject, Color32::from_rgb(108, 117, 125));
                }
            });

            if let Some(ref preview) = card.preview {
                ui.add_space(4.0);
                ui.label(preview);
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("👁 View document").clicked() {
                    action = Some(CardAction::OpenInBrowser);
                }
                if ui.small_button("JSON").clicked() {
                    action = Some(CardAction::ShowHere);
                }
            });
        });

    action
}

fn badge(ui: &mut Ui, text: &str, fill: Color32) {
    egui::Frame::none()
        .fill(fill)
        .rounding(3.0)
        .inner_margin(egui::vec2(6.0, 2.0))
        .show(ui, |ui| {
            ui.colored_label(Color32::WHITE, text);
        });
}

//! Document detail view showing the full JSON body

use egui::Ui;

use crate::gui::app::DocDeskApp;
use crate::gui::state::DetailState;
use crate::gui::widgets::json::render_json;

/// Render the document detail view
pub fn render_document_view(ui: &mut Ui, app: &mut DocDeskApp) {
    ui.add_space(10.0);

    let doc = match &app.workflow.detail {
        DetailState::Loaded(doc) => doc.clone(),
        DetailState::Failed(message) => {
            let message = message.clone();
            if ui.button("← Back").clicked() {
                app.navigate_back();
            }
            ui.add_space(10.0);
            ui.colored_label(egui::Color32::RED, format!("⚠ {}", message));
            return;
        }
        DetailState::Closed | DetailState::Loading(_) => {
            ui.label("No document selected");
            if ui.button("← Back").clicked() {
                app.navigate_back();
            }
            return;
        }
    };
    let card = doc.card();

    // Header with back button
    ui.horizontal(|ui| {
        if ui.button("← Back").clicked() {
            app.navigate_back();
        }
        ui.add_space(10.0);
        ui.heading(&card.filename);
    });

    ui.add_space(10.0);

    ui.horizontal(|ui| {
        ui.weak(&card.date);
        if let Some(ref subject) = card.subject {
            ui.weak("•");
            ui.weak(subject);
        }
        if let Some(ref size) = card.size_label {
            ui.weak("•");
            ui.weak(size);
        }
        if ui.link("Open in browser").clicked() {
            app.open_in_browser(ui.ctx(), &card.id);
        }
    });

    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);

    // Scrollable content area
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| match doc.content {
            Some(ref content) => render_json(ui, content),
            None => {
                ui.weak("This document has no content.");
            }
        });
}

//! Upload forms, keyword search and the full document list

use egui::Ui;

use crate::api::Subject;
use crate::gui::app::DocDeskApp;
use crate::gui::state::{PanelState, Slot};
use crate::gui::widgets::banner::render_banner;
use crate::gui::widgets::card::{render_document_card, CardAction};
use crate::render::{matches_heading, NO_DOCUMENTS, NO_MATCHES};

const SEARCH_LIMITS: [u32; 4] = [5, 10, 20, 50];

/// Render the documents page
pub fn render_documents_view(ui: &mut Ui, app: &mut DocDeskApp) {
    let mut clicked: Option<(String, CardAction)> = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add_space(10.0);
            ui.columns(3, |columns| {
                render_file_form(&mut columns[0], app);
                render_folder_form(&mut columns[1], app);
                render_history_form(&mut columns[2], app);
            });

            ui.add_space(16.0);
            ui.separator();
            ui.add_space(10.0);

            render_search_form(ui, app);
            ui.add_space(10.0);
            if let Some(hit) = render_panel(ui, &app.workflow.search_results, NO_MATCHES, true) {
                clicked = Some(hit);
            }

            ui.add_space(16.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.heading("All documents");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let busy = app.workflow.is_busy(Slot::Documents);
                    if ui
                        .add_enabled(!busy, egui::Button::new("⟳ Load all documents"))
                        .clicked()
                    {
                        app.workflow.load_all_documents();
                    }
                });
            });
            render_banner(ui, app.workflow.banner(Slot::Documents));
            ui.add_space(10.0);
            if let Some(hit) = render_panel(ui, &app.workflow.documents, NO_DOCUMENTS, false) {
                clicked = Some(hit);
            }
        });

    // Handle clicks outside the scroll area to avoid borrow issues
    if let Some((id, action)) = clicked {
        match action {
            CardAction::OpenInBrowser => app.open_in_browser(ui.ctx(), &id),
            CardAction::ShowHere => app.show_document(&id),
        }
    }
}

/// Submit button that turns into a disabled spinner while busy
fn submit_button(ui: &mut Ui, label: &str, busy: bool) -> bool {
    if busy {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.add_enabled(false, egui::Button::new("Uploading..."));
        });
        false
    } else {
        ui.button(label).clicked()
    }
}

fn render_file_form(ui: &mut Ui, app: &mut DocDeskApp) {
    ui.heading("Upload JSON file");
    ui.add_space(6.0);
    let form = &mut app.workflow.file_form;
    ui.add(
        egui::TextEdit::singleline(&mut form.path)
            .hint_text("Path to a .json file, or drop it here"),
    );
    ui.add(egui::TextEdit::singleline(&mut form.note).hint_text("Note"));

    let busy = app.workflow.is_busy(Slot::FileUpload);
    if submit_button(ui, "Upload", busy) {
        app.workflow.submit_single_file();
    }
    render_banner(ui, app.workflow.banner(Slot::FileUpload));
}

fn render_folder_form(ui: &mut Ui, app: &mut DocDeskApp) {
    ui.heading("Upload folder");
    ui.add_space(6.0);
    let form = &mut app.workflow.folder_form;
    ui.add(
        egui::TextEdit::singleline(&mut form.folder)
            .hint_text("Folder path, or drop a folder here"),
    );
    ui.add(egui::TextEdit::singleline(&mut form.note).hint_text("Note"));

    let busy = app.workflow.is_busy(Slot::DirectoryUpload);
    if submit_button(ui, "Upload folder", busy) {
        app.workflow.submit_directory_upload();
    }
    render_banner(ui, app.workflow.banner(Slot::DirectoryUpload));
}

fn render_history_form(ui: &mut Ui, app: &mut DocDeskApp) {
    ui.heading("Import past questions");
    ui.add_space(6.0);

    let subjects = app.workflow.subjects.clone();
    subject_picker(ui, "history_subject", &mut app.workflow.history_form.subject, &subjects);
    ui.add(egui::TextEdit::singleline(&mut app.workflow.history_form.note).hint_text("Note"));

    let busy = app.workflow.is_busy(Slot::HistoryUpload);
    if submit_button(ui, "Import", busy) {
        app.workflow.submit_history_upload();
    }
    render_banner(ui, app.workflow.banner(Slot::HistoryUpload));
}

fn render_search_form(ui: &mut Ui, app: &mut DocDeskApp) {
    ui.heading("Search");
    ui.add_space(6.0);

    let mut should_search = false;
    ui.horizontal(|ui| {
        let response = ui.add_sized(
            [320.0, 24.0],
            egui::TextEdit::singleline(&mut app.workflow.search_form.keyword)
                .hint_text("Keyword"),
        );
        // Handle Enter key for search
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            should_search = true;
        }

        let limit = &mut app.workflow.search_form.limit;
        egui::ComboBox::from_id_salt("search_limit")
            .selected_text(format!("{} results", limit))
            .show_ui(ui, |ui| {
                for option in SEARCH_LIMITS {
                    ui.selectable_value(limit, option, format!("{} results", option));
                }
            });

        let subjects = app.workflow.subjects.clone();
        subject_picker(ui, "search_subject", &mut app.workflow.search_form.subject, &subjects);

        if ui.button("🔍 Search").clicked() {
            should_search = true;
        }
    });

    // Trigger search outside the closure to avoid borrow issues
    if should_search {
        app.workflow.search();
    }
    render_banner(ui, app.workflow.banner(Slot::Search));
}

/// Subject selector; the empty id stands for every subject
fn subject_picker(ui: &mut Ui, id: &str, selected: &mut String, subjects: &[Subject]) {
    let label = subjects
        .iter()
        .find(|s| s.id == *selected)
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| "All subjects".to_string());

    egui::ComboBox::from_id_salt(id)
        .selected_text(label)
        .show_ui(ui, |ui| {
            ui.selectable_value(selected, String::new(), "All subjects");
            for subject in subjects {
                ui.selectable_value(selected, subject.id.clone(), subject.label());
            }
        });
}

/// Render a result panel. Returns the card the user acted on, if any.
fn render_panel(
    ui: &mut Ui,
    state: &PanelState,
    empty_text: &str,
    with_heading: bool,
) -> Option<(String, CardAction)> {
    match state {
        PanelState::Empty => None,
        PanelState::Loading => {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.spinner();
                ui.add_space(6.0);
                ui.label("Loading...");
            });
            None
        }
        PanelState::Failed(message) => {
            ui.colored_label(egui::Color32::RED, format!("⚠ {}", message));
            None
        }
        PanelState::Loaded(docs) if docs.is_empty() => {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.weak(empty_text);
            });
            None
        }
        PanelState::Loaded(docs) => {
            if with_heading {
                ui.strong(matches_heading(docs.len()));
                ui.add_space(6.0);
            }

            let mut clicked = None;
            for (index, doc) in docs.iter().enumerate() {
                let card = doc.card();
                ui.push_id(index, |ui| {
                    if let Some(action) = render_document_card(ui, &card) {
                        clicked = Some((card.id.clone(), action));
                    }
                });
                ui.add_space(8.0);
            }
            clicked
        }
    }
}

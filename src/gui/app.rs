//! Main application state and eframe App implementation

use std::collections::HashSet;
use std::time::Instant;

use super::controller::UploadSearch;
use super::state::{Banner, DetailState, View};
use super::views;
use crate::landing::{ContactForm, LandingPage, Section};

/// Main application state holding all UI and backend references
pub struct DocDeskApp {
    /// Active view (Documents, DocumentDetail, Landing)
    pub current_view: View,

    /// Upload forms, search and document list
    pub workflow: UploadSearch,

    /// Landing page navigation state
    pub landing: LandingPage,

    /// Offset the landing scroll area should jump to next frame
    pub pending_scroll: Option<f32>,

    /// Landing cards hovered during the last frame
    pub hovered_cards: HashSet<String>,

    /// Sign-up form on the landing page
    pub contact: ContactForm,

    /// Acknowledgement or validation message for the sign-up form
    pub contact_notice: Option<Banner>,

    /// View to return to from the detail view
    previous_view: View,
}

impl DocDeskApp {
    pub fn new(cc: &eframe::CreationContext<'_>, mut workflow: UploadSearch) -> Self {
        log::info!("Connecting to {}", workflow.api().base_url());

        workflow.set_repaint_context(cc.egui_ctx.clone());
        workflow.load_subjects();
        workflow.load_all_documents();

        Self {
            current_view: View::Documents,
            workflow,
            landing: LandingPage::new(landing_sections()),
            pending_scroll: None,
            hovered_cards: HashSet::new(),
            contact: ContactForm::default(),
            contact_notice: None,
            previous_view: View::Documents,
        }
    }

    /// Show a document's JSON in the detail view
    pub fn show_document(&mut self, id: &str) {
        self.workflow.open_detail(id);
        if self.current_view != View::DocumentDetail {
            self.previous_view = self.current_view.clone();
        }
        self.current_view = View::DocumentDetail;
    }

    /// Open a document in the system browser
    pub fn open_in_browser(&self, ctx: &egui::Context, id: &str) {
        if let Some(url) = self.workflow.document_url(id) {
            log::info!("Opening {}", url);
            ctx.open_url(egui::OpenUrl::new_tab(url));
        }
    }

    /// Navigate back from the detail view
    pub fn navigate_back(&mut self) {
        if self.current_view == View::DocumentDetail {
            self.workflow.close_detail();
            self.current_view = self.previous_view.clone();
        }
    }

    /// Route files dropped on the window into the upload forms
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let Some(path) = file.path else {
                continue;
            };
            let text = path.display().to_string();
            if path.is_dir() {
                self.workflow.folder_form.folder = text;
            } else {
                self.workflow.file_form.path = text;
            }
            self.current_view = View::Documents;
        }
    }
}

fn landing_sections() -> Vec<Section> {
    [
        ("home", "Home"),
        ("features", "Features"),
        ("courses", "Courses"),
        ("contact", "Contact"),
    ]
    .into_iter()
    .map(|(id, title)| Section {
        id: id.to_string(),
        title: title.to_string(),
        top: 0.0,
    })
    .collect()
}

impl eframe::App for DocDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Check for async updates
        self.workflow.poll(now);
        if self
            .contact_notice
            .as_ref()
            .is_some_and(|notice| notice.is_expired_at(now))
        {
            self.contact_notice = None;
        }
        self.handle_dropped_files(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.navigate_back();
        }

        // Top panel with navigation
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading("DocDesk");
                ui.add_space(20.0);

                if ui
                    .selectable_label(self.current_view != View::Landing, "Documents")
                    .clicked()
                {
                    self.navigate_back();
                    self.current_view = View::Documents;
                }
                if ui
                    .selectable_label(self.current_view == View::Landing, "Landing page")
                    .clicked()
                {
                    self.navigate_back();
                    self.current_view = View::Landing;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.workflow.has_pending() {
                        ui.spinner();
                    }
                    ui.weak(self.workflow.api().base_url().as_str());
                });
            });
            ui.add_space(8.0);
        });

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| match self.current_view {
            View::Documents => views::documents::render_documents_view(ui, self),
            View::DocumentDetail => {
                if matches!(self.workflow.detail, DetailState::Loading(_)) {
                    ui.vertical_centered(|ui| {
                        ui.add_space(100.0);
                        ui.spinner();
                        ui.add_space(10.0);
                        ui.label("Loading document...");
                    });
                } else {
                    views::document::render_document_view(ui, self);
                }
            }
            View::Landing => views::landing::render_landing_view(ui, self),
        });

        // Keep repainting while requests are in flight, and wake up for banner expiry
        if self.workflow.has_pending() {
            ctx.request_repaint();
        } else {
            let notice = self.contact_notice.as_ref().map(|n| n.remaining_at(now));
            let next = [self.workflow.next_banner_expiry(now), notice]
                .into_iter()
                .flatten()
                .min();
            if let Some(delay) = next {
                ctx.request_repaint_after(delay);
            }
        }
    }
}

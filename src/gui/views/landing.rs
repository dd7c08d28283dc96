//! Marketing landing page with a compacting header and section navigation

use egui::{Color32, Margin, Ui};

use crate::gui::app::DocDeskApp;
use crate::gui::state::Banner;
use crate::gui::widgets::banner::render_banner;
use crate::landing::{hover_offset, HeaderStyle};

const FEATURES: [(&str, &str); 3] = [
    ("Collect mistakes", "Upload question sets as JSON and keep every wrong answer in one place."),
    ("Find anything", "Search stored questions by keyword across every subject."),
    ("Practice again", "Turn past mistakes into fresh exercises."),
];

const COURSES: [(&str, &str); 3] = [
    ("Mathematics", "Algebra, geometry and functions, from basics to exam level."),
    ("History", "Key events and timelines with review questions."),
    ("English", "Grammar and reading comprehension drills."),
];

/// Render the landing page
pub fn render_landing_view(ui: &mut Ui, app: &mut DocDeskApp) {
    render_header(ui, app);

    let mut scroll = egui::ScrollArea::vertical().auto_shrink([false, false]);
    if let Some(target) = app.pending_scroll.take() {
        scroll = scroll.vertical_scroll_offset(target.max(0.0));
    }

    let output = scroll.show(ui, |ui| {
        let origin = ui.min_rect().top();
        let mut hovered = Vec::new();

        section_anchor(ui, app, "home", origin);
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.heading("Learn from every mistake");
            ui.add_space(10.0);
            ui.label("A study companion that turns wrong answers into progress.");
        });
        ui.add_space(200.0);

        section_anchor(ui, app, "features", origin);
        ui.heading("Features");
        ui.add_space(10.0);
        ui.columns(FEATURES.len(), |columns| {
            for (column, (title, text)) in columns.iter_mut().zip(FEATURES) {
                if lifted_box(column, app, title, text) {
                    hovered.push(title.to_string());
                }
            }
        });
        ui.add_space(200.0);

        section_anchor(ui, app, "courses", origin);
        ui.heading("Courses");
        ui.add_space(10.0);
        ui.columns(COURSES.len(), |columns| {
            for (column, (title, text)) in columns.iter_mut().zip(COURSES) {
                if lifted_box(column, app, title, text) {
                    hovered.push(title.to_string());
                }
            }
        });
        ui.add_space(200.0);

        section_anchor(ui, app, "contact", origin);
        ui.heading("Sign up");
        ui.add_space(10.0);
        render_contact_form(ui, app);
        ui.add_space(300.0);

        hovered
    });

    app.hovered_cards = output.inner.into_iter().collect();
    app.landing.on_scroll(output.state.offset.y);
}

fn render_header(ui: &mut Ui, app: &mut DocDeskApp) {
    let style = app.landing.header();
    let shadow_alpha = (style.shadow_alpha * 255.0).round() as u8;
    let compact = style == HeaderStyle::COMPACT;

    egui::Frame::none()
        .inner_margin(Margin::symmetric(12.0, style.padding))
        .shadow(egui::Shadow {
            offset: egui::vec2(0.0, 2.0),
            blur: 10.0,
            spread: 0.0,
            color: Color32::from_black_alpha(shadow_alpha),
        })
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if compact {
                    ui.strong("Study Hub");
                } else {
                    ui.heading("Study Hub");
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let sections = app.landing.sections().to_vec();
                    let active = app.landing.active().map(str::to_string);
                    let mut target = None;

                    // right-to-left layout, so walk the links backwards
                    for section in sections.iter().rev() {
                        let is_active = active.as_deref() == Some(section.id.as_str());
                        if ui.selectable_label(is_active, &section.title).clicked() {
                            target = app.landing.click_link(&section.id);
                        }
                    }
                    if target.is_some() {
                        app.pending_scroll = target;
                    }
                });
            });
        });
}

/// Record where a section starts relative to the scroll content
fn section_anchor(ui: &mut Ui, app: &mut DocDeskApp, id: &str, origin: f32) {
    let top = ui.cursor().top() - origin;
    app.landing.set_section_top(id, top);
}

/// A feature box or course card that lifts while hovered. Returns hover state.
fn lifted_box(ui: &mut Ui, app: &DocDeskApp, title: &str, text: &str) -> bool {
    let lift = hover_offset(app.hovered_cards.contains(title));
    let base = 10.0;

    let response = egui::Frame::group(ui.style())
        .outer_margin(Margin {
            left: 0.0,
            right: 0.0,
            top: base + lift,
            bottom: base - lift,
        })
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.strong(title);
            ui.add_space(6.0);
            ui.label(text);
        })
        .response;

    response.hovered()
}

fn render_contact_form(ui: &mut Ui, app: &mut DocDeskApp) {
    ui.add(egui::TextEdit::singleline(&mut app.contact.name).hint_text("Name"));
    ui.add(egui::TextEdit::singleline(&mut app.contact.email).hint_text("Email"));

    if ui.button("Sign up").clicked() {
        let duration = app.workflow.banner_duration();
        app.contact_notice = Some(match app.contact.submit() {
            Ok(thanks) => Banner::success(thanks, duration),
            Err(missing) => Banner::error(missing, duration),
        });
    }
    render_banner(ui, app.contact_notice.as_ref());
}

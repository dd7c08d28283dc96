//! Read-only, colour-highlighted JSON

use egui::text::LayoutJob;
use egui::{Color32, FontId, TextFormat, Ui};
use serde_json::Value;

use crate::json_view::{highlight, TokenKind};

pub fn render_json(ui: &mut Ui, value: &Value) {
    let font = FontId::monospace(13.0);
    let mut job = LayoutJob::default();

    for token in highlight(value) {
        job.append(
            &token.text,
            0.0,
            TextFormat::simple(font.clone(), token_color(token.kind, ui.visuals().dark_mode)),
        );
    }

    ui.label(job);
}

fn token_color(kind: TokenKind, dark: bool) -> Color32 {
    match kind {
        TokenKind::Key => Color32::from_rgb(156, 220, 254),
        TokenKind::String => Color32::from_rgb(206, 145, 120),
        TokenKind::Number => Color32::from_rgb(181, 206, 168),
        TokenKind::Boolean => Color32::from_rgb(86, 156, 214),
        TokenKind::Null => Color32::from_rgb(197, 134, 192),
        TokenKind::Plain if dark => Color32::from_gray(200),
        TokenKind::Plain => Color32::from_gray(40),
    }
}

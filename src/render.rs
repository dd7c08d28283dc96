//! HTML fragments for document cards and result panels

use crate::document::{Document, DocumentCard};

pub const NO_DOCUMENTS: &str = "No documents found";
pub const NO_MATCHES: &str = "No matching documents found";

/// Render one document as a card fragment
pub fn render_document_card(doc: &Document) -> String {
    card_html(&doc.card())
}

pub fn card_html(card: &DocumentCard) -> String {
    let size_badge = card
        .size_label
        .as_deref()
        .map(|size| format!(r#"<span class="badge">{}</span>"#, escape(size)))
        .unwrap_or_default();
    let subject_badge = card
        .subject
        .as_deref()
        .map(|subject| format!(r#"<span class="badge me-2">{}</span>"#, escape(subject)))
        .unwrap_or_default();
    let preview = card
        .preview
        .as_deref()
        .map(|text| format!(r#"<p class="card-text">{}</p>"#, escape(text)))
        .unwrap_or_default();

    format!(
        r#"<div class="col-md-6 mb-4">
    <div class="card document-card">
        <div class="card-header">
            <div class="d-flex justify-content-between align-items-center">
                <h5 class="mb-0">Document {filename}</h5>
                {size_badge}
            </div>
        </div>
        <div class="card-body">
            <div class="document-meta">
                <span><i class="bi bi-calendar"></i> {date}</span>
                {subject_badge}
            </div>
            {preview}
            <a href="/document/{id}" class="btn btn-outline-primary btn-sm" target="_blank">
                <i class="bi bi-eye"></i> View document
            </a>
        </div>
    </div>
</div>"#,
        filename = escape(&card.filename),
        date = escape(&card.date),
        id = escape(&card.id),
    )
}

/// The "all documents" panel, with an explicit placeholder when empty
pub fn render_document_list(docs: &[Document]) -> String {
    if docs.is_empty() {
        return empty_state("bi-folder", NO_DOCUMENTS);
    }
    format!(r#"<div class="row">{}</div>"#, cards(docs))
}

/// The search results panel: a count header followed by cards
pub fn render_search_results(docs: &[Document]) -> String {
    if docs.is_empty() {
        return empty_state("bi-search", NO_MATCHES);
    }
    format!(
        r#"<h5 class="mb-3">{}</h5><div class="row">{}</div>"#,
        escape(&matches_heading(docs.len())),
        cards(docs)
    )
}

pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class="alert alert-danger"><i class="bi bi-exclamation-triangle"></i> {}</div>"#,
        escape(message)
    )
}

pub fn matches_heading(count: usize) -> String {
    if count == 1 {
        "Found 1 matching document".to_string()
    } else {
        format!("Found {} matching documents", count)
    }
}

fn cards(docs: &[Document]) -> String {
    docs.iter().map(render_document_card).collect()
}

fn empty_state(icon: &str, message: &str) -> String {
    format!(
        r#"<div class="empty-state"><i class="bi {}"></i><p>{}</p></div>"#,
        icon, message
    )
}

/// Minimal HTML escaping for text and attribute positions
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_card_without_size_has_no_badge() {
        let html = render_document_card(&doc(json!({"id": 1, "filename": "math_1.json"})));
        assert!(!html.contains(r#"<span class="badge">"#));
        assert!(html.contains("Document math_1.json"));
        assert!(html.contains(r#"href="/document/1""#));
        assert!(html.contains(r#"target="_blank""#));
    }

    #[test]
    fn test_card_with_size_and_subject() {
        let html = render_document_card(&doc(json!({
            "id": "3", "filename": "history_3.json", "subject": "history", "size": 1536
        })));
        assert!(html.contains(r#"<span class="badge">1.5 KB</span>"#));
        assert!(html.contains(r#"<span class="badge me-2">history</span>"#));
    }

    #[test]
    fn test_card_omits_preview_and_marks_unknown_date() {
        let html = render_document_card(&doc(json!({"filename": "x.json"})));
        assert!(!html.contains("card-text"));
        assert!(html.contains(crate::document::UNKNOWN_DATE));
    }

    #[test]
    fn test_card_escapes_server_text() {
        let html = render_document_card(&doc(json!({
            "filename": "<b>x</b>.json",
            "preview": "a < b && c"
        })));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;.json"));
        assert!(html.contains("a &lt; b &amp;&amp; c"));
    }

    #[test]
    fn test_empty_panels_show_placeholders() {
        assert!(render_document_list(&[]).contains(NO_DOCUMENTS));
        assert!(render_search_results(&[]).contains(NO_MATCHES));
    }

    #[test]
    fn test_search_results_heading_counts() {
        let docs = vec![doc(json!({"id": 1})), doc(json!({"id": 2}))];
        let html = render_search_results(&docs);
        assert!(html.contains("Found 2 matching documents"));
        assert_eq!(html.matches("document-card").count(), 2);
    }
}

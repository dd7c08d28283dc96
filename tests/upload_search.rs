//! Form and panel behaviour of the document page, driven against a mock server.

use std::sync::Arc;
use std::time::{Duration, Instant};

use docdesk::api::ApiClient;
use docdesk::config::Config;
use docdesk::gui::controller::{DOCUMENTS_FAILED, HISTORY_FAILED, SEARCH_FAILED};
use docdesk::gui::{BannerKind, PanelState, Slot, UploadSearch};
use docdesk::upload::{FOLDER_WITHOUT_JSON, NOT_JSON, NO_FILE_SELECTED};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller(server: &MockServer) -> UploadSearch {
    let api = Arc::new(ApiClient::new(&server.uri()).unwrap());
    UploadSearch::new(api, tokio::runtime::Handle::current(), &Config::default())
}

/// Poll until every request has finished
async fn settle(workflow: &mut UploadSearch) {
    for _ in 0..200 {
        workflow.poll(Instant::now());
        if !workflow.has_pending() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("requests did not finish in time");
}

fn banner_text(workflow: &UploadSearch, slot: Slot) -> (BannerKind, String) {
    let banner = workflow.banner(slot).expect("banner should be visible");
    (banner.kind, banner.message.clone())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_keyword_search_is_a_no_op() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut workflow = controller(&mock_server);
    workflow.search_results = PanelState::Loaded(vec![Default::default()]);
    workflow.search_form.keyword = "   ".to_string();

    assert!(!workflow.search());
    assert!(!workflow.is_busy(Slot::Search));
    assert_eq!(workflow.search_results.documents().map(|d| d.len()), Some(1));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_folder_without_json_never_hits_the_network() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-directory/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let mut workflow = controller(&mock_server);
    workflow.folder_form.folder = dir.path().display().to_string();

    assert!(!workflow.submit_directory_upload());
    assert_eq!(
        banner_text(&workflow, Slot::DirectoryUpload),
        (BannerKind::Error, FOLDER_WITHOUT_JSON.to_string())
    );
    assert!(!workflow.is_busy(Slot::DirectoryUpload));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_single_file_validation() {
    let mock_server = MockServer::start().await;
    let mut workflow = controller(&mock_server);

    assert!(!workflow.submit_single_file());
    assert_eq!(banner_text(&workflow, Slot::FileUpload).1, NO_FILE_SELECTED);

    workflow.file_form.path = "/tmp/answers.csv".to_string();
    assert!(!workflow.submit_single_file());
    assert_eq!(banner_text(&workflow, Slot::FileUpload).1, NOT_JSON);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_folder_upload_success_resets_form() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-directory/"))
        .and(body_string_contains("filename=\"a.json\""))
        .and(body_string_contains("filename=\"b.json\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Uploaded 2 files"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.json"), "[]").unwrap();
    std::fs::write(dir.path().join("b.json"), "[]").unwrap();
    std::fs::write(dir.path().join("skip.md"), "#").unwrap();

    let mut workflow = controller(&mock_server);
    workflow.folder_form.folder = dir.path().display().to_string();
    workflow.folder_form.note = "week 3".to_string();

    assert!(workflow.submit_directory_upload());
    assert!(workflow.is_busy(Slot::DirectoryUpload));
    settle(&mut workflow).await;

    assert!(!workflow.is_busy(Slot::DirectoryUpload));
    assert_eq!(
        banner_text(&workflow, Slot::DirectoryUpload),
        (BannerKind::Success, "Uploaded 2 files".to_string())
    );
    assert!(workflow.folder_form.folder.is_empty());
    assert!(workflow.folder_form.note.is_empty());

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(!body.contains("skip.md"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_single_file_server_error_keeps_form() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid JSON format"})),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.json");
    std::fs::write(&file, "{").unwrap();

    let mut workflow = controller(&mock_server);
    workflow.file_form.path = file.display().to_string();

    assert!(workflow.submit_single_file());
    settle(&mut workflow).await;

    assert!(!workflow.is_busy(Slot::FileUpload));
    assert_eq!(
        banner_text(&workflow, Slot::FileUpload),
        (BannerKind::Error, "Upload failed: Invalid JSON format".to_string())
    );
    assert_eq!(workflow.file_form.path, file.display().to_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_history_failures_are_distinct() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-history/"))
        .and(body_string_contains("physics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "No question files for physics"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload-history/"))
        .and(body_string_contains("chemistry"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut workflow = controller(&mock_server);

    workflow.history_form.subject = "physics".to_string();
    assert!(workflow.submit_history_upload());
    settle(&mut workflow).await;
    assert_eq!(
        banner_text(&workflow, Slot::HistoryUpload),
        (BannerKind::Error, "No question files for physics".to_string())
    );
    // the form is only reset on success
    assert_eq!(workflow.history_form.subject, "physics");

    workflow.history_form.subject = "chemistry".to_string();
    assert!(workflow.submit_history_upload());
    settle(&mut workflow).await;
    assert_eq!(
        banner_text(&workflow, Slot::HistoryUpload),
        (BannerKind::Error, format!("Upload failed: {}", HISTORY_FAILED))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_banners_hide_after_five_seconds() {
    let mock_server = MockServer::start().await;
    let mut workflow = controller(&mock_server);

    workflow.submit_single_file();
    let shown_at = workflow.banner(Slot::FileUpload).unwrap().shown_at;

    workflow.poll(shown_at + Duration::from_millis(4900));
    assert!(workflow.banner(Slot::FileUpload).is_some());

    workflow.poll(shown_at + Duration::from_secs(5));
    assert!(workflow.banner(Slot::FileUpload).is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_newer_search_wins_over_slow_older_one() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/"))
        .and(body_string_contains("slowword"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [{"id": "old"}]}))
                .set_delay(Duration::from_millis(600)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/search/"))
        .and(body_string_contains("fastword"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [{"id": "new"}]})))
        .mount(&mock_server)
        .await;

    let mut workflow = controller(&mock_server);

    workflow.search_form.keyword = "slowword".to_string();
    assert!(workflow.search());
    workflow.search_form.keyword = "fastword".to_string();
    assert!(workflow.search());
    assert!(workflow.search_results.is_loading());

    settle(&mut workflow).await;
    tokio::time::sleep(Duration::from_millis(800)).await;
    workflow.poll(Instant::now());

    let docs = workflow.search_results.documents().expect("results loaded");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].resolved_id(), "new");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_failure_shows_generic_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "index offline"})))
        .mount(&mock_server)
        .await;

    let mut workflow = controller(&mock_server);
    workflow.search_form.keyword = "anything".to_string();
    workflow.search();
    settle(&mut workflow).await;

    match &workflow.search_results {
        PanelState::Failed(message) => assert_eq!(message, &format!("Search failed: {}", SEARCH_FAILED)),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(banner_text(&workflow, Slot::Search).0, BannerKind::Error);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_load_all_documents_and_subjects() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documents": []})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/subjects/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subjects": [{"id": "math", "name": "Mathematics"}]
        })))
        .mount(&mock_server)
        .await;

    let mut workflow = controller(&mock_server);
    workflow.load_subjects();
    workflow.load_all_documents();
    assert!(workflow.is_busy(Slot::Documents));
    settle(&mut workflow).await;

    assert_eq!(workflow.documents.documents().map(|d| d.len()), Some(0));
    assert_eq!(workflow.subjects.len(), 1);
    assert_eq!(workflow.subjects[0].label(), "Mathematics");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_subject_failure_is_only_logged() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/subjects/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut workflow = controller(&mock_server);
    workflow.load_subjects();
    settle(&mut workflow).await;

    assert!(workflow.subjects.is_empty());
    assert!(workflow.banner(Slot::HistoryUpload).is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_single_file_success_resets_form() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/"))
        .and(body_string_contains("filename=\"math_1.json\""))
        .and(body_string_contains("chapter two"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Stored math_1.json"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("math_1.json");
    std::fs::write(&file, r#"[{"question": "1+1?"}]"#).unwrap();

    let mut workflow = controller(&mock_server);
    workflow.file_form.path = file.display().to_string();
    workflow.file_form.note = "chapter two".to_string();

    assert!(workflow.submit_single_file());
    assert!(workflow.is_busy(Slot::FileUpload));
    settle(&mut workflow).await;

    assert!(!workflow.is_busy(Slot::FileUpload));
    assert_eq!(
        banner_text(&workflow, Slot::FileUpload),
        (BannerKind::Success, "Stored math_1.json".to_string())
    );
    assert!(workflow.file_form.path.is_empty());
    assert!(workflow.file_form.note.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_document_list_failure_fills_panel_and_banner() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut workflow = controller(&mock_server);
    workflow.load_all_documents();
    settle(&mut workflow).await;

    assert!(!workflow.is_busy(Slot::Documents));
    match &workflow.documents {
        PanelState::Failed(message) => assert_eq!(message, DOCUMENTS_FAILED),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(
        banner_text(&workflow, Slot::Documents),
        (BannerKind::Error, DOCUMENTS_FAILED.to_string())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_keyword_is_sent_as_typed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut workflow = controller(&mock_server);
    workflow.search_form.keyword = "  right triangle  ".to_string();
    assert!(workflow.search());
    settle(&mut workflow).await;

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("  right triangle  "));
    assert_eq!(workflow.search_results.documents().map(|d| d.len()), Some(0));
}

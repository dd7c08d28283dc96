//! Form and panel logic behind the document page, independent of egui
//! drawing. Every network call runs on the tokio runtime; completions come
//! back over channels and are applied by [`UploadSearch::poll`] once per frame.

use std::collections::HashMap;
use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use super::state::{Banner, DetailState, PanelState, Slot};
use crate::api::{ApiClient, SearchQuery, Subject};
use crate::config::Config;
use crate::document::Document;
use crate::error::ApiError;
use crate::upload::{self, SelectedFile};

pub const UPLOAD_FILE_FAILED: &str = "Failed to upload file";
pub const UPLOAD_FOLDER_FAILED: &str = "Failed to upload folder";
pub const HISTORY_FAILED: &str = "Failed to import past questions";
pub const SEARCH_FAILED: &str = "Search request failed";
pub const DOCUMENTS_FAILED: &str = "Failed to load documents";
pub const DOCUMENT_FAILED: &str = "Failed to load document";

type Outcome<T> = Result<T, ApiError>;

/// A request the UI is waiting on
struct Pending<T> {
    generation: u64,
    receiver: Receiver<(u64, Outcome<T>)>,
    cancel: CancellationToken,
}

impl<T> Drop for Pending<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Take the outcome of a finished request, clearing the slot.
///
/// A task that dropped its sender without answering counts as finished
/// with [`ApiError::Interrupted`], so busy state is always released.
fn take_finished<T>(slot: &mut Option<Pending<T>>) -> Option<Outcome<T>> {
    let pending = slot.as_ref()?;
    let outcome = match pending.receiver.try_recv() {
        Ok((generation, outcome)) if generation == pending.generation => outcome,
        Ok((generation, _)) => {
            log::debug!("Dropping stale response from request {}", generation);
            return None;
        }
        Err(TryRecvError::Empty) => return None,
        Err(TryRecvError::Disconnected) => Err(ApiError::Interrupted),
    };
    *slot = None;
    Some(outcome)
}

#[derive(Debug, Clone, Default)]
pub struct FileForm {
    pub path: String,
    pub note: String,
}

#[derive(Debug, Clone, Default)]
pub struct FolderForm {
    pub folder: String,
    pub note: String,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryForm {
    /// Empty imports every subject
    pub subject: String,
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct SearchForm {
    pub keyword: String,
    pub limit: u32,
    pub subject: String,
}

/// Upload, search and listing state for the document page
pub struct UploadSearch {
    api: Arc<ApiClient>,
    runtime: Handle,
    repaint: Option<egui::Context>,
    banner_duration: Duration,
    banners: HashMap<Slot, Banner>,

    pub file_form: FileForm,
    pub folder_form: FolderForm,
    pub history_form: HistoryForm,
    pub search_form: SearchForm,

    /// Options for the history subject selector
    pub subjects: Vec<Subject>,
    pub search_results: PanelState,
    pub documents: PanelState,
    pub detail: DetailState,

    /// Counter for tagging requests
    generation: u64,

    file_upload: Option<Pending<String>>,
    folder_upload: Option<Pending<String>>,
    history_upload: Option<Pending<String>>,
    search: Option<Pending<Vec<Document>>>,
    listing: Option<Pending<Vec<Document>>>,
    subjects_request: Option<Pending<Vec<Subject>>>,
    detail_request: Option<Pending<Document>>,
}

impl UploadSearch {
    pub fn new(api: Arc<ApiClient>, runtime: Handle, config: &Config) -> Self {
        Self {
            api,
            runtime,
            repaint: None,
            banner_duration: config.banner_duration(),
            banners: HashMap::new(),
            file_form: FileForm::default(),
            folder_form: FolderForm::default(),
            history_form: HistoryForm::default(),
            search_form: SearchForm {
                keyword: String::new(),
                limit: config.search_limit,
                subject: String::new(),
            },
            subjects: Vec::new(),
            search_results: PanelState::Empty,
            documents: PanelState::Empty,
            detail: DetailState::Closed,
            generation: 0,
            file_upload: None,
            folder_upload: None,
            history_upload: None,
            search: None,
            listing: None,
            subjects_request: None,
            detail_request: None,
        }
    }

    /// Wake the UI whenever a request completes
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn banner_duration(&self) -> Duration {
        self.banner_duration
    }

    fn spawn<T, F>(&mut self, task: F) -> Pending<T>
    where
        T: Send + 'static,
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let (tx, rx) = mpsc::channel();
        let repaint = self.repaint.clone();

        self.runtime.spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => Err(ApiError::Interrupted),
                outcome = task => outcome,
            };
            let _ = tx.send((generation, outcome));
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });

        Pending {
            generation,
            receiver: rx,
            cancel,
        }
    }

    pub fn banner(&self, slot: Slot) -> Option<&Banner> {
        self.banners.get(&slot)
    }

    fn show_success(&mut self, slot: Slot, message: impl Into<String>) {
        self.banners
            .insert(slot, Banner::success(message, self.banner_duration));
    }

    fn show_error(&mut self, slot: Slot, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{:?}: {}", slot, message);
        self.banners
            .insert(slot, Banner::error(message, self.banner_duration));
    }

    /// Whether the form or panel behind `slot` has a request in flight
    pub fn is_busy(&self, slot: Slot) -> bool {
        match slot {
            Slot::FileUpload => self.file_upload.is_some(),
            Slot::DirectoryUpload => self.folder_upload.is_some(),
            Slot::HistoryUpload => self.history_upload.is_some(),
            Slot::Search => self.search.is_some(),
            Slot::Documents => self.listing.is_some(),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.file_upload.is_some()
            || self.folder_upload.is_some()
            || self.history_upload.is_some()
            || self.search.is_some()
            || self.listing.is_some()
            || self.subjects_request.is_some()
            || self.detail_request.is_some()
    }

    /// Time until the next visible banner hides
    pub fn next_banner_expiry(&self, now: Instant) -> Option<Duration> {
        self.banners.values().map(|b| b.remaining_at(now)).min()
    }

    /// Fetch the subject list for the history form; failures are only logged
    pub fn load_subjects(&mut self) {
        if self.subjects_request.is_some() {
            return;
        }
        let api = self.api.clone();
        self.subjects_request = Some(self.spawn(async move { api.subjects().await }));
    }

    pub fn submit_single_file(&mut self) -> bool {
        if self.file_upload.is_some() {
            return false;
        }
        let path = match upload::validate_single(&self.file_form.path) {
            Ok(path) => path,
            Err(e) => {
                self.show_error(Slot::FileUpload, e.to_string());
                return false;
            }
        };

        let note = self.file_form.note.clone();
        let api = self.api.clone();
        self.file_upload = Some(self.spawn(async move {
            let file = SelectedFile::read(&path).await?;
            api.upload_file(file, &note).await
        }));
        true
    }

    pub fn submit_directory_upload(&mut self) -> bool {
        if self.folder_upload.is_some() {
            return false;
        }
        let paths = match upload::select_folder(&self.folder_form.folder) {
            Ok(paths) => paths,
            Err(e) => {
                self.show_error(Slot::DirectoryUpload, e.to_string());
                return false;
            }
        };
        log::info!("Preparing to upload {} JSON files", paths.len());

        let note = self.folder_form.note.clone();
        let api = self.api.clone();
        self.folder_upload = Some(self.spawn(async move {
            let files = upload::read_all(&paths).await?;
            api.upload_directory(files, &note).await
        }));
        true
    }

    pub fn submit_history_upload(&mut self) -> bool {
        if self.history_upload.is_some() {
            return false;
        }
        let subject = self.history_form.subject.clone();
        let note = self.history_form.note.clone();
        let api = self.api.clone();
        self.history_upload =
            Some(self.spawn(async move { api.upload_history(&subject, &note).await }));
        true
    }

    /// Start a search. A blank keyword does nothing at all; any other
    /// keyword is sent exactly as typed.
    ///
    /// A search already in flight is cancelled; its answer is never shown.
    pub fn search(&mut self) -> bool {
        if self.search_form.keyword.trim().is_empty() {
            return false;
        }

        let query = SearchQuery {
            keyword: self.search_form.keyword.clone(),
            limit: self.search_form.limit,
            subject: Some(self.search_form.subject.clone()).filter(|s| !s.is_empty()),
        };
        let api = self.api.clone();
        // dropping the old request cancels it
        self.search = Some(self.spawn(async move { api.search(&query).await }));
        self.search_results = PanelState::Loading;
        true
    }

    /// Refresh the full document list, superseding any refresh in flight
    pub fn load_all_documents(&mut self) {
        let api = self.api.clone();
        self.listing = Some(self.spawn(async move { api.documents().await }));
        self.documents = PanelState::Loading;
    }

    pub fn open_detail(&mut self, id: &str) {
        let api = self.api.clone();
        let doc_id = id.to_string();
        self.detail_request = Some(self.spawn(async move { api.document(&doc_id).await }));
        self.detail = DetailState::Loading(id.to_string());
    }

    pub fn close_detail(&mut self) {
        self.detail_request = None;
        self.detail = DetailState::Closed;
    }

    /// Browser address for a document card's link
    pub fn document_url(&self, id: &str) -> Option<String> {
        match self.api.document_url(id) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                log::error!("Cannot build link for document {}: {}", id, e);
                None
            }
        }
    }

    /// Apply finished requests and hide expired banners
    pub fn poll(&mut self, now: Instant) {
        if let Some(outcome) = take_finished(&mut self.subjects_request) {
            match outcome {
                Ok(subjects) if !subjects.is_empty() => {
                    log::info!("Loaded {} subjects", subjects.len());
                    self.subjects = subjects;
                }
                Ok(_) => {}
                Err(e) => log::error!("Failed to load subjects: {}", e),
            }
        }

        if let Some(outcome) = take_finished(&mut self.file_upload) {
            match outcome {
                Ok(message) => {
                    self.show_success(Slot::FileUpload, message);
                    self.file_form = FileForm::default();
                }
                Err(e) => self.show_error(
                    Slot::FileUpload,
                    format!("Upload failed: {}", e.user_message(UPLOAD_FILE_FAILED)),
                ),
            }
        }

        if let Some(outcome) = take_finished(&mut self.folder_upload) {
            match outcome {
                Ok(message) => {
                    log::info!("Folder upload finished: {}", message);
                    self.show_success(Slot::DirectoryUpload, message);
                    self.folder_form = FolderForm::default();
                }
                Err(e) => self.show_error(
                    Slot::DirectoryUpload,
                    format!("Upload failed: {}", e.user_message(UPLOAD_FOLDER_FAILED)),
                ),
            }
        }

        if let Some(outcome) = take_finished(&mut self.history_upload) {
            match outcome {
                Ok(message) => {
                    self.show_success(Slot::HistoryUpload, message);
                    self.history_form = HistoryForm::default();
                }
                Err(ApiError::Rejected(message)) => self.show_error(Slot::HistoryUpload, message),
                Err(e) => self.show_error(
                    Slot::HistoryUpload,
                    format!("Upload failed: {}", e.user_message(HISTORY_FAILED)),
                ),
            }
        }

        if let Some(outcome) = take_finished(&mut self.search) {
            match outcome {
                Ok(results) => {
                    log::info!("Search returned {} results", results.len());
                    self.search_results = PanelState::Loaded(results);
                }
                Err(e) => {
                    log::error!("Search failed: {}", e);
                    let message = format!("Search failed: {}", SEARCH_FAILED);
                    self.search_results = PanelState::Failed(message.clone());
                    self.show_error(Slot::Search, message);
                }
            }
        }

        if let Some(outcome) = take_finished(&mut self.listing) {
            match outcome {
                Ok(docs) => {
                    log::info!("Loaded {} documents", docs.len());
                    self.documents = PanelState::Loaded(docs);
                }
                Err(e) => {
                    let message = e.user_message(DOCUMENTS_FAILED);
                    self.documents = PanelState::Failed(message.clone());
                    self.show_error(Slot::Documents, message);
                }
            }
        }

        if let Some(outcome) = take_finished(&mut self.detail_request) {
            self.detail = match outcome {
                Ok(doc) => DetailState::Loaded(Box::new(doc)),
                Err(e) => DetailState::Failed(e.user_message(DOCUMENT_FAILED)),
            };
        }

        self.expire_banners(now);
    }

    pub fn expire_banners(&mut self, now: Instant) {
        self.banners.retain(|_, banner| !banner.is_expired_at(now));
    }
}

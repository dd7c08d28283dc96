use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::document::Document;
use crate::error::ApiError;
use crate::upload::SelectedFile;
use crate::Result;

/// A subject offered by the history-import form
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Subject {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Subject {
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Deserialize, Default)]
struct SubjectsResponse {
    #[serde(default)]
    subjects: Vec<Subject>,
}

#[derive(Deserialize, Default)]
struct DocumentsResponse {
    #[serde(default)]
    documents: Option<Vec<Document>>,
}

#[derive(Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<Document>>,
}

#[derive(Deserialize, Default)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize, Default)]
struct HistoryResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Parameters of a keyword search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub keyword: String,
    pub limit: u32,
    /// Restrict to one subject; `None` searches everything
    pub subject: Option<String>,
}

/// HTTP client for the document service
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            base_url: Url::parse(&base)?,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Browser address of a single document
    pub fn document_url(&self, id: &str) -> Result<Url> {
        let mut link = self.endpoint("document/")?;
        link.path_segments_mut()
            .map_err(|_| ApiError::BadUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(id);
        Ok(link)
    }

    pub async fn subjects(&self) -> Result<Vec<Subject>> {
        let url = self.endpoint("subjects/")?;
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let body: SubjectsResponse = read_json(response).await?;
        Ok(body.subjects)
    }

    pub async fn documents(&self) -> Result<Vec<Document>> {
        let url = self.endpoint("documents/")?;
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let body: DocumentsResponse = read_json(response).await?;
        Ok(body.documents.unwrap_or_default())
    }

    pub async fn document(&self, id: &str) -> Result<Document> {
        let url = self.document_url(id)?;
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    /// Upload one JSON file with its note. Returns the server's message.
    pub async fn upload_file(&self, file: SelectedFile, note: &str) -> Result<String> {
        let url = self.endpoint("upload/")?;
        log::info!("Uploading {} ({} bytes)", file.name, file.bytes.len());

        let form = Form::new()
            .part("file", json_part(file)?)
            .text("keywords", note.to_string());
        let response = self.client.post(url).multipart(form).send().await?;
        let body: MessageResponse = read_json(response).await?;
        Ok(body.message.unwrap_or_default())
    }

    /// Upload several JSON files as one batch. Returns the server's message.
    pub async fn upload_directory(&self, files: Vec<SelectedFile>, note: &str) -> Result<String> {
        let url = self.endpoint("upload-directory/")?;
        log::info!("Uploading {} JSON files", files.len());

        let mut form = Form::new();
        for file in files {
            form = form.part("files", json_part(file)?);
        }
        let form = form.text("keywords", note.to_string());

        let response = self.client.post(url).multipart(form).send().await?;
        let body: MessageResponse = read_json(response).await?;
        Ok(body.message.unwrap_or_default())
    }

    /// Ask the server to import its stored historical questions.
    ///
    /// An empty `subject` imports every subject. A reply with
    /// `success: false` becomes [`ApiError::Rejected`].
    pub async fn upload_history(&self, subject: &str, note: &str) -> Result<String> {
        let url = self.endpoint("upload-history/")?;
        log::info!(
            "Importing history for {}",
            if subject.is_empty() { "all subjects" } else { subject }
        );

        let form = Form::new()
            .text("subject", subject.to_string())
            .text("keywords", note.to_string());
        let response = self.client.post(url).multipart(form).send().await?;
        let body: HistoryResponse = read_json(response).await?;
        let message = body.message.unwrap_or_default();
        if body.success {
            Ok(message)
        } else {
            log::warn!("History import rejected: {}", message);
            Err(ApiError::Rejected(message))
        }
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Document>> {
        let url = self.endpoint("api/search/")?;
        log::debug!("Searching for {:?} (limit {})", query.keyword, query.limit);

        let mut form = Form::new()
            .text("keyword", query.keyword.clone())
            .text("limit", query.limit.to_string());
        if let Some(subject) = query.subject.as_ref().filter(|s| !s.is_empty()) {
            form = form.text("subject", subject.clone());
        }
        let response = self.client.post(url).multipart(form).send().await?;
        let body: SearchResponse = read_json(response).await?;
        Ok(body.results.unwrap_or_default())
    }
}

fn json_part(file: SelectedFile) -> Result<Part> {
    Ok(Part::bytes(file.bytes)
        .file_name(file.name)
        .mime_str("application/json")?)
}

/// Decode a successful body, or turn a failure status into [`ApiError::Http`]
/// carrying the body's `detail` when it has one.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .map(|detail| match detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });
        log::warn!("Server returned {}: {:?}", status, detail);
        return Err(ApiError::Http { status, detail });
    }
    Ok(response.json::<T>().await?)
}

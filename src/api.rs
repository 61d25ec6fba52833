//! HTTP surface for LexiMind.
//!
//! - `GET /health` – Model readiness and summarizer defaults.
//! - `GET /healthy` – Liveness check for the question-answering side.
//! - `POST /summarize` – Multipart `file`; extract, clean, and summarize a judgment.
//! - `POST /upload` – Multipart `file`; build and persist the retrieval index for a judgment.
//! - `POST /ask` – Multipart `file` + `question`; answer from the document when the question
//!   passes the relevance gate.
//! - `POST /translate` – JSON `{text, lang, chunked?}`; rate limited per client address.
//! - `GET /metrics` – Request counters.
//!
//! Every error body is JSON. Panics inside handlers become a `500` JSON body; framework-level
//! rejections (unknown route, wrong method, oversized body) pass through unchanged.

use crate::extract::{ALLOWED_EXTENSIONS, allowed_file};
use crate::processing::{AnswerKind, LegalApi, ProcessingError, Section, UploadedFile};
use crate::rate_limit::RateLimiter;
use crate::translation::SOURCE_LANG;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        ConnectInfo, DefaultBodyLimit, Multipart, Request, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::any::Any;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

/// Build the HTTP router exposing the LexiMind API surface.
pub fn create_router<S>(service: Arc<S>, limiter: Arc<RateLimiter>, max_upload_bytes: usize) -> Router
where
    S: LegalApi + 'static,
{
    let state = AppState { service, limiter };
    Router::new()
        .route("/health", get(health::<S>))
        .route("/healthy", get(healthy))
        .route("/summarize", post(summarize::<S>))
        .route("/upload", post(upload::<S>))
        .route("/ask", post(ask::<S>))
        .route(
            "/translate",
            post(translate::<S>).route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit::<S>,
            )),
        )
        .route("/metrics", get(get_metrics::<S>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Shared handler state.
struct AppState<S> {
    service: Arc<S>,
    limiter: Arc<RateLimiter>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            limiter: Arc::clone(&self.limiter),
        }
    }
}

/// JSON error response with an explicit status.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    fn bad_request(error: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            json!({ "error": error, "status": "error" }),
        )
    }

    /// `/summarize` errors always carry an empty summary.
    fn summary(status: StatusCode, error: &str) -> Self {
        Self::new(
            status,
            json!({ "error": error, "summary": "", "status": "error" }),
        )
    }

    fn multipart(error: MultipartError) -> Self {
        Self::new(
            error.status(),
            json!({ "error": error.body_text(), "status": "error" }),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn invalid_type_message() -> String {
    format!("Invalid file type. Allowed: {}", ALLOWED_EXTENSIONS.join(", "))
}

/// Parsed multipart form shared by the upload endpoints.
#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    question: Option<String>,
}

async fn read_form(multipart: Result<Multipart, MultipartRejection>) -> Result<UploadForm, MultipartError> {
    let mut form = UploadForm::default();
    let Ok(mut multipart) = multipart else {
        return Ok(form);
    };
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") if form.file.is_none() => {
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let bytes = field.bytes().await?;
                form.file = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            Some("question") => form.question = Some(field.text().await?),
            _ => {}
        }
    }
    Ok(form)
}

/// Response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    device: &'static str,
    chunk_size: usize,
    default_max_length: usize,
    default_min_length: usize,
}

async fn health<S>(State(state): State<AppState<S>>) -> Json<HealthResponse>
where
    S: LegalApi,
{
    let snapshot = state.service.health();
    Json(HealthResponse {
        status: "healthy",
        model_loaded: snapshot.model_loaded,
        device: "cpu",
        chunk_size: snapshot.chunk_size,
        default_max_length: snapshot.default_max_length,
        default_min_length: snapshot.default_min_length,
    })
}

async fn healthy() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Legal QA system is running"
    }))
}

/// Success body for `POST /summarize`.
#[derive(Serialize)]
struct SummarizeResponse {
    summary: String,
    filename: String,
    processing_time: String,
    word_count: usize,
    summary_length: usize,
    status: &'static str,
}

/// Summarize an uploaded judgment.
async fn summarize<S>(
    State(state): State<AppState<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummarizeResponse>, ApiError>
where
    S: LegalApi,
{
    if !state.service.health().model_loaded {
        return Err(ApiError::summary(StatusCode::SERVICE_UNAVAILABLE, "Model not loaded"));
    }

    let form = read_form(multipart).await.map_err(ApiError::multipart)?;
    let Some(file) = form.file else {
        return Err(ApiError::summary(StatusCode::BAD_REQUEST, "No file uploaded"));
    };
    if file.filename.is_empty() {
        return Err(ApiError::summary(StatusCode::BAD_REQUEST, "No selected file"));
    }
    if !allowed_file(&file.filename) {
        return Err(ApiError::summary(StatusCode::BAD_REQUEST, &invalid_type_message()));
    }

    let original_name = file.filename.clone();
    match state.service.summarize_document(file).await {
        Ok(outcome) => Ok(Json(SummarizeResponse {
            summary: outcome.summary,
            filename: outcome.filename,
            processing_time: format!("{:.2} seconds", outcome.processing_secs),
            word_count: outcome.word_count,
            summary_length: outcome.summary_length,
            status: "success",
        })),
        Err(ProcessingError::ModelUnavailable) => Err(ApiError::summary(
            StatusCode::SERVICE_UNAVAILABLE,
            "Model not loaded",
        )),
        Err(ProcessingError::EmptyDocument) => Err(ApiError::summary(
            StatusCode::BAD_REQUEST,
            "Empty file or could not extract text",
        )),
        Err(error) => {
            let filename = crate::processing::sanitize::secure_filename(&original_name);
            tracing::error!(filename = %filename, error = %error, "Summarization failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Processing failed",
                    "details": error.to_string(),
                    "filename": filename,
                    "summary": "",
                    "status": "error"
                }),
            ))
        }
    }
}

/// Success body for `POST /upload`.
#[derive(Serialize)]
struct UploadResponse {
    message: &'static str,
    filename: String,
    status: &'static str,
}

/// Build and cache the retrieval index for an uploaded judgment.
async fn upload<S>(
    State(state): State<AppState<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError>
where
    S: LegalApi,
{
    let form = read_form(multipart).await.map_err(ApiError::multipart)?;
    let Some(file) = form.file else {
        return Err(ApiError::bad_request("No file uploaded"));
    };
    if file.filename.is_empty() {
        return Err(ApiError::bad_request("No selected file"));
    }
    if !allowed_file(&file.filename) {
        return Err(ApiError::bad_request(&invalid_type_message()));
    }

    match state.service.index_document(file).await {
        Ok(outcome) => {
            tracing::info!(
                filename = %outcome.filename,
                chunks = outcome.chunk_count,
                "Upload request completed"
            );
            Ok(Json(UploadResponse {
                message: "Document processed successfully",
                filename: outcome.filename,
                status: "success",
            }))
        }
        Err(ProcessingError::EmptyDocument) => Err(ApiError::bad_request(
            "Could not extract text from document",
        )),
        Err(error) => {
            tracing::error!(error = %error, "Error processing document");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Document processing failed",
                    "details": error.to_string(),
                    "status": "error"
                }),
            ))
        }
    }
}

/// Minimum number of words in a question.
const MIN_QUESTION_WORDS: usize = 3;

/// Body for accepted and rejected questions.
#[derive(Serialize)]
struct AskResponse {
    answer: String,
    sections: Vec<Section>,
    filename: String,
    #[serde(rename = "isRelevant")]
    is_relevant: bool,
    status: &'static str,
}

/// Answer a question about an uploaded judgment.
async fn ask<S>(
    State(state): State<AppState<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError>
where
    S: LegalApi,
{
    let form = read_form(multipart).await.map_err(ApiError::multipart)?;
    let Some(file) = form.file else {
        return Err(ApiError::bad_request("Missing file"));
    };
    if file.filename.is_empty() {
        return Err(ApiError::bad_request("No file selected"));
    }

    let question = form.question.unwrap_or_default().trim().to_string();
    if question.split_whitespace().count() < MIN_QUESTION_WORDS {
        return Ok(Json(json!({
            "error": "Please ask a more detailed question (minimum 3 words)",
            "status": "success"
        }))
        .into_response());
    }

    match state.service.answer_question(file, question).await {
        Ok(answer) => {
            let response = match answer.kind {
                AnswerKind::Relevant(sections) => AskResponse {
                    answer: "Here are the relevant sections from the document:".into(),
                    sections,
                    filename: answer.filename,
                    is_relevant: true,
                    status: "success",
                },
                AnswerKind::Irrelevant(message) => AskResponse {
                    answer: message,
                    sections: Vec::new(),
                    filename: answer.filename,
                    is_relevant: false,
                    status: "success",
                },
            };
            Ok(Json(response).into_response())
        }
        Err(ProcessingError::EmptyDocument) => Err(ApiError::bad_request(
            "Could not extract text from document",
        )),
        Err(error) => {
            tracing::error!(error = %error, "Error answering question");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to process question",
                    "details": error.to_string(),
                    "status": "error"
                }),
            ))
        }
    }
}

/// Success body for `POST /translate`.
#[derive(Serialize)]
struct TranslateResponse {
    translation: String,
    original_text: String,
    source_lang: &'static str,
    target_lang: String,
    duration_seconds: f64,
    was_chunked: bool,
    original_length: usize,
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

/// Translate English text into the requested language.
async fn translate<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TranslateResponse>, ApiError>
where
    S: LegalApi,
{
    if !is_json(&headers) {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Request must be JSON" }),
        ));
    }
    let payload: Value = serde_json::from_slice(&body).map_err(|error| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Request must be JSON", "message": error.to_string() }),
        )
    })?;

    let text = payload.get("text");
    let lang = payload.get("lang");
    if !truthy(text) || !truthy(lang) {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            json!({
                "error": "Missing required parameters",
                "message": "Both \"text\" and \"lang\" parameters are required"
            }),
        ));
    }
    let (Some(Value::String(text)), Some(Value::String(lang))) = (text, lang) else {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            json!({
                "error": "Invalid parameters",
                "message": "Both \"text\" and \"lang\" must be strings"
            }),
        ));
    };
    let chunked = truthy(payload.get("chunked"));
    let original_length = text.chars().count();

    let started = Instant::now();
    match state
        .service
        .translate(text.clone(), lang.clone(), chunked)
        .await
    {
        Ok(outcome) => Ok(Json(TranslateResponse {
            translation: outcome.translation,
            original_text: text.clone(),
            source_lang: SOURCE_LANG,
            target_lang: lang.clone(),
            duration_seconds: (started.elapsed().as_secs_f64() * 100.0).round() / 100.0,
            was_chunked: outcome.was_chunked,
            original_length,
        })),
        Err(error) => {
            tracing::error!(error = %error, target_lang = %lang, "Translation failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Translation failed",
                    "message": error.to_string(),
                    "original_text": text,
                    "target_lang": lang,
                    "original_length": original_length
                }),
            ))
        }
    }
}

/// Reject clients that exceeded the per-minute translation budget.
async fn rate_limit<S>(
    State(state): State<AppState<S>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response
where
    S: LegalApi,
{
    let client = connect_info
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    if !state.limiter.check(client, Instant::now()) {
        state.service.record_rate_limited();
        return ApiError::new(
            StatusCode::TOO_MANY_REQUESTS,
            json!({
                "error": "Rate limit exceeded",
                "message": format!(
                    "Please wait and try again. Limit is {} requests per minute.",
                    state.limiter.limit()
                )
            }),
        )
        .into_response();
    }
    next.run(request).await
}

/// Return request counters.
async fn get_metrics<S>(State(state): State<AppState<S>>) -> Json<crate::metrics::MetricsSnapshot>
where
    S: LegalApi,
{
    Json(state.service.metrics_snapshot())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else {
        "Unknown panic".to_string()
    };
    tracing::error!(message = %message, "Unexpected error");
    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "Internal server error", "message": message }),
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::create_router;
    use crate::metrics::MetricsSnapshot;
    use crate::processing::{
        Answer, AnswerKind, HealthSnapshot, IndexOutcome, LegalApi, ProcessingError, Section,
        SummaryOutcome, UploadedFile,
    };
    use crate::rate_limit::RateLimiter;
    use crate::translation::{TranslationError, TranslationOutcome};
    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        extract::connect_info::MockConnectInfo,
        http::{Method, Request, StatusCode},
    };
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    const BOUNDARY: &str = "leximind-test-boundary";

    #[derive(Default)]
    struct StubService {
        model_loaded: bool,
        relevant: bool,
        fail_with_empty: bool,
        panic_on_index: bool,
        uploads: Mutex<Vec<UploadedFile>>,
        questions: Mutex<Vec<String>>,
        rate_limited: AtomicU64,
    }

    #[async_trait]
    impl LegalApi for StubService {
        fn health(&self) -> HealthSnapshot {
            HealthSnapshot {
                model_loaded: self.model_loaded,
                chunk_size: 1024,
                default_max_length: 300,
                default_min_length: 100,
            }
        }

        async fn summarize_document(
            &self,
            upload: UploadedFile,
        ) -> Result<SummaryOutcome, ProcessingError> {
            if self.fail_with_empty {
                return Err(ProcessingError::EmptyDocument);
            }
            let filename = upload.filename.replace(' ', "_");
            self.uploads.lock().await.push(upload);
            Ok(SummaryOutcome {
                summary: "The appeal is dismissed.".into(),
                filename,
                processing_secs: 1.2345,
                word_count: 120,
                summary_length: 4,
            })
        }

        async fn index_document(
            &self,
            upload: UploadedFile,
        ) -> Result<IndexOutcome, ProcessingError> {
            if self.panic_on_index {
                panic!("index exploded");
            }
            if self.fail_with_empty {
                return Err(ProcessingError::EmptyDocument);
            }
            let filename = upload.filename.clone();
            self.uploads.lock().await.push(upload);
            Ok(IndexOutcome {
                filename,
                chunk_count: 3,
            })
        }

        async fn answer_question(
            &self,
            upload: UploadedFile,
            question: String,
        ) -> Result<Answer, ProcessingError> {
            self.questions.lock().await.push(question);
            let kind = if self.relevant {
                AnswerKind::Relevant(vec![Section {
                    content: "Bonus is payable under the award.".into(),
                    score: 0.9,
                }])
            } else {
                AnswerKind::Irrelevant("I can only answer questions about the legal judgment document.".into())
            };
            Ok(Answer {
                filename: upload.filename,
                kind,
            })
        }

        async fn translate(
            &self,
            text: String,
            target_lang: String,
            chunked: bool,
        ) -> Result<TranslationOutcome, TranslationError> {
            if target_lang == "xx" {
                return Err(TranslationError::AllServicesFailed);
            }
            Ok(TranslationOutcome {
                translation: format!("[{target_lang}] {text}"),
                was_chunked: chunked,
            })
        }

        fn record_rate_limited(&self) {
            self.rate_limited.fetch_add(1, Ordering::SeqCst);
        }

        fn metrics_snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot {
                rate_limited: self.rate_limited.load(Ordering::SeqCst),
                ..MetricsSnapshot::default()
            }
        }
    }

    fn app(service: Arc<StubService>) -> Router {
        create_router(service, Arc::new(RateLimiter::new(10)), 1024 * 1024)
    }

    fn multipart_body(file: Option<(&str, &str)>, question: Option<&str>) -> String {
        let mut body = String::new();
        if let Some((filename, contents)) = file {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n{contents}\r\n"
            ));
        }
        if let Some(question) = question {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"question\"\r\n\r\n{question}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn multipart_request(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request")
    }

    fn json_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/translate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("router response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_reports_model_and_defaults() {
        let service = Arc::new(StubService {
            model_loaded: true,
            ..StubService::default()
        });
        let request = Request::get("/health").body(Body::empty()).expect("request");
        let (status, json) = send(app(service), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "status": "healthy",
                "model_loaded": true,
                "device": "cpu",
                "chunk_size": 1024,
                "default_max_length": 300,
                "default_min_length": 100
            })
        );
    }

    #[tokio::test]
    async fn healthy_endpoint_answers() {
        let request = Request::get("/healthy").body(Body::empty()).expect("request");
        let (status, json) = send(app(Arc::default()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Legal QA system is running");
    }

    #[tokio::test]
    async fn summarize_reports_missing_model_first() {
        let request = multipart_request("/summarize", multipart_body(None, None));
        let (status, json) = send(app(Arc::default()), request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            json,
            json!({"error": "Model not loaded", "summary": "", "status": "error"})
        );
    }

    #[tokio::test]
    async fn summarize_validates_upload() {
        let service = Arc::new(StubService {
            model_loaded: true,
            ..StubService::default()
        });
        let cases = [
            (multipart_body(None, Some("unused")), "No file uploaded"),
            (multipart_body(Some(("", "text")), None), "No selected file"),
            (
                multipart_body(Some(("notes.rtf", "text")), None),
                "Invalid file type. Allowed: pdf, doc, docx, txt",
            ),
        ];
        for (body, expected) in cases {
            let (status, json) = send(app(service.clone()), multipart_request("/summarize", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], expected);
            assert_eq!(json["summary"], "");
            assert_eq!(json["status"], "error");
        }
        assert!(service.uploads.lock().await.is_empty());
    }

    #[tokio::test]
    async fn summarize_returns_summary_payload() {
        let service = Arc::new(StubService {
            model_loaded: true,
            ..StubService::default()
        });
        let body = multipart_body(Some(("bonus case.txt", "The tribunal awarded bonus.")), None);
        let (status, json) = send(app(service.clone()), multipart_request("/summarize", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["summary"], "The appeal is dismissed.");
        assert_eq!(json["filename"], "bonus_case.txt");
        assert_eq!(json["processing_time"], "1.23 seconds");
        assert_eq!(json["word_count"], 120);
        assert_eq!(json["summary_length"], 4);
        assert_eq!(json["status"], "success");

        let uploads = service.uploads.lock().await;
        assert_eq!(uploads[0].bytes, b"The tribunal awarded bonus.");
    }

    #[tokio::test]
    async fn summarize_maps_empty_document_to_bad_request() {
        let service = Arc::new(StubService {
            model_loaded: true,
            fail_with_empty: true,
            ..StubService::default()
        });
        let body = multipart_body(Some(("blank.txt", " ")), None);
        let (status, json) = send(app(service), multipart_request("/summarize", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Empty file or could not extract text");
    }

    #[tokio::test]
    async fn upload_returns_confirmation() {
        let body = multipart_body(Some(("case.pdf", "%PDF")), None);
        let (status, json) = send(app(Arc::default()), multipart_request("/upload", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "message": "Document processed successfully",
                "filename": "case.pdf",
                "status": "success"
            })
        );
    }

    #[tokio::test]
    async fn upload_maps_empty_document() {
        let service = Arc::new(StubService {
            fail_with_empty: true,
            ..StubService::default()
        });
        let body = multipart_body(Some(("case.txt", "")), None);
        let (status, json) = send(app(service), multipart_request("/upload", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Could not extract text from document");
    }

    #[tokio::test]
    async fn handler_panic_becomes_json_500() {
        let service = Arc::new(StubService {
            panic_on_index: true,
            ..StubService::default()
        });
        let body = multipart_body(Some(("case.txt", "The writ petition")), None);
        let (status, json) = send(app(service), multipart_request("/upload", body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            json!({ "error": "Internal server error", "message": "index exploded" })
        );
    }

    #[tokio::test]
    async fn oversized_bodies_are_rejected_with_413() {
        let service: Arc<StubService> = Arc::default();
        let small = || create_router(service.clone(), Arc::new(RateLimiter::new(10)), 64);

        let long_text = "bonus ".repeat(40);
        let translate = json_request(&json!({ "text": long_text, "lang": "fr" }).to_string());
        let response = small().oneshot(translate).await.expect("router response");
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = multipart_body(Some(("case.txt", long_text.as_str())), None);
        let (status, _) = send(small(), multipart_request("/upload", body)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(service.uploads.lock().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_routes_pass_through() {
        let request = Request::get("/missing").body(Body::empty()).expect("request");
        let response = app(Arc::default()).oneshot(request).await.expect("router response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ask_requires_file_and_detailed_question() {
        let service: Arc<StubService> = Arc::default();
        let (status, json) = send(
            app(service.clone()),
            multipart_request("/ask", multipart_body(None, Some("What is the order?"))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing file");

        let (status, json) = send(
            app(service.clone()),
            multipart_request("/ask", multipart_body(Some(("case.txt", "x")), Some("Bonus?"))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "error": "Please ask a more detailed question (minimum 3 words)",
                "status": "success"
            })
        );
        assert!(service.questions.lock().await.is_empty());
    }

    #[tokio::test]
    async fn ask_returns_sections_when_relevant() {
        let service = Arc::new(StubService {
            relevant: true,
            ..StubService::default()
        });
        let body = multipart_body(Some(("case.txt", "x")), Some("  Why was bonus awarded?  "));
        let (status, json) = send(app(service.clone()), multipart_request("/ask", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["isRelevant"], true);
        assert_eq!(json["answer"], "Here are the relevant sections from the document:");
        assert_eq!(json["sections"][0]["content"], "Bonus is payable under the award.");
        assert_eq!(json["filename"], "case.txt");
        assert_eq!(
            service.questions.lock().await.as_slice(),
            ["Why was bonus awarded?".to_string()]
        );
    }

    #[tokio::test]
    async fn ask_returns_refusal_when_irrelevant() {
        let body = multipart_body(Some(("case.txt", "x")), Some("Is it raining today?"));
        let (status, json) = send(app(Arc::default()), multipart_request("/ask", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["isRelevant"], false);
        assert_eq!(json["sections"], json!([]));
        assert_eq!(json["status"], "success");
    }

    #[tokio::test]
    async fn translate_validates_payload() {
        let service: Arc<StubService> = Arc::default();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/translate")
            .header("content-type", "text/plain")
            .body(Body::from("hello"))
            .expect("request");
        let (status, json) = send(app(service.clone()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Request must be JSON");

        let (status, json) = send(app(service.clone()), json_request(r#"{"text": "hi"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing required parameters");

        let (status, json) =
            send(app(service.clone()), json_request(r#"{"text": 5, "lang": "fr"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid parameters");
    }

    #[tokio::test]
    async fn translate_returns_translation_payload() {
        let (status, json) = send(
            app(Arc::default()),
            json_request(r#"{"text": "The appeal is dismissed.", "lang": "fr", "chunked": true}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["translation"], "[fr] The appeal is dismissed.");
        assert_eq!(json["original_text"], "The appeal is dismissed.");
        assert_eq!(json["source_lang"], "en");
        assert_eq!(json["target_lang"], "fr");
        assert_eq!(json["was_chunked"], true);
        assert_eq!(json["original_length"], 24);
        assert!(json["duration_seconds"].is_number());
    }

    #[tokio::test]
    async fn translate_failure_echoes_request() {
        let (status, json) = send(
            app(Arc::default()),
            json_request(r#"{"text": "Costs", "lang": "xx"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            json!({
                "error": "Translation failed",
                "message": "All translation services failed",
                "original_text": "Costs",
                "target_lang": "xx",
                "original_length": 5
            })
        );
    }

    #[tokio::test]
    async fn eleventh_translation_from_one_client_is_rejected() {
        let service: Arc<StubService> = Arc::default();
        let app = app(service.clone()).layer(MockConnectInfo(SocketAddr::from(([10, 1, 2, 3], 4000))));
        for _ in 0..10 {
            let (status, _) = send(app.clone(), json_request(r#"{"text": "hi", "lang": "fr"}"#)).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, json) = send(app.clone(), json_request(r#"{"text": "hi", "lang": "fr"}"#)).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json["error"], "Rate limit exceeded");
        assert_eq!(
            json["message"],
            "Please wait and try again. Limit is 10 requests per minute."
        );
        assert_eq!(service.metrics_snapshot().rate_limited, 1);

        let request = Request::get("/health").body(Body::empty()).expect("request");
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_route_serializes_snapshot() {
        let request = Request::get("/metrics").body(Body::empty()).expect("request");
        let (status, json) = send(app(Arc::default()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["documents_indexed"], 0);
        assert_eq!(json["rate_limited"], 0);
    }
}

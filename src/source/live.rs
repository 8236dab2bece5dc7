use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

use super::AnalysisSource;
use crate::analysis::{AnalysisReport, AnalyzeResponse, ErrorBody, SourceKind};
use crate::catalog::{Catalog, InternshipPosting};
use crate::error::AnalyzeError;
use crate::upload::{validate_resume, ResumeFile};

const ANALYZE_PATH: &str = "api/analyze-resume";
const INTERNSHIPS_PATH: &str = "api/internships";
const UPLOAD_FIELD: &str = "resume";

/// Client for the backend analysis service.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    catalog: Arc<Catalog>,
}

impl BackendClient {
    /// `catalog` only fills in score ranges the backend leaves out.
    pub fn new(base_url: &str, timeout: Duration, catalog: Arc<Catalog>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("skillsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url,
            timeout,
            catalog,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, AnalyzeError> {
        self.base_url
            .join(path)
            .map_err(|e| AnalyzeError::UnknownFailure(format!("invalid endpoint {}: {}", path, e)))
    }

    /// Fetch the backend's full internship catalog.
    pub async fn fetch_internships(&self) -> Result<Vec<InternshipPosting>, AnalyzeError> {
        let url = self.endpoint(INTERNSHIPS_PATH)?;
        tracing::debug!(%url, "fetching internships");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| classify(e, self.timeout))?;
        let body = read_success_body(response, self.timeout).await?;

        serde_json::from_slice(&body)
            .map_err(|e| AnalyzeError::UnknownFailure(format!("invalid internships body: {}", e)))
    }
}

#[async_trait]
impl AnalysisSource for BackendClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Live
    }

    async fn analyze(&self, file: &ResumeFile) -> Result<AnalysisReport, AnalyzeError> {
        validate_resume(file)?;
        let url = self.endpoint(ANALYZE_PATH)?;

        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| AnalyzeError::UnknownFailure(format!("invalid MIME type: {}", e)))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        tracing::debug!(%url, file = %file.name, bytes = file.size(), "uploading resume");
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| classify(e, self.timeout))?;
        let body = read_success_body(response, self.timeout).await?;

        let parsed: AnalyzeResponse = serde_json::from_slice(&body)
            .map_err(|e| AnalyzeError::UnknownFailure(format!("invalid analysis body: {}", e)))?;
        let report = parsed.into_report(&self.catalog);
        tracing::debug!(
            score = report.analysis.score(),
            recommendations = report.recommendations.len(),
            "analysis received"
        );
        Ok(report)
    }
}

/// Return the body of a 2xx response, or map the failure body to an error.
async fn read_success_body(
    response: reqwest::Response,
    timeout: Duration,
) -> Result<Vec<u8>, AnalyzeError> {
    let status = response.status();
    let body = response.bytes().await.map_err(|e| classify(e, timeout))?;

    if status.is_success() {
        return Ok(body.to_vec());
    }

    let error_body: ErrorBody = serde_json::from_slice(&body).unwrap_or_default();
    tracing::warn!(status = status.as_u16(), detail = ?error_body.message(), "backend rejected request");
    Err(AnalyzeError::from_status(status.as_u16(), error_body.message()))
}

fn classify(err: reqwest::Error, timeout: Duration) -> AnalyzeError {
    if err.is_timeout() {
        AnalyzeError::RequestTimeout(timeout)
    } else if err.is_connect() {
        AnalyzeError::NetworkUnavailable(err.to_string())
    } else {
        AnalyzeError::UnknownFailure(err.to_string())
    }
}

/// Parse the configured backend URL so relative endpoint joins keep any path
/// prefix ("http://host/prefix" -> "http://host/prefix/api/...").
pub(crate) fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    let url = Url::parse(&with_slash)
        .with_context(|| format!("Invalid backend URL '{}'", raw))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Invalid backend URL '{}': must be an http(s) URL", raw);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::PDF_MIME;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{}", addr), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn client(base: &str, timeout: Duration) -> BackendClient {
        // Same provider main() installs; a second install in the same process is a no-op error
        let _ = rustls::crypto::ring::default_provider().install_default();
        BackendClient::new(base, timeout, Arc::new(Catalog::builtin())).unwrap()
    }

    fn pdf() -> ResumeFile {
        ResumeFile::new("jane.pdf", PDF_MIME, b"%PDF-1.4 resume".to_vec())
    }

    const OK_BODY: &str = r#"{
        "analysis": {"overall_rating": 8, "strengths": ["  Strong in AWS"], "weaknesses": []},
        "recommendations": [{
            "id": 11, "title": "Cloud Engineering Intern", "company": "Nimbus Systems",
            "location": "Remote", "category": "Cloud / DevOps", "description": "d",
            "skills_required": ["AWS", "Docker", "Kubernetes", "CI/CD"],
            "matched_skills": ["AWS"], "match_percentage": 25, "score_range": [7, 9]
        }]
    }"#;

    #[tokio::test]
    async fn test_analyze_success_uploads_multipart() {
        let (base, server) = serve_once("200 OK", OK_BODY).await;
        let report = client(&base, Duration::from_secs(5)).analyze(&pdf()).await.unwrap();

        assert_eq!(report.source(), SourceKind::Live);
        assert_eq!(report.analysis.score(), 8.0);
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].matched_skills(), ["AWS"]);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/analyze-resume HTTP/1.1"));
        assert!(request.contains("multipart/form-data"));
        assert!(request.contains(r#"name="resume""#));
        assert!(request.contains(r#"filename="jane.pdf""#));
        assert!(request.contains("%PDF-1.4 resume"));
    }

    #[tokio::test]
    async fn test_server_detail_is_surfaced() {
        let (base, _server) =
            serve_once("400 Bad Request", r#"{"detail": "No text found in PDF"}"#).await;
        let err = client(&base, Duration::from_secs(5)).analyze(&pdf()).await.unwrap_err();
        assert_eq!(
            err,
            AnalyzeError::ServerReportedError {
                status: 400,
                detail: "No text found in PDF".to_string()
            }
        );
        assert_eq!(err.user_message(), "No text found in PDF");
    }

    #[tokio::test]
    async fn test_failure_without_detail_is_generic() {
        let (base, _server) = serve_once("500 Internal Server Error", "oops").await;
        let err = client(&base, Duration::from_secs(5)).analyze(&pdf()).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::UnknownFailure(_)));
        assert_eq!(err.user_message(), "Something went wrong. Please try again.");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_unknown_failure() {
        let (base, _server) = serve_once("200 OK", r#"{"analysis": {}}"#).await;
        let err = client(&base, Duration::from_secs(5)).analyze(&pdf()).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::UnknownFailure(_)));
    }

    #[tokio::test]
    async fn test_timeout_maps_to_request_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let _ = read_request(&mut socket).await;
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let timeout = Duration::from_millis(200);
        let err = client(&format!("http://{}", addr), timeout)
            .analyze(&pdf())
            .await
            .unwrap_err();
        assert_eq!(err, AnalyzeError::RequestTimeout(timeout));
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr), Duration::from_secs(5))
            .analyze(&pdf())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::NetworkUnavailable(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_non_pdf_is_rejected_before_any_request() {
        // Nothing listens here; reaching the network would be a NetworkUnavailable error.
        let c = client("http://127.0.0.1:9", Duration::from_secs(5));
        let file = ResumeFile::new("cv.txt", "text/plain", b"hello".to_vec());
        let err = c.analyze(&file).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidFileType { .. }));
    }

    #[tokio::test]
    async fn test_fetch_internships() {
        let body = serde_json::to_string(Catalog::builtin().postings()).unwrap();
        let (base, server) = serve_once("200 OK", &body).await;
        let postings = client(&base, Duration::from_secs(5)).fetch_internships().await.unwrap();
        assert_eq!(postings.len(), 12);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/internships HTTP/1.1"));
    }

    #[test]
    fn test_base_url_keeps_prefix() {
        let url = normalize_base_url("http://example.com/skillsync").unwrap();
        assert_eq!(
            url.join(ANALYZE_PATH).unwrap().as_str(),
            "http://example.com/skillsync/api/analyze-resume"
        );
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
    }
}

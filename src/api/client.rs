/// HTTPクライアント
///
/// 分類サーバーとの通信を担当するHTTPクライアント。
/// タイムアウト、multipartアップロード、エラーハンドリングを含みます。
use crate::api::error::InfraError;
use crate::api::types::{ClassificationResponse, HealthResponse, ServiceInfo};
use crate::config::{APP_CONFIG, UserConfig};
use crate::domain::file::SelectedFile;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::time::Duration;

/// APIクライアントの結果型
type ApiResult<T> = Result<T, InfraError>;

/// APIクライアント
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    ///
    /// # Arguments
    /// * `base_url` - サーバーのベースURL（例: "http://127.0.0.1:5000"）
    /// * `timeout` - 1リクエストあたりのタイムアウト
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InfraError::network(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// ユーザー設定（と `--server` の上書き）からクライアントを作成
    pub fn from_config(config: &UserConfig, server_override: Option<&str>) -> ApiResult<Self> {
        let base_url = server_override.unwrap_or_else(|| config.base_url());
        Self::new(base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETリクエストを送信
    pub async fn get(&self, endpoint: &str) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        Self::send_with_error_handling(self.client.get(&url), endpoint, "GET").await
    }

    /// multipartのPOSTリクエストを送信
    pub async fn post_multipart(&self, endpoint: &str, form: Form) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        Self::send_with_error_handling(self.client.post(&url).multipart(form), endpoint, "POST")
            .await
    }

    /// 画像をアップロードして分類結果を受け取る
    ///
    /// サーバーは論理エラーも 4xx/5xx + JSON で返すため、
    /// ステータスに関係なくボディをJSONとして解釈する。
    pub async fn classify(&self, file: &SelectedFile) -> ApiResult<ClassificationResponse> {
        let endpoint = APP_CONFIG.api.upload_path;

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())
            .map_err(|e| InfraError::network(format!("Invalid MIME type '{}': {}", file.mime(), e)))?;
        let form = Form::new().part(APP_CONFIG.api.upload_field, part);

        tracing::info!(
            file = file.name(),
            size = file.size(),
            mime = file.mime(),
            "submitting image for classification"
        );

        let response = self.post_multipart(endpoint, form).await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "classification response received");

        let body = Self::read_body(response, endpoint, "POST").await?;
        serde_json::from_str(&body).map_err(|e| {
            InfraError::invalid_response(
                endpoint,
                format!("HTTP {}: {}", status.as_u16(), e),
            )
        })
    }

    /// サーバーの稼働状況を取得
    pub async fn health(&self) -> ApiResult<HealthResponse> {
        let endpoint = APP_CONFIG.api.health_path;
        let response = self.get(endpoint).await?;
        let response = Self::check_response(response, endpoint).await?;
        Self::parse_json(response, endpoint).await
    }

    /// サービス情報を取得
    pub async fn info(&self) -> ApiResult<ServiceInfo> {
        let endpoint = APP_CONFIG.api.info_path;
        let response = self.get(endpoint).await?;
        let response = Self::check_response(response, endpoint).await?;
        Self::parse_json(response, endpoint).await
    }

    /// URLを構築
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// リクエストを送信し、エラーハンドリングを行う
    async fn send_with_error_handling(
        request: reqwest::RequestBuilder,
        endpoint: &str,
        method: &str,
    ) -> ApiResult<Response> {
        request
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, endpoint, method))
    }

    fn map_transport_error(e: reqwest::Error, endpoint: &str, method: &str) -> InfraError {
        if e.is_timeout() {
            InfraError::timeout(format!("{} {}", method, endpoint))
        } else if e.is_connect() {
            InfraError::network(format!(
                "Connection failed for {} {}: {}",
                method, endpoint, e
            ))
        } else {
            InfraError::network(format!("Request failed for {} {}: {}", method, endpoint, e))
        }
    }

    async fn read_body(response: Response, endpoint: &str, method: &str) -> ApiResult<String> {
        response
            .text()
            .await
            .map_err(|e| Self::map_transport_error(e, endpoint, method))
    }

    /// レスポンスをチェックしてエラーを返す
    pub async fn check_response(response: Response, endpoint: &str) -> ApiResult<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        Err(InfraError::api(endpoint, error_body, Some(status_code)))
    }

    /// JSONレスポンスをデシリアライズ
    pub async fn parse_json<T: serde::de::DeserializeOwned>(
        response: Response,
        endpoint: &str,
    ) -> ApiResult<T> {
        response.json().await.map_err(|e| {
            InfraError::invalid_response(endpoint, format!("Failed to parse JSON response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(server.uri(), Duration::from_secs(5)).expect("client should build")
    }

    fn sample_file() -> SelectedFile {
        SelectedFile::new("chest.png", "image/png", b"fake png bytes".to_vec())
    }

    #[test]
    fn test_client_creation_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.build_url("/health"), "http://localhost:5000/health");
    }

    #[test]
    fn test_from_config_prefers_override() {
        let mut config = UserConfig::default();
        config.set_server_url("http://configured:5000").unwrap();

        let client = ApiClient::from_config(&config, Some("http://override:9000")).unwrap();
        assert_eq!(client.base_url(), "http://override:9000");

        let client = ApiClient::from_config(&config, None).unwrap();
        assert_eq!(client.base_url(), "http://configured:5000");
    }

    #[tokio::test]
    async fn test_classify_posts_multipart_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "prediction": "NORMAL",
                "confidence": 88.0,
                "probabilities": {"NORMAL": 88.0, "PNEUMONIA": 12.0},
                "filename": "chest.png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .classify(&sample_file())
            .await
            .expect("classification should succeed");

        assert!(response.success);
        assert_eq!(response.prediction.as_deref(), Some("NORMAL"));
        assert_eq!(response.filename.as_deref(), Some("chest.png"));

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("filename=\"chest.png\""));
        assert!(body.contains("fake png bytes"));
    }

    #[tokio::test]
    async fn test_classify_parses_error_status_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "error": "Model not loaded. Please ensure the model file exists in the models folder."
            })))
            .mount(&server)
            .await;

        let response = client_for(&server)
            .classify(&sample_file())
            .await
            .expect("JSON error body should still parse");

        assert!(!response.success);
        assert!(response.error.unwrap().contains("Model not loaded"));
    }

    #[tokio::test]
    async fn test_classify_non_json_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(413).set_body_string("<h1>Request Entity Too Large</h1>"))
            .mount(&server)
            .await;

        let result = client_for(&server).classify(&sample_file()).await;
        match result {
            Err(InfraError::InvalidResponse { message, .. }) => assert!(message.contains("413")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_classify_connection_refused() {
        // ポート1は通常リッスンされていない
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let result = client.classify(&sample_file()).await;
        assert!(matches!(
            result,
            Err(InfraError::Network { .. }) | Err(InfraError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_classify_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Duration::from_millis(200)).unwrap();
        let result = client.classify(&sample_file()).await;
        assert!(matches!(result, Err(InfraError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "running", "model_loaded": false})),
            )
            .mount(&server)
            .await;

        let health = client_for(&server).health().await.expect("health should succeed");
        assert_eq!(health.status, "running");
        assert!(!health.model_loaded);
    }

    #[tokio::test]
    async fn test_health_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let result = client_for(&server).health().await;
        match result {
            Err(InfraError::Api { status_code, .. }) => assert_eq!(status_code, Some(503)),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_info() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Pneumonia Detection System",
                "version": "1.0.0",
                "model": "VGG19 Transfer Learning"
            })))
            .mount(&server)
            .await;

        let info = client_for(&server).info().await.expect("info should succeed");
        assert_eq!(info.version.as_deref(), Some("1.0.0"));
        assert_eq!(info.model.as_deref(), Some("VGG19 Transfer Learning"));
    }
}

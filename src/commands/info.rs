/// サービス情報コマンド
///
/// 分類サーバーの名前・バージョン・モデル情報を取得します。
use crate::api::client::ApiClient;
use crate::commands::result::{CommandResult, InfoResult};
use crate::commands::{GlobalOptions, connect};
use anyhow::{Context, Result};

pub async fn execute(options: &GlobalOptions) -> Result<CommandResult> {
    let (_, client) = connect(options)?;
    let result = fetch_info(&client).await?;
    Ok(CommandResult::Info(result))
}

pub async fn fetch_info(client: &ApiClient) -> Result<InfoResult> {
    let info = client
        .info()
        .await
        .context("Failed to fetch service information")?;

    Ok(InfoResult {
        server: client.base_url().to_string(),
        info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_info_partial_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Pneumonia Detection API",
                "version": "1.0.0"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let result = fetch_info(&client).await.unwrap();

        assert_eq!(result.info.name.as_deref(), Some("Pneumonia Detection API"));
        assert!(result.info.model.is_none());
    }

    #[tokio::test]
    async fn test_fetch_info_missing_endpoint() {
        let server = MockServer::start().await;
        let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();

        let err = fetch_info(&client).await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch service information"));
    }
}

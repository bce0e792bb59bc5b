/// ヘルスチェックコマンド
///
/// 分類サーバーが起動しているか、モデルが読み込まれているかを確認します。
use crate::api::client::ApiClient;
use crate::commands::result::{CommandResult, HealthResult};
use crate::commands::{GlobalOptions, connect};
use anyhow::{Context, Result};

pub async fn execute(options: &GlobalOptions) -> Result<CommandResult> {
    let (_, client) = connect(options)?;
    let result = check_health(&client).await?;
    Ok(CommandResult::Health(result))
}

pub async fn check_health(client: &ApiClient) -> Result<HealthResult> {
    let health = client
        .health()
        .await
        .with_context(|| format!("Failed to reach server at {}", client.base_url()))?;

    if health.is_model_missing() {
        tracing::warn!("Model not loaded on server");
    }

    Ok(HealthResult {
        server: client.base_url().to_string(),
        health,
    })
}

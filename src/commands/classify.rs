/// 分類コマンド
///
/// 1枚の画像についてヘルスチェック → 検証 → プレビュー → 送信 → 結果表示 を
/// コントローラー経由で一度だけ実行します。
use crate::api::client::ApiClient;
use crate::commands::result::{ClassifyResult, CommandResult};
use crate::commands::{GlobalOptions, connect};
use crate::presentation::view::{TerminalView, ViewMode};
use crate::session::view::View;
use crate::session::{Controller, ControllerOptions, probe_health};
use anyhow::{Context, Result};
use std::path::Path;

/// 分類コマンドを実行する
///
/// # 引数
/// * `file_path` - 解析するX線画像のパス
///
/// # エラー
/// 検証・通信・サーバー側の失敗はいずれも `SessionError` として
/// anyhow のエラーチェーンに残り、main で終了コードに変換される。
pub async fn execute(file_path: &str, options: &GlobalOptions) -> Result<CommandResult> {
    let (user_config, client) = connect(options)?;
    let view = TerminalView::new(
        options.view_mode(ViewMode::OneShot),
        user_config.timezone_offset_seconds,
    );

    let result = classify_file(client, view, Path::new(file_path), ControllerOptions::default())
        .await?;

    Ok(CommandResult::Classify(result))
}

/// 画像1枚を分類する
///
/// ヘルスチェックは選択・送信と並行して走る。どちらかが失敗した時点で
/// もう一方を待たずに返る（ヘルスチェック自体は失敗しない）。
pub async fn classify_file<V: View>(
    client: ApiClient,
    view: V,
    path: &Path,
    controller_options: ControllerOptions,
) -> Result<ClassifyResult> {
    let server = client.base_url().to_string();
    let mut controller = Controller::new(view, &client, controller_options);

    let probe = async { Ok::<_, anyhow::Error>(probe_health(&client).await) };

    let work = async {
        controller
            .choose_file(path)
            .await
            .with_context(|| format!("Failed to load image '{}'", path.display()))?;

        let image = controller
            .preview()
            .cloned()
            .context("No preview available for the selected image")?;

        let result = controller
            .analyze()
            .await
            .context("Failed to classify the image")?;

        Ok::<_, anyhow::Error>((image, result))
    };

    let (health, (image, result)) = tokio::try_join!(probe, work)?;

    Ok(ClassifyResult {
        server,
        health,
        image,
        result,
    })
}

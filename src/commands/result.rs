/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層（presentation::output）で
/// 人間向けと機械向けの出力フォーマットを決定する。
use crate::api::types::{HealthResponse, ServiceInfo};
use crate::config::UserConfig;
use crate::domain::classification::RenderedResult;
use crate::domain::preview::Preview;
use crate::session::state::UiState;
use serde::Serialize;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Classify(ClassifyResult),
    Session(SessionResult),
    Health(HealthResult),
    Info(InfoResult),
    Config(ConfigResult),
    Help,
}

/// 分類コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyResult {
    /// 問い合わせたサーバー
    pub server: String,
    /// 解析前のヘルスチェック結果（失敗時は None）
    pub health: Option<HealthResponse>,
    /// 送信した画像
    pub image: Preview,
    pub result: RenderedResult,
}

/// 対話セッションの結果
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    /// 成功した解析の回数
    pub analyses: usize,
    /// 終了時の画面状態
    pub final_state: UiState,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResult {
    pub server: String,
    #[serde(flatten)]
    pub health: HealthResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoResult {
    pub server: String,
    #[serde(flatten)]
    pub info: ServiceInfo,
}

/// 設定コマンドで行った操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigAction {
    Show,
    Updated,
    Reset,
}

/// 設定コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResult {
    pub action: ConfigAction,
    /// 設定ファイルのパス
    pub path: String,
    pub config: UserConfig,
    /// 実際に使われるサーバーURL
    pub effective_server: String,
    /// 実際に使われるタイムアウト(秒)
    pub effective_timeout_seconds: u64,
}

impl ConfigResult {
    pub fn new(action: ConfigAction, path: String, config: UserConfig) -> Self {
        Self {
            action,
            path,
            effective_server: config.base_url().to_string(),
            effective_timeout_seconds: config.request_timeout().as_secs(),
            config,
        }
    }
}

/// 対話セッション中の1操作ごとの結果（`--machine` 時に1行ずつ出力）
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    FileAccepted { image: Preview },
    Analyzed { result: RenderedResult },
    Reset,
    Status {
        state: UiState,
        file: Option<String>,
    },
    /// 何も起きなかった操作（空のドロップ、ヘルプ表示）
    Ignored,
    Error {
        error: String,
        exit_code: i32,
        hint: Option<String>,
    },
}

/// セッション層モジュール
///
/// 画像の選択から分類結果の表示までを1つのコントローラーで管理します。
/// 表示面（`View`）と分類サービス（`ClassificationService`）はトレイトで抽象化し、
/// ターミナル表示やHTTPクライアントとは疎結合にしています。
///
/// # モジュール
/// - `controller`: 状態と選択中ファイルを所有するコントローラー
/// - `state`: 画面状態の状態機械
/// - `view`: 表示面の抽象とローディングガード
/// - `service`: 分類サービスの抽象
/// - `error`: セッション層のエラー
pub mod controller;
pub mod error;
pub mod service;
pub mod state;
pub mod view;

#[cfg(test)]
pub mod testing;

pub use controller::{Controller, ControllerOptions, probe_health};

/// 表示面の抽象
///
/// コントローラーはこのトレイト越しにだけ画面を操作する。
/// メソッドはすべて `&self` を取り、実装側は必要なら内部可変性を使う。
/// これにより `LoadingIndicator` が表示面を借用している間も、
/// コントローラーは同じ表示面へ他の操作を行える。
use crate::config::APP_CONFIG;
use crate::domain::classification::RenderedResult;
use crate::domain::preview::Preview;
use serde::Serialize;
use std::time::Duration;

/// 画面内の領域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// アップロード領域
    Upload,
    /// 結果領域
    Results,
}

/// 確率バー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbabilityBar {
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "PNEUMONIA")]
    Pneumonia,
}

impl ProbabilityBar {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Pneumonia => "PNEUMONIA",
        }
    }
}

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Error,
    Warning,
    Info,
}

/// 一時通知（一定時間で消える）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip)]
    pub ttl: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            ttl: Duration::from_secs(APP_CONFIG.ui.notification_ttl_seconds),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }
}

/// コントローラーが操作する表示面
pub trait View {
    /// アップロード領域の表示切り替え
    fn show_upload_prompt(&self, visible: bool);

    /// プレビューの表示（None で非表示）
    fn show_preview(&self, preview: Option<&Preview>);

    /// 解析ボタンの有効/無効
    fn set_submit_enabled(&self, enabled: bool);

    /// ローディング表示の切り替え
    fn set_loading(&self, visible: bool);

    /// 結果領域の表示（None で非表示）
    fn show_results(&self, result: Option<&RenderedResult>);

    /// 確率バーの幅(0–100)
    fn set_bar_width(&self, bar: ProbabilityBar, percent: f64);

    /// ファイル入力欄を空にする
    fn clear_file_input(&self);

    /// 領域を表示範囲に入れる
    fn scroll_into_view(&self, region: Region);

    /// 一時通知を出す
    fn notify(&self, notification: &Notification);
}

/// ローディング表示のガード
///
/// 生成時に表示し、ドロップ時に必ず1回だけ非表示にする。
/// リクエストの結果に関係なく、またfutureが途中で破棄されても解除される。
pub struct LoadingIndicator<'a, V: View> {
    view: &'a V,
}

impl<'a, V: View> LoadingIndicator<'a, V> {
    pub fn show(view: &'a V) -> Self {
        view.set_loading(true);
        Self { view }
    }
}

impl<V: View> Drop for LoadingIndicator<'_, V> {
    fn drop(&mut self) {
        self.view.set_loading(false);
    }
}

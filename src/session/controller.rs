/// アップロード＆分類コントローラー
///
/// 選択中のファイルと画面状態をただ1つ所有し、
/// 取得 → 検証 → プレビュー → 送信 → 結果表示 → リセット の流れを
/// 明示的な状態遷移として実行します。
///
/// 各ハンドラは `&mut self` を取るため、同時に動くハンドラは常に1つで、
/// 送信中の分類リクエストも高々1つになります。
use crate::api::types::{ClassificationResponse, HealthResponse};
use crate::config::APP_CONFIG;
use crate::domain::classification::{self, ClassificationOutcome, RenderedResult};
use crate::domain::error::DomainError;
use crate::domain::file::{FileCandidate, SelectedFile};
use crate::domain::preview::{self, Preview};
use crate::domain::{acquirer, validator};
use crate::session::error::SessionError;
use crate::session::service::ClassificationService;
use crate::session::state::{UiEvent, UiState};
use crate::session::view::{LoadingIndicator, Notification, ProbabilityBar, Region, View};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// コントローラーの動作設定
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    /// 結果表示から確率バーを伸ばすまでの遅延（アニメーション用）
    pub bar_fill_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            bar_fill_delay: Duration::from_millis(APP_CONFIG.ui.bar_fill_delay_ms),
        }
    }
}

pub struct Controller<V, S> {
    view: V,
    service: S,
    options: ControllerOptions,
    state: UiState,
    selected: Option<SelectedFile>,
    preview: Option<Preview>,
}

impl<V: View, S: ClassificationService> Controller<V, S> {
    /// コントローラーを作成し、表示面を初期状態（Idle）にする
    pub fn new(view: V, service: S, options: ControllerOptions) -> Self {
        let controller = Self {
            view,
            service,
            options,
            state: UiState::Idle,
            selected: None,
            preview: None,
        };
        controller.render_idle();
        controller
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// パスで指定されたファイルを選択する
    ///
    /// 検証かプレビューに失敗した場合は通知を出し、それまでの選択は変えない。
    pub async fn choose_file(&mut self, path: &Path) -> Result<(), SessionError> {
        if !self.state.accepts_file() {
            return Err(self.fail(SessionError::InvalidTransition {
                action: "choose a new image",
                state: self.state,
            }));
        }

        let candidate = validator::inspect_path(path).map_err(|e| self.fail(e.into()))?;
        self.accept_candidate(candidate).await
    }

    /// ドロップされたファイルを選択する（先頭の1件のみ対象）
    pub async fn drop_files(&mut self, paths: &[PathBuf]) -> Result<(), SessionError> {
        match acquirer::first_dropped(paths) {
            Some(path) => {
                let path = path.clone();
                self.choose_file(&path).await
            }
            None => {
                tracing::debug!("drop without files ignored");
                Ok(())
            }
        }
    }

    async fn accept_candidate(&mut self, candidate: FileCandidate) -> Result<(), SessionError> {
        validator::validate_candidate(&candidate).map_err(|e| self.fail(e.into()))?;

        let file = acquirer::read_candidate(&candidate)
            .await
            .map_err(|e| self.fail(e.into()))?;

        let preview = preview::render_preview(&file)
            .await
            .map_err(|e| self.fail(e.into()))?;

        tracing::info!(
            file = file.name(),
            size = file.size(),
            width = preview.width,
            height = preview.height,
            "image accepted"
        );

        self.view.show_upload_prompt(false);
        self.view.show_preview(Some(&preview));
        self.view.set_submit_enabled(true);
        self.view.show_results(None);

        self.selected = Some(file);
        self.preview = Some(preview);
        self.transition(UiEvent::FileAccepted);
        Ok(())
    }

    /// 選択中の画像を送信し、結果を表示する
    ///
    /// 論理エラー・通信エラーのどちらでも通知を出して PreviewReady に戻る。
    /// ローディング表示はどの経路でもちょうど1回解除される。
    pub async fn analyze(&mut self) -> Result<RenderedResult, SessionError> {
        let Some(file) = self.selected.clone() else {
            return Err(self.fail(DomainError::NoFileSelected.into()));
        };

        if !self.state.can_submit() {
            return Err(self.fail(SessionError::InvalidTransition {
                action: "analyze",
                state: self.state,
            }));
        }

        self.transition(UiEvent::Submit);
        self.view.set_submit_enabled(false);

        let response = {
            let _loading = LoadingIndicator::show(&self.view);
            self.view.show_results(None);
            self.service.classify(&file).await
        };

        match response.and_then(ClassificationResponse::into_outcome) {
            Ok(ClassificationOutcome::Classified(result)) => {
                let rendered = classification::render(&result, Utc::now());
                tracing::info!(
                    prediction = %rendered.prediction,
                    confidence = rendered.confidence,
                    tier = %rendered.tier,
                    "classification completed"
                );
                self.transition(UiEvent::Succeeded);
                self.present_result(&rendered).await;
                Ok(rendered)
            }
            Ok(ClassificationOutcome::Rejected { message }) => {
                tracing::warn!(%message, "classification rejected by server");
                Err(self.recover(SessionError::Rejected { message }))
            }
            Err(e) => {
                tracing::error!(error = %e, "classification request failed");
                Err(self.recover(e.into()))
            }
        }
    }

    /// 選択と表示をすべて初期状態に戻す
    ///
    /// 「画像を変更」「別の画像を解析」の両方から呼ばれ、どの状態からでも同じ結果になる。
    pub fn reset(&mut self) {
        self.selected = None;
        self.preview = None;
        self.view.clear_file_input();
        self.render_idle();
        self.view.scroll_into_view(Region::Upload);
        self.transition(UiEvent::Reset);
    }

    fn render_idle(&self) {
        self.view.show_upload_prompt(true);
        self.view.show_preview(None);
        self.view.show_results(None);
        self.view.set_submit_enabled(false);
        self.view.set_bar_width(ProbabilityBar::Normal, 0.0);
        self.view.set_bar_width(ProbabilityBar::Pneumonia, 0.0);
    }

    async fn present_result(&self, rendered: &RenderedResult) {
        self.view.show_results(Some(rendered));
        self.view.scroll_into_view(Region::Results);

        if !self.options.bar_fill_delay.is_zero() {
            tokio::time::sleep(self.options.bar_fill_delay).await;
        }

        self.view.set_bar_width(
            ProbabilityBar::Normal,
            classification::bar_width(rendered.normal_percent),
        );
        self.view.set_bar_width(
            ProbabilityBar::Pneumonia,
            classification::bar_width(rendered.pneumonia_percent),
        );
    }

    /// 送信失敗後、解析をやり直せる状態に戻す
    fn recover(&mut self, err: SessionError) -> SessionError {
        self.view.notify(&Notification::error(err.user_message()));
        self.view.set_submit_enabled(true);
        self.transition(UiEvent::Failed);
        err
    }

    /// 状態を変えずに通知だけ出す
    fn fail(&self, err: SessionError) -> SessionError {
        tracing::warn!(error = %err, state = %self.state, "action rejected");
        self.view.notify(&Notification::error(err.user_message()));
        err
    }

    fn transition(&mut self, event: UiEvent) {
        match self.state.next(event) {
            Some(next) => {
                tracing::debug!(from = %self.state, to = %next, ?event, "state transition");
                self.state = next;
            }
            None => {
                tracing::warn!(state = %self.state, ?event, "ignored invalid state transition");
            }
        }
    }
}

/// サーバーの稼働状況を確認する
///
/// 結果はログに残すだけで画面は変えない。コントローラーとは独立した
/// 借用で動くので、呼び出し側は他の操作と並行して待てる。
pub async fn probe_health<S: ClassificationService>(service: &S) -> Option<HealthResponse> {
    match service.health().await {
        Ok(health) => {
            if health.is_model_missing() {
                tracing::warn!("Model not loaded on server");
            } else {
                tracing::info!(
                    status = %health.status,
                    model_loaded = health.model_loaded,
                    "server health check completed"
                );
            }
            Some(health)
        }
        Err(e) => {
            tracing::error!(error = %e, "server health check failed");
            None
        }
    }
}

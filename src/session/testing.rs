//! テスト用の表示面とサービス

use crate::api::error::InfraError;
use crate::api::types::{ClassificationResponse, HealthResponse};
use crate::domain::classification::RenderedResult;
use crate::domain::file::SelectedFile;
use crate::domain::preview::Preview;
use crate::session::service::ClassificationService;
use crate::session::view::{Notification, ProbabilityBar, Region, View};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// 表示面の現在の見た目と呼び出し履歴
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSnapshot {
    pub upload_prompt_visible: bool,
    pub preview: Option<Preview>,
    pub submit_enabled: bool,
    pub loading_visible: bool,
    pub loading_hidden_count: usize,
    pub results: Option<RenderedResult>,
    pub normal_bar: f64,
    pub pneumonia_bar: f64,
    pub file_input_clears: usize,
    pub scrolled_to: Vec<Region>,
    pub notifications: Vec<Notification>,
}

impl ViewSnapshot {
    pub fn last_message(&self) -> Option<&str> {
        self.notifications.last().map(|n| n.message.as_str())
    }
}

/// 操作を記録するだけの表示面
#[derive(Debug, Default)]
pub struct RecordingView {
    state: RefCell<ViewSnapshot>,
}

impl RecordingView {
    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.borrow().clone()
    }
}

impl View for RecordingView {
    fn show_upload_prompt(&self, visible: bool) {
        self.state.borrow_mut().upload_prompt_visible = visible;
    }

    fn show_preview(&self, preview: Option<&Preview>) {
        self.state.borrow_mut().preview = preview.cloned();
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.state.borrow_mut().submit_enabled = enabled;
    }

    fn set_loading(&self, visible: bool) {
        let mut state = self.state.borrow_mut();
        state.loading_visible = visible;
        if !visible {
            state.loading_hidden_count += 1;
        }
    }

    fn show_results(&self, result: Option<&RenderedResult>) {
        self.state.borrow_mut().results = result.cloned();
    }

    fn set_bar_width(&self, bar: ProbabilityBar, percent: f64) {
        let mut state = self.state.borrow_mut();
        match bar {
            ProbabilityBar::Normal => state.normal_bar = percent,
            ProbabilityBar::Pneumonia => state.pneumonia_bar = percent,
        }
    }

    fn clear_file_input(&self) {
        self.state.borrow_mut().file_input_clears += 1;
    }

    fn scroll_into_view(&self, region: Region) {
        self.state.borrow_mut().scrolled_to.push(region);
    }

    fn notify(&self, notification: &Notification) {
        self.state
            .borrow_mut()
            .notifications
            .push(notification.clone());
    }
}

/// 応答をキューから返すスタブ
#[derive(Default)]
pub struct StubService {
    responses: RefCell<VecDeque<Result<ClassificationResponse, InfraError>>>,
    health: RefCell<Option<Result<HealthResponse, InfraError>>>,
    classify_calls: Cell<usize>,
    health_calls: Cell<usize>,
}

impl StubService {
    pub fn with_response(response: Result<ClassificationResponse, InfraError>) -> Self {
        let stub = Self::default();
        stub.push_response(response);
        stub
    }

    pub fn push_response(&self, response: Result<ClassificationResponse, InfraError>) {
        self.responses.borrow_mut().push_back(response);
    }

    pub fn set_health(&self, health: Result<HealthResponse, InfraError>) {
        *self.health.borrow_mut() = Some(health);
    }

    pub fn classify_calls(&self) -> usize {
        self.classify_calls.get()
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.get()
    }
}

impl ClassificationService for StubService {
    async fn classify(&self, _file: &SelectedFile) -> Result<ClassificationResponse, InfraError> {
        self.classify_calls.set(self.classify_calls.get() + 1);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(InfraError::network("no stubbed response")))
    }

    async fn health(&self) -> Result<HealthResponse, InfraError> {
        self.health_calls.set(self.health_calls.get() + 1);
        self.health
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Err(InfraError::network("connection refused")))
    }
}

/// 成功レスポンスを作る
pub fn success_response(
    prediction: &str,
    confidence: f64,
    normal: f64,
    pneumonia: f64,
) -> ClassificationResponse {
    ClassificationResponse {
        success: true,
        prediction: Some(prediction.to_string()),
        confidence: Some(confidence),
        probabilities: Some(crate::api::types::ProbabilitiesPayload { normal, pneumonia }),
        error: None,
        filename: None,
    }
}

/// `success: false` のレスポンスを作る
pub fn failure_response(message: &str) -> ClassificationResponse {
    ClassificationResponse {
        success: false,
        prediction: None,
        confidence: None,
        probabilities: None,
        error: Some(message.to_string()),
        filename: None,
    }
}

/// API通信用の型定義
///
/// 分類サーバーのJSONレスポンスをデシリアライズするための構造体と、
/// ドメイン型への変換を定義します。
use crate::api::error::InfraError;
use crate::config::APP_CONFIG;
use crate::domain::classification::{ClassificationOutcome, ClassificationResult, Probabilities};
use serde::{Deserialize, Serialize};

/// `success: false` で `error` が無い場合のメッセージ
pub const DEFAULT_REJECTION_MESSAGE: &str = "Error analyzing image";

/// クラスごとの確率
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilitiesPayload {
    #[serde(rename = "NORMAL")]
    pub normal: f64,
    #[serde(rename = "PNEUMONIA")]
    pub pneumonia: f64,
}

/// POST /upload のレスポンス
///
/// 失敗時は `success: false` と `error` のみ、成功時は予測値一式が入る。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub probabilities: Option<ProbabilitiesPayload>,
    #[serde(default)]
    pub error: Option<String>,
    /// サーバー側で保存されたファイル名
    #[serde(default)]
    pub filename: Option<String>,
}

impl ClassificationResponse {
    /// ドメインの結果に変換する
    ///
    /// `success: true` なのに予測値が欠けている応答は解釈できない応答として扱う。
    pub fn into_outcome(self) -> Result<ClassificationOutcome, InfraError> {
        if !self.success {
            let message = self
                .error
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string());
            return Ok(ClassificationOutcome::Rejected { message });
        }

        let endpoint = APP_CONFIG.api.upload_path;
        let prediction = self
            .prediction
            .ok_or_else(|| InfraError::invalid_response(endpoint, "missing 'prediction'"))?;
        let confidence = self
            .confidence
            .ok_or_else(|| InfraError::invalid_response(endpoint, "missing 'confidence'"))?;
        let probabilities = self
            .probabilities
            .ok_or_else(|| InfraError::invalid_response(endpoint, "missing 'probabilities'"))?;

        Ok(ClassificationOutcome::Classified(ClassificationResult {
            prediction,
            confidence,
            probabilities: Probabilities {
                normal: probabilities.normal,
                pneumonia: probabilities.pneumonia,
            },
        }))
    }
}

/// GET /health のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

impl HealthResponse {
    /// サーバーは動いているがモデルが未ロード
    pub fn is_model_missing(&self) -> bool {
        self.status == "running" && !self.model_loaded
    }
}

/// GET /api/info のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

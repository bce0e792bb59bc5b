/// ドメイン層: 分類結果と表示属性への変換
///
/// サーバーから受け取った分類結果を、ラベル・信頼度ランク・確率バーといった
/// 表示属性に変換する純粋関数をまとめています。
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// 正常と判定されたときのラベル
pub const NORMAL_LABEL: &str = "NORMAL";

/// 肺炎と判定されたときのラベル
pub const PNEUMONIA_LABEL: &str = "PNEUMONIA";

/// `high` ランクの下限（この値を含む）
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 90.0;

/// `medium` ランクの下限（この値を含む）
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 70.0;

/// クラスごとの確率(%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probabilities {
    pub normal: f64,
    pub pneumonia: f64,
}

/// 分類結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// 予測ラベル（"NORMAL" または "PNEUMONIA"）
    pub prediction: String,
    /// 信頼度(0–100)
    pub confidence: f64,
    pub probabilities: Probabilities,
}

/// サーバー応答の論理的な結果
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationOutcome {
    /// 分類に成功した
    Classified(ClassificationResult),
    /// サーバーが `success: false` を返した
    Rejected { message: String },
}

/// ラベルの表示スタイル
///
/// 二値分類なので、NORMAL 以外はすべて pneumonia として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    Normal,
    Pneumonia,
}

impl LabelStyle {
    pub fn for_prediction(prediction: &str) -> Self {
        if prediction == NORMAL_LABEL {
            Self::Normal
        } else {
            Self::Pneumonia
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Pneumonia => "pneumonia",
        }
    }
}

/// 信頼度ランク
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// 信頼度からランクを決める（各ランクの下限を含む）
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_CONFIDENCE_THRESHOLD {
            Self::High
        } else if confidence >= MEDIUM_CONFIDENCE_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 表示属性に変換済みの分類結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedResult {
    pub prediction: String,
    /// "Prediction: NORMAL"
    pub label_text: String,
    pub style: LabelStyle,
    pub confidence: f64,
    /// "92%"
    pub confidence_text: String,
    pub tier: ConfidenceTier,
    pub normal_percent: f64,
    pub normal_text: String,
    pub pneumonia_percent: f64,
    pub pneumonia_text: String,
    pub analyzed_at: DateTime<Utc>,
}

/// 分類結果を表示属性に変換する
pub fn render(result: &ClassificationResult, analyzed_at: DateTime<Utc>) -> RenderedResult {
    RenderedResult {
        prediction: result.prediction.clone(),
        label_text: format!("Prediction: {}", result.prediction),
        style: LabelStyle::for_prediction(&result.prediction),
        confidence: result.confidence,
        confidence_text: percent_text(result.confidence),
        tier: ConfidenceTier::from_confidence(result.confidence),
        normal_percent: result.probabilities.normal,
        normal_text: percent_text(result.probabilities.normal),
        pneumonia_percent: result.probabilities.pneumonia,
        pneumonia_text: percent_text(result.probabilities.pneumonia),
        analyzed_at,
    }
}

/// 数値をそのままパーセント表記にする（92 → "92%", 87.5 → "87.5%"）
pub fn percent_text(value: f64) -> String {
    format!("{}%", value)
}

/// バー幅として使える 0–100 の値に丸める
pub fn bar_width(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// プレゼンテーション層: 表示用の行組み立て
///
/// プレビュー・分類結果・確率バーをターミナル表示用の文字列に変換します。
/// 出力先には触れない純粋な関数だけを置き、表示面と出力モジュールの両方から使います。
use crate::api::types::{HealthResponse, ServiceInfo};
use crate::config::APP_CONFIG;
use crate::domain::classification::{self, LabelStyle, RenderedResult};
use crate::domain::formatter;
use crate::domain::preview::Preview;
use crate::session::view::ProbabilityBar;

const FILLED: char = '█';
const EMPTY: char = '░';

/// 確率バーを描画する（例: `[██████░░░░]`）
pub fn render_bar(percent: f64, width: usize) -> String {
    let percent = classification::bar_width(percent);
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);

    let mut bar = String::with_capacity(width * 3 + 2);
    bar.push('[');
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, width - filled));
    bar.push(']');
    bar
}

/// 1本分の確率バー行（例: `NORMAL     [████░░] 88%`）
pub fn bar_line(bar: ProbabilityBar, percent: f64, text: &str) -> String {
    format!(
        "  {:<10} {} {}",
        bar.label(),
        render_bar(percent, APP_CONFIG.ui.bar_width),
        text
    )
}

pub fn preview_lines(preview: &Preview) -> Vec<String> {
    vec![
        format!("Selected:   {}", preview.file_name),
        format!(
            "Image:      {}x{} {} ({})",
            preview.width,
            preview.height,
            preview.format.to_uppercase(),
            formatter::format_size(preview.size_bytes)
        ),
    ]
}

/// 分類結果の見出し部分（バーは含まない）
pub fn result_lines(result: &RenderedResult, timezone_offset_seconds: i32) -> Vec<String> {
    let marker = match result.style {
        LabelStyle::Normal => "✓",
        LabelStyle::Pneumonia => "!",
    };

    vec![
        format!("{} {}", marker, result.label_text),
        format!(
            "  Confidence: {} ({} confidence)",
            result.confidence_text, result.tier
        ),
        format!(
            "  Analyzed:   {}",
            formatter::format_timestamp(result.analyzed_at, timezone_offset_seconds)
        ),
    ]
}

pub fn health_lines(health: &HealthResponse) -> Vec<String> {
    let model = if health.model_loaded {
        "loaded"
    } else {
        "NOT loaded"
    };
    vec![
        format!("Status:       {}", health.status),
        format!("Model:        {}", model),
    ]
}

pub fn info_lines(info: &ServiceInfo) -> Vec<String> {
    let fields = [
        ("Name", &info.name),
        ("Version", &info.version),
        ("Description", &info.description),
        ("Model", &info.model),
        ("Author", &info.author),
    ];

    fields
        .iter()
        .map(|(label, value)| {
            format!(
                "{:<13} {}",
                format!("{}:", label),
                value.as_deref().unwrap_or("(not provided)")
            )
        })
        .collect()
}

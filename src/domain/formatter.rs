/// ドメインサービス: 表示用フォーマット
///
/// 解析時刻とファイルサイズを人間向けの文字列に変換する。
/// 時刻はユーザー設定のタイムゾーンオフセットで表示する。
use crate::config::BYTES_PER_MB;
use chrono::{DateTime, FixedOffset, Utc};

/// 解析時刻をユーザー設定のオフセットでフォーマット
///
/// # 戻り値
/// - オフセット0: "2026-10-16 14:30:45 UTC"
/// - それ以外:   "2026-10-16 23:30:45 +09:00"
///
/// 範囲外のオフセットはUTCとして扱います。
pub fn format_timestamp(datetime: DateTime<Utc>, offset_seconds: i32) -> String {
    if offset_seconds == 0 {
        return format_utc(datetime);
    }

    match FixedOffset::east_opt(offset_seconds) {
        Some(offset) => datetime
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S %:z")
            .to_string(),
        None => format_utc(datetime),
    }
}

fn format_utc(datetime: DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// バイト数を MB 表記にする（例: "1.50 MB"）
pub fn format_size(size_bytes: u64) -> String {
    format!("{:.2} MB", size_bytes as f64 / BYTES_PER_MB as f64)
}

/// アプリケーション設定モジュール
///
/// コンパイル時に確定する静的設定を管理します。
/// エンドポイントのパスや検証ルールは実行時に変更できません。
/// サーバーのベースURLとタイムアウトのみ UserConfig / `--server` で上書きできます。

/// 1 MiB あたりのバイト数
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// 分類サーバーとの通信設定
#[derive(Debug, Clone, Copy)]
pub struct ApiConfig {
    /// ベースURL（UserConfig / `--server` 未指定時）
    pub default_base_url: &'static str,

    /// 画像アップロード＆分類エンドポイント
    pub upload_path: &'static str,

    /// ヘルスチェックエンドポイント
    pub health_path: &'static str,

    /// サービス情報エンドポイント
    pub info_path: &'static str,

    /// multipart のフィールド名
    pub upload_field: &'static str,

    /// リクエストのタイムアウト(秒)
    pub timeout_seconds: u64,
}

/// アップロード対象ファイルの検証ルール
#[derive(Debug, Clone, Copy)]
pub struct UploadConfig {
    /// 最大ファイルサイズ (バイト、この値ちょうどは許可)
    pub max_file_size: u64,

    /// 受け付けるMIMEタイプ
    pub supported_mime_types: &'static [&'static str],
}

/// 表示関連の設定
#[derive(Debug, Clone, Copy)]
pub struct UiConfig {
    /// 通知の表示時間(秒)
    pub notification_ttl_seconds: u64,

    /// 確率バーを伸ばすまでの遅延(ミリ秒)
    pub bar_fill_delay_ms: u64,

    /// ターミナルに描画するバーの幅(文字数)
    pub bar_width: usize,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    /// フィルタを読み込む環境変数
    pub env_var: &'static str,

    /// 環境変数が無い場合のログレベル
    pub default_level: &'static str,
}

/// グローバル設定
pub const APP_CONFIG: AppConfig = AppConfig {
    api: ApiConfig {
        default_base_url: "http://127.0.0.1:5000",
        upload_path: "/upload",
        health_path: "/health",
        info_path: "/api/info",
        upload_field: "file",
        timeout_seconds: 60,
    },
    upload: UploadConfig {
        max_file_size: 16 * BYTES_PER_MB,
        supported_mime_types: &["image/jpeg", "image/jpg", "image/png"],
    },
    ui: UiConfig {
        notification_ttl_seconds: 5,
        bar_fill_delay_ms: 100,
        bar_width: 30,
    },
    logging: LoggingConfig {
        env_var: "XRAYSCAN_LOG",
        default_level: "warn",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_limits() {
        assert_eq!(APP_CONFIG.upload.max_file_size, 16_777_216);
        assert!(APP_CONFIG.upload.supported_mime_types.contains(&"image/jpg"));
        assert!(!APP_CONFIG.upload.supported_mime_types.contains(&"image/gif"));
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(APP_CONFIG.api.upload_path, "/upload");
        assert_eq!(APP_CONFIG.api.health_path, "/health");
        assert_eq!(APP_CONFIG.api.upload_field, "file");
    }
}

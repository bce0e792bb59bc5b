/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - コンパイル時定数として定義される静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる動的設定
///
/// # 使用例
///
/// ```rust,ignore
/// use crate::config::{APP_CONFIG, UserConfig};
///
/// // AppConfig: グローバル定数として直接参照
/// let max_size = APP_CONFIG.upload.max_file_size;
///
/// // UserConfig: load時に自動検証
/// let user_config = UserConfig::load()?;
/// let base_url = user_config.base_url();
/// ```
pub mod app;
pub mod error;
pub mod user;

pub use app::{APP_CONFIG, BYTES_PER_MB};
pub use user::UserConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_direct_access() {
        assert_eq!(APP_CONFIG.api.default_base_url, "http://127.0.0.1:5000");
        assert_eq!(APP_CONFIG.upload.max_file_size, 16 * BYTES_PER_MB);
    }

    #[test]
    fn test_independent_config_usage() {
        let mut user_config = UserConfig::default();
        user_config
            .set_server_url("http://10.0.0.5:8080")
            .expect("valid url");

        assert!(user_config.validate().is_ok());
        assert_eq!(user_config.base_url(), "http://10.0.0.5:8080");
        // 静的設定は上書きされない
        assert_eq!(APP_CONFIG.api.upload_path, "/upload");
    }
}

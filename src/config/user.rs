/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\xrayscan\config.toml
/// macOS:   /Users/<User>/Library/Application Support/xrayscan/config.toml
/// Linux:   /home/<user>/.config/xrayscan/config.toml
///
/// 初回起動時にデフォルト値から自動的にconfig.tomlを作成します。
use crate::config::APP_CONFIG;
use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// デフォルトのタイムゾーンオフセット（UTC）
const DEFAULT_TIMEZONE_OFFSET: i32 = 0;

/// タイムゾーンオフセットの最大値（+18時間 = 64800秒）
const MAX_TIMEZONE_OFFSET: i32 = 64800;

/// タイムゾーンオフセットの最小値（-18時間 = -64800秒）
const MIN_TIMEZONE_OFFSET: i32 = -64800;

/// ユーザー設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// 分類サーバーのベースURL（未設定時は APP_CONFIG の値）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// リクエストのタイムアウト(秒)（未設定時は APP_CONFIG の値）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,

    /// 解析時刻を表示するタイムゾーンオフセット(秒単位)
    /// 例: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset_seconds: i32,
}

fn default_timezone_offset() -> i32 {
    DEFAULT_TIMEZONE_OFFSET
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            request_timeout_seconds: None,
            timezone_offset_seconds: DEFAULT_TIMEZONE_OFFSET,
        }
    }
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("xrayscan").join("config.toml"))
    }

    /// ユーザー設定を読み込む
    ///
    /// 設定ファイルが存在しない場合は、デフォルトテンプレートから自動的に作成します。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスからユーザー設定を読み込む
    ///
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        tracing::debug!(path = %config_path.display(), "user config loaded");
        Ok(config)
    }

    /// デフォルト設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!(
                    "Failed to create default config file: {}",
                    config_path.display()
                ),
                e,
            )
        })?;

        Ok(())
    }

    fn ensure_parent_dir(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// デフォルトTOML設定を生成
    fn default_toml_content() -> String {
        format!(
            r#"# xrayscan - User Configuration
# Set the classification server with 'xrayscan config server <url>'
# (default: {})

# Timezone offset in seconds used when showing analysis times
# Examples: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
timezone_offset_seconds = {}
"#,
            APP_CONFIG.api.default_base_url, DEFAULT_TIMEZONE_OFFSET
        )
    }

    /// 指定パスにユーザー設定を保存する
    ///
    /// 必要に応じて設定ディレクトリを作成します。
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        Self::ensure_parent_dir(config_path)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize_error("Failed to serialize config", e))?;

        fs::write(config_path, content).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to write config file: {}", config_path.display()),
                e,
            )
        })?;

        Ok(())
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - server_url: http:// または https:// で始まること
    /// - request_timeout_seconds: 0 でないこと
    /// - timezone_offset_seconds: ±18時間以内
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.server_url {
            Self::validate_server_url(url)?;
        }

        if self.request_timeout_seconds == Some(0) {
            return Err(ConfigError::validation_error(
                "request_timeout_seconds must be greater than 0",
            ));
        }

        Self::validate_timezone_offset(self.timezone_offset_seconds)?;

        Ok(())
    }

    /// サーバーURLを検証
    pub fn validate_server_url(url: &str) -> Result<(), ConfigError> {
        let trimmed = url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::validation_error(format!(
                "Invalid server URL '{}'. It must start with http:// or https://",
                url
            )));
        }
        if trimmed.trim_end_matches('/').ends_with(':') || trimmed.ends_with("://") {
            return Err(ConfigError::validation_error(format!(
                "Invalid server URL '{}'. A host is required",
                url
            )));
        }
        Ok(())
    }

    /// タイムゾーンオフセットを検証
    fn validate_timezone_offset(offset: i32) -> Result<(), ConfigError> {
        if !(MIN_TIMEZONE_OFFSET..=MAX_TIMEZONE_OFFSET).contains(&offset) {
            return Err(ConfigError::validation_error(format!(
                "Invalid timezone offset '{}' seconds. Must be between {} and {} (±18 hours)",
                offset, MIN_TIMEZONE_OFFSET, MAX_TIMEZONE_OFFSET
            )));
        }
        Ok(())
    }

    /// サーバーURLを設定（末尾のスラッシュは取り除く）
    pub fn set_server_url(&mut self, url: &str) -> Result<(), ConfigError> {
        Self::validate_server_url(url)?;
        self.server_url = Some(url.trim().trim_end_matches('/').to_string());
        Ok(())
    }

    /// タイムゾーンオフセットを設定
    pub fn set_timezone_offset(&mut self, offset: i32) -> Result<(), ConfigError> {
        Self::validate_timezone_offset(offset)?;
        self.timezone_offset_seconds = offset;
        Ok(())
    }

    /// 実際に使用するベースURL
    pub fn base_url(&self) -> &str {
        self.server_url
            .as_deref()
            .unwrap_or(APP_CONFIG.api.default_base_url)
    }

    /// 実際に使用するリクエストタイムアウト
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_seconds
                .unwrap_or(APP_CONFIG.api.timeout_seconds),
        )
    }
}

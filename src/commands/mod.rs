pub mod classify;
pub mod config;
pub mod health;
pub mod help;
pub mod info;
pub mod result;
pub mod session;

pub use result::CommandResult;

use crate::api::client::ApiClient;
use crate::config::UserConfig;
use crate::config::error::ConfigError;
use crate::presentation::view::ViewMode;
use anyhow::{Context, Result};

/// すべてのコマンドに共通するグローバルフラグ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    /// `--machine`: 結果をJSONでstdoutに出力
    pub machine_output: bool,
    /// `--server <url>`: 設定ファイルのサーバーURLを上書き
    pub server: Option<String>,
}

impl GlobalOptions {
    /// 機械可読出力時は表示面を黙らせる
    pub fn view_mode(&self, human: ViewMode) -> ViewMode {
        if self.machine_output {
            ViewMode::Silent
        } else {
            human
        }
    }
}

/// ユーザー設定を読み込み、APIクライアントを作成する
fn connect(options: &GlobalOptions) -> Result<(UserConfig, ApiClient)> {
    let user_config = resolve_user_config(UserConfig::load(), options)?;

    let client = ApiClient::from_config(&user_config, options.server.as_deref())
        .context("Failed to create API client")?;

    tracing::debug!(server = client.base_url(), "API client ready");
    Ok((user_config, client))
}

/// 設定の読み込み結果を確定する
///
/// `--server` 指定時はサーバーURLを設定ファイルに頼らないので、
/// 読み込みに失敗しても警告を出して既定値で続ける。
fn resolve_user_config(
    loaded: Result<UserConfig, ConfigError>,
    options: &GlobalOptions,
) -> Result<UserConfig> {
    match loaded {
        Ok(config) => Ok(config),
        Err(e) if options.server.is_some() => {
            tracing::warn!(
                error = %e,
                "ignoring unreadable user configuration because --server was given"
            );
            Ok(UserConfig::default())
        }
        Err(e) => Err(e)
            .context("Failed to load user configuration. Please check your config.toml file."),
    }
}

/// 設定コマンド
///
/// ユーザー設定（config.toml）の表示と更新を行います。
///
/// ```text
/// config [show]
/// config server <url>
/// config timezone <seconds>
/// config reset
/// ```
use crate::commands::result::{CommandResult, ConfigAction, ConfigResult};
use crate::config::UserConfig;
use anyhow::{Context, Result, bail};
use std::path::Path;

pub async fn execute(args: &[String]) -> Result<CommandResult> {
    let path = UserConfig::config_path().context("Failed to locate configuration directory")?;
    let result = apply(&path, args)?;
    Ok(CommandResult::Config(result))
}

/// 指定パスの設定ファイルに対してサブコマンドを適用する
///
/// `reset` は既存ファイルを読まずに上書きするので、壊れた設定の復旧にも使える。
pub fn apply(path: &Path, args: &[String]) -> Result<ConfigResult> {
    let subcommand = args.first().map(String::as_str).unwrap_or("show");

    if subcommand == "reset" {
        let config = UserConfig::default();
        save(&config, path)?;
        return Ok(finish(ConfigAction::Reset, path, config));
    }

    let mut config = UserConfig::load_from(path)
        .context("Failed to load user configuration. Please check your config.toml file.")?;

    let action = match subcommand {
        "show" => ConfigAction::Show,
        "server" => {
            let url = args
                .get(1)
                .context("Please specify a server URL: config server <url>")?;
            config.set_server_url(url)?;
            save(&config, path)?;
            ConfigAction::Updated
        }
        "timezone" => {
            let raw = args
                .get(1)
                .context("Please specify an offset in seconds: config timezone <seconds>")?;
            let offset: i32 = raw
                .parse()
                .with_context(|| format!("Invalid timezone offset '{}'. Expected seconds, e.g. 32400", raw))?;
            config.set_timezone_offset(offset)?;
            save(&config, path)?;
            ConfigAction::Updated
        }
        other => bail!(
            "Unknown config subcommand: '{}'. Use show, server, timezone or reset.",
            other
        ),
    };

    Ok(finish(action, path, config))
}

fn finish(action: ConfigAction, path: &Path, config: UserConfig) -> ConfigResult {
    tracing::info!(?action, path = %path.display(), "config command applied");
    ConfigResult::new(action, path.display().to_string(), config)
}

fn save(config: &UserConfig, path: &Path) -> Result<()> {
    config
        .save_to(path)
        .context("Failed to save user configuration")
}

use crate::commands::{self, CommandResult, GlobalOptions};
use crate::config::UserConfig;
use crate::presentation::output;
use anyhow::{Context, Result, bail};

/// CLI引数を解析し、適切なコマンドにディスパッチする
///
/// コマンドが指定されなかった場合は使用方法を表示して `None` を返す。
pub async fn parse_args(args: &[String]) -> Result<Option<(GlobalOptions, CommandResult)>> {
    let (options, rest) = parse_global_flags(args.get(1..).unwrap_or_default())?;

    let Some(command) = rest.first() else {
        output::print_usage();
        return Ok(None);
    };

    tracing::debug!(command = %command, machine = options.machine_output, "dispatching command");

    let result = match command.as_str() {
        "classify" => {
            let file_path = rest
                .get(1)
                .context("Please specify an image path for classify command")?;
            commands::classify::execute(file_path, &options)
                .await
                .context("Classify command failed")?
        }
        "session" => commands::session::execute(&options)
            .await
            .context("Session command failed")?,
        "health" => commands::health::execute(&options)
            .await
            .context("Health command failed")?,
        "info" => commands::info::execute(&options)
            .await
            .context("Info command failed")?,
        "config" => commands::config::execute(&rest[1..])
            .await
            .context("Config command failed")?,
        "help" | "--help" | "-h" => commands::help::execute().await?,
        _ => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            command
        ),
    };

    Ok(Some((options, result)))
}

/// 先頭のグローバルフラグを取り出す
///
/// フラグはコマンド名より前に置く。残りの引数（コマンド名以降）を返す。
pub fn parse_global_flags(args: &[String]) -> Result<(GlobalOptions, &[String])> {
    let mut options = GlobalOptions::default();
    let mut index = 0;

    while let Some(arg) = args.get(index) {
        match arg.as_str() {
            "--machine" => {
                options.machine_output = true;
                index += 1;
            }
            "--server" => {
                let url = args
                    .get(index + 1)
                    .context("Please specify a URL after --server")?;
                options.server = Some(server_override(url)?);
                index += 2;
            }
            other if other.starts_with("--server=") => {
                options.server = Some(server_override(&other["--server=".len()..])?);
                index += 1;
            }
            other if other.starts_with("--") && other != "--help" => {
                bail!("Unknown flag: '{}'. Use 'help' to see available flags.", other)
            }
            _ => break,
        }
    }

    Ok((options, &args[index..]))
}

fn server_override(url: &str) -> Result<String> {
    UserConfig::validate_server_url(url)?;
    Ok(url.trim().trim_end_matches('/').to_string())
}

/// 引数の解析に失敗した場合でもエラー出力形式を決められるようにする
pub fn wants_machine_output(args: &[String]) -> bool {
    args.iter().skip(1).any(|a| a == "--machine")
}

/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読）または
/// 機械向け（JSON）形式で出力する責務を担います。
/// CLI使用方法の表示もこのモジュールが担当します。
use crate::commands::result::{CommandResult, ConfigAction, SessionEvent};
use crate::presentation::display;
use anyhow::Result;

/// ヘルプテキスト（単一の情報源）
const HELP_TEXT: &str = "xrayscan
Classify chest X-ray images as NORMAL or PNEUMONIA using a remote model server

Usage:
  xrayscan [--machine] [--server <url>] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
                     Works for both success and error cases
  --server <url>   - Use this server instead of the configured one

Available commands:
  classify <file>  - Validate, preview and classify a JPG/PNG image (max 16MB)
  session          - Start an interactive session (type 'help' inside)
  health           - Check whether the server is running and the model is loaded
  info             - Show the server's name, version and model
  config [show]    - Show the user configuration
  config server <url>
                   - Save the classification server URL
  config timezone <seconds>
                   - Save the timezone offset used for analysis times
  config reset     - Restore the default configuration
  help             - Display this help message

Machine-Readable Output:
  --machine classify chest.png   - JSON result object
  --machine session              - One JSON event per line, then a summary

Error Output:
  Normal mode:   Human-readable error messages to stderr
  --machine:     JSON error object with exit_code and hint fields

Logging:
  XRAYSCAN_LOG=debug xrayscan classify chest.png";

const SESSION_HELP_TEXT: &str = "Session commands:
  open <path>      - Select an image
  drop <path>...   - Drop images (only the first one is used)
  analyze          - Classify the selected image
  change           - Discard the selection and pick another image
  another          - Start over after a result
  status           - Show the current state
  help             - Display this help message
  quit             - Leave the session";

/// コマンド使用方法を表示する
///
/// CLI引数が不正な場合や、ヘルプが必要な場合に呼び出されます。
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

pub fn print_session_help() {
    eprintln!("{}", SESSION_HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
///
/// # Output
/// * `machine_output = false`: 人間向けの詳細メッセージ（stderr）
/// * `machine_output = true`: 機械可読JSON（stdout）
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        output_machine_readable(result)?;
    } else {
        output_human_readable(result);
    }

    Ok(())
}

/// セッション中の1イベントをJSON1行で出力（stdout）
pub fn output_session_event(event: &SessionEvent) -> Result<()> {
    let mut json = serde_json::to_value(event)?;
    if let Some(object) = json.as_object_mut() {
        let success = !matches!(event, SessionEvent::Error { .. });
        object.insert("success".to_string(), serde_json::Value::Bool(success));
    }
    println!("{}", serde_json::to_string(&json)?);
    Ok(())
}

/// 人間向けの詳細メッセージを出力（stderr）
///
/// classify と session の結果本体は表示面がすでに描画しているので、
/// ここでは補足だけを出す。
fn output_human_readable(result: &CommandResult) {
    for line in human_lines(result) {
        eprintln!("{}", line);
    }
}

fn human_lines(result: &CommandResult) -> Vec<String> {
    let mut lines = Vec::new();

    match result {
        CommandResult::Classify(r) => {
            if let Some(health) = &r.health
                && health.is_model_missing()
            {
                lines.push(String::new());
                lines.push("Note: the server reported that the model is not loaded.".to_string());
            }
            lines.push(String::new());
            lines.push(format!("Analyzed by {}", r.server));
        }
        CommandResult::Session(r) => {
            lines.push(String::new());
            lines.push(format!(
                "Session finished: {} image(s) analyzed.",
                r.analyses
            ));
        }
        CommandResult::Health(r) => {
            lines.push(format!("Server:       {}", r.server));
            lines.extend(display::health_lines(&r.health));
            if r.health.is_model_missing() {
                lines.push(String::new());
                lines.push("Model not loaded on server. Classification requests will fail.".to_string());
            }
        }
        CommandResult::Info(r) => {
            lines.push(format!("{:<13} {}", "Server:", r.server));
            lines.extend(display::info_lines(&r.info));
        }
        CommandResult::Config(r) => {
            match r.action {
                ConfigAction::Show => {}
                ConfigAction::Updated => lines.push("✓ Configuration updated.".to_string()),
                ConfigAction::Reset => lines.push("✓ Configuration reset to defaults.".to_string()),
            }
            lines.push(format!("Config file:  {}", r.path));
            lines.push(format!("Server:       {}", r.effective_server));
            lines.push(format!("Timeout:      {}s", r.effective_timeout_seconds));
            lines.push(format!(
                "Timezone:     {} seconds",
                r.config.timezone_offset_seconds
            ));
        }
        CommandResult::Help => {
            lines.push(HELP_TEXT.to_string());
        }
    }

    lines
}

/// 機械可読JSONを組み立てる
///
/// `command` タグ付きでシリアライズし、`success: true` を加える。
fn machine_json(result: &CommandResult) -> Result<serde_json::Value> {
    let mut json = serde_json::to_value(result)?;
    if let Some(object) = json.as_object_mut() {
        object.insert("success".to_string(), serde_json::Value::Bool(true));
    }
    Ok(json)
}

/// 機械可読JSONを出力（stdout）
fn output_machine_readable(result: &CommandResult) -> Result<()> {
    let json = machine_json(result)?;
    println!("{}", serde_json::to_string(&json)?);
    Ok(())
}

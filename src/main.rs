mod api;
mod cli;
mod commands;
mod config;
mod domain;
mod error_severity;
mod presentation;
mod session;

#[cfg(test)]
mod test_support;

use api::error::InfraError;
use config::APP_CONFIG;
use config::error::ConfigError;
use domain::error::DomainError;
use session::error::SessionError;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let machine_output = cli::wants_machine_output(&args);

    match cli::parse_args(&args).await {
        Ok(Some((options, result))) => {
            if let Err(e) = presentation::output::output_result(&result, options.machine_output) {
                handle_error(e, options.machine_output);
            }
        }
        Ok(None) => {}
        Err(e) => handle_error(e, machine_output),
    }
}

/// ログ出力を初期化する（stderr、`XRAYSCAN_LOG` でフィルタ）
fn init_tracing() {
    let filter = EnvFilter::try_from_env(APP_CONFIG.logging.env_var)
        .unwrap_or_else(|_| EnvFilter::new(APP_CONFIG.logging.default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    if machine_output {
        let json = serde_json::json!({
            "success": false,
            "error": format!("{:#}", error),
            "exit_code": exit_code,
            "hint": hint,
        });
        println!("{}", json);
        std::process::exit(exit_code);
    }

    eprintln!("\nError: {}", error);

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }

    std::process::exit(exit_code);
}

/// エラーチェーンから適切な終了コードを決定
///
/// `SessionError` は内側のエラーを透過的に包むため、先に判定する。
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(session_err) = cause.downcast_ref::<SessionError>() {
            return session_err.severity().exit_code();
        }

        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.severity().exit_code();
        }

        if let Some(infra_err) = cause.downcast_ref::<InfraError>() {
            return infra_err.severity().exit_code();
        }

        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.severity().exit_code();
        }
    }

    // 不明なエラー（引数の誤りなど）
    1
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    for cause in error.chain() {
        let hint = if let Some(e) = cause.downcast_ref::<SessionError>() {
            e.hint()
        } else if let Some(e) = cause.downcast_ref::<DomainError>() {
            e.hint()
        } else if let Some(e) = cause.downcast_ref::<InfraError>() {
            e.hint()
        } else if let Some(e) = cause.downcast_ref::<ConfigError>() {
            e.hint()
        } else {
            None
        };

        if let Some(hint) = hint {
            return Some(hint.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_from_wrapped_session_error() {
        let err: anyhow::Error = Err::<(), _>(SessionError::from(DomainError::NoFileSelected))
            .context("Failed to classify the image")
            .unwrap_err();

        assert_eq!(determine_exit_code(&err), 1);
        assert!(get_error_hint(&err).is_some());
    }

    #[test]
    fn test_exit_code_for_transport_failure() {
        let err: anyhow::Error = Err::<(), _>(InfraError::network("connection refused"))
            .context("Health command failed")
            .unwrap_err();

        assert_eq!(determine_exit_code(&err), 3);
    }

    #[test]
    fn test_exit_code_for_config_error() {
        let err: anyhow::Error = ConfigError::validation_error("bad").into();
        assert_eq!(determine_exit_code(&err), 2);
    }

    #[test]
    fn test_unknown_error_defaults_to_one() {
        let err = anyhow::anyhow!("Unknown command: 'upload'");
        assert_eq!(determine_exit_code(&err), 1);
        assert!(get_error_hint(&err).is_none());
    }
}

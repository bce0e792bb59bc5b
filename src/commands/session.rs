/// 対話セッションコマンド
///
/// stdin から操作を1行ずつ読み、同じコントローラーに順に渡します。
/// 各操作の失敗は通知されるだけでセッションは続き、`quit` か入力終端で終了します。
use crate::commands::result::{CommandResult, SessionEvent, SessionResult};
use crate::commands::{GlobalOptions, connect};
use crate::presentation::input::{LineInput, SessionCommand, parse_session_command};
use crate::presentation::output;
use crate::presentation::view::{TerminalView, ViewMode};
use crate::session::error::SessionError;
use crate::session::service::ClassificationService;
use crate::session::view::{Notification, NotificationKind, View};
use crate::session::{Controller, ControllerOptions, probe_health};
use anyhow::Result;
use tokio::io::AsyncRead;

/// 対話セッションを実行する
pub async fn execute(options: &GlobalOptions) -> Result<CommandResult> {
    let (user_config, client) = connect(options)?;
    let view = TerminalView::new(
        options.view_mode(ViewMode::Interactive),
        user_config.timezone_offset_seconds,
    );

    if !options.machine_output {
        eprintln!("xrayscan session connected to {}", client.base_url());
        eprintln!("Type 'help' for available commands, 'quit' to exit.");
    }

    let mut input = LineInput::stdin();
    let result = run_session(
        client,
        view,
        &mut input,
        options.machine_output,
        ControllerOptions::default(),
    )
    .await?;

    Ok(CommandResult::Session(result))
}

/// 入力が尽きるまで操作をコントローラーに渡す
///
/// ヘルスチェックは入力待ちと並行して進め、完了を待たずに最初の操作から受け付ける。
pub async fn run_session<V, S, R>(
    service: S,
    view: V,
    input: &mut LineInput<R>,
    machine_output: bool,
    controller_options: ControllerOptions,
) -> Result<SessionResult>
where
    V: View,
    S: ClassificationService,
    R: AsyncRead + Unpin,
{
    let mut controller = Controller::new(view, &service, controller_options);

    let probe = probe_health(&service);
    tokio::pin!(probe);
    let mut probed = false;

    let mut analyses = 0;

    loop {
        let line = tokio::select! {
            health = &mut probe, if !probed => {
                probed = true;
                tracing::debug!(reachable = health.is_some(), "startup health check finished");
                continue;
            }
            line = input.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };

        let command = match parse_session_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                controller
                    .view()
                    .notify(&Notification::new(NotificationKind::Warning, e.to_string()));
                if machine_output {
                    output::output_session_event(&SessionEvent::Error {
                        error: e.to_string(),
                        exit_code: 1,
                        hint: Some("Type 'help' to see available commands.".to_string()),
                    })?;
                }
                continue;
            }
        };

        tracing::debug!(?command, state = %controller.state(), "session command");

        let outcome: Result<SessionEvent, SessionError> = match command {
            SessionCommand::Open(path) => {
                let chosen = controller.choose_file(&path).await;
                chosen.map(|()| accepted_event(&controller))
            }
            SessionCommand::Drop(paths) if paths.is_empty() => {
                controller.drop_files(&paths).await.map(|()| SessionEvent::Ignored)
            }
            SessionCommand::Drop(paths) => {
                let dropped = controller.drop_files(&paths).await;
                dropped.map(|()| accepted_event(&controller))
            }
            SessionCommand::Analyze => controller.analyze().await.map(|result| {
                analyses += 1;
                SessionEvent::Analyzed { result }
            }),
            SessionCommand::Change | SessionCommand::Another => {
                controller.reset();
                Ok(SessionEvent::Reset)
            }
            SessionCommand::Status => {
                let file = controller.selected_file().map(|f| f.name().to_string());
                let message = match &file {
                    Some(name) => format!("State: {} ({})", controller.state(), name),
                    None => format!("State: {}", controller.state()),
                };
                controller.view().notify(&Notification::info(message));
                Ok(SessionEvent::Status {
                    state: controller.state(),
                    file,
                })
            }
            SessionCommand::Help => {
                if !machine_output {
                    output::print_session_help();
                }
                Ok(SessionEvent::Ignored)
            }
            SessionCommand::Quit => break,
        };

        if machine_output {
            let event = outcome.unwrap_or_else(|e| SessionEvent::Error {
                error: e.to_string(),
                exit_code: e.severity().exit_code(),
                hint: e.hint().map(str::to_string),
            });
            output::output_session_event(&event)?;
        }
    }

    tracing::info!(analyses, state = %controller.state(), "session finished");

    Ok(SessionResult {
        analyses,
        final_state: controller.state(),
    })
}

fn accepted_event<V: View, S: ClassificationService>(controller: &Controller<V, S>) -> SessionEvent {
    match controller.preview() {
        Some(preview) => SessionEvent::FileAccepted {
            image: preview.clone(),
        },
        None => SessionEvent::Ignored,
    }
}

/// セッション層のエラー定義
///
/// コントローラーの操作が失敗した理由。ドメイン層とインフラ層のエラーに加えて、
/// サーバーが分類を拒否した場合と、現在の状態では実行できない操作を表す。
use crate::api::error::InfraError;
use crate::domain::error::DomainError;
use crate::error_severity::ErrorSeverity;
use crate::session::state::UiState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),

    /// サーバーが `success: false` を返した
    #[error("classification rejected by server: {message}")]
    Rejected { message: String },

    /// 現在の状態では実行できない操作
    #[error("cannot {action} while {state}")]
    InvalidTransition { action: &'static str, state: UiState },
}

impl SessionError {
    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Domain(e) => e.severity(),
            Self::Infra(e) => e.severity(),
            Self::Rejected { .. } => ErrorSeverity::SystemError,
            Self::InvalidTransition { .. } => ErrorSeverity::UserError,
        }
    }

    /// 画面の一時通知に表示するメッセージ
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(e) => e.user_message(),
            Self::Infra(e) => e.user_message().to_string(),
            Self::Rejected { message } => message.clone(),
            Self::InvalidTransition { action, state } => {
                format!("Cannot {} while {}.", action, state)
            }
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Domain(e) => e.hint(),
            Self::Infra(e) => e.hint(),
            Self::Rejected { .. } => {
                Some("The server could not classify this image. Check that it is a chest X-ray in JPG or PNG format.")
            }
            Self::InvalidTransition { .. } => {
                Some("Use 'change' or 'another' to start over with a new image.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_errors_keep_their_messages() {
        let err: SessionError = DomainError::NoFileSelected.into();
        assert_eq!(err.user_message(), "Please select an image first");
        assert_eq!(err.severity(), ErrorSeverity::UserError);

        let err: SessionError = InfraError::network("refused").into();
        assert_eq!(
            err.user_message(),
            "Failed to connect to server. Please try again."
        );
        assert_eq!(err.severity().exit_code(), 3);
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = SessionError::InvalidTransition {
            action: "analyze",
            state: UiState::ResultShown,
        };
        assert_eq!(err.to_string(), "cannot analyze while showing a result");
        assert_eq!(err.user_message(), "Cannot analyze while showing a result.");
    }
}

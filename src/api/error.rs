use std::io;
/// インフラ層のエラー定義
///
/// 分類サーバーとの通信で発生するエラーを構造化して定義。
/// どのエラーも利用者には「サーバーに接続できない」として通知される。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    /// ネットワークエラー
    #[error("network error: {message}")]
    Network { message: String },

    /// API通信エラー（想定外のHTTPステータス）
    #[error("API error: {endpoint} - {message}")]
    Api {
        endpoint: String,
        message: String,
        status_code: Option<u16>,
    },

    /// 応答ボディを解釈できない
    #[error("invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// タイムアウトエラー
    #[error("operation timed out: {operation}")]
    Timeout { operation: String },

    /// その他のI/Oエラー
    #[error("I/O error")]
    Io(#[from] io::Error),
}

impl InfraError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    pub fn api(
        endpoint: impl Into<String>,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            message: message.into(),
            status_code,
        }
    }

    pub fn invalid_response(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::SystemError
    }

    /// 画面の一時通知に表示するメッセージ
    pub fn user_message(&self) -> &'static str {
        "Failed to connect to server. Please try again."
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => Some(
                "Make sure the classification server is running, or set it with 'xrayscan config server <url>'.",
            ),
            Self::InvalidResponse { .. } => {
                Some("The server answered with an unexpected payload. Check that --server points to the classification service.")
            }
            Self::Api { .. } | Self::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = InfraError::api("/health", "Internal Server Error", Some(500));
        assert_eq!(err.to_string(), "API error: /health - Internal Server Error");

        let err = InfraError::timeout("POST /upload");
        assert_eq!(err.to_string(), "operation timed out: POST /upload");
    }

    #[test]
    fn test_all_variants_share_user_message() {
        let errors = [
            InfraError::network("refused"),
            InfraError::timeout("POST /upload"),
            InfraError::invalid_response("/upload", "expected value"),
        ];
        for err in errors {
            assert_eq!(
                err.user_message(),
                "Failed to connect to server. Please try again."
            );
            assert_eq!(err.severity(), ErrorSeverity::SystemError);
        }
    }
}
